//! Unicode segmentation capability
//!
//! Grapheme clustering, script itemization and bidi run decomposition sit
//! behind [`UnicodeSegmenter`] so the shaping passes can be exercised with
//! hand-built runs. [`DefaultSegmenter`] implements it with
//! `unicode-segmentation`, `unicode-script` and `unicode-bidi`.

use crate::{Direction, Script, Span};
use unicode_bidi::{BidiInfo, Level};
use unicode_segmentation::UnicodeSegmentation;

/// A maximal run of codepoints sharing one script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRun {
    /// Codepoint indices covered by the run
    pub range: Span,
    pub script: Script,
}

/// A run of codepoints sharing one resolved direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRun {
    /// Codepoint indices covered by the run, in logical order
    pub range: Span,
    pub direction: Direction,
}

impl BidiRun {
    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }
}

/// Unicode text analysis used by the shaping passes
pub trait UnicodeSegmenter {
    /// Extended grapheme clusters of `text` as `(byte offset, cluster)` pairs
    fn grapheme_clusters<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)>;

    /// Script runs over `codepoints`. Codepoints left uncovered are
    /// treated as [`Script::Common`].
    fn script_runs(&self, codepoints: &[char]) -> Vec<ScriptRun>;

    /// Direction of the first strong character, if any
    fn base_direction(&self, codepoints: &[char]) -> Option<Direction>;

    /// Direction runs of `codepoints` in visual order
    fn bidi_runs(&self, codepoints: &[char], base: Direction) -> Vec<BidiRun>;
}

/// Segmenter backed by the Unicode data crates
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSegmenter;

impl UnicodeSegmenter for DefaultSegmenter {
    fn grapheme_clusters<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        text.grapheme_indices(true).collect()
    }

    fn script_runs(&self, codepoints: &[char]) -> Vec<ScriptRun> {
        let mut runs: Vec<ScriptRun> = Vec::new();

        for (i, &ch) in codepoints.iter().enumerate() {
            let script = Script::of(ch);

            // Neutrals join the run in progress
            if let Some(run) = runs.last_mut() {
                if script.is_neutral() || run.script == script {
                    run.range.end = i + 1;
                    continue;
                }
            }

            // Leading neutrals are claimed by the first real run
            if script.is_neutral() {
                continue;
            }

            let start = runs.last().map_or(0, |run| run.range.end);
            runs.push(ScriptRun {
                range: Span::new(start, i + 1),
                script,
            });
        }

        runs
    }

    fn base_direction(&self, codepoints: &[char]) -> Option<Direction> {
        let text: String = codepoints.iter().collect();
        match unicode_bidi::get_base_direction(text.as_str()) {
            unicode_bidi::Direction::Ltr => Some(Direction::Ltr),
            unicode_bidi::Direction::Rtl => Some(Direction::Rtl),
            unicode_bidi::Direction::Mixed => None,
        }
    }

    fn bidi_runs(&self, codepoints: &[char], base: Direction) -> Vec<BidiRun> {
        if codepoints.is_empty() {
            return Vec::new();
        }

        let text: String = codepoints.iter().collect();

        // Byte offset -> codepoint index, including the end offset
        let mut codepoint_at = vec![0usize; text.len() + 1];
        for (index, (offset, _)) in text.char_indices().enumerate() {
            codepoint_at[offset] = index;
        }
        codepoint_at[text.len()] = codepoints.len();

        let level = match base {
            Direction::Ltr => Level::ltr(),
            Direction::Rtl => Level::rtl(),
        };
        let bidi_info = BidiInfo::new(&text, Some(level));

        let mut runs = Vec::new();
        for para in &bidi_info.paragraphs {
            let (_, level_runs) = bidi_info.visual_runs(para, para.range.clone());
            for range in level_runs {
                let direction = if bidi_info.levels[range.start].is_rtl() {
                    Direction::Rtl
                } else {
                    Direction::Ltr
                };
                runs.push(BidiRun {
                    range: Span::new(codepoint_at[range.start], codepoint_at[range.end]),
                    direction,
                });
            }
        }

        runs
    }
}
