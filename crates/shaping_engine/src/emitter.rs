//! Glyph emission for one line
//!
//! Walks clusters in visual order, substitutes missing glyphs, applies
//! same-font kerning and advances the pen.

use crate::cluster::LineClusters;
use crate::provider::{FontRef, GlyphLookupError, VerticalMetrics};
use crate::selector::{FontSlot, FontTable};
use crate::{GlyphPlacement, ShapeError};

/// Unicode replacement character
const REPLACEMENT: char = '\u{FFFD}';

/// The last placed glyph, used for the next kerning lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousGlyph {
    pub slot: usize,
    pub codepoint: char,
}

/// Everything the emitter reads for one line
pub struct LineInput<'a, F> {
    pub line: &'a LineClusters,
    /// Cluster indices in visual order
    pub order: &'a [usize],
    /// Selected font slot per cluster, in logical order
    pub cluster_fonts: &'a [usize],
    pub fonts: &'a FontTable<F>,
    /// Slot of the base font
    pub base: usize,
    pub size: f32,
    pub fallback_codepoint: Option<char>,
    pub line_index: usize,
}

/// Horizontal extent and vertical metrics of an emitted line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineExtent {
    pub width: f32,
    pub metrics: VerticalMetrics,
}

/// Pen state threaded from one codepoint to the next
#[derive(Debug, Clone, Copy, Default)]
struct Pen {
    x: f32,
    previous: Option<PreviousGlyph>,
}

/// Emit the placements of one line into `glyphs`.
///
/// The line's vertical metrics start from the base font and widen to cover
/// every font that actually produced a glyph.
pub fn emit_line<F: FontRef>(
    input: &LineInput<'_, F>,
    glyphs: &mut Vec<GlyphPlacement>,
) -> Result<LineExtent, ShapeError> {
    let mut metrics = input.fonts.get(input.base).metrics;
    let mut pen = Pen::default();

    glyphs.try_reserve(input.line.codepoints.len())?;

    for &cluster in input.order {
        let slot_index = input.cluster_fonts[cluster];
        let slot = input.fonts.get(slot_index);

        for &ch in input.line.cluster_codepoints(cluster) {
            let (next, placement) = emit_codepoint(input, slot, slot_index, ch, pen)?;
            pen = next;
            if let Some(placement) = placement {
                metrics.widen(&slot.metrics);
                glyphs.push(placement);
            }
        }
    }

    Ok(LineExtent {
        width: pen.x,
        metrics,
    })
}

/// Codepoint actually drawn for `ch`: itself, the configured fallback, or
/// U+FFFD, whichever the font maps first.
fn renderable_codepoint<F: FontRef>(font: &F, ch: char, fallback: Option<char>) -> Option<char> {
    if font.has_glyph(ch) {
        return Some(ch);
    }
    if let Some(fallback) = fallback.filter(|&fallback| fallback != ch) {
        if font.has_glyph(fallback) {
            return Some(fallback);
        }
    }
    font.has_glyph(REPLACEMENT).then_some(REPLACEMENT)
}

fn emit_codepoint<F: FontRef>(
    input: &LineInput<'_, F>,
    slot: &FontSlot<F>,
    slot_index: usize,
    ch: char,
    pen: Pen,
) -> Result<(Pen, Option<GlyphPlacement>), ShapeError> {
    let Some(codepoint) = renderable_codepoint(&slot.font, ch, input.fallback_codepoint) else {
        tracing::trace!(
            target: "shaping_engine::emit",
            codepoint = ?ch,
            font = %slot.handle,
            "no glyph or substitute, skipped"
        );
        return Ok((pen, None));
    };

    let mut x = pen.x;
    if let Some(previous) = pen.previous.filter(|previous| previous.slot == slot_index) {
        x += slot.font.kerning(previous.codepoint, codepoint, input.size);
        x = x.max(0.0);
    }

    let advance = match slot.font.advance_width(codepoint, input.size) {
        Ok(advance) => advance,
        Err(GlyphLookupError::NotFound) => {
            tracing::trace!(
                target: "shaping_engine::emit",
                codepoint = ?codepoint,
                font = %slot.handle,
                "advance not found, skipped"
            );
            return Ok((Pen { x, ..pen }, None));
        }
        Err(GlyphLookupError::Backend(message)) => {
            return Err(ShapeError::FontBackend {
                handle: slot.handle,
                message,
            });
        }
    };

    let placement = GlyphPlacement {
        codepoint,
        font: slot.handle,
        advance,
        x,
        line: input.line_index,
    };

    let next = Pen {
        x: x + advance,
        previous: Some(PreviousGlyph {
            slot: slot_index,
            codepoint,
        }),
    };

    Ok((next, Some(placement)))
}
