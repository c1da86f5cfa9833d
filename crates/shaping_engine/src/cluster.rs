//! Grapheme clusters and script tags for one line
//!
//! All tables here are indexed by position and live only while their line
//! is being shaped.

use crate::{Script, ShapeError, Span, UnicodeSegmenter};

/// One retained grapheme cluster of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Byte range of the cluster in the full input text
    pub bytes: Span,
    /// Range of the cluster's codepoints in [`LineClusters::codepoints`]
    pub codepoints: Span,
}

/// Clusters, codepoints and script tags of one line
#[derive(Debug, Default)]
pub struct LineClusters {
    pub clusters: Vec<Cluster>,
    /// Flat codepoint buffer for the whole line
    pub codepoints: Vec<char>,
    /// Script of each codepoint, parallel to `codepoints`
    pub scripts: Vec<Script>,
    /// Owning cluster index of each codepoint, parallel to `codepoints`
    pub cluster_of: Vec<usize>,
}

impl LineClusters {
    /// Segment the line `text`, which starts at byte `line_start` of the input.
    ///
    /// A cluster made of a lone carriage return is dropped, so CRLF input
    /// behaves like LF-only input.
    pub fn build<S: UnicodeSegmenter + ?Sized>(
        segmenter: &S,
        text: &str,
        line_start: usize,
    ) -> Result<Self, ShapeError> {
        let mut line = LineClusters::default();
        line.codepoints.try_reserve(text.len())?;

        for (offset, grapheme) in segmenter.grapheme_clusters(text) {
            if grapheme == "\r" {
                continue;
            }

            let start = line.codepoints.len();
            line.codepoints.extend(grapheme.chars());
            let bytes_start = line_start + offset;

            line.clusters.push(Cluster {
                bytes: Span::new(bytes_start, bytes_start + grapheme.len()),
                codepoints: Span::new(start, line.codepoints.len()),
            });
        }

        let count = line.codepoints.len();
        line.scripts = vec![Script::Common; count];
        for run in segmenter.script_runs(&line.codepoints) {
            let end = run.range.end.min(count);
            let start = run.range.start.min(end);
            line.scripts[start..end].fill(run.script);
        }

        line.cluster_of = vec![0; count];
        for (index, cluster) in line.clusters.iter().enumerate() {
            line.cluster_of[cluster.codepoints.range()].fill(index);
        }

        Ok(line)
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Codepoints of cluster `index`
    pub fn cluster_codepoints(&self, index: usize) -> &[char] {
        &self.codepoints[self.clusters[index].codepoints.range()]
    }

    /// Script tag of cluster `index`, taken from its first codepoint
    pub fn cluster_script(&self, index: usize) -> Script {
        let first = self.clusters[index].codepoints.start;
        self.scripts.get(first).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultSegmenter;

    #[test]
    fn test_build_simple_line() {
        let line = LineClusters::build(&DefaultSegmenter, "ab", 10).unwrap();
        assert_eq!(line.clusters.len(), 2);
        assert_eq!(line.clusters[1].bytes, Span::new(11, 12));
        assert_eq!(line.clusters[1].codepoints, Span::new(1, 2));
        assert_eq!(line.scripts, vec![Script::Latin, Script::Latin]);
    }

    #[test]
    fn test_combining_sequence_is_one_cluster() {
        let line = LineClusters::build(&DefaultSegmenter, "e\u{0301}f", 0).unwrap();
        assert_eq!(line.clusters.len(), 2);
        assert_eq!(line.cluster_codepoints(0), &['e', '\u{0301}']);
        assert_eq!(line.cluster_of, vec![0, 0, 1]);
        assert_eq!(line.cluster_script(0), Script::Latin);
    }

    #[test]
    fn test_carriage_return_dropped() {
        let line = LineClusters::build(&DefaultSegmenter, "a\rb\r", 0).unwrap();
        assert_eq!(line.codepoints, vec!['a', 'b']);
        assert_eq!(line.clusters.len(), 2);
        assert_eq!(line.clusters[1].bytes, Span::new(2, 3));
    }

    #[test]
    fn test_empty_line() {
        let line = LineClusters::build(&DefaultSegmenter, "", 4).unwrap();
        assert!(line.is_empty());
        assert!(line.scripts.is_empty());
    }

    #[test]
    fn test_uncovered_codepoints_default_to_common() {
        let line = LineClusters::build(&DefaultSegmenter, "42!", 0).unwrap();
        assert!(line.scripts.iter().all(|&s| s == Script::Common));
    }
}
