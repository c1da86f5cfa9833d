//! Visual cluster ordering for one line
//!
//! Bidi runs arrive from the segmenter in visual order but address
//! codepoints. This pass maps them onto cluster indices and produces a single
//! left-to-right cluster order for the glyph emitter.

use crate::cluster::LineClusters;
use crate::{Direction, UnicodeSegmenter};

/// Paragraph direction of a line: the explicit override, else the first
/// strong character, else left-to-right.
pub fn resolve_direction<S: UnicodeSegmenter + ?Sized>(
    segmenter: &S,
    line: &LineClusters,
    requested: Option<Direction>,
) -> Direction {
    if let Some(direction) = requested {
        return direction;
    }
    if line.codepoints.is_empty() {
        return Direction::Ltr;
    }
    segmenter
        .base_direction(&line.codepoints)
        .unwrap_or(Direction::Ltr)
}

/// Cluster indices of `line` in visual left-to-right order.
///
/// Within a run, consecutive codepoints of one cluster contribute a single
/// entry; right-to-left runs are reversed. A run whose first cluster equals
/// the last one appended does not repeat it. Without any runs the logical
/// order is used unchanged.
pub fn visual_cluster_order<S: UnicodeSegmenter + ?Sized>(
    segmenter: &S,
    line: &LineClusters,
    base: Direction,
) -> Vec<usize> {
    let runs = segmenter.bidi_runs(&line.codepoints, base);
    if runs.is_empty() {
        return (0..line.clusters.len()).collect();
    }

    let mut order: Vec<usize> = Vec::with_capacity(line.clusters.len());
    let mut run_clusters: Vec<usize> = Vec::new();

    for run in &runs {
        run_clusters.clear();
        let end = run.range.end.min(line.cluster_of.len());
        let start = run.range.start.min(end);

        for &cluster in &line.cluster_of[start..end] {
            if run_clusters.last() != Some(&cluster) {
                run_clusters.push(cluster);
            }
        }

        if run.is_rtl() {
            run_clusters.reverse();
        }

        let skip_seam = usize::from(order.last().is_some() && order.last() == run_clusters.first());
        order.extend_from_slice(&run_clusters[skip_seam..]);
    }

    order
}
