//! Shaping Engine - Multi-line, bidirectional text shaping
//!
//! This crate turns UTF-8 text into positioned glyphs: one placement per
//! rendered codepoint, with per-line and whole-text metrics. Fonts are
//! selected per grapheme cluster so mixed-script text falls back cleanly.
//!
//! # Modules
//!
//! - `segmenter`: Grapheme, script and bidi segmentation
//! - `cluster`: Per-line cluster tables with script tags
//! - `bidi`: Base direction and visual cluster order
//! - `selector`: Cluster-level font selection
//! - `emitter`: Glyph emission, fallback substitution and kerning
//! - `shaper`: Line splitting, the shaping pipeline and metric aggregation
//! - `library`: Font registry backed by rustybuzz faces
//! - `discovery`: System font discovery
//! - `fallback`: Platform family lists for defaults and script fallback

mod error;
mod options;
mod provider;
mod script;
mod span;
pub mod bidi;
pub mod cluster;
pub mod discovery;
pub mod emitter;
pub mod fallback;
pub mod library;
pub mod segmenter;
pub mod selector;
pub mod shaper;

#[cfg(test)]
mod test_support;

pub use error::*;
pub use options::*;
pub use provider::*;
pub use script::*;
pub use span::*;

// Re-export commonly used types from submodules
pub use discovery::{FontDiscovery, FontInfo, FontSource};
pub use fallback::FallbackChain;
pub use library::{FontLibrary, FontLibraryConfig, LibraryFont, LoadedFont};
pub use segmenter::{BidiRun, DefaultSegmenter, ScriptRun, UnicodeSegmenter};
pub use shaper::{
    split_lines, GlyphPlacement, LayoutMetrics, LineMetrics, ShapeResult, TextShaper,
};
