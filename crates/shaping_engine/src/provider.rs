//! Font provider capability interfaces
//!
//! The shaping core never parses font files itself. It talks to a
//! [`FontProvider`] that owns the parsed font resources and hands out
//! [`FontRef`] views for glyph coverage, advances, kerning and vertical
//! metrics. [`crate::FontLibrary`] is the rustybuzz-backed implementation;
//! tests use in-memory stubs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque identifier of a font registered with a [`FontProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontHandle(pub u32);

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font#{}", self.0)
    }
}

/// Outcome of a failed per-glyph lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphLookupError {
    /// The font has no glyph for the codepoint. Recovered by skipping.
    #[error("glyph not found")]
    NotFound,

    /// Any other backend failure. Aborts the shaping call.
    #[error("font backend error: {0}")]
    Backend(String),
}

/// Vertical metrics of a font at a given size, in output units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalMetrics {
    /// Distance from the baseline to the top of the line box (positive)
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box (positive)
    pub descent: f32,
    /// Recommended baseline-to-baseline distance
    pub line_height: f32,
}

impl VerticalMetrics {
    /// Grow every component to cover `other`; never shrinks.
    pub fn widen(&mut self, other: &VerticalMetrics) {
        self.ascent = self.ascent.max(other.ascent);
        self.descent = self.descent.max(other.descent);
        self.line_height = self.line_height.max(other.line_height);
    }
}

/// A resolved, queryable font
pub trait FontRef {
    /// Whether the font maps `codepoint` to a glyph
    fn has_glyph(&self, codepoint: char) -> bool;

    /// Horizontal advance of `codepoint` at `size`
    fn advance_width(&self, codepoint: char, size: f32) -> Result<f32, GlyphLookupError>;

    /// Pairwise kerning adjustment between two codepoints at `size`.
    /// Zero when the font carries no adjustment for the pair.
    fn kerning(&self, previous: char, codepoint: char, size: f32) -> f32;

    fn ascent(&self, size: f32) -> f32;

    fn descent(&self, size: f32) -> f32;

    fn line_height(&self, size: f32) -> f32;

    /// All three vertical metrics at once
    fn vertical_metrics(&self, size: f32) -> VerticalMetrics {
        VerticalMetrics {
            ascent: self.ascent(size),
            descent: self.descent(size),
            line_height: self.line_height(size),
        }
    }
}

impl<T: FontRef + ?Sized> FontRef for &T {
    fn has_glyph(&self, codepoint: char) -> bool {
        (**self).has_glyph(codepoint)
    }

    fn advance_width(&self, codepoint: char, size: f32) -> Result<f32, GlyphLookupError> {
        (**self).advance_width(codepoint, size)
    }

    fn kerning(&self, previous: char, codepoint: char, size: f32) -> f32 {
        (**self).kerning(previous, codepoint, size)
    }

    fn ascent(&self, size: f32) -> f32 {
        (**self).ascent(size)
    }

    fn descent(&self, size: f32) -> f32 {
        (**self).descent(size)
    }

    fn line_height(&self, size: f32) -> f32 {
        (**self).line_height(size)
    }
}

/// Owner of the font registry consulted during shaping
///
/// The engine borrows the provider for the duration of one call. Loading a
/// default font is the only operation that needs mutable access, and it
/// always happens before any font is resolved.
pub trait FontProvider {
    /// Font view handed out by [`FontProvider::resolve`]
    type Font<'a>: FontRef
    where
        Self: 'a;

    /// Resolve a handle; `None` when the handle is not registered
    fn resolve(&self, handle: FontHandle) -> Option<Self::Font<'_>>;

    /// The provider's preferred default font, if one has been chosen
    fn default_handle(&self) -> Option<FontHandle>;

    /// Discover and register a usable default font
    fn load_default(&mut self) -> crate::Result<FontHandle>;
}
