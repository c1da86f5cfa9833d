//! Shaping configuration

use crate::{FontHandle, Script};
use serde::{Deserialize, Serialize};

/// Paragraph direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// Options for one [`crate::TextShaper::shape`] call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
    /// Base font; the provider's default font when absent
    pub font: Option<FontHandle>,
    /// Requested size, must be positive
    pub size: f32,
    /// Substitute tried before U+FFFD when a font lacks a glyph
    pub fallback_codepoint: Option<char>,
    /// Forced paragraph direction; auto-detected per line when absent
    pub direction: Option<Direction>,
    /// Fonts tried in order when neither the base font nor a script
    /// fallback covers a cluster
    pub fallback_fonts: Vec<FontHandle>,
    /// Per-script fallback fonts, consulted before `fallback_fonts`
    pub script_fallbacks: Vec<(Script, FontHandle)>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            font: None,
            size: 12.0,
            fallback_codepoint: Some('?'),
            direction: None,
            fallback_fonts: Vec::new(),
            script_fallbacks: Vec::new(),
        }
    }
}

impl ShapeOptions {
    /// Options with default settings at `size`
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_font(mut self, font: FontHandle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_fallback_codepoint(mut self, codepoint: Option<char>) -> Self {
        self.fallback_codepoint = codepoint;
        self
    }

    pub fn with_fallback_font(mut self, font: FontHandle) -> Self {
        self.fallback_fonts.push(font);
        self
    }

    pub fn with_script_fallback(mut self, script: Script, font: FontHandle) -> Self {
        self.script_fallbacks.push((script, font));
        self
    }

    /// Every handle the options refer to, base font first
    pub(crate) fn referenced_fonts(&self) -> impl Iterator<Item = FontHandle> + '_ {
        self.font
            .into_iter()
            .chain(self.script_fallbacks.iter().map(|(_, handle)| *handle))
            .chain(self.fallback_fonts.iter().copied())
    }
}
