//! In-memory fonts for unit tests

use crate::provider::{FontProvider, FontRef, GlyphLookupError};
use crate::{FontHandle, Result, TextError};
use std::collections::{HashMap, HashSet};

/// A font described by tables of per-em values
#[derive(Debug, Clone)]
pub struct StubFont {
    advances: HashMap<char, f32>,
    kerning: HashMap<(char, char), f32>,
    /// Mapped codepoints whose advance lookup reports "not found"
    hollow: HashSet<char>,
    /// Mapped codepoints whose advance lookup fails in the backend
    broken: HashSet<char>,
    ascent: f32,
    descent: f32,
    line_height: f32,
}

impl StubFont {
    /// Every character of `coverage` maps to a glyph half an em wide
    pub fn new(coverage: &str) -> Self {
        Self {
            advances: coverage.chars().map(|ch| (ch, 0.5)).collect(),
            kerning: HashMap::new(),
            hollow: HashSet::new(),
            broken: HashSet::new(),
            ascent: 0.75,
            descent: 0.25,
            line_height: 1.25,
        }
    }

    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    pub fn with_kerning(mut self, previous: char, ch: char, adjust: f32) -> Self {
        self.kerning.insert((previous, ch), adjust);
        self
    }

    pub fn with_metrics(mut self, ascent: f32, descent: f32, line_height: f32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self.line_height = line_height;
        self
    }

    pub fn with_hollow(mut self, ch: char) -> Self {
        self.hollow.insert(ch);
        self
    }

    pub fn with_broken(mut self, ch: char) -> Self {
        self.broken.insert(ch);
        self
    }
}

impl FontRef for StubFont {
    fn has_glyph(&self, codepoint: char) -> bool {
        self.advances.contains_key(&codepoint)
            || self.hollow.contains(&codepoint)
            || self.broken.contains(&codepoint)
    }

    fn advance_width(
        &self,
        codepoint: char,
        size: f32,
    ) -> std::result::Result<f32, GlyphLookupError> {
        if self.broken.contains(&codepoint) {
            return Err(GlyphLookupError::Backend("corrupt hmtx".into()));
        }
        if self.hollow.contains(&codepoint) {
            return Err(GlyphLookupError::NotFound);
        }
        self.advances
            .get(&codepoint)
            .map(|advance| advance * size)
            .ok_or(GlyphLookupError::NotFound)
    }

    fn kerning(&self, previous: char, codepoint: char, size: f32) -> f32 {
        self.kerning.get(&(previous, codepoint)).map_or(0.0, |k| k * size)
    }

    fn ascent(&self, size: f32) -> f32 {
        self.ascent * size
    }

    fn descent(&self, size: f32) -> f32 {
        self.descent * size
    }

    fn line_height(&self, size: f32) -> f32 {
        self.line_height * size
    }
}

/// Provider over a list of stub fonts; handle `n` is the `n`-th font
#[derive(Debug, Default)]
pub struct StubProvider {
    fonts: Vec<StubFont>,
    default: Option<FontHandle>,
    /// Font registered by `load_default`
    discoverable: Option<StubFont>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, font: StubFont) -> FontHandle {
        self.fonts.push(font);
        FontHandle(self.fonts.len() as u32 - 1)
    }

    pub fn set_default(&mut self, handle: FontHandle) {
        self.default = Some(handle);
    }

    pub fn set_discoverable(&mut self, font: StubFont) {
        self.discoverable = Some(font);
    }
}

impl FontProvider for StubProvider {
    type Font<'a> = &'a StubFont;

    fn resolve(&self, handle: FontHandle) -> Option<&StubFont> {
        self.fonts.get(handle.0 as usize)
    }

    fn default_handle(&self) -> Option<FontHandle> {
        self.default
    }

    fn load_default(&mut self) -> Result<FontHandle> {
        let font = self
            .discoverable
            .take()
            .ok_or_else(|| TextError::FontNotFound("no system fonts".into()))?;
        let handle = self.add(font);
        self.default = Some(handle);
        Ok(handle)
    }
}
