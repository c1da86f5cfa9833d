//! Font library
//!
//! Owns font data registered by the application and implements
//! [`FontProvider`] on top of rustybuzz faces. Faces are parsed when a
//! handle is resolved, so the library itself stores only bytes.

use crate::discovery::FontDiscovery;
use crate::fallback::FallbackChain;
use crate::provider::{FontProvider, FontRef, GlyphLookupError};
use crate::{FontHandle, Result, Script, TextError};
use rustybuzz::ttf_parser::{name_id, GlyphId};
use std::path::Path;
use std::sync::Arc;

/// Configuration for the font library
#[derive(Debug, Clone)]
pub struct FontLibraryConfig {
    /// Families tried for the default font before the platform list
    pub default_families: Vec<String>,
    /// Whether `load_default` may search installed system fonts
    pub allow_system_fonts: bool,
}

impl Default for FontLibraryConfig {
    fn default() -> Self {
        Self {
            default_families: Vec::new(),
            allow_system_fonts: true,
        }
    }
}

/// A registered font
#[derive(Debug, Clone)]
pub struct LoadedFont {
    /// Family name from the font's name table, if it has one
    pub family: Option<String>,
    /// Font data bytes
    pub data: Arc<Vec<u8>>,
    /// Face index within the data (for collections)
    pub index: u32,
}

/// Registry of loaded fonts addressed by [`FontHandle`]
pub struct FontLibrary {
    /// Slot per handle; unloaded fonts leave an empty slot
    fonts: Vec<Option<LoadedFont>>,
    default: Option<FontHandle>,
    fallback_chain: FallbackChain,
    discovery: Option<FontDiscovery>,
    config: FontLibraryConfig,
}

impl FontLibrary {
    /// Create an empty library with default configuration
    pub fn new() -> Self {
        Self::with_config(FontLibraryConfig::default())
    }

    pub fn with_config(config: FontLibraryConfig) -> Self {
        Self {
            fonts: Vec::new(),
            default: None,
            fallback_chain: FallbackChain::new(),
            discovery: None,
            config,
        }
    }

    /// Register font bytes, validating that face `index` parses
    pub fn load_font(&mut self, data: Vec<u8>, index: u32) -> Result<FontHandle> {
        let family = {
            let face = rustybuzz::Face::from_slice(&data, index).ok_or_else(|| {
                TextError::InvalidFontData(format!("face {} does not parse", index))
            })?;
            family_name(&face)
        };

        let handle = FontHandle(self.fonts.len() as u32);
        tracing::debug!(
            target: "shaping_engine::library",
            handle = %handle,
            family = family.as_deref().unwrap_or("<unnamed>"),
            bytes = data.len(),
            "font loaded"
        );

        self.fonts.push(Some(LoadedFont {
            family,
            data: Arc::new(data),
            index,
        }));
        Ok(handle)
    }

    /// Register a font file from disk
    pub fn load_font_file(&mut self, path: impl AsRef<Path>, index: u32) -> Result<FontHandle> {
        let data = std::fs::read(path.as_ref())?;
        self.load_font(data, index)
    }

    /// Find an installed family and register it
    pub fn load_system_family(&mut self, family: &str) -> Result<FontHandle> {
        if !self.config.allow_system_fonts {
            return Err(TextError::DiscoveryFailed(
                "system font discovery is disabled".to_string(),
            ));
        }

        if let Some(handle) = self.find_family(family) {
            return Ok(handle);
        }

        let discovery = self.discovery.get_or_insert_with(FontDiscovery::new);
        let info = discovery.select_family(family)?;
        tracing::debug!(
            target: "shaping_engine::library",
            family = info.family.as_str(),
            index = info.font_index,
            "system family matched"
        );
        let data = info.load_data()?;
        self.load_font(data, info.font_index)
    }

    /// Register the first installed family of each script fallback list,
    /// producing entries for [`crate::ShapeOptions::script_fallbacks`].
    /// Scripts with no installed family are left out.
    pub fn load_script_fallbacks(&mut self, chain: &FallbackChain) -> Vec<(Script, FontHandle)> {
        let mut fallbacks = Vec::new();

        for script in chain.scripts() {
            let loaded = chain
                .script_families(script)
                .iter()
                .find_map(|family| match self.load_system_family(family) {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        tracing::debug!(
                            target: "shaping_engine::library",
                            family = family.as_str(),
                            error = %e,
                            "fallback family unavailable"
                        );
                        None
                    }
                });

            if let Some(handle) = loaded {
                fallbacks.push((script, handle));
            }
        }

        fallbacks
    }

    /// Remove a font; its handle stops resolving
    pub fn unload(&mut self, handle: FontHandle) -> bool {
        let removed = self
            .fonts
            .get_mut(handle.0 as usize)
            .and_then(Option::take)
            .is_some();

        if removed && self.default == Some(handle) {
            self.default = None;
        }
        removed
    }

    /// Use a registered font as the default
    pub fn set_default(&mut self, handle: FontHandle) -> Result<()> {
        if self.font(handle).is_none() {
            return Err(TextError::FontNotFound(format!("{} is not loaded", handle)));
        }
        self.default = Some(handle);
        Ok(())
    }

    pub fn font(&self, handle: FontHandle) -> Option<&LoadedFont> {
        self.fonts.get(handle.0 as usize).and_then(Option::as_ref)
    }

    pub fn family_name(&self, handle: FontHandle) -> Option<&str> {
        self.font(handle).and_then(|font| font.family.as_deref())
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.fonts.iter().filter(|font| font.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fallback_chain(&self) -> &FallbackChain {
        &self.fallback_chain
    }

    /// Handle of an already loaded font of `family`
    fn find_family(&self, family: &str) -> Option<FontHandle> {
        self.fonts.iter().enumerate().find_map(|(i, font)| {
            font.as_ref()
                .and_then(|font| font.family.as_deref())
                .filter(|name| name.eq_ignore_ascii_case(family))
                .map(|_| FontHandle(i as u32))
        })
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for FontLibrary {
    type Font<'a> = LibraryFont<'a>;

    fn resolve(&self, handle: FontHandle) -> Option<LibraryFont<'_>> {
        let font = self.font(handle)?;
        rustybuzz::Face::from_slice(&font.data, font.index).map(LibraryFont::new)
    }

    fn default_handle(&self) -> Option<FontHandle> {
        self.default
    }

    fn load_default(&mut self) -> Result<FontHandle> {
        if !self.config.allow_system_fonts {
            return Err(TextError::FontNotFound(
                "no default font set and system fonts are disabled".to_string(),
            ));
        }

        let mut families = self.config.default_families.clone();
        families.extend(self.fallback_chain.default_families().iter().cloned());
        families.push("sans-serif".to_string());

        tracing::debug!(
            target: "shaping_engine::library",
            candidates = families.len(),
            "discovering default font"
        );

        for family in &families {
            match self.load_system_family(family) {
                Ok(handle) => {
                    self.default = Some(handle);
                    return Ok(handle);
                }
                Err(e) => {
                    tracing::warn!(
                        target: "shaping_engine::library",
                        family = family.as_str(),
                        error = %e,
                        "default font candidate unavailable"
                    );
                }
            }
        }

        Err(TextError::FontNotFound(format!(
            "none of {} default families could be loaded",
            families.len()
        )))
    }
}

/// Family name of a face, from its name table
fn family_name(face: &rustybuzz::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == name_id::FAMILY && name.is_unicode())
        .find_map(|name| name.to_string())
}

/// A parsed view of a library font
pub struct LibraryFont<'a> {
    face: rustybuzz::Face<'a>,
    units_per_em: f32,
}

impl<'a> LibraryFont<'a> {
    fn new(face: rustybuzz::Face<'a>) -> Self {
        let units_per_em = face.units_per_em().max(1) as f32;
        Self { face, units_per_em }
    }

    /// Convert font units to output units at `size`
    fn scale(&self, value: f32, size: f32) -> f32 {
        value * size / self.units_per_em
    }

    fn glyph(&self, codepoint: char) -> Option<GlyphId> {
        self.face.glyph_index(codepoint)
    }
}

impl FontRef for LibraryFont<'_> {
    fn has_glyph(&self, codepoint: char) -> bool {
        self.glyph(codepoint).is_some()
    }

    fn advance_width(
        &self,
        codepoint: char,
        size: f32,
    ) -> std::result::Result<f32, GlyphLookupError> {
        let glyph = self.glyph(codepoint).ok_or(GlyphLookupError::NotFound)?;
        let advance = self.face.glyph_hor_advance(glyph).ok_or_else(|| {
            GlyphLookupError::Backend(format!("no horizontal metrics for glyph {}", glyph.0))
        })?;
        Ok(self.scale(f32::from(advance), size))
    }

    /// Pair adjustment from the legacy `kern` table only; GPOS pair
    /// positioning is not consulted, so fonts that kern through GPOS
    /// report zero here.
    fn kerning(&self, previous: char, codepoint: char, size: f32) -> f32 {
        let (Some(left), Some(right)) = (self.glyph(previous), self.glyph(codepoint)) else {
            return 0.0;
        };
        let Some(kern) = self.face.tables().kern else {
            return 0.0;
        };

        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| subtable.glyphs_kerning(left, right))
            .map_or(0.0, |value| self.scale(f32::from(value), size))
    }

    fn ascent(&self, size: f32) -> f32 {
        self.scale(f32::from(self.face.ascender()), size)
    }

    fn descent(&self, size: f32) -> f32 {
        self.scale(f32::from(self.face.descender()).abs(), size)
    }

    fn line_height(&self, size: f32) -> f32 {
        let units = f32::from(self.face.ascender()) - f32::from(self.face.descender())
            + f32::from(self.face.line_gap());
        self.scale(units, size)
    }
}
