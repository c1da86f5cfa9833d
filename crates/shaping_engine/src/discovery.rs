//! System font discovery
//!
//! Finds installed fonts by family name through font-kit and reads their
//! bytes so they can be registered with a [`crate::FontLibrary`].

use crate::{Result, TextError};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a discovered font's bytes live
#[derive(Debug, Clone)]
pub enum FontSource {
    Path(PathBuf),
    Memory(Arc<Vec<u8>>),
}

/// Information about a discovered font
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Family name that was requested
    pub family: String,
    pub source: FontSource,
    /// Font index within the file (for TTC files)
    pub font_index: u32,
}

impl FontInfo {
    /// Read the font's bytes
    pub fn load_data(&self) -> Result<Vec<u8>> {
        match &self.source {
            FontSource::Path(path) => std::fs::read(path).map_err(|e| {
                TextError::LoadingFailed(format!("{}: {}", path.display(), e))
            }),
            FontSource::Memory(bytes) => Ok(bytes.as_ref().clone()),
        }
    }
}

/// Map a family name onto font-kit's generic families where applicable
fn family_name(family: &str) -> FamilyName {
    match family.to_lowercase().as_str() {
        "sans-serif" => FamilyName::SansSerif,
        "serif" => FamilyName::Serif,
        "monospace" => FamilyName::Monospace,
        "cursive" => FamilyName::Cursive,
        "fantasy" => FamilyName::Fantasy,
        _ => FamilyName::Title(family.to_string()),
    }
}

/// Font discovery service over the platform font source
pub struct FontDiscovery {
    source: SystemSource,
}

impl FontDiscovery {
    pub fn new() -> Self {
        Self {
            source: SystemSource::new(),
        }
    }

    /// Best regular-style match for a family name or generic family
    pub fn select_family(&self, family: &str) -> Result<FontInfo> {
        let handle = self
            .source
            .select_best_match(&[family_name(family)], &Properties::new())
            .map_err(|e| TextError::FontNotFound(format!("{}: {:?}", family, e)))?;

        let (source, font_index) = match handle {
            Handle::Path { path, font_index } => (FontSource::Path(path), font_index),
            Handle::Memory { bytes, font_index } => (FontSource::Memory(bytes), font_index),
        };

        Ok(FontInfo {
            family: family.to_string(),
            source,
            font_index,
        })
    }
}

impl Default for FontDiscovery {
    fn default() -> Self {
        Self::new()
    }
}
