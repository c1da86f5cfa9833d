//! Platform font families for default-font discovery and script fallback
//!
//! The lists name families commonly installed on each platform. They feed
//! [`crate::FontLibrary::load_default`] and
//! [`crate::FontLibrary::load_script_fallbacks`]; the shaper itself only
//! ever sees font handles.

use crate::Script;

/// Ordered family lists for the default font and per-script fallbacks
#[derive(Debug, Clone)]
pub struct FallbackChain {
    /// Families tried, in order, for the default font
    default_families: Vec<String>,
    /// Per-script family lists, in registration order
    script_fallbacks: Vec<(Script, Vec<String>)>,
}

impl FallbackChain {
    /// Create a chain with the platform defaults
    pub fn new() -> Self {
        let mut chain = Self::empty();
        chain.initialize_defaults();
        chain
    }

    /// Create a chain with no families at all
    pub fn empty() -> Self {
        Self {
            default_families: Vec::new(),
            script_fallbacks: Vec::new(),
        }
    }

    fn initialize_defaults(&mut self) {
        #[cfg(target_os = "macos")]
        self.set_default_families(&["Helvetica Neue", "Helvetica", "Arial"]);

        #[cfg(target_os = "windows")]
        self.set_default_families(&["Segoe UI", "Arial", "Tahoma"]);

        #[cfg(target_os = "linux")]
        self.set_default_families(&["DejaVu Sans", "Liberation Sans", "FreeSans", "Noto Sans"]);

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        self.set_default_families(&["Arial", "Helvetica"]);

        // Hebrew
        #[cfg(target_os = "macos")]
        self.set_script_fallback(Script::Hebrew, &["Arial Hebrew", "Lucida Grande"]);
        #[cfg(target_os = "windows")]
        self.set_script_fallback(Script::Hebrew, &["David", "Arial"]);
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        self.set_script_fallback(Script::Hebrew, &["Noto Sans Hebrew", "DejaVu Sans"]);

        // Arabic
        #[cfg(target_os = "macos")]
        self.set_script_fallback(Script::Arabic, &["Geeza Pro", "Baghdad"]);
        #[cfg(target_os = "windows")]
        self.set_script_fallback(Script::Arabic, &["Arabic Typesetting", "Segoe UI", "Tahoma"]);
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        self.set_script_fallback(Script::Arabic, &["Noto Sans Arabic", "DejaVu Sans"]);

        // CJK
        #[cfg(target_os = "macos")]
        let cjk: &[&str] = &["Hiragino Sans", "PingFang SC", "Apple SD Gothic Neo"];
        #[cfg(target_os = "windows")]
        let cjk: &[&str] = &["Microsoft YaHei", "MS Gothic", "Malgun Gothic"];
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let cjk: &[&str] = &["Noto Sans CJK SC", "Noto Sans CJK JP", "Droid Sans Fallback"];

        for script in [Script::Han, Script::Hiragana, Script::Katakana, Script::Hangul] {
            self.set_script_fallback(script, cjk);
        }

        // Scripts most sans families already cover
        self.set_script_fallback(Script::Greek, &["Arial", "DejaVu Sans"]);
        self.set_script_fallback(Script::Cyrillic, &["Arial", "DejaVu Sans", "Liberation Sans"]);

        #[cfg(target_os = "macos")]
        self.set_script_fallback(Script::Thai, &["Thonburi"]);
        #[cfg(not(target_os = "macos"))]
        self.set_script_fallback(Script::Thai, &["Noto Sans Thai", "Tahoma"]);

        #[cfg(target_os = "macos")]
        self.set_script_fallback(
            Script::Devanagari,
            &["Kohinoor Devanagari", "Devanagari Sangam MN"],
        );
        #[cfg(not(target_os = "macos"))]
        self.set_script_fallback(Script::Devanagari, &["Noto Sans Devanagari", "Mangal"]);
    }

    /// Replace the default family list
    pub fn set_default_families(&mut self, families: &[&str]) {
        self.default_families = families.iter().map(|f| f.to_string()).collect();
    }

    /// Replace the family list for `script`
    pub fn set_script_fallback(&mut self, script: Script, families: &[&str]) {
        let families: Vec<String> = families.iter().map(|f| f.to_string()).collect();
        match self.script_fallbacks.iter_mut().find(|(s, _)| *s == script) {
            Some((_, existing)) => *existing = families,
            None => self.script_fallbacks.push((script, families)),
        }
    }

    pub fn default_families(&self) -> &[String] {
        &self.default_families
    }

    /// Families for `script`; empty when none are registered
    pub fn script_families(&self, script: Script) -> &[String] {
        self.script_fallbacks
            .iter()
            .find(|(s, _)| *s == script)
            .map(|(_, families)| families.as_slice())
            .unwrap_or(&[])
    }

    /// Scripts with a registered family list, in registration order
    pub fn scripts(&self) -> impl Iterator<Item = Script> + '_ {
        self.script_fallbacks.iter().map(|(script, _)| *script)
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}
