//! Script tags used for per-script font fallback

use serde::{Deserialize, Serialize};

/// Unicode script of a codepoint or cluster
///
/// Covers the scripts the fallback tables distinguish; every other script
/// collapses to [`Script::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Shared punctuation, digits, spaces and symbols
    #[default]
    Common,
    /// Combining marks that take the script of their base
    Inherited,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Devanagari,
    Bengali,
    Thai,
    Georgian,
    Hangul,
    Hiragana,
    Katakana,
    Han,
    /// Any other script
    Other,
}

impl Script {
    /// Whether the script is a placeholder that borrows its neighbour's script
    pub fn is_neutral(self) -> bool {
        matches!(self, Script::Common | Script::Inherited)
    }

    /// Script of a single codepoint
    pub fn of(ch: char) -> Self {
        use unicode_script::UnicodeScript;
        ch.script().into()
    }
}

impl From<unicode_script::Script> for Script {
    fn from(script: unicode_script::Script) -> Self {
        use unicode_script::Script as U;
        match script {
            U::Common | U::Unknown => Script::Common,
            U::Inherited => Script::Inherited,
            U::Latin => Script::Latin,
            U::Greek => Script::Greek,
            U::Cyrillic => Script::Cyrillic,
            U::Armenian => Script::Armenian,
            U::Hebrew => Script::Hebrew,
            U::Arabic => Script::Arabic,
            U::Devanagari => Script::Devanagari,
            U::Bengali => Script::Bengali,
            U::Thai => Script::Thai,
            U::Georgian => Script::Georgian,
            U::Hangul => Script::Hangul,
            U::Hiragana => Script::Hiragana,
            U::Katakana => Script::Katakana,
            U::Han => Script::Han,
            _ => Script::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_of_codepoints() {
        assert_eq!(Script::of('a'), Script::Latin);
        assert_eq!(Script::of('\u{05D0}'), Script::Hebrew);
        assert_eq!(Script::of('\u{0627}'), Script::Arabic);
        assert_eq!(Script::of('\u{4E2D}'), Script::Han);
        assert_eq!(Script::of(' '), Script::Common);
        assert_eq!(Script::of('\u{0301}'), Script::Inherited);
    }

    #[test]
    fn test_neutral_scripts() {
        assert!(Script::Common.is_neutral());
        assert!(Script::Inherited.is_neutral());
        assert!(!Script::Latin.is_neutral());
    }
}
