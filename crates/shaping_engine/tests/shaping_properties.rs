//! Integration tests for the shaping pipeline
//! Checks line counting, pen positions, cluster font consistency and the
//! error taxonomy against a small in-memory font provider.

use proptest::prelude::*;
use shaping_engine::{
    Direction, ErrorKind, FontHandle, FontProvider, FontRef, GlyphLookupError, Script,
    ShapeOptions, Span, TextError, TextShaper,
};
use std::collections::HashSet;

/// Font covering a fixed character set, one em-fraction advance for all
struct TableFont {
    coverage: HashSet<char>,
    advance: f32,
    /// Kerning applied to every pair
    kerning: f32,
}

impl TableFont {
    fn new(coverage: &str) -> Self {
        Self {
            coverage: coverage.chars().collect(),
            advance: 0.5,
            kerning: 0.0,
        }
    }

    fn with_kerning(mut self, kerning: f32) -> Self {
        self.kerning = kerning;
        self
    }
}

impl FontRef for TableFont {
    fn has_glyph(&self, codepoint: char) -> bool {
        self.coverage.contains(&codepoint)
    }

    fn advance_width(&self, codepoint: char, size: f32) -> Result<f32, GlyphLookupError> {
        if self.has_glyph(codepoint) {
            Ok(self.advance * size)
        } else {
            Err(GlyphLookupError::NotFound)
        }
    }

    fn kerning(&self, _previous: char, _codepoint: char, size: f32) -> f32 {
        self.kerning * size
    }

    fn ascent(&self, size: f32) -> f32 {
        0.75 * size
    }

    fn descent(&self, size: f32) -> f32 {
        0.25 * size
    }

    fn line_height(&self, size: f32) -> f32 {
        1.25 * size
    }
}

#[derive(Default)]
struct Fonts {
    fonts: Vec<TableFont>,
}

impl Fonts {
    fn add(&mut self, font: TableFont) -> FontHandle {
        self.fonts.push(font);
        FontHandle(self.fonts.len() as u32 - 1)
    }
}

impl FontProvider for Fonts {
    type Font<'a> = &'a TableFont;

    fn resolve(&self, handle: FontHandle) -> Option<&TableFont> {
        self.fonts.get(handle.0 as usize)
    }

    fn default_handle(&self) -> Option<FontHandle> {
        (!self.fonts.is_empty()).then_some(FontHandle(0))
    }

    fn load_default(&mut self) -> shaping_engine::Result<FontHandle> {
        Err(TextError::FontNotFound("no fonts in this provider".into()))
    }
}

fn latin_fonts() -> (Fonts, FontHandle) {
    let mut fonts = Fonts::default();
    let latin = fonts.add(TableFont::new("abcdefghijklmnopqrstuvwxyz ?"));
    (fonts, latin)
}

#[test]
fn test_hi_bye_lines() {
    let (mut fonts, _) = latin_fonts();
    let result = TextShaper::new()
        .shape_str(&mut fonts, "hi\nbye", &ShapeOptions::new(10.0))
        .unwrap();

    assert_eq!(result.lines.len(), 2);
    assert_eq!(result.lines[0].text_range, Span::new(0, 2));
    assert_eq!(result.lines[1].text_range, Span::new(3, 6));
    assert_eq!(result.lines[0].glyph_range, Span::new(0, 2));
    assert_eq!(result.lines[1].glyph_range, Span::new(2, 5));
    assert_eq!(result.line_text("hi\nbye", &result.lines[1]), "bye");

    let line_two: Vec<char> = result
        .line_glyphs(&result.lines[1])
        .iter()
        .map(|g| g.codepoint)
        .collect();
    assert_eq!(line_two, vec!['b', 'y', 'e']);
    assert_eq!(result.metrics.line_count, 2);
    assert_eq!(result.metrics.height, 25.0);
    assert_eq!(result.metrics.width, 15.0);
}

#[test]
fn test_empty_text_has_one_line() {
    let (mut fonts, _) = latin_fonts();
    let result = TextShaper::new()
        .shape(&mut fonts, b"", &ShapeOptions::new(10.0))
        .unwrap();

    assert!(result.glyphs.is_empty());
    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines[0].width, 0.0);
    assert_eq!(result.metrics.height, 12.5);
}

#[test]
fn test_unregistered_handle_is_resource_error() {
    let (mut fonts, _) = latin_fonts();
    let shaper = TextShaper::new();

    let options = ShapeOptions::new(10.0).with_font(FontHandle(42));
    let err = shaper.shape_str(&mut fonts, "abc", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);

    let options = ShapeOptions::new(10.0).with_fallback_font(FontHandle(7));
    let err = shaper.shape_str(&mut fonts, "abc", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn test_no_fonts_at_all_is_resource_error() {
    let mut fonts = Fonts::default();
    let err = TextShaper::new()
        .shape_str(&mut fonts, "abc", &ShapeOptions::new(10.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn test_invalid_utf8_is_input_error() {
    let (mut fonts, _) = latin_fonts();
    let err = TextShaper::new()
        .shape(&mut fonts, &[b'h', 0xc3, b'\n'], &ShapeOptions::new(10.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_rtl_line_from_options_json() {
    let mut fonts = Fonts::default();
    fonts.add(TableFont::new("abc"));
    let hebrew = fonts.add(TableFont::new("\u{5d0}\u{5d1}"));

    let options = ShapeOptions::from_json(
        r#"{"size": 10.0, "script_fallbacks": [["hebrew", 1]], "direction": "rtl"}"#,
    )
    .unwrap();
    assert_eq!(options.direction, Some(Direction::Rtl));

    let result = TextShaper::new()
        .shape_str(&mut fonts, "\u{5d0}\u{5d1}", &options)
        .unwrap();

    let drawn: Vec<(char, FontHandle)> =
        result.glyphs.iter().map(|g| (g.codepoint, g.font)).collect();
    assert_eq!(drawn, vec![('\u{5d1}', hebrew), ('\u{5d0}', hebrew)]);
    assert_eq!(result.lines[0].direction, Direction::Rtl);
    assert_eq!(options.script_fallbacks, vec![(Script::Hebrew, hebrew)]);
}

proptest! {
    #[test]
    fn prop_line_feeds_give_one_more_line(text in "[ab\n]{0,40}") {
        let (mut fonts, _) = latin_fonts();
        let result = TextShaper::new()
            .shape_str(&mut fonts, &text, &ShapeOptions::new(10.0))
            .unwrap();

        let feeds = text.matches('\n').count();
        prop_assert_eq!(result.lines.len(), feeds + 1);
        prop_assert_eq!(result.metrics.line_count, feeds + 1);

        // Glyph ranges tile the glyph sequence in line order
        let mut next = 0;
        for (index, line) in result.lines.iter().enumerate() {
            prop_assert_eq!(line.glyph_range.start, next);
            next = line.glyph_range.end;
            prop_assert!(result.line_glyphs(line).iter().all(|g| g.line == index));
        }
        prop_assert_eq!(next, result.glyphs.len());
    }

    #[test]
    fn prop_negative_kerning_never_moves_pen_left_of_zero(
        text in "[abc \n]{0,30}",
        kerning in -8.0f32..0.0,
    ) {
        let mut fonts = Fonts::default();
        fonts.add(TableFont::new("abc ").with_kerning(kerning));

        let result = TextShaper::new()
            .shape_str(&mut fonts, &text, &ShapeOptions::new(10.0))
            .unwrap();

        for glyph in &result.glyphs {
            prop_assert!(glyph.x >= 0.0, "glyph {:?} at negative x", glyph);
        }
        for line in &result.lines {
            prop_assert!(line.width >= 0.0);
        }
    }

    #[test]
    fn prop_cluster_glyphs_share_one_font(
        tokens in prop::collection::vec(
            prop::sample::select(vec!["a", "a\u{301}", "\u{5d0}", "\u{5d0}\u{301}", " "]),
            0..20,
        ),
    ) {
        let mut fonts = Fonts::default();
        fonts.add(TableFont::new("a \u{301}"));
        let hebrew = fonts.add(TableFont::new("\u{5d0}\u{301}"));

        let text: String = tokens.concat();
        let options = ShapeOptions::new(10.0).with_script_fallback(Script::Hebrew, hebrew);
        let result = TextShaper::new().shape_str(&mut fonts, &text, &options).unwrap();

        for pair in result.glyphs.windows(2) {
            if pair[1].codepoint == '\u{301}' {
                prop_assert_eq!(pair[0].font, pair[1].font);
            }
        }
    }

    #[test]
    fn prop_non_positive_size_is_input_error(size in -1000.0f32..=0.0, text in "[ab\n]{0,10}") {
        let (mut fonts, _) = latin_fonts();
        let err = TextShaper::new()
            .shape_str(&mut fonts, &text, &ShapeOptions::new(size))
            .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Input);
    }
}
