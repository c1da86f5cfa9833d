//! Multi-line text shaping
//!
//! [`TextShaper::shape`] splits the input on line feeds and runs each line
//! through segmentation, script tagging, bidi ordering, cluster-level font
//! selection and glyph emission, then folds the per-line results into
//! whole-text metrics. Scratch tables are built per line and dropped before
//! the next one starts; only the glyph and line sequences are returned.

use crate::bidi::{resolve_direction, visual_cluster_order};
use crate::cluster::LineClusters;
use crate::emitter::{emit_line, LineExtent, LineInput};
use crate::provider::{FontProvider, FontRef};
use crate::selector::{FontSelector, FontTable};
use crate::{
    DefaultSegmenter, Direction, FontHandle, ShapeError, ShapeOptions, Span, UnicodeSegmenter,
};
use serde::Serialize;

/// One resolved, renderable glyph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphPlacement {
    /// Codepoint drawn, after any missing-glyph substitution
    pub codepoint: char,
    /// Font the glyph is drawn with
    pub font: FontHandle,
    /// Horizontal advance at the requested size
    pub advance: f32,
    /// Pen position on the line before this glyph's advance
    pub x: f32,
    /// Index of the line the glyph sits on
    pub line: usize,
}

/// Shape result of one logical line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMetrics {
    pub index: usize,
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub height: f32,
    /// Baseline position measured from the top of the layout
    pub baseline: f32,
    /// This line's slice of [`ShapeResult::glyphs`]
    pub glyph_range: Span,
    /// Byte range of the line in the input, excluding the line feed
    pub text_range: Span,
    pub direction: Direction,
}

/// Aggregate metrics over all lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Widest line
    pub width: f32,
    /// Sum of line heights
    pub height: f32,
    pub ascent: f32,
    pub descent: f32,
    pub line_count: usize,
}

impl LayoutMetrics {
    /// Fold one finished line into the totals
    fn add_line(&mut self, line: &LineMetrics) {
        self.width = self.width.max(line.width);
        self.height += line.height;
        self.ascent = self.ascent.max(line.ascent);
        self.descent = self.descent.max(line.descent);
        self.line_count += 1;
    }
}

/// Glyphs and lines produced by one shaping call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapeResult {
    pub glyphs: Vec<GlyphPlacement>,
    pub lines: Vec<LineMetrics>,
    pub metrics: LayoutMetrics,
}

impl ShapeResult {
    /// Glyphs placed on `line`
    pub fn line_glyphs(&self, line: &LineMetrics) -> &[GlyphPlacement] {
        &self.glyphs[line.glyph_range.range()]
    }

    /// Source text of `line`
    pub fn line_text<'t>(&self, text: &'t str, line: &LineMetrics) -> &'t str {
        &text[line.text_range.range()]
    }
}

/// Byte ranges of the lines of `text`, split on line feed only.
///
/// `k` line feeds always give `k + 1` lines; empty input gives one empty line.
pub fn split_lines(text: &[u8]) -> Vec<Span> {
    let mut lines = Vec::new();
    let mut offset = 0;

    while offset <= text.len() {
        let line_end = text[offset..]
            .iter()
            .position(|&byte| byte == b'\n')
            .map_or(text.len(), |pos| offset + pos);
        lines.push(Span::new(offset, line_end));
        offset = line_end + 1;
    }

    lines
}

/// Text shaper over a Unicode segmenter
///
/// The shaper keeps no state between calls; fonts come from the provider
/// passed to each call.
#[derive(Debug, Clone, Default)]
pub struct TextShaper<S = DefaultSegmenter> {
    segmenter: S,
}

impl TextShaper {
    /// Create a shaper using the Unicode data crates for segmentation
    pub fn new() -> Self {
        Self {
            segmenter: DefaultSegmenter,
        }
    }
}

impl<S: UnicodeSegmenter> TextShaper<S> {
    /// Create a shaper with a custom segmenter
    pub fn with_segmenter(segmenter: S) -> Self {
        Self { segmenter }
    }

    /// Shape a string
    pub fn shape_str<P: FontProvider>(
        &self,
        provider: &mut P,
        text: &str,
        options: &ShapeOptions,
    ) -> Result<ShapeResult, ShapeError> {
        self.shape(provider, text.as_bytes(), options)
    }

    /// Shape UTF-8 `text` into positioned glyphs.
    ///
    /// Fails without a partial result on invalid UTF-8, a non-positive size,
    /// an options handle that does not resolve, no usable default font, or
    /// a font backend error. Missing glyphs are substituted or skipped.
    pub fn shape<P: FontProvider>(
        &self,
        provider: &mut P,
        text: &[u8],
        options: &ShapeOptions,
    ) -> Result<ShapeResult, ShapeError> {
        // NaN fails this comparison too
        if !(options.size > 0.0) {
            return Err(ShapeError::InvalidSize(options.size));
        }
        let text = std::str::from_utf8(text)?;

        let base_handle = base_font(provider, options)?;
        let provider: &P = provider;

        let mut fonts = FontTable::new();
        let base_font = provider
            .resolve(base_handle)
            .ok_or(ShapeError::UnknownFont(base_handle))?;
        let base = fonts.insert(base_handle, base_font, options.size);
        for handle in options.referenced_fonts() {
            if fonts.slot_of(handle).is_none() {
                let font = provider.resolve(handle).ok_or(ShapeError::UnknownFont(handle))?;
                fonts.insert(handle, font, options.size);
            }
        }
        let selector = FontSelector::new(&fonts, base, options);

        tracing::debug!(
            target: "shaping_engine::shape",
            bytes = text.len(),
            size = options.size,
            base = %base_handle,
            fonts = fonts.len(),
            "shaping text"
        );

        let mut result = ShapeResult::default();
        let mut top = 0.0f32;

        for (index, text_range) in split_lines(text.as_bytes()).into_iter().enumerate() {
            let glyph_start = result.glyphs.len();
            let (direction, extent) = self.shape_line(
                text,
                text_range,
                index,
                &fonts,
                &selector,
                options,
                &mut result.glyphs,
            )?;

            let line = LineMetrics {
                index,
                width: extent.width,
                ascent: extent.metrics.ascent,
                descent: extent.metrics.descent,
                height: extent.metrics.line_height,
                baseline: top + extent.metrics.ascent,
                glyph_range: Span::new(glyph_start, result.glyphs.len()),
                text_range,
                direction,
            };
            top += line.height;
            result.metrics.add_line(&line);

            result.lines.try_reserve(1)?;
            result.lines.push(line);
        }

        tracing::debug!(
            target: "shaping_engine::shape",
            lines = result.metrics.line_count,
            glyphs = result.glyphs.len(),
            width = result.metrics.width,
            height = result.metrics.height,
            "shaped text"
        );

        Ok(result)
    }

    /// Run one line through the per-line passes, appending its glyphs
    #[allow(clippy::too_many_arguments)]
    fn shape_line<F: FontRef>(
        &self,
        text: &str,
        text_range: Span,
        index: usize,
        fonts: &FontTable<F>,
        selector: &FontSelector,
        options: &ShapeOptions,
        glyphs: &mut Vec<GlyphPlacement>,
    ) -> Result<(Direction, LineExtent), ShapeError> {
        let line_text = &text[text_range.range()];
        let line = LineClusters::build(&self.segmenter, line_text, text_range.start)?;
        let direction = resolve_direction(&self.segmenter, &line, options.direction);
        let order = visual_cluster_order(&self.segmenter, &line, direction);

        let cluster_fonts: Vec<usize> = (0..line.clusters.len())
            .map(|cluster| {
                let codepoints = line.cluster_codepoints(cluster);
                selector.select(fonts, codepoints, line.cluster_script(cluster))
            })
            .collect();

        tracing::trace!(
            target: "shaping_engine::shape",
            line = index,
            clusters = line.clusters.len(),
            direction = ?direction,
            "shaping line"
        );

        let input = LineInput {
            line: &line,
            order: &order,
            cluster_fonts: &cluster_fonts,
            fonts,
            base: selector.base(),
            size: options.size,
            fallback_codepoint: options.fallback_codepoint,
            line_index: index,
        };
        let extent = emit_line(&input, glyphs)?;

        Ok((direction, extent))
    }
}

/// Handle of the base font: the options override, else the provider's
/// default, else a freshly discovered default.
fn base_font<P: FontProvider>(
    provider: &mut P,
    options: &ShapeOptions,
) -> Result<FontHandle, ShapeError> {
    if let Some(handle) = options.font {
        return Ok(handle);
    }

    if let Some(handle) = provider.default_handle() {
        if provider.resolve(handle).is_some() {
            return Ok(handle);
        }
        tracing::debug!(
            target: "shaping_engine::shape",
            handle = %handle,
            "default font no longer resolves, rediscovering"
        );
    }

    Ok(provider.load_default()?)
}
