//! Cluster-level font selection
//!
//! Fonts are chosen once per grapheme cluster so that a base character and
//! its combining marks always come from the same face.

use crate::provider::{FontRef, VerticalMetrics};
use crate::{FontHandle, Script, ShapeOptions};

/// A font resolved for the duration of one shaping call
pub struct FontSlot<F> {
    pub handle: FontHandle,
    pub font: F,
    /// Vertical metrics at the requested size
    pub metrics: VerticalMetrics,
}

impl<F: FontRef> FontSlot<F> {
    /// Whether this font has a glyph for every codepoint of a cluster
    pub fn covers(&self, codepoints: &[char]) -> bool {
        codepoints.iter().all(|&ch| self.font.has_glyph(ch))
    }
}

/// Fonts resolved for one call, addressed by slot index
pub struct FontTable<F> {
    slots: Vec<FontSlot<F>>,
}

impl<F: FontRef> FontTable<F> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Slot already holding `handle`
    pub fn slot_of(&self, handle: FontHandle) -> Option<usize> {
        self.slots.iter().position(|slot| slot.handle == handle)
    }

    /// Add a resolved font, reusing the existing slot for a known handle
    pub fn insert(&mut self, handle: FontHandle, font: F, size: f32) -> usize {
        if let Some(index) = self.slot_of(handle) {
            return index;
        }
        let metrics = font.vertical_metrics(size);
        self.slots.push(FontSlot { handle, font, metrics });
        self.slots.len() - 1
    }

    pub fn get(&self, index: usize) -> &FontSlot<F> {
        &self.slots[index]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<F: FontRef> Default for FontTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Primary/fallback chain expressed as slots of a [`FontTable`]
#[derive(Debug, Clone)]
pub struct FontSelector {
    base: usize,
    script_fallbacks: Vec<(Script, usize)>,
    fallback_fonts: Vec<usize>,
}

impl FontSelector {
    /// Build the chain from `options`. Every referenced handle must already
    /// be in `table`; handles that are not are left out of the chain.
    pub fn new<F: FontRef>(table: &FontTable<F>, base: usize, options: &ShapeOptions) -> Self {
        Self {
            base,
            script_fallbacks: options
                .script_fallbacks
                .iter()
                .filter_map(|&(script, handle)| table.slot_of(handle).map(|slot| (script, slot)))
                .collect(),
            fallback_fonts: options
                .fallback_fonts
                .iter()
                .filter_map(|&handle| table.slot_of(handle))
                .collect(),
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Pick the slot that renders a cluster. First match wins:
    /// the base font with full coverage, a script fallback for `script`
    /// with full coverage, a general fallback with full coverage, and
    /// finally the base font regardless of coverage.
    pub fn select<F: FontRef>(
        &self,
        table: &FontTable<F>,
        codepoints: &[char],
        script: Script,
    ) -> usize {
        if table.get(self.base).covers(codepoints) {
            return self.base;
        }

        let by_script = self
            .script_fallbacks
            .iter()
            .filter(|(candidate, _)| *candidate == script)
            .map(|&(_, slot)| slot);

        by_script
            .chain(self.fallback_fonts.iter().copied())
            .find(|&slot| table.get(slot).covers(codepoints))
            .unwrap_or(self.base)
    }
}
