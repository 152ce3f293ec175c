//! Text measurement boundary and cached draw metrics.
//!
//! Glyph widths come from the host (a font, a terminal cell model, a
//! platform text API). [`DrawMetrics`] caches per-glyph widths lazily and
//! snapshots line height and baseline; the cache is dropped whenever the
//! host's text appearance changes.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::table::{ScrollDirection, EMPTY_GLYPH};

/// Host-supplied text measurement provider.
pub trait GlyphMeasure {
    /// Width in pixels of one rendered glyph.
    fn glyph_width(&self, glyph: char) -> f32;

    /// Height in pixels of one glyph row.
    fn line_height(&self) -> f32;

    /// Distance from the top of a row down to the text baseline.
    fn baseline(&self) -> f32;
}

/// Cached measurements plus the preferred scrolling direction.
///
/// Owned by the ticker and handed to columns during mutation; columns
/// never hold onto it.
pub struct DrawMetrics {
    measure: Box<dyn GlyphMeasure>,
    widths: FxHashMap<char, f32>,
    line_height: f32,
    baseline: f32,
    direction: ScrollDirection,
}

impl DrawMetrics {
    /// Wrap a measurement provider and take the initial snapshot.
    #[must_use]
    pub fn new(measure: Box<dyn GlyphMeasure>) -> Self {
        let mut metrics = Self {
            measure,
            widths: FxHashMap::default(),
            line_height: 0.0,
            baseline: 0.0,
            direction: ScrollDirection::default(),
        };
        metrics.invalidate();
        metrics
    }

    /// Drop every cached measurement and re-snapshot height and baseline.
    /// Call after anything about the host's text rendering changes.
    pub fn invalidate(&mut self) {
        self.widths.clear();
        self.line_height = self.measure.line_height();
        self.baseline = self.measure.baseline();
    }

    /// Width of `glyph`, measured lazily and cached. The empty sentinel is
    /// always zero wide.
    pub fn glyph_width(&mut self, glyph: char) -> f32 {
        if glyph == EMPTY_GLYPH {
            return 0.0;
        }
        if let Some(width) = self.widths.get(&glyph) {
            return *width;
        }
        let width = self.measure.glyph_width(glyph);
        let _ = self.widths.insert(glyph, width);
        width
    }

    /// Snapshot of the host line height.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Snapshot of the host baseline offset.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Preferred scrolling direction applied to new transitions.
    #[must_use]
    pub fn preferred_direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Set the preferred scrolling direction for new transitions.
    pub fn set_preferred_direction(&mut self, direction: ScrollDirection) {
        self.direction = direction;
    }
}

impl fmt::Debug for DrawMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawMetrics")
            .field("cached_widths", &self.widths.len())
            .field("line_height", &self.line_height)
            .field("baseline", &self.baseline)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}
