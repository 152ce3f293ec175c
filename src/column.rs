//! Per-slot column state machine.
//!
//! A column owns one character position of the rendered string and scrolls
//! vertically between glyphs of the shared [`CharacterTable`]. There is no
//! separate idle state: a resting column is simply a transition whose
//! start and end indices coincide.

use std::fmt;
use std::sync::Arc;

use crate::metrics::DrawMetrics;
use crate::surface::Surface;
use crate::table::{CharacterTable, ScrollDirection, EMPTY_GLYPH};

/// Which glyph sequence the current transition scrolls through.
#[derive(Debug, Clone, Copy)]
enum GlyphRun {
    /// The shared ordering table.
    Table,
    /// A direct swap for characters outside the table. Holds at most the
    /// start and end glyph.
    Direct { glyphs: [char; 2], len: usize },
}

/// One character slot of the rendered string.
///
/// Columns are owned exclusively by the manager and share the ordering
/// table through a non-owning reference. Retargeting a column mid-flight
/// restarts the transition from the currently visible glyph, so
/// interrupted animations stay visually continuous.
pub struct Column {
    table: Arc<CharacterTable>,
    run: GlyphRun,

    /// Glyph currently visible (interpolated, not the target).
    current_char: char,
    /// Glyph this column is scrolling toward.
    target_char: char,

    /// Resolved transition bounds into the active glyph run.
    start_index: usize,
    end_index: usize,
    /// +1.0 when scrolling toward higher indices, -1.0 otherwise.
    direction_sign: f32,

    /// Width when the current transition began.
    source_width: f32,
    /// Width at the last progress update.
    current_width: f32,
    /// Width of the target glyph.
    target_width: f32,
    /// Width layout must reserve for this transition.
    minimum_required_width: f32,

    /// Glyph run index whose glyph sits nearest the baseline this frame.
    bottom_index: isize,
    /// Vertical offset of that glyph, residual included.
    bottom_offset: f32,
    /// Line height snapshot taken at the last progress update.
    line_height: f32,
    /// Fractional offset of the in-flight scroll, without residual.
    current_offset: f32,
    /// Offset inherited from an interrupted transition. Decays linearly to
    /// zero as the new transition progresses.
    previous_offset: f32,
}

impl Column {
    /// Fresh column resting on the empty glyph.
    #[must_use]
    pub fn new(table: Arc<CharacterTable>) -> Self {
        Self {
            table,
            // Until a target arrives there is nothing to scroll through.
            run: GlyphRun::Direct {
                glyphs: [EMPTY_GLYPH; 2],
                len: 1,
            },
            current_char: EMPTY_GLYPH,
            target_char: EMPTY_GLYPH,
            start_index: 0,
            end_index: 0,
            direction_sign: 1.0,
            source_width: 0.0,
            current_width: 0.0,
            target_width: 0.0,
            minimum_required_width: 0.0,
            bottom_index: 0,
            bottom_offset: 0.0,
            line_height: 0.0,
            current_offset: 0.0,
            previous_offset: 0.0,
        }
    }

    /// Glyph currently visible in this column.
    #[must_use]
    pub fn current_char(&self) -> char {
        self.current_char
    }

    /// Glyph this column is converging to.
    #[must_use]
    pub fn target_char(&self) -> char {
        self.target_char
    }

    /// Width at the last progress update.
    #[must_use]
    pub fn current_width(&self) -> f32 {
        self.current_width
    }

    /// Widest extent this transition can reach; width interpolation never
    /// leaves the band between the start and end glyph widths.
    #[must_use]
    pub fn minimum_required_width(&self) -> f32 {
        self.minimum_required_width
    }

    /// Begin a transition toward `target`.
    ///
    /// The start of the new transition is the currently visible glyph, not
    /// the previous target, and any in-flight fractional offset is carried
    /// over as a decaying residual.
    pub fn set_target_char(&mut self, metrics: &mut DrawMetrics, target: char) {
        self.target_char = target;
        self.source_width = self.current_width;
        self.target_width = metrics.glyph_width(target);
        self.minimum_required_width =
            self.source_width.max(self.target_width);

        self.resolve_run(metrics.preferred_direction());
        self.direction_sign = if self.end_index >= self.start_index {
            1.0
        } else {
            -1.0
        };

        self.previous_offset = self.current_offset;
        self.current_offset = 0.0;
    }

    /// Advance the transition to `progress` in [0, 1].
    ///
    /// Interpolates the virtual glyph index, the vertical offset of the
    /// straddling glyph pair, and the column width.
    pub fn set_progress(&mut self, metrics: &mut DrawMetrics, progress: f32) {
        if progress == 1.0 {
            // Finished (or never animated): rest on the target.
            self.current_char = self.target_char;
            self.previous_offset = 0.0;
        }

        let height = metrics.line_height();
        let span = self.start_index.abs_diff(self.end_index) as f32;

        // Virtual position in glyph rows advanced from the start index.
        let position = progress * span;
        let whole = position.floor();
        let fraction = position - whole;

        let offset = fraction * height * self.direction_sign;
        let residual = self.previous_offset * (1.0 - progress);

        let step = if self.direction_sign < 0.0 { -1 } else { 1 };
        self.bottom_index = self.start_index as isize + whole as isize * step;
        self.bottom_offset = offset + residual;
        self.current_offset = offset;
        self.line_height = height;
        self.current_width = self.source_width
            + (self.target_width - self.source_width) * progress;

        if progress != 1.0 {
            // Remember the visible glyph so an interruption restarts here.
            if let Some(glyph) = self.glyph_at(self.bottom_index) {
                self.current_char = glyph;
            }
        }
    }

    /// Settle the column after the host clock reports completion.
    pub fn on_animation_end(&mut self, metrics: &mut DrawMetrics) {
        // Pick up glyph width changes that happened while resting on the
        // target, but never mid width animation.
        let measured = metrics.glyph_width(self.target_char);
        if self.current_width == self.target_width
            && self.target_width != measured
        {
            self.current_width = measured;
            self.target_width = measured;
        }
        self.minimum_required_width = self.current_width;
    }

    /// Draw the visible glyphs with the column's left edge at `x`.
    ///
    /// Emits the straddling glyph plus the rows one slot above and below;
    /// lookups past either end of the glyph run are clamped and the empty
    /// sentinel is never emitted.
    pub fn draw(&self, surface: &mut dyn Surface, x: f32) {
        let height = self.line_height;
        self.emit(surface, self.bottom_index, x, self.bottom_offset);
        self.emit(surface, self.bottom_index + 1, x, self.bottom_offset - height);
        self.emit(surface, self.bottom_index - 1, x, self.bottom_offset + height);
    }

    fn emit(&self, surface: &mut dyn Surface, index: isize, x: f32, y: f32) {
        if let Some(glyph) = self.glyph_at(index) {
            if glyph != EMPTY_GLYPH {
                surface.draw_glyph(glyph, x, y);
            }
        }
    }

    /// Glyph at `index` of the active run, `None` outside its bounds.
    fn glyph_at(&self, index: isize) -> Option<char> {
        if index < 0 {
            return None;
        }
        let index = index as usize;
        match &self.run {
            GlyphRun::Table => self.table.glyph_at(index),
            GlyphRun::Direct { glyphs, len } => {
                (index < *len).then(|| glyphs[index])
            }
        }
    }

    /// Resolve the transition bounds for current -> target.
    ///
    /// Falls back to a direct glyph swap when the table does not cover
    /// both characters; this is how characters outside the ordering (for
    /// example currency symbols routed in by the alignment) still render.
    fn resolve_run(&mut self, direction: ScrollDirection) {
        if let Some(indices) =
            self.table
                .indices(self.current_char, self.target_char, direction)
        {
            self.run = GlyphRun::Table;
            self.start_index = indices.start_index;
            self.end_index = indices.end_index;
            return;
        }

        if self.current_char == self.target_char {
            self.run = GlyphRun::Direct {
                glyphs: [self.current_char, EMPTY_GLYPH],
                len: 1,
            };
            self.start_index = 0;
            self.end_index = 0;
        } else {
            self.run = GlyphRun::Direct {
                glyphs: [self.current_char, self.target_char],
                len: 2,
            };
            self.start_index = 0;
            self.end_index = 1;
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("current_char", &self.current_char)
            .field("target_char", &self.target_char)
            .field("start_index", &self.start_index)
            .field("end_index", &self.end_index)
            .field("current_width", &self.current_width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::GlyphMeasure;

    const CHAR_WIDTH: f32 = 10.0;
    const CHAR_HEIGHT: f32 = 5.0;

    struct FixedMeasure;

    impl GlyphMeasure for FixedMeasure {
        fn glyph_width(&self, _glyph: char) -> f32 {
            CHAR_WIDTH
        }

        fn line_height(&self) -> f32 {
            CHAR_HEIGHT
        }

        fn baseline(&self) -> f32 {
            4.0
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        glyphs: Vec<(char, f32, f32)>,
    }

    impl Surface for RecordingSurface {
        fn draw_glyph(&mut self, glyph: char, x: f32, y: f32) {
            self.glyphs.push((glyph, x, y));
        }
    }

    fn metrics() -> DrawMetrics {
        DrawMetrics::new(Box::new(FixedMeasure))
    }

    fn column() -> Column {
        Column::new(Arc::new(CharacterTable::new("012").unwrap()))
    }

    fn drawn(column: &Column) -> Vec<(char, f32, f32)> {
        let mut surface = RecordingSurface::default();
        column.draw(&mut surface, 0.0);
        surface.glyphs
    }

    #[test]
    fn test_width_interpolation_from_empty() {
        let mut m = metrics();
        let mut col = column();

        col.set_target_char(&mut m, '0');
        assert_eq!(col.minimum_required_width(), CHAR_WIDTH);
        assert_eq!(col.current_width(), 0.0);

        col.set_progress(&mut m, 0.4);
        assert!((col.current_width() - 4.0).abs() < 1e-6);

        col.set_progress(&mut m, 1.0);
        assert_eq!(col.current_width(), CHAR_WIDTH);

        // Retargeting between equally wide glyphs keeps the width steady.
        col.set_target_char(&mut m, '1');
        assert_eq!(col.minimum_required_width(), CHAR_WIDTH);
        assert_eq!(col.current_width(), CHAR_WIDTH);
        col.set_progress(&mut m, 0.4);
        assert_eq!(col.current_width(), CHAR_WIDTH);
    }

    #[test]
    fn test_draw_at_rest() {
        let mut m = metrics();
        let mut col = column();
        col.set_target_char(&mut m, '0');
        col.set_progress(&mut m, 1.0);

        // Resting on '0' at table index 1; '1' sits one row above, the
        // empty glyph below is suppressed.
        assert_eq!(
            drawn(&col),
            vec![('0', 0.0, 0.0), ('1', 0.0, -CHAR_HEIGHT)]
        );
        assert_eq!(col.current_char(), '0');
    }

    #[test]
    fn test_draw_at_upper_table_edge() {
        let mut m = metrics();
        let mut col = column();
        col.set_target_char(&mut m, '0');
        col.set_progress(&mut m, 1.0);
        col.set_target_char(&mut m, EMPTY_GLYPH);
        col.set_progress(&mut m, 1.0);

        // Resting on the empty slot at index 0: only the row above exists.
        assert_eq!(drawn(&col), vec![('0', 0.0, -CHAR_HEIGHT)]);
        assert_eq!(col.current_char(), EMPTY_GLYPH);
    }

    #[test]
    fn test_draw_mid_scroll() {
        let mut m = metrics();
        let mut col = column();

        // Empty to '1' spans two rows; at 0.75 the view straddles '0' and
        // '1' halfway.
        col.set_target_char(&mut m, '1');
        col.set_progress(&mut m, 0.75);

        assert_eq!(
            drawn(&col),
            vec![
                ('0', 0.0, CHAR_HEIGHT / 2.0),
                ('1', 0.0, -CHAR_HEIGHT / 2.0),
            ]
        );
        assert_eq!(col.current_char(), '0');
    }

    #[test]
    fn test_interrupt_restarts_from_visible_glyph() {
        let mut m = metrics();
        let mut col = column();

        col.set_target_char(&mut m, '1');
        col.set_progress(&mut m, 0.75);
        assert_eq!(col.current_char(), '0');

        // Retarget mid-flight: the new transition starts at '0', and with
        // wraparound preferred it scrolls up through the doubled region.
        col.set_target_char(&mut m, '2');
        col.set_progress(&mut m, 0.0);

        // The fractional half-row offset is inherited untouched at the
        // start of the new transition.
        assert_eq!(
            drawn(&col),
            vec![
                ('0', 0.0, CHAR_HEIGHT / 2.0),
                ('1', 0.0, -CHAR_HEIGHT / 2.0),
                ('2', 0.0, CHAR_HEIGHT * 1.5),
            ]
        );
    }

    #[test]
    fn test_interrupt_residual_decays() {
        let mut m = metrics();
        let mut col = column();

        col.set_target_char(&mut m, '1');
        col.set_progress(&mut m, 0.75);

        col.set_target_char(&mut m, '2');
        col.set_progress(&mut m, 0.5);

        // One-row upward scroll from '0' (index 4) toward '2' (index 3):
        // at half progress the scroll offset is -H/2 and the inherited
        // half-row residual has decayed to H/4.
        let expected = -CHAR_HEIGHT / 2.0 + CHAR_HEIGHT / 4.0;
        let glyphs = drawn(&col);
        assert_eq!(glyphs[0].0, '0');
        assert!((glyphs[0].2 - expected).abs() < 1e-6);

        col.set_progress(&mut m, 1.0);
        assert_eq!(col.current_char(), '2');
        assert_eq!(
            drawn(&col),
            vec![('2', 0.0, 0.0), ('0', 0.0, -CHAR_HEIGHT), ('1', 0.0, CHAR_HEIGHT)]
        );
    }

    #[test]
    fn test_scroll_down_to_empty_takes_full_lap() {
        let mut m = metrics();
        m.set_preferred_direction(ScrollDirection::Down);
        let mut col = column();

        col.set_target_char(&mut m, '2');
        col.set_progress(&mut m, 1.0);

        col.set_target_char(&mut m, EMPTY_GLYPH);
        col.set_progress(&mut m, 0.5);
        // Halfway through the four-row lap from index 3 to one past the
        // table end.
        assert_eq!(drawn(&col), vec![('1', 0.0, 0.0), ('2', 0.0, -CHAR_HEIGHT), ('0', 0.0, CHAR_HEIGHT)]);

        col.set_progress(&mut m, 1.0);
        // The glyph has scrolled off the end; only the previous row is
        // still partially in view.
        assert_eq!(drawn(&col), vec![('2', 0.0, CHAR_HEIGHT)]);
        assert_eq!(col.current_char(), EMPTY_GLYPH);
        assert_eq!(col.current_width(), 0.0);
    }

    #[test]
    fn test_unsupported_character_swaps_directly() {
        let mut m = metrics();
        let mut col = column();

        col.set_target_char(&mut m, '$');
        col.set_progress(&mut m, 0.5);
        // Straight one-row swap: the empty start glyph is suppressed, the
        // incoming '$' is half a row away.
        assert_eq!(drawn(&col), vec![('$', 0.0, -CHAR_HEIGHT / 2.0)]);

        col.set_progress(&mut m, 1.0);
        assert_eq!(col.current_char(), '$');
        assert_eq!(drawn(&col), vec![('$', 0.0, 0.0)]);
    }

    #[test]
    fn test_idle_column_draws_nothing() {
        let mut m = metrics();
        let mut col = column();
        col.set_progress(&mut m, 0.5);
        assert!(drawn(&col).is_empty());
        assert_eq!(col.current_width(), 0.0);
    }

    #[test]
    fn test_on_animation_end_settles_minimum_width() {
        let mut m = metrics();
        let mut col = column();
        col.set_target_char(&mut m, '0');
        col.set_progress(&mut m, 1.0);
        col.on_animation_end(&mut m);
        assert_eq!(col.minimum_required_width(), CHAR_WIDTH);
        assert_eq!(col.current_width(), CHAR_WIDTH);
    }
}
