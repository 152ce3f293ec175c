//! Ordered collection of columns composing the rendered string.
//!
//! The manager owns the columns, applies alignment actions when new text
//! arrives, fans out progress updates, and composes the per-column draw
//! calls into one line by advancing a horizontal cursor.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::alignment::{compute_column_actions, ColumnAction};
use crate::column::Column;
use crate::error::GlyphrollError;
use crate::metrics::DrawMetrics;
use crate::surface::Surface;
use crate::table::{CharacterTable, EMPTY_GLYPH};

/// Owns and orchestrates the columns of the rendered string.
///
/// The column list is the source of truth for what is on screen: it is
/// always at least as long as the most recent target text, and may be
/// temporarily longer while deleted columns shrink out.
#[derive(Default)]
pub struct ColumnManager {
    columns: Vec<Column>,
    table: Option<Arc<CharacterTable>>,
    /// Table members plus the empty sentinel; the alignment needs the
    /// sentinel to treat growing and shrinking columns as animatable.
    supported: FxHashSet<char>,
}

impl ColumnManager {
    /// Manager with no table configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the character ordering used by columns created from now on.
    ///
    /// Existing columns keep the table they were created with until they
    /// are pruned; the tables themselves are immutable.
    pub fn set_character_table(&mut self, table: Arc<CharacterTable>) {
        self.supported = table.members().collect();
        let _ = self.supported.insert(EMPTY_GLYPH);
        self.table = Some(table);
    }

    /// Whether a character table has been configured.
    #[must_use]
    pub fn has_character_table(&self) -> bool {
        self.table.is_some()
    }

    /// Number of live columns, including ones still shrinking out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Grow the column list to at least `size` by inserting fresh columns
    /// at the front (the most significant end).
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::CharacterTableNotSet`] if no table has
    /// been configured.
    pub fn insert_columns_up_to(
        &mut self,
        size: usize,
    ) -> Result<(), GlyphrollError> {
        let table = self
            .table
            .as_ref()
            .ok_or(GlyphrollError::CharacterTableNotSet)?;
        while self.columns.len() < size {
            self.columns.insert(0, Column::new(Arc::clone(table)));
        }
        Ok(())
    }

    /// Grow or trim the column list to exactly `size`. Excess columns are
    /// dropped from the front.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::CharacterTableNotSet`] if no table has
    /// been configured.
    pub fn ensure_column_size(
        &mut self,
        size: usize,
    ) -> Result<(), GlyphrollError> {
        if self.columns.len() > size {
            let excess = self.columns.len() - size;
            drop(self.columns.drain(..excess));
        }
        self.insert_columns_up_to(size)
    }

    /// Point the columns at new target text.
    ///
    /// Columns that already shrank to zero width are pruned first (the
    /// deferred half of deletion). A non-animated update additionally
    /// trims the list to exactly the target length so nothing lingers; an
    /// animated one only grows, leaving outgoing characters a column to
    /// shrink through. The alignment then runs between the columns'
    /// current target characters and `target`, and its actions are applied
    /// left to right.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::CharacterTableNotSet`] if no table has
    /// been configured.
    pub fn set_text(
        &mut self,
        metrics: &mut DrawMetrics,
        target: &[char],
        animate: bool,
    ) -> Result<(), GlyphrollError> {
        let table = Arc::clone(
            self.table
                .as_ref()
                .ok_or(GlyphrollError::CharacterTableNotSet)?,
        );

        let before = self.columns.len();
        self.columns.retain(|c| c.current_width() > 0.0);
        if before != self.columns.len() {
            log::debug!("pruned {} exhausted columns", before - self.columns.len());
        }

        if animate {
            self.insert_columns_up_to(target.len())?;
        } else {
            self.ensure_column_size(target.len())?;
        }

        let source: Vec<char> =
            self.columns.iter().map(Column::target_char).collect();
        let actions =
            compute_column_actions(&source, target, Some(&self.supported));

        let mut column_index = 0;
        let mut text_index = 0;
        for action in actions {
            match action {
                ColumnAction::Insert => {
                    self.columns
                        .insert(column_index, Column::new(Arc::clone(&table)));
                    self.columns[column_index]
                        .set_target_char(metrics, target[text_index]);
                    column_index += 1;
                    text_index += 1;
                }
                ColumnAction::Same => {
                    self.columns[column_index]
                        .set_target_char(metrics, target[text_index]);
                    column_index += 1;
                    text_index += 1;
                }
                ColumnAction::Delete => {
                    self.columns[column_index]
                        .set_target_char(metrics, EMPTY_GLYPH);
                    column_index += 1;
                }
            }
        }

        Ok(())
    }

    /// Whether `target` matches what the columns are already converging
    /// to, in which case the caller should skip the update entirely.
    #[must_use]
    pub fn should_debounce_text(&self, target: &[char]) -> bool {
        self.columns.len() == target.len()
            && self
                .columns
                .iter()
                .zip(target)
                .all(|(column, &c)| column.target_char() == c)
    }

    /// Fan a progress update out to every column.
    pub fn set_progress(&mut self, metrics: &mut DrawMetrics, progress: f32) {
        for column in &mut self.columns {
            column.set_progress(metrics, progress);
        }
    }

    /// Settle all columns after the host clock reports completion.
    pub fn on_animation_end(&mut self, metrics: &mut DrawMetrics) {
        for column in &mut self.columns {
            column.on_animation_end(metrics);
        }
    }

    /// Sum of the columns' interpolated widths.
    #[must_use]
    pub fn current_width(&self) -> f32 {
        self.columns.iter().map(Column::current_width).sum()
    }

    /// Sum of the widths layout must reserve.
    #[must_use]
    pub fn minimum_required_width(&self) -> f32 {
        self.columns
            .iter()
            .map(Column::minimum_required_width)
            .sum()
    }

    /// The currently visible characters, vanished columns omitted.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.columns
            .iter()
            .map(Column::current_char)
            .filter(|&c| c != EMPTY_GLYPH)
            .collect()
    }

    /// Draw every column left to right, advancing the horizontal cursor by
    /// each column's current width. Columns never see absolute positions
    /// beyond the cursor handed to them.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let mut x = 0.0;
        for column in &self.columns {
            column.draw(surface, x);
            x += column.current_width();
        }
    }

    /// Target characters per column, in order. Empty-glyph targets mark
    /// columns on their way out.
    fn target_text(&self) -> Vec<char> {
        self.columns.iter().map(Column::target_char).collect()
    }
}

impl fmt::Debug for ColumnManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnManager")
            .field("columns", &self.columns.len())
            .field("has_table", &self.table.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::GlyphMeasure;

    struct FixedMeasure;

    impl GlyphMeasure for FixedMeasure {
        fn glyph_width(&self, _glyph: char) -> f32 {
            10.0
        }

        fn line_height(&self) -> f32 {
            5.0
        }

        fn baseline(&self) -> f32 {
            4.0
        }
    }

    fn metrics() -> DrawMetrics {
        DrawMetrics::new(Box::new(FixedMeasure))
    }

    fn manager() -> ColumnManager {
        let mut manager = ColumnManager::new();
        let table = CharacterTable::new("1234567890").unwrap();
        manager.set_character_table(Arc::new(table));
        manager
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_requires_character_table() {
        let mut m = metrics();
        let mut manager = ColumnManager::new();
        assert!(matches!(
            manager.set_text(&mut m, &chars("1"), false),
            Err(GlyphrollError::CharacterTableNotSet)
        ));
        assert!(matches!(
            manager.insert_columns_up_to(1),
            Err(GlyphrollError::CharacterTableNotSet)
        ));
        assert!(matches!(
            manager.ensure_column_size(1),
            Err(GlyphrollError::CharacterTableNotSet)
        ));
    }

    #[test]
    fn test_insert_columns_up_to_never_shrinks() {
        let mut manager = manager();
        manager.insert_columns_up_to(2).unwrap();
        assert_eq!(manager.len(), 2);
        manager.insert_columns_up_to(5).unwrap();
        assert_eq!(manager.len(), 5);
        manager.insert_columns_up_to(1).unwrap();
        assert_eq!(manager.len(), 5);
    }

    #[test]
    fn test_ensure_column_size_trims() {
        let mut manager = manager();
        manager.ensure_column_size(2).unwrap();
        assert_eq!(manager.len(), 2);
        manager.ensure_column_size(5).unwrap();
        assert_eq!(manager.len(), 5);
        manager.ensure_column_size(1).unwrap();
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_set_text_animated_keeps_shrinking_column() {
        let mut m = metrics();
        let mut manager = manager();

        manager.set_text(&mut m, &chars("1234"), true).unwrap();
        assert_eq!(manager.len(), 4);
        assert_eq!(manager.target_text(), chars("1234"));
        manager.set_progress(&mut m, 1.0);

        // One column too many: the leftmost scrolls out but stays in the
        // list until it has fully shrunk.
        manager.set_text(&mut m, &chars("999"), true).unwrap();
        assert_eq!(manager.len(), 4);
        assert_eq!(
            manager.target_text(),
            vec![EMPTY_GLYPH, '9', '9', '9']
        );
    }

    #[test]
    fn test_set_text_not_animated_trims_immediately() {
        let mut m = metrics();
        let mut manager = manager();

        manager.set_text(&mut m, &chars("1234"), false).unwrap();
        assert_eq!(manager.len(), 4);

        manager.set_text(&mut m, &chars("999"), false).unwrap();
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.target_text(), chars("999"));
    }

    #[test]
    fn test_exhausted_columns_pruned_on_next_set_text() {
        let mut m = metrics();
        let mut manager = manager();

        manager.set_text(&mut m, &chars("12"), true).unwrap();
        manager.set_progress(&mut m, 1.0);

        manager.set_text(&mut m, &chars("1"), true).unwrap();
        assert_eq!(manager.target_text(), vec!['1', EMPTY_GLYPH]);

        // Finish the shrink: the deleted column is zero wide but still
        // present until the next text update.
        manager.set_progress(&mut m, 1.0);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.current_width(), 10.0);

        manager.set_text(&mut m, &chars("12"), true).unwrap();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.target_text(), chars("12"));
    }

    #[test]
    fn test_growth_inserts_at_front() {
        let mut m = metrics();
        let mut manager = manager();

        manager.set_text(&mut m, &chars("99"), true).unwrap();
        manager.set_progress(&mut m, 1.0);

        // Growing 99 -> 1234: the two existing columns keep scrolling in
        // place at the least significant end.
        manager.set_text(&mut m, &chars("1234"), true).unwrap();
        assert_eq!(manager.len(), 4);
        assert_eq!(manager.target_text(), chars("1234"));
        assert_eq!(manager.current_text(), "99");
    }

    #[test]
    fn test_should_debounce_text() {
        let mut m = metrics();
        let mut manager = manager();
        manager.set_text(&mut m, &chars("1234"), false).unwrap();
        assert!(manager.should_debounce_text(&chars("1234")));
        assert!(!manager.should_debounce_text(&chars("12345")));
        assert!(!manager.should_debounce_text(&chars("1235")));
    }

    #[test]
    fn test_round_trip_matches_direct_set() {
        let mut m = metrics();

        let mut direct = manager();
        direct.set_text(&mut m, &chars("12"), false).unwrap();

        let mut round = manager();
        round.set_text(&mut m, &chars("12"), false).unwrap();
        round.set_text(&mut m, &chars("345"), false).unwrap();
        round.set_text(&mut m, &chars("12"), false).unwrap();

        assert_eq!(round.target_text(), direct.target_text());
    }

    #[test]
    fn test_width_aggregation() {
        let mut m = metrics();
        let mut manager = manager();
        manager.set_text(&mut m, &chars("123"), false).unwrap();
        manager.set_progress(&mut m, 1.0);
        assert_eq!(manager.current_width(), 30.0);
        assert_eq!(manager.minimum_required_width(), 30.0);

        manager.set_text(&mut m, &chars("12"), true).unwrap();
        manager.set_progress(&mut m, 0.5);
        // The deleted column is halfway through its shrink.
        assert_eq!(manager.current_width(), 25.0);
    }

    #[test]
    fn test_draw_advances_cursor_by_column_width() {
        struct RecordingSurface {
            glyphs: Vec<(char, f32, f32)>,
        }

        impl Surface for RecordingSurface {
            fn draw_glyph(&mut self, glyph: char, x: f32, y: f32) {
                self.glyphs.push((glyph, x, y));
            }
        }

        let mut m = metrics();
        let mut manager = manager();
        manager.set_text(&mut m, &chars("21"), false).unwrap();
        manager.set_progress(&mut m, 1.0);

        let mut surface = RecordingSurface { glyphs: Vec::new() };
        manager.draw(&mut surface);

        let resting: Vec<(char, f32)> = surface
            .glyphs
            .iter()
            .filter(|(_, _, y)| *y == 0.0)
            .map(|(c, x, _)| (*c, *x))
            .collect();
        assert_eq!(resting, vec![('2', 0.0), ('1', 10.0)]);
    }

    #[test]
    fn test_current_text_tracks_interpolated_chars() {
        let mut m = metrics();
        let mut manager = manager();
        manager.set_text(&mut m, &chars("19"), false).unwrap();
        manager.set_progress(&mut m, 1.0);
        assert_eq!(manager.current_text(), "19");
    }
}
