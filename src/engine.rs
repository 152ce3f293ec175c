//! Ticker facade that owns the column machinery and talks to the host.
//!
//! The host supplies three collaborators: a [`GlyphMeasure`] for text
//! measurement, a [`Surface`] that receives draw commands, and a clock
//! that repeatedly calls [`Ticker::set_progress`] with a fraction in
//! [0, 1] followed by [`Ticker::finish_animation`]. Everything else
//! (alignment, column bookkeeping, interpolation) happens in here.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::GlyphrollError;
use crate::manager::ColumnManager;
use crate::metrics::{DrawMetrics, GlyphMeasure};
use crate::options::TickerOptions;
use crate::surface::Surface;
use crate::table::{CharacterTable, ScrollDirection};

/// Animated scrolling text display engine.
///
/// Single-threaded by design: all mutation must be serialized by the
/// caller. The character table is shared immutably (`Arc`), so wrapping
/// the whole ticker in a mutex is enough for multi-threaded hosts.
pub struct Ticker {
    metrics: DrawMetrics,
    manager: ColumnManager,
    options: TickerOptions,
    /// Last text handed to `set_text`, not necessarily fully shown yet.
    text: String,
    /// Text waiting for a character table to be configured.
    pending_text: Option<String>,
}

impl Ticker {
    /// Build a ticker over the host's measurement provider.
    ///
    /// If the options name a character preset it is installed right away,
    /// and any `initial_text` is applied without animation.
    ///
    /// # Errors
    ///
    /// Propagates table construction failures from the configured preset.
    pub fn new(
        measure: Box<dyn GlyphMeasure>,
        options: TickerOptions,
    ) -> Result<Self, GlyphrollError> {
        let mut metrics = DrawMetrics::new(measure);
        metrics.set_preferred_direction(options.scroll_direction);

        let mut ticker = Self {
            metrics,
            manager: ColumnManager::new(),
            pending_text: options.initial_text.clone(),
            options,
            text: String::new(),
        };
        if let Some(characters) = ticker.options.characters.characters() {
            ticker.set_characters(characters)?;
        }
        Ok(ticker)
    }

    /// Configure the character ordering used for scroll animations.
    ///
    /// Replaces any previous table; columns created from now on use the
    /// new ordering. Pending initial text is applied without animation.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::ReservedCharacter`] when `characters`
    /// contains the empty sentinel.
    pub fn set_characters(
        &mut self,
        characters: &str,
    ) -> Result<(), GlyphrollError> {
        let table = Arc::new(CharacterTable::new(characters)?);
        self.manager.set_character_table(table);
        log::info!(
            "character table configured ({} glyphs)",
            characters.chars().count()
        );

        if let Some(pending) = self.pending_text.take() {
            let _ = self.set_text_with(&pending, false)?;
        }
        Ok(())
    }

    /// Whether a character table has been configured.
    #[must_use]
    pub fn is_character_table_set(&self) -> bool {
        self.manager.has_character_table()
    }

    /// Set the display text, animating iff the ticker currently shows a
    /// non-empty text.
    ///
    /// Returns `true` when the host should run its animation clock.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::CharacterTableNotSet`] when called before
    /// a table is configured.
    pub fn set_text(&mut self, text: &str) -> Result<bool, GlyphrollError> {
        let animate = !self.text.is_empty();
        self.set_text_with(text, animate)
    }

    /// Set the display text with an explicit animate flag.
    ///
    /// Returns `true` when the host should run its animation clock;
    /// non-animated and debounced updates return `false` and are applied
    /// (or skipped) immediately.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::CharacterTableNotSet`] when called before
    /// a table is configured.
    pub fn set_text_with(
        &mut self,
        text: &str,
        animate: bool,
    ) -> Result<bool, GlyphrollError> {
        if text == self.text {
            return Ok(false);
        }

        let target: Vec<char> = text.chars().collect();
        if self.manager.should_debounce_text(&target) {
            log::debug!("debounced redundant text update");
            text.clone_into(&mut self.text);
            return Ok(false);
        }

        log::debug!(
            "text transition {:?} -> {:?} (animate: {animate})",
            self.text,
            text
        );
        self.manager.set_text(&mut self.metrics, &target, animate)?;
        text.clone_into(&mut self.text);

        if animate {
            Ok(true)
        } else {
            self.manager.set_progress(&mut self.metrics, 1.0);
            self.manager.on_animation_end(&mut self.metrics);
            Ok(false)
        }
    }

    /// Last text handed to [`Self::set_text`]. The animation may still be
    /// converging toward it.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The characters currently visible, mid-scroll glyphs included.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.manager.current_text()
    }

    /// Advance all columns to the host clock fraction `raw`, with the
    /// configured easing applied.
    pub fn set_progress(&mut self, raw: f32) {
        let eased = self.options.easing.evaluate(raw);
        self.manager.set_progress(&mut self.metrics, eased);
    }

    /// Completion signal from the host clock: land all columns exactly on
    /// their targets and settle widths.
    pub fn finish_animation(&mut self) {
        self.manager.set_progress(&mut self.metrics, 1.0);
        self.manager.on_animation_end(&mut self.metrics);
    }

    /// Width the host layout should reserve, per the measurement-change
    /// policy in the options.
    #[must_use]
    pub fn desired_width(&self) -> f32 {
        if self.options.animate_measurement_change {
            self.manager.current_width()
        } else {
            self.manager.minimum_required_width()
        }
    }

    /// Width of the text as currently drawn.
    #[must_use]
    pub fn current_width(&self) -> f32 {
        self.manager.current_width()
    }

    /// Height of one glyph row.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.metrics.line_height()
    }

    /// Distance from the top of the row down to the text baseline.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.metrics.baseline()
    }

    /// Duration the host clock should run a transition for.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.options.duration_ms)
    }

    /// Delay before the host clock should start a transition.
    #[must_use]
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.options.delay_ms)
    }

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &TickerOptions {
        &self.options
    }

    /// Change the preferred scrolling direction for future transitions.
    pub fn set_scroll_direction(&mut self, direction: ScrollDirection) {
        self.options.scroll_direction = direction;
        self.metrics.set_preferred_direction(direction);
    }

    /// Change the easing curve applied to host clock progress.
    pub fn set_easing(&mut self, easing: crate::easing::EasingFunction) {
        self.options.easing = easing;
    }

    /// Change the transition duration the host clock reads.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.options.duration_ms = duration.as_millis() as u64;
    }

    /// Re-read font metrics. Call after anything about the host's text
    /// rendering changes (size, face, style).
    pub fn invalidate_metrics(&mut self) {
        self.metrics.invalidate();
    }

    /// Draw the current frame onto the host surface.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.manager.draw(surface);
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("text", &self.text)
            .field("columns", &self.manager.len())
            .field("table_set", &self.manager.has_character_table())
            .finish_non_exhaustive()
    }
}
