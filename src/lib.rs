//! Odometer-style scrolling text animation engine.
//!
//! Glyphroll animates a rendered string from one value to the next by
//! scrolling each character position (a "column") through the glyphs that
//! lie between its current and target characters, instead of cross-fading
//! or swapping text abruptly. An edit-distance alignment decides which
//! columns are kept, inserted, or scrolled out; a cyclic character table
//! resolves the scroll path (with wraparound and direction preference);
//! and a per-column state machine interpolates the visible glyph pair,
//! offset, and width at any progress value, surviving mid-flight
//! retargeting without visual jumps.
//!
//! The crate is host-agnostic and single-threaded: text measurement, the
//! drawing surface, and the animation clock are all supplied by the host
//! through small trait boundaries.
//!
//! # Key entry points
//!
//! - [`engine::Ticker`] - the facade hosts talk to
//! - [`table::CharacterTable`] - the ordering that defines scroll paths
//! - [`alignment::compute_column_actions`] - the column diff
//! - [`options::TickerOptions`] - runtime configuration (TOML presets)
//!
//! # Example
//!
//! ```
//! use glyphroll::engine::Ticker;
//! use glyphroll::metrics::GlyphMeasure;
//! use glyphroll::options::TickerOptions;
//! use glyphroll::surface::Surface;
//!
//! struct MonoMeasure;
//!
//! impl GlyphMeasure for MonoMeasure {
//!     fn glyph_width(&self, _glyph: char) -> f32 {
//!         8.0
//!     }
//!     fn line_height(&self) -> f32 {
//!         16.0
//!     }
//!     fn baseline(&self) -> f32 {
//!         12.0
//!     }
//! }
//!
//! struct CollectSurface(Vec<(char, f32, f32)>);
//!
//! impl Surface for CollectSurface {
//!     fn draw_glyph(&mut self, glyph: char, x: f32, y: f32) {
//!         self.0.push((glyph, x, y));
//!     }
//! }
//!
//! let mut ticker =
//!     Ticker::new(Box::new(MonoMeasure), TickerOptions::default())?;
//! ticker.set_characters("0123456789")?;
//! let _ = ticker.set_text_with("100", false)?;
//!
//! // Retargeting animates; the host clock drives progress.
//! let animating = ticker.set_text("099")?;
//! assert!(animating);
//! ticker.set_progress(0.5);
//!
//! let mut surface = CollectSurface(Vec::new());
//! ticker.draw(&mut surface);
//! assert!(!surface.0.is_empty());
//! # Ok::<(), glyphroll::error::GlyphrollError>(())
//! ```

pub mod alignment;
pub mod column;
pub mod easing;
pub mod engine;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod options;
pub mod surface;
pub mod table;
