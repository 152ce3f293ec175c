//! Ticker configuration with TOML preset support.
//!
//! All tweakable settings (clock timing, easing, scroll direction, the
//! built-in character table, layout behavior) are consolidated here.
//! Options serialize to/from TOML so hosts can ship view presets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::GlyphrollError;
use crate::table::{ScrollDirection, LOWERCASE_ALPHABET, NUMBERS};

/// Built-in character orderings installable at construction time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CharacterPreset {
    /// No table until the host supplies one.
    #[default]
    None,
    /// Digits zero through nine.
    Numbers,
    /// Lowercase latin letters.
    LowercaseAlphabet,
}

impl CharacterPreset {
    /// The ordered character sequence for this preset, if any.
    #[must_use]
    pub fn characters(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Numbers => Some(NUMBERS),
            Self::LowercaseAlphabet => Some(LOWERCASE_ALPHABET),
        }
    }
}

/// Ticker configuration. Every field has a default so partial TOML files
/// (e.g. only overriding `duration_ms`) work correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerOptions {
    /// Transition duration in milliseconds, read by the host clock.
    pub duration_ms: u64,
    /// Delay in milliseconds before a transition starts.
    pub delay_ms: u64,
    /// Progress easing curve.
    pub easing: EasingFunction,
    /// Preferred scrolling direction through the character table.
    pub scroll_direction: ScrollDirection,
    /// Report the animated width instead of the reserved width during
    /// layout. Smoother for hosts that re-measure every frame, at the cost
    /// of relayout churn.
    pub animate_measurement_change: bool,
    /// Character table installed when the ticker is constructed.
    pub characters: CharacterPreset,
    /// Text applied without animation as soon as a table is available.
    pub initial_text: Option<String>,
}

impl Default for TickerOptions {
    fn default() -> Self {
        Self {
            duration_ms: 350,
            delay_ms: 0,
            easing: EasingFunction::default(),
            scroll_direction: ScrollDirection::default(),
            animate_measurement_change: false,
            characters: CharacterPreset::default(),
            initial_text: None,
        }
    }
}

impl TickerOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::Io`] when the file cannot be read and
    /// [`GlyphrollError::OptionsParse`] when it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GlyphrollError> {
        let content =
            std::fs::read_to_string(path).map_err(GlyphrollError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GlyphrollError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::OptionsParse`] when serialization fails
    /// and [`GlyphrollError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GlyphrollError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlyphrollError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlyphrollError::Io)?;
        }
        std::fs::write(path, content).map_err(GlyphrollError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
