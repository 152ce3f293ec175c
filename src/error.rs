//! Crate-level error types.

use std::fmt;

/// Errors produced by the glyphroll crate.
#[derive(Debug)]
pub enum GlyphrollError {
    /// A user-supplied character set contained the reserved empty sentinel.
    ReservedCharacter,
    /// Text was set before a character table was configured.
    CharacterTableNotSet,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for GlyphrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedCharacter => {
                write!(f, "character set contains the reserved empty glyph")
            }
            Self::CharacterTableNotSet => {
                write!(f, "no character table configured")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for GlyphrollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GlyphrollError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
