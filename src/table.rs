//! Character ordering table that defines the scroll path between glyphs.
//!
//! The table dictates which glyphs appear while a column scrolls from one
//! character to another. Given the ordering "abcde", an animation from 'd'
//! to 'b' passes through 'c'. The table is immutable once built; hosts
//! replace it wholesale to reconfigure.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GlyphrollError;

/// Reserved sentinel representing "no glyph".
///
/// Used to animate length changes: a column scrolling toward this glyph
/// shrinks to zero width and vanishes. It may never appear in a
/// user-supplied character ordering.
pub const EMPTY_GLYPH: char = '\0';

/// Digits in ascending order, the classic odometer ordering.
pub const NUMBERS: &str = "0123456789";

/// Lowercase latin letters in alphabetical order.
pub const LOWERCASE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Preferred scrolling direction through the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Take whichever path is shorter, wrapping around the table end if
    /// that saves steps.
    #[default]
    Any,
    /// Always scroll toward lower table indices.
    Up,
    /// Always scroll toward higher table indices.
    Down,
}

/// Resolved pair of table indices for one column transition.
///
/// Indices address the doubled internal layout, so `end_index` may exceed
/// the original character count when the transition wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterIndices {
    /// Index the transition starts from.
    pub start_index: usize,
    /// Index the transition ends at. One past the last slot when scrolling
    /// down into the empty glyph (the vanish lap).
    pub end_index: usize,
}

/// Ordered, immutable set of supported characters with a reserved empty
/// slot.
///
/// Stored as `[EMPTY, list, list]`: the list appears twice back to back so
/// forward wraparound lookups need no modular arithmetic at read time. A
/// reverse map gives O(1) membership and index queries.
#[derive(Debug, Clone)]
pub struct CharacterTable {
    /// Number of characters in the user-supplied ordering.
    original_len: usize,
    /// Doubled glyph storage, `2 * original_len + 1` slots.
    glyphs: Vec<char>,
    /// Character to first-occurrence index in the original ordering.
    index_map: FxHashMap<char, usize>,
}

impl CharacterTable {
    /// Build a table from an ordered character sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphrollError::ReservedCharacter`] if the sequence
    /// contains [`EMPTY_GLYPH`].
    pub fn new(characters: &str) -> Result<Self, GlyphrollError> {
        if characters.contains(EMPTY_GLYPH) {
            return Err(GlyphrollError::ReservedCharacter);
        }

        let chars: Vec<char> = characters.chars().collect();
        let n = chars.len();

        let mut index_map =
            FxHashMap::with_capacity_and_hasher(n, Default::default());
        for (i, &c) in chars.iter().enumerate() {
            let _ = index_map.entry(c).or_insert(i);
        }

        let mut glyphs = Vec::with_capacity(n * 2 + 1);
        glyphs.push(EMPTY_GLYPH);
        glyphs.extend_from_slice(&chars);
        glyphs.extend_from_slice(&chars);

        Ok(Self {
            original_len: n,
            glyphs,
            index_map,
        })
    }

    /// Number of slots in the doubled layout (`2 * N + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the table holds no characters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original_len == 0
    }

    /// Glyph stored at `index`, or `None` when the index is outside the
    /// doubled layout. Out-of-range reads are a normal part of drawing the
    /// rows just beyond a scroll extreme.
    #[must_use]
    pub fn glyph_at(&self, index: usize) -> Option<char> {
        self.glyphs.get(index).copied()
    }

    /// Whether `c` is a member of the ordering (the empty sentinel is not).
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.index_map.contains_key(&c)
    }

    /// Iterate over the member characters, in no particular order.
    pub fn members(&self) -> impl Iterator<Item = char> + '_ {
        self.index_map.keys().copied()
    }

    /// Resolve the index pair for animating from `start` to `end` under the
    /// given direction preference.
    ///
    /// Returns `None` when either character is neither the empty sentinel
    /// nor a member of the table. Pure: identical inputs always produce
    /// identical output.
    #[must_use]
    pub fn indices(
        &self,
        start: char,
        end: char,
        direction: ScrollDirection,
    ) -> Option<CharacterIndices> {
        let mut start_index = self.index_of(start)?;
        let mut end_index = self.index_of(end)?;
        let n = self.original_len;

        match direction {
            ScrollDirection::Down => {
                if end == EMPTY_GLYPH {
                    // Full lap past the end so the glyph scrolls off.
                    end_index = self.glyphs.len();
                } else if end_index < start_index {
                    end_index += n;
                }
            }
            ScrollDirection::Up => {
                if start_index < end_index {
                    start_index += n;
                }
            }
            ScrollDirection::Any => {
                // Wraparound never applies to the empty glyph; appearing
                // and vanishing always take the direct path.
                if start != EMPTY_GLYPH && end != EMPTY_GLYPH {
                    if end_index < start_index {
                        let non_wrap = start_index - end_index;
                        let wrap = n - start_index + end_index;
                        if wrap < non_wrap {
                            end_index += n;
                        }
                    } else if start_index < end_index {
                        let non_wrap = end_index - start_index;
                        let wrap = n - end_index + start_index;
                        if wrap < non_wrap {
                            start_index += n;
                        }
                    }
                }
            }
        }

        Some(CharacterIndices {
            start_index,
            end_index,
        })
    }

    /// Base index of `c`: 0 for the empty sentinel, `1 + first occurrence`
    /// for members, `None` otherwise.
    fn index_of(&self, c: char) -> Option<usize> {
        if c == EMPTY_GLYPH {
            return Some(0);
        }
        self.index_map.get(&c).map(|&i| i + 1)
    }
}
