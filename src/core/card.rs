//! Card identity, symbols, and per-card face state.
//!
//! Every card on the board is identified by its slot index (0-15). The slot
//! doubles as the grid position: row = index / 4, column = index % 4.
//!
//! ## Identifier Format
//!
//! Slots render as zero-padded two-digit identifiers ("00" through "15").
//! `FromStr` accepts the same format, with or without a `card` prefix, so a
//! renderer that tags its elements `card00`..`card15` can feed click targets
//! straight back into the engine.
//!
//! ## Usage
//!
//! ```
//! use pairs_engine::core::CardId;
//!
//! let card = CardId::new(7);
//! assert_eq!(card.to_string(), "07");
//! assert_eq!(card.row(), 1);
//! assert_eq!(card.col(), 3);
//!
//! assert_eq!("card07".parse::<CardId>(), Ok(card));
//! assert!("card99".parse::<CardId>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::board::Board;

/// Board slot identifier for a card.
///
/// Valid values are `0..16`. Slot index encodes grid position on the 4x4
/// board. Use `from_index` to validate untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a card ID from a known-valid slot index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        debug_assert!((index as usize) < Board::SIZE);
        Self(index)
    }

    /// Create a card ID from an untrusted index.
    ///
    /// Returns `None` when the index is off the board.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < Board::SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Get the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Grid row (0-3) of this slot.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / Board::GRID_DIM as u8
    }

    /// Grid column (0-3) of this slot.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % Board::GRID_DIM as u8
    }

    /// Iterate over all board slots in order.
    pub fn all() -> impl Iterator<Item = CardId> {
        (0..Board::SIZE as u8).map(CardId)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Error returned when parsing a card identifier fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCardIdError {
    input: String,
}

impl std::fmt::Display for ParseCardIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid card identifier: {:?}", self.input)
    }
}

impl std::error::Error for ParseCardIdError {}

impl FromStr for CardId {
    type Err = ParseCardIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("card").unwrap_or(s);
        let bytes = digits.as_bytes();
        if bytes.len() == 2 && bytes.iter().all(u8::is_ascii_digit) {
            let value = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
            if (value as usize) < Board::SIZE {
                return Ok(Self(value));
            }
        }
        Err(ParseCardIdError {
            input: s.to_string(),
        })
    }
}

/// A card face symbol.
///
/// The board carries 8 distinct symbols, each owned by exactly two cards.
/// Equality on the wrapped glyph decides whether two cards match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub char);

impl Symbol {
    /// Get the rendered glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-card machine state.
///
/// `Solved` is terminal: once a card reaches it, no transition leaves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceState {
    /// Face down, available for selection.
    #[default]
    Down,
    /// Face up, pending pair resolution.
    Selected,
    /// Face up permanently, pair already matched.
    Solved,
}

impl FaceState {
    /// Whether this state renders face up.
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self, FaceState::Selected | FaceState::Solved)
    }
}

/// A card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Board slot of this card.
    pub id: CardId,
    /// Face symbol. Fixed for the life of a session.
    pub symbol: Symbol,
    /// Current machine state.
    pub face: FaceState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub(crate) const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face: FaceState::Down,
        }
    }

    /// Whether this card is permanently solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.face, FaceState::Solved)
    }

    /// Whether this card is face up pending resolution.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        matches!(self.face, FaceState::Selected)
    }

    /// Whether this card renders face up.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face.is_face_up()
    }
}
