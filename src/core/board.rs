//! The 4x4 board: a fixed, ordered sequence of 16 cards.
//!
//! Slot index is grid position. The board owns card face state; only the
//! session mutates it, through the transition logic.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, FaceState, Symbol};
use super::rng::GameRng;
use crate::deck;

/// The game board.
///
/// Fixed at 16 slots holding 8 symbol pairs. Dealt once per session and
/// never resized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: [Card; Board::SIZE],
}

impl Board {
    /// Number of card slots.
    pub const SIZE: usize = 16;

    /// Rows and columns of the grid.
    pub const GRID_DIM: usize = 4;

    /// Number of symbol pairs on a full board.
    pub const PAIR_COUNT: usize = 8;

    /// Deal a fresh board with a shuffled deck.
    #[must_use]
    pub fn deal(rng: &mut GameRng) -> Self {
        Self::from_deck(deck::build_deck(rng))
    }

    /// Build a board from an explicit deck layout, bypassing the shuffle.
    ///
    /// Deterministic sessions for tests are built this way. The layout is
    /// taken as given; a malformed deck (symbols not paired) is caught in
    /// debug builds only.
    #[must_use]
    pub fn from_deck(symbols: [Symbol; Board::SIZE]) -> Self {
        debug_assert!(deck::is_valid_deck(&symbols));

        let mut slot = 0u8;
        let cards = symbols.map(|symbol| {
            let card = Card::new(CardId::new(slot), symbol);
            slot += 1;
            card
        });

        Self { cards }
    }

    /// Get a card by slot.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    /// Get the current face state of a slot.
    #[must_use]
    pub fn face(&self, id: CardId) -> FaceState {
        self.cards[id.index()].face
    }

    /// All cards in slot order.
    #[must_use]
    pub fn cards(&self) -> &[Card; Board::SIZE] {
        &self.cards
    }

    /// Count of solved cards on the board.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_solved()).count()
    }

    /// Whether every card on the board is solved.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cards.iter().all(Card::is_solved)
    }

    pub(crate) fn set_face(&mut self, id: CardId, face: FaceState) {
        self.cards[id.index()].face = face;
    }
}
