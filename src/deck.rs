//! Deck construction: the symbol catalog and the shuffle.
//!
//! A deck is the multiset of 16 symbols laid onto the board: 8 distinct
//! glyphs, each appearing exactly twice. `build_deck` produces a uniformly
//! random permutation of that multiset, so every one of the 16!/(2!)^8
//! distinct arrangements is equally likely.

use rustc_hash::FxHashMap;

use crate::core::board::Board;
use crate::core::card::Symbol;
use crate::core::rng::GameRng;

/// The fixed catalog of 8 card face glyphs.
///
/// Chosen for wide glyph support in terminal and browser renderers.
pub const SYMBOL_CATALOG: [Symbol; Board::PAIR_COUNT] = [
    // face screaming in fear
    Symbol('\u{1F631}'),
    // nauseated face
    Symbol('\u{1F922}'),
    // sneezing face
    Symbol('\u{1F927}'),
    // ghost
    Symbol('\u{1F47B}'),
    // zombie
    Symbol('\u{1F9DF}'),
    // wilted flower
    Symbol('\u{1F940}'),
    // game die
    Symbol('\u{1F3B2}'),
    // dagger
    Symbol('\u{1F5E1}'),
];

/// Build a shuffled 16-symbol deck.
///
/// Lays out each catalog symbol twice, then applies the RNG's uniform
/// Fisher-Yates shuffle.
#[must_use]
pub fn build_deck(rng: &mut GameRng) -> [Symbol; Board::SIZE] {
    let mut deck = [SYMBOL_CATALOG[0]; Board::SIZE];
    for (i, &symbol) in SYMBOL_CATALOG.iter().enumerate() {
        deck[i * 2] = symbol;
        deck[i * 2 + 1] = symbol;
    }

    rng.shuffle(&mut deck);
    deck
}

/// Check that a deck has the required multiset shape:
/// 16 entries, 8 distinct symbols, each appearing exactly twice.
#[must_use]
pub fn is_valid_deck(deck: &[Symbol]) -> bool {
    if deck.len() != Board::SIZE {
        return false;
    }

    let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
    for &symbol in deck {
        *counts.entry(symbol).or_insert(0) += 1;
    }

    counts.len() == Board::PAIR_COUNT && counts.values().all(|&count| count == 2)
}
