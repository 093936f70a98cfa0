//! Core types: cards, the board, RNG.
//!
//! These are the fundamental building blocks the state machine in `engine`
//! operates on.

pub mod board;
pub mod card;
pub mod rng;

pub use board::Board;
pub use card::{Card, CardId, FaceState, ParseCardIdError, Symbol};
pub use rng::{GameRng, GameRngState};
