//! # pairs-engine
//!
//! A memory-matching ("concentration") game engine: a 4x4 board of 16
//! cards holding 8 symbol pairs, driven by a deterministic state machine.
//!
//! ## Design Principles
//!
//! 1. **Sessions are values**: `GameSession` is an explicitly owned object,
//!    not process-wide state. Many sessions can coexist, and tests build
//!    them with pinned decks.
//!
//! 2. **Injectable randomness**: every shuffle flows through `GameRng`,
//!    seeded by the caller. The same seed deals the same board.
//!
//! 3. **Declarative rendering**: the engine never touches a renderer.
//!    `handle_select` returns a `TransitionResult` listing the face states
//!    that changed; any presentation layer replays that list.
//!
//! ## Modules
//!
//! - `core`: card identity, symbols, face state, the board, RNG
//! - `deck`: symbol catalog and the uniform shuffle
//! - `engine`: the session state machine, transitions, rating, clock display
//!
//! ## Example
//!
//! ```
//! use pairs_engine::core::{CardId, GameRng};
//! use pairs_engine::engine::GameSession;
//!
//! let mut rng = GameRng::new(42);
//! let mut session = GameSession::new(&mut rng);
//!
//! // Turn up two cards; whether they match is up to the shuffle.
//! session.handle_select(CardId::from_index(0));
//! let result = session.handle_select(CardId::from_index(1));
//!
//! assert_eq!(result.turns_taken, 1);
//! assert!(session.selection().len() <= 2);
//! ```

pub mod core;
pub mod deck;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{Board, Card, CardId, FaceState, GameRng, GameRngState, ParseCardIdError, Symbol};

pub use crate::deck::{build_deck, is_valid_deck, SYMBOL_CATALOG};

pub use crate::engine::{
    format_clock, ElapsedDisplay, Flip, GameSession, Rating, Selection, SessionSnapshot,
    TransitionKind, TransitionRecord, TransitionResult,
};
