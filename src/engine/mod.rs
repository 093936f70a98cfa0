//! The state machine: sessions, selection tracking, transitions, rating.

pub mod clock;
pub mod rating;
pub mod selection;
pub mod session;
pub mod transition;

pub use clock::{format_clock, ElapsedDisplay};
pub use rating::Rating;
pub use selection::Selection;
pub use session::{GameSession, SessionSnapshot, TransitionRecord};
pub use transition::{Flip, TransitionKind, TransitionResult};
