//! Transition reporting: what a single select did to the session.
//!
//! The engine never touches a renderer. Each `handle_select` returns a
//! `TransitionResult` describing the transition taken and the face states
//! that changed; a renderer replays the `flips` list against whatever
//! technology it uses (CSS classes, terminal cells, sprites).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rating::Rating;
use crate::core::card::{CardId, FaceState};

/// One card's face state change.
///
/// `face` is the state the card is now in. Both `Selected` and `Solved`
/// render face up, so a renderer animates a physical flip only when the
/// up/down orientation actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    /// The card that changed.
    pub card: CardId,
    /// Its new face state.
    pub face: FaceState,
}

/// Which transition a select input took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// No-op: no card under the input, or the card was already solved.
    Ignored,
    /// First card of an attempt turned face up.
    Selected {
        /// The card turned up.
        card: CardId,
    },
    /// The sole pending card was clicked again and turned back down.
    Deselected {
        /// The card turned down.
        card: CardId,
    },
    /// Second card matched the first; both are now solved.
    Matched {
        /// The pair, in selection order.
        pair: (CardId, CardId),
    },
    /// Second card did not match; both stay up awaiting the next input.
    Mismatched {
        /// The pair, in selection order.
        pair: (CardId, CardId),
    },
    /// One of two pending cards was clicked and turned back down.
    Released {
        /// The card turned down.
        card: CardId,
    },
    /// A third card replaced a pending non-matching pair.
    Replaced {
        /// The pair turned down, in selection order.
        released: (CardId, CardId),
        /// The card turned up in their place.
        selected: CardId,
    },
}

/// Everything a renderer needs to know about one completed interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResult {
    /// The transition taken.
    pub kind: TransitionKind,

    /// Face state changes to replay, at most three (pair down + new card up).
    pub flips: SmallVec<[Flip; 3]>,

    /// Whether this interaction completed a match attempt.
    pub turn_counted: bool,

    /// Turn counter after this interaction.
    pub turns_taken: u32,

    /// Rating after this interaction.
    pub rating: Rating,

    /// Whether the rating differs from before this interaction.
    /// A rating display only needs redrawing when this is set.
    pub rating_changed: bool,

    /// Set exactly once per session: on the interaction that solved the
    /// final pair.
    pub won: bool,
}

impl TransitionResult {
    /// Whether this interaction changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.kind, TransitionKind::Ignored)
    }
}
