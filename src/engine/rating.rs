//! Star rating derived from the turn counter.
//!
//! For N pairs on the board, N turns is the floor (a match every attempt)
//! and 2N is what perfect recall needs after revealing every card once.
//! The thresholds hang off those two marks: at most 2N turns keeps three
//! stars, more than 3N drops to one.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;

const LIT_STAR: char = '\u{2605}';
const FADED_STAR: char = '\u{2606}';

/// Session rating, one to three stars.
///
/// A pure function of the turn counter, so it never climbs back up as a
/// session progresses.
///
/// ```
/// use pairs_engine::engine::Rating;
///
/// assert_eq!(Rating::for_turns(8), Rating::ThreeStar);
/// assert_eq!(Rating::for_turns(17), Rating::TwoStar);
/// assert_eq!(Rating::for_turns(25), Rating::OneStar);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    /// More than 3N turns.
    OneStar,
    /// More than 2N turns, at most 3N.
    TwoStar,
    /// At most 2N turns.
    ThreeStar,
}

impl Rating {
    /// Derive the rating from a turn count.
    #[must_use]
    pub fn for_turns(turns_taken: u32) -> Self {
        const PAIRS: u32 = Board::PAIR_COUNT as u32;

        if turns_taken > 3 * PAIRS {
            Rating::OneStar
        } else if turns_taken > 2 * PAIRS {
            Rating::TwoStar
        } else {
            Rating::ThreeStar
        }
    }

    /// Number of lit stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        match self {
            Rating::OneStar => 1,
            Rating::TwoStar => 2,
            Rating::ThreeStar => 3,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.stars() as usize;
        for _ in 0..lit {
            write!(f, "{LIT_STAR}")?;
        }
        for _ in lit..3 {
            write!(f, "{FADED_STAR}")?;
        }
        Ok(())
    }
}
