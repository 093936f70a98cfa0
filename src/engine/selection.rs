//! The pending-selection pair.
//!
//! Holds the cards currently face up but not yet solved. An explicit
//! ordered pair rather than a set: "which card was selected first" is part
//! of the design, not an artifact of iteration order. Capacity is two by
//! construction; the second slot can only be occupied while the first is.

use serde::{Deserialize, Serialize};

use crate::core::card::CardId;

/// Ordered pair of pending selections.
///
/// Read access is public; mutation happens only through the session's
/// transition logic.
///
/// ```
/// use pairs_engine::engine::Selection;
///
/// let selection = Selection::default();
/// assert!(selection.is_empty());
/// assert_eq!(selection.len(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    first: Option<CardId>,
    second: Option<CardId>,
}

impl Selection {
    /// Number of pending selections (0, 1, or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.first.iter().count() + self.second.iter().count()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The earlier of the pending selections.
    #[must_use]
    pub fn first(&self) -> Option<CardId> {
        self.first
    }

    /// The later of the pending selections.
    #[must_use]
    pub fn second(&self) -> Option<CardId> {
        self.second
    }

    /// Whether the given card is pending.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.first == Some(card) || self.second == Some(card)
    }

    /// Iterate pending selections in selection order.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.first.into_iter().chain(self.second)
    }

    /// Add a selection into the next free slot.
    pub(crate) fn push(&mut self, card: CardId) {
        debug_assert!(!self.contains(card), "card {card} already selected");

        if self.first.is_none() {
            self.first = Some(card);
        } else {
            debug_assert!(self.second.is_none(), "selection already holds two cards");
            self.second = Some(card);
        }
    }

    /// Remove one pending selection.
    ///
    /// Removing the first promotes the second, keeping selection order
    /// well defined for the next interaction. Returns whether the card
    /// was pending at all.
    pub(crate) fn release(&mut self, card: CardId) -> bool {
        if self.first == Some(card) {
            self.first = self.second.take();
            true
        } else if self.second == Some(card) {
            self.second = None;
            true
        } else {
            false
        }
    }

    /// Clear all pending selections.
    pub(crate) fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }
}
