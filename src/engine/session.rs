//! The game session: one dealt board and the state machine over it.
//!
//! `GameSession` owns the board, the pending selection pair, the solved
//! set, and the turn counter. Nothing outside this module mutates them;
//! every interaction flows through `handle_select`, which completes its
//! whole transition synchronously before the next input is seen.
//!
//! ## Interaction States
//!
//! The machine is keyed by how many cards are pending:
//!
//! - **0 pending**: any unsolved card turns up and becomes pending.
//! - **1 pending**: the same card turns back down (deselect); a different
//!   unsolved card resolves the attempt, matching into the solved set or
//!   mismatching into a pending pair. Either resolution counts one turn.
//! - **2 pending** (always a prior mismatch): clicking a pending card
//!   turns just that one down; any other unsolved card turns both down
//!   and takes their place. No turns are counted here.
//!
//! Solved cards and inputs with no card under them are ignored in every
//! state.
//!
//! ## Concurrency
//!
//! The session is a plain owned value with no interior mutability. An
//! embedder driving it from more than one thread must serialize access
//! (a mutex or a single-owner actor) to keep transitions atomic.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::time::{Duration, Instant};

use super::rating::Rating;
use super::selection::Selection;
use super::transition::{Flip, TransitionKind, TransitionResult};
use crate::core::board::Board;
use crate::core::card::{CardId, FaceState, Symbol};
use crate::core::rng::GameRng;

/// One entry of the session's transition history.
///
/// No-op interactions are not recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The transition taken.
    pub kind: TransitionKind,
    /// Turn counter after the transition.
    pub turns_taken: u32,
}

/// A single game of memory-matching.
///
/// Created fresh per game and never partially reused; a new game is a new
/// session. The RNG is injected so tests can pin the deal.
///
/// ```
/// use pairs_engine::core::GameRng;
/// use pairs_engine::engine::GameSession;
///
/// let mut rng = GameRng::new(42);
/// let mut session = GameSession::new(&mut rng);
///
/// let result = session.handle_select("03".parse().ok());
/// assert!(!result.is_noop());
/// assert_eq!(session.selection().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    selection: Selection,
    solved: ImHashSet<CardId>,
    turns_taken: u32,
    rating: Rating,
    started_at: Instant,
    win_signaled: bool,
    history: Vector<TransitionRecord>,
}

impl GameSession {
    /// Start a new game with a freshly shuffled board.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        let session = Self::with_board(Board::deal(rng));
        log::debug!("dealt a new board of {} pairs", Board::PAIR_COUNT);
        session
    }

    /// Start a game on an explicit deck layout, bypassing the shuffle.
    #[must_use]
    pub fn from_deck(deck: [Symbol; Board::SIZE]) -> Self {
        Self::with_board(Board::from_deck(deck))
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            selection: Selection::default(),
            solved: ImHashSet::new(),
            turns_taken: 0,
            rating: Rating::for_turns(0),
            started_at: Instant::now(),
            win_signaled: false,
            history: Vector::new(),
        }
    }

    /// Process one select input.
    ///
    /// `None` means the input resolved to no card (a click in the margins)
    /// and is ignored. The returned result carries everything a renderer
    /// needs: the flips to replay, the turn counter, the rating, and
    /// whether this interaction won the game.
    pub fn handle_select(&mut self, target: Option<CardId>) -> TransitionResult {
        let result = self.transition(target);

        debug_assert!(self.selection.len() <= 2);
        debug_assert!(
            self.selection.iter().all(|card| !self.solved.contains(&card)),
            "a card is both solved and pending"
        );

        result
    }

    fn transition(&mut self, target: Option<CardId>) -> TransitionResult {
        let Some(card) = target else {
            log::trace!("select ignored: no card under input");
            return self.finish(TransitionKind::Ignored, SmallVec::new(), false);
        };

        if self.board.card(card).is_solved() {
            log::trace!("select ignored: card {card} already solved");
            return self.finish(TransitionKind::Ignored, SmallVec::new(), false);
        }

        match (self.selection.first(), self.selection.second()) {
            (None, _) => self.select_first(card),
            (Some(pending), None) => self.resolve_attempt(pending, card),
            (Some(first), Some(second)) => self.adjust_pending_pair(first, second, card),
        }
    }

    /// 0 pending: turn the card up.
    fn select_first(&mut self, card: CardId) -> TransitionResult {
        self.board.set_face(card, FaceState::Selected);
        self.selection.push(card);

        log::trace!("card {card} selected");
        self.finish(
            TransitionKind::Selected { card },
            smallvec![Flip {
                card,
                face: FaceState::Selected,
            }],
            false,
        )
    }

    /// 1 pending: deselect on a repeat click, otherwise resolve the attempt.
    fn resolve_attempt(&mut self, pending: CardId, card: CardId) -> TransitionResult {
        if card == pending {
            self.board.set_face(card, FaceState::Down);
            self.selection.clear();

            log::trace!("card {card} deselected");
            return self.finish(
                TransitionKind::Deselected { card },
                smallvec![Flip {
                    card,
                    face: FaceState::Down,
                }],
                false,
            );
        }

        if self.board.card(pending).symbol == self.board.card(card).symbol {
            self.board.set_face(pending, FaceState::Solved);
            self.board.set_face(card, FaceState::Solved);
            self.solved.insert(pending);
            self.solved.insert(card);
            self.selection.clear();

            log::debug!("pair matched: {pending} and {card}");
            self.finish(
                TransitionKind::Matched {
                    pair: (pending, card),
                },
                smallvec![
                    Flip {
                        card: pending,
                        face: FaceState::Solved,
                    },
                    Flip {
                        card,
                        face: FaceState::Solved,
                    },
                ],
                true,
            )
        } else {
            self.board.set_face(card, FaceState::Selected);
            self.selection.push(card);

            log::debug!("mismatch: {pending} and {card}");
            self.finish(
                TransitionKind::Mismatched {
                    pair: (pending, card),
                },
                smallvec![Flip {
                    card,
                    face: FaceState::Selected,
                }],
                true,
            )
        }
    }

    /// 2 pending: release one of the pair, or replace both with the new card.
    fn adjust_pending_pair(
        &mut self,
        first: CardId,
        second: CardId,
        card: CardId,
    ) -> TransitionResult {
        if self.selection.contains(card) {
            self.board.set_face(card, FaceState::Down);
            self.selection.release(card);

            log::trace!("card {card} released");
            return self.finish(
                TransitionKind::Released { card },
                smallvec![Flip {
                    card,
                    face: FaceState::Down,
                }],
                false,
            );
        }

        self.board.set_face(first, FaceState::Down);
        self.board.set_face(second, FaceState::Down);
        self.selection.clear();
        self.board.set_face(card, FaceState::Selected);
        self.selection.push(card);

        log::trace!("pending pair {first}/{second} replaced by {card}");
        self.finish(
            TransitionKind::Replaced {
                released: (first, second),
                selected: card,
            },
            smallvec![
                Flip {
                    card: first,
                    face: FaceState::Down,
                },
                Flip {
                    card: second,
                    face: FaceState::Down,
                },
                Flip {
                    card,
                    face: FaceState::Selected,
                },
            ],
            false,
        )
    }

    fn finish(
        &mut self,
        kind: TransitionKind,
        flips: SmallVec<[Flip; 3]>,
        turn_counted: bool,
    ) -> TransitionResult {
        if turn_counted {
            self.turns_taken += 1;
        }

        let rating = Rating::for_turns(self.turns_taken);
        let rating_changed = rating != self.rating;
        self.rating = rating;

        let won = !self.win_signaled && self.solved.len() == Board::SIZE;
        if won {
            self.win_signaled = true;
            log::debug!(
                "session won in {} turns, rating {}",
                self.turns_taken,
                self.rating
            );
        }

        if !matches!(kind, TransitionKind::Ignored) {
            self.history.push_back(TransitionRecord {
                kind,
                turns_taken: self.turns_taken,
            });
        }

        TransitionResult {
            kind,
            flips,
            turn_counted,
            turns_taken: self.turns_taken,
            rating,
            rating_changed,
            won,
        }
    }

    // === Read access ===

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The pending selection pair.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The solved set. Grows monotonically; a card never leaves it.
    #[must_use]
    pub fn solved(&self) -> &ImHashSet<CardId> {
        &self.solved
    }

    /// Number of solved cards.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    /// Completed match attempts so far.
    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Current rating.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Whether the win has been signaled.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.win_signaled
    }

    /// Wall-clock time since the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Transition history, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TransitionRecord> {
        &self.history
    }

    // === Checkpointing ===

    /// Capture the logical game state.
    ///
    /// The wall-clock origin and the transition history are not part of
    /// the snapshot; a restored session starts its clock fresh.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut solved: Vec<_> = self.solved.iter().copied().collect();
        solved.sort_unstable();

        SessionSnapshot {
            board: self.board.clone(),
            selection: self.selection.clone(),
            solved,
            turns_taken: self.turns_taken,
            win_signaled: self.win_signaled,
        }
    }

    /// Rebuild a session from a snapshot.
    #[must_use]
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        let SessionSnapshot {
            board,
            selection,
            solved,
            turns_taken,
            win_signaled,
        } = snapshot;

        Self {
            board,
            selection,
            solved: solved.into_iter().collect(),
            turns_taken,
            rating: Rating::for_turns(turns_taken),
            started_at: Instant::now(),
            win_signaled,
            history: Vector::new(),
        }
    }
}

/// Serializable checkpoint of a session's logical state.
///
/// The solved set is stored sorted so equal states encode to equal bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    board: Board,
    selection: Selection,
    solved: Vec<CardId>,
    turns_taken: u32,
    win_signaled: bool,
}

impl SessionSnapshot {
    /// Encode to compact bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SYMBOL_CATALOG;

    /// Deck laid out in catalog order: slots 0/1 pair, 2/3 pair, and so on.
    fn ordered_deck() -> [Symbol; Board::SIZE] {
        let mut deck = [SYMBOL_CATALOG[0]; Board::SIZE];
        for (i, &symbol) in SYMBOL_CATALOG.iter().enumerate() {
            deck[i * 2] = symbol;
            deck[i * 2 + 1] = symbol;
        }
        deck
    }

    fn click(session: &mut GameSession, slot: u8) -> TransitionResult {
        session.handle_select(Some(CardId::new(slot)))
    }

    #[test]
    fn test_select_and_deselect() {
        let mut session = GameSession::from_deck(ordered_deck());

        let result = click(&mut session, 0);
        assert_eq!(
            result.kind,
            TransitionKind::Selected {
                card: CardId::new(0)
            }
        );
        assert!(!result.turn_counted);
        assert_eq!(session.selection().len(), 1);
        assert!(session.board().card(CardId::new(0)).is_selected());

        let result = click(&mut session, 0);
        assert_eq!(
            result.kind,
            TransitionKind::Deselected {
                card: CardId::new(0)
            }
        );
        assert!(!result.turn_counted);
        assert_eq!(session.turns_taken(), 0);
        assert!(session.selection().is_empty());
        assert!(!session.board().card(CardId::new(0)).is_face_up());
    }

    #[test]
    fn test_match_solves_pair() {
        let mut session = GameSession::from_deck(ordered_deck());

        click(&mut session, 0);
        let result = click(&mut session, 1);

        assert_eq!(
            result.kind,
            TransitionKind::Matched {
                pair: (CardId::new(0), CardId::new(1))
            }
        );
        assert!(result.turn_counted);
        assert_eq!(result.turns_taken, 1);
        assert_eq!(session.solved_count(), 2);
        assert!(session.selection().is_empty());
        assert!(session.board().card(CardId::new(0)).is_solved());
        assert!(session.board().card(CardId::new(1)).is_solved());
    }

    #[test]
    fn test_mismatch_keeps_both_pending() {
        let mut session = GameSession::from_deck(ordered_deck());

        click(&mut session, 0);
        let result = click(&mut session, 2);

        assert_eq!(
            result.kind,
            TransitionKind::Mismatched {
                pair: (CardId::new(0), CardId::new(2))
            }
        );
        assert!(result.turn_counted);
        assert_eq!(session.turns_taken(), 1);
        assert_eq!(session.selection().len(), 2);
        assert_eq!(session.solved_count(), 0);
    }

    #[test]
    fn test_pending_pair_release_keeps_other() {
        let mut session = GameSession::from_deck(ordered_deck());
        click(&mut session, 0);
        click(&mut session, 2);

        let result = click(&mut session, 0);
        assert_eq!(
            result.kind,
            TransitionKind::Released {
                card: CardId::new(0)
            }
        );
        assert!(!result.turn_counted);
        assert_eq!(session.selection().len(), 1);
        assert_eq!(session.selection().first(), Some(CardId::new(2)));
        assert!(!session.board().card(CardId::new(0)).is_face_up());
        assert!(session.board().card(CardId::new(2)).is_selected());
    }

    #[test]
    fn test_pending_pair_replaced_by_third_card() {
        let mut session = GameSession::from_deck(ordered_deck());
        click(&mut session, 0);
        click(&mut session, 2);

        let result = click(&mut session, 4);
        assert_eq!(
            result.kind,
            TransitionKind::Replaced {
                released: (CardId::new(0), CardId::new(2)),
                selected: CardId::new(4),
            }
        );
        assert!(!result.turn_counted);
        assert_eq!(result.flips.len(), 3);
        assert_eq!(session.turns_taken(), 1);
        assert_eq!(session.selection().len(), 1);
        assert_eq!(session.selection().first(), Some(CardId::new(4)));
        assert!(!session.board().card(CardId::new(0)).is_face_up());
        assert!(!session.board().card(CardId::new(2)).is_face_up());
    }

    #[test]
    fn test_no_card_input_is_ignored_in_every_state() {
        let mut session = GameSession::from_deck(ordered_deck());

        assert!(session.handle_select(None).is_noop());

        click(&mut session, 0);
        assert!(session.handle_select(None).is_noop());

        click(&mut session, 2);
        assert!(session.handle_select(None).is_noop());

        assert_eq!(session.selection().len(), 2);
        assert_eq!(session.turns_taken(), 1);
    }

    #[test]
    fn test_solved_card_clicks_are_ignored() {
        let mut session = GameSession::from_deck(ordered_deck());
        click(&mut session, 0);
        click(&mut session, 1);

        // S0 with a solved card
        let result = click(&mut session, 0);
        assert!(result.is_noop());

        // S1 with a solved card
        click(&mut session, 2);
        let result = click(&mut session, 1);
        assert!(result.is_noop());
        assert_eq!(session.selection().len(), 1);

        // S2 with a solved card
        click(&mut session, 4);
        let result = click(&mut session, 0);
        assert!(result.is_noop());
        assert_eq!(session.selection().len(), 2);

        assert_eq!(session.turns_taken(), 2);
        assert_eq!(session.solved_count(), 2);
    }

    #[test]
    fn test_win_signaled_exactly_once() {
        let mut session = GameSession::from_deck(ordered_deck());

        for pair in 0..Board::PAIR_COUNT as u8 {
            let first = click(&mut session, pair * 2);
            assert!(!first.won);
            let second = click(&mut session, pair * 2 + 1);

            if pair as usize == Board::PAIR_COUNT - 1 {
                assert!(second.won, "final pair must signal the win");
            } else {
                assert!(!second.won);
            }
        }

        assert!(session.is_won());
        assert_eq!(session.solved_count(), Board::SIZE);
        assert_eq!(session.turns_taken(), 8);
        assert_eq!(session.rating(), Rating::ThreeStar);

        // Post-win clicks are all no-ops and never re-signal
        for slot in 0..Board::SIZE as u8 {
            let result = click(&mut session, slot);
            assert!(result.is_noop());
            assert!(!result.won);
        }
    }

    #[test]
    fn test_history_records_non_noop_transitions() {
        let mut session = GameSession::from_deck(ordered_deck());

        session.handle_select(None);
        click(&mut session, 0);
        click(&mut session, 1);
        click(&mut session, 0); // solved, ignored

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].kind,
            TransitionKind::Selected {
                card: CardId::new(0)
            }
        );
        assert_eq!(
            history[1].kind,
            TransitionKind::Matched {
                pair: (CardId::new(0), CardId::new(1))
            }
        );
        assert_eq!(history[1].turns_taken, 1);
    }

    #[test]
    fn test_rating_changed_flag() {
        let mut session = GameSession::from_deck(ordered_deck());

        // Burn turns without solving: mismatch 0 against 2, then unwind the
        // pending pair so the same cycle can repeat.
        let mut changed_at = Vec::new();
        while session.turns_taken() < 18 {
            let a = click(&mut session, 0);
            let b = click(&mut session, 2);
            for result in [a, b] {
                if result.rating_changed {
                    changed_at.push(result.turns_taken);
                }
            }
            click(&mut session, 0);
            click(&mut session, 2);
        }

        // Only the 17th turn moves the rating (three stars to two)
        assert_eq!(changed_at, vec![17]);
        assert_eq!(session.rating(), Rating::TwoStar);
    }

    #[test]
    fn test_new_session_is_reset() {
        let mut rng = GameRng::new(42);
        let mut session = GameSession::new(&mut rng);
        click(&mut session, 0);

        let fresh = GameSession::new(&mut rng);
        assert_eq!(fresh.turns_taken(), 0);
        assert_eq!(fresh.solved_count(), 0);
        assert!(fresh.selection().is_empty());
        assert!(!fresh.is_won());
        assert!(fresh.history().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = GameSession::from_deck(ordered_deck());
        click(&mut session, 0);
        click(&mut session, 1);
        click(&mut session, 2);
        click(&mut session, 4);

        let snapshot = session.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = SessionSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot, decoded);

        let restored = GameSession::restore(decoded);
        assert_eq!(restored.turns_taken(), session.turns_taken());
        assert_eq!(restored.solved(), session.solved());
        assert_eq!(restored.selection(), session.selection());
        assert_eq!(restored.board(), session.board());
        assert_eq!(restored.rating(), session.rating());
        assert_eq!(restored.is_won(), session.is_won());
    }

    #[test]
    fn test_restored_session_keeps_playing() {
        let mut session = GameSession::from_deck(ordered_deck());
        for slot in [0, 1, 2, 3] {
            click(&mut session, slot);
        }

        let mut restored = GameSession::restore(session.snapshot());
        for pair in 2..Board::PAIR_COUNT as u8 {
            click(&mut restored, pair * 2);
            let result = click(&mut restored, pair * 2 + 1);
            if pair as usize == Board::PAIR_COUNT - 1 {
                assert!(result.won);
            }
        }
        assert!(restored.is_won());
    }

    #[test]
    fn test_elapsed_is_monotone() {
        let session = GameSession::from_deck(ordered_deck());
        let earlier = session.elapsed();
        let later = session.elapsed();
        assert!(later >= earlier);
    }
}
