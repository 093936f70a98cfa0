//! Elapsed-time formatting for the session clock display.
//!
//! The engine owns only the time origin; a presentation layer polls
//! `GameSession::elapsed` on its own tick (every 250ms or so) and pushes
//! the duration through an `ElapsedDisplay`, which reports a value only
//! when the rendered "mm:ss" string actually changed. Sub-second ticks
//! therefore redraw at most once per second, and a stall between ticks
//! never makes the clock skip visibly.

use std::time::Duration;

/// Format a duration as a zero-padded "mm:ss" clock string.
///
/// ```
/// use std::time::Duration;
/// use pairs_engine::engine::format_clock;
///
/// assert_eq!(format_clock(Duration::from_secs(0)), "00:00");
/// assert_eq!(format_clock(Duration::from_secs(83)), "01:23");
/// ```
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Change-detecting clock display state.
///
/// Caches the last rendered value so a fast presentation tick only
/// redraws when the visible string moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElapsedDisplay {
    last: String,
}

impl Default for ElapsedDisplay {
    fn default() -> Self {
        Self {
            last: format_clock(Duration::ZERO),
        }
    }
}

impl ElapsedDisplay {
    /// Create a display showing "00:00".
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed value.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.last
    }

    /// Feed a new elapsed duration.
    ///
    /// Returns the freshly formatted string when it differs from what is
    /// currently displayed, `None` when no redraw is needed.
    pub fn update(&mut self, elapsed: Duration) -> Option<&str> {
        let formatted = format_clock(elapsed);
        if formatted == self.last {
            None
        } else {
            self.last = formatted;
            Some(&self.last)
        }
    }
}
