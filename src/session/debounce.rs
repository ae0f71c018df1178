//! Debounce state machine.
//!
//! Pure bookkeeping over caller-supplied instants, so it can be driven by a
//! tokio timer, an event loop, or a test clock alike.
//!
//! ```text
//!            touch            touch                 (quiet for `window`)
//!   Idle ──────────► t1 ─────────────► t2 (t1 stale) ──────────────► due
//!     ▲                                                               │
//!     └───────────────────── take / claim(t2) / cancel ◄─────────────┘
//! ```
//!
//! Every touch supersedes the pending ticket. Only the latest ticket can be
//! claimed, so a timer armed for an older edit never applies stale output.

use std::time::{Duration, Instant};

/// Identifies one scheduled regeneration. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    issued: u64,
    pending: Option<(Ticket, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            issued: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an edit at `now`, superseding any pending ticket.
    pub fn touch(&mut self, now: Instant) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.pending = Some((ticket, now));
        ticket
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending.map(|(ticket, _)| ticket)
    }

    /// Whether `ticket` is the one still waiting to fire.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending() == Some(ticket)
    }

    /// When the pending ticket becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at + self.window)
    }

    pub fn due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Consume the pending ticket if the window has elapsed.
    pub fn take(&mut self, now: Instant) -> Option<Ticket> {
        if self.due(now) {
            self.pending.take().map(|(ticket, _)| ticket)
        } else {
            None
        }
    }

    /// Consume `ticket` if it is still current. A timer armed for `ticket`
    /// calls this once its window has passed.
    pub fn claim(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drop the pending ticket, if any.
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.pending.take().map(|(ticket, _)| ticket)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(crate::config::debounce_window())
    }
}
