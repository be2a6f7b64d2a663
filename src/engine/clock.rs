//! Cancelable playback deadline
//!
//! The engine owns exactly one of these.  Every control operation can cancel
//! it synchronously, which is what guarantees that a tick arriving after a
//! `pause`/`reset`/`load_source` boundary applies nothing.

use std::time::{Duration, Instant};

/// Single owned deadline for automatic step advancement.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    deadline: Option<Instant>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        PlaybackClock { deadline: None }
    }

    /// Schedule the next automatic step `interval` after `now`.
    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.deadline = Some(now + interval);
    }

    /// Invalidate any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has elapsed.  Returns true at most once per
    /// `arm`; a canceled or unarmed clock never fires.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
