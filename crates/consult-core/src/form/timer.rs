use std::time::{Duration, Instant};

/// Deadline for the deferred auto-reset, polled by the host event loop.
#[derive(Debug, Default)]
pub struct ResetTimer {
    deadline: Option<Instant>,
}

impl ResetTimer {
    pub fn schedule(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Consumes the deadline once `now` has reached it.
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
