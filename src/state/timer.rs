use std::time::{Duration, Instant};

/// One-shot deadline, polled by the frame loop.
///
/// Nothing runs in the background, so a cancelled or dropped timer can never
/// fire late.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimer {
    deadline: Option<Instant>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer, replacing any pending deadline
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left before the deadline, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns true exactly once, on the first poll at or past the deadline
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
