use std::time::{Duration, Instant};

/// Default minimum spacing between processed pointer events
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(100);

/// Leading-edge throttle.
///
/// The first call in a window is let through and starts the window; every
/// later call inside it is dropped outright (not deferred to the window end).
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns true if a call at `now` may proceed, and records it
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
