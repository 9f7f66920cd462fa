//! Per-call-site debouncing.
//!
//! Each debounced operation owns its own [`Debouncer`], so unrelated call
//! sites never cancel each other. Time is passed in explicitly; the owner
//! polls from whatever tick or frame loop it runs.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing anything pending and restarting the delay.
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Take the pending value once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().map(|(due, _)| *due)?;
        if due <= now {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
