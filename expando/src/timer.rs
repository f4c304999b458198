//! One-shot, cancellable deadline scheduled on the host event loop.

use std::time::{Duration, Instant};

/// Identifies one arming of an `IdleTimer`.
///
/// Every `arm` bumps the generation, so a handle from an earlier arming never
/// matches the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Default)]
pub struct IdleTimer {
    generation: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl IdleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer `delay` after `now`, replacing any pending instance.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        self.pending = Some((handle, now + delay));
        handle
    }

    /// Cancel the pending instance. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel only if `handle` is still the pending instance.
    pub fn cancel_handle(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some((pending, _)) if pending == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Fire if the deadline has passed. A given arming fires at most once.
    pub fn fire(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if now >= deadline => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}
