use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use super::TriggerOptions;

/// Pure scheduler state: only handles timing and coalescing.
/// No task spawning, no generation bookkeeping.
pub(super) struct Schedule<T> {
    pub(super) debounce: Duration,
    pub(super) throttle: Option<Duration>,
    pub(super) singleton: bool,
    /// Values waiting for their timer, oldest first
    pub(super) pending: VecDeque<T>,
    /// Quiet-period deadline shared by everything pending
    pub(super) deadline: Option<Instant>,
    pub(super) last_fire: Option<Instant>,
    /// Last observed value, for change detection
    pub(super) last_seen: Option<T>,
}

impl<T: PartialEq + Clone> Schedule<T> {
    pub(super) fn new(options: &TriggerOptions, initial: T) -> Self {
        Self {
            debounce: options.debounce,
            throttle: options.throttle.filter(|t| !t.is_zero()),
            singleton: options.singleton,
            pending: VecDeque::new(),
            deadline: None,
            last_fire: None,
            last_seen: Some(initial),
        }
    }

    /// Record a possibly-changed value. Returns `false` if it equals the last one.
    ///
    /// Debounce moves the deadline on every change; without debounce the first
    /// pending change fixes it, so throttling alone never resets the timer.
    pub(super) fn observe(&mut self, value: T, now: Instant) -> bool {
        if self.last_seen.as_ref() == Some(&value) {
            return false;
        }
        self.last_seen = Some(value.clone());

        if self.singleton {
            self.pending.clear();
        }
        self.pending.push_back(value);

        if !self.debounce.is_zero() || self.deadline.is_none() {
            self.deadline = Some(now + self.debounce);
        }
        true
    }

    /// Forced invocation: drop everything pending and count it as a fire.
    pub(super) fn flush(&mut self, value: &T, now: Instant) {
        self.last_seen = Some(value.clone());
        self.pending.clear();
        self.deadline = None;
        self.last_fire = Some(now);
    }

    /// Earliest instant the next pending value may fire.
    fn ready_at(&self) -> Option<Instant> {
        if self.pending.is_empty() {
            return None;
        }
        let deadline = self.deadline?;
        let cooldown = match (self.last_fire, self.throttle) {
            (Some(last), Some(throttle)) => last + throttle,
            _ => deadline,
        };
        Some(deadline.max(cooldown))
    }

    /// Take the next value if its timer has elapsed.
    pub(super) fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.ready_at()? > now {
            return None;
        }
        let value = self.pending.pop_front()?;
        self.last_fire = Some(now);
        if self.pending.is_empty() {
            self.deadline = None;
        }
        Some(value)
    }

    /// Precise sleep duration until the next possible fire, `None` if idle.
    pub(super) fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        self.ready_at().map(|at| at.saturating_duration_since(now))
    }

    pub(super) fn clear(&mut self) {
        self.pending.clear();
        self.deadline = None;
    }
}
