//! Time and input sources for fixed-tick game loops.
//!
//! Game code reads time through [`Clock`] and pulls actions through [`InputSource`], so
//! the same loop runs against a real window or a scripted test harness.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Monotonic time, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get().saturating_add(dt));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A periodic timer polled by the loop.
///
/// The period is fixed while the timer runs; changing it means cancelling and starting
/// again, which also restarts the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Duration>,
}

impl TickTimer {
    /// A stopped timer.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now.saturating_add(self.period));
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Cancels the timer and starts a new one with `period`.
    pub fn restart(&mut self, period: Duration, now: Duration) {
        *self = Self::new(period);
        self.start(now);
    }

    /// Fires at most once per poll. A poll that arrives more than a period late drops the
    /// missed periods and schedules the next fire one period from `now`.
    /// A stopped timer never fires.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due.saturating_add(self.period);
        self.next_due = Some(if next > now {
            next
        } else {
            now.saturating_add(self.period)
        });
        true
    }
}

/// Anything that yields player actions, one at a time.
pub trait InputSource {
    type Action;

    fn next_action(&mut self) -> Option<Self::Action>;
}

/// FIFO of actions. The window loop pushes decoded key presses here; tests push scripts.
#[derive(Debug, Clone)]
pub struct QueuedInput<A> {
    queue: VecDeque<A>,
}

impl<A> QueuedInput<A> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, action: A) {
        self.queue.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<A> Default for QueuedInput<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> FromIterator<A> for QueuedInput<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl<A> InputSource for QueuedInput<A> {
    type Action = A;

    fn next_action(&mut self) -> Option<A> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = TickTimer::new(Duration::from_millis(500));
        assert!(!timer.poll(Duration::from_secs(10)));
        assert!(!timer.is_running());
    }

    #[test]
    fn zero_period_is_raised_to_one_millisecond() {
        let timer = TickTimer::new(Duration::ZERO);
        assert_eq!(timer.period(), Duration::from_millis(1));
    }

    #[test]
    fn late_poll_keeps_the_original_phase_when_within_a_period() {
        let mut timer = TickTimer::new(Duration::from_millis(500));
        timer.start(Duration::ZERO);
        assert!(timer.poll(Duration::from_millis(700)));
        assert!(!timer.poll(Duration::from_millis(999)));
        assert!(timer.poll(Duration::from_millis(1000)));
    }
}
