//! Month highlight with a timed auto-clear.
//!
//! Nothing sleeps here: the highlight stores a deadline and the host polls
//! [`MonthHighlight::tick`] from its frame or event loop.

use std::time::{Duration, Instant};

pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(300);

/// A single cancellable deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightTimer {
    deadline: Option<Instant>,
}

impl HighlightTimer {
    /// Arm for `now + delay`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed. Returns true exactly once per arm.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MonthHighlight {
    month: Option<usize>,
    timer: HighlightTimer,
    duration: Duration,
}

impl Default for MonthHighlight {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_DURATION)
    }
}

impl MonthHighlight {
    pub fn new(duration: Duration) -> Self {
        Self { month: None, timer: HighlightTimer::default(), duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Highlight `month` and restart the clear timer.
    pub fn highlight(&mut self, month: usize, now: Instant) {
        self.month = Some(month);
        self.timer.arm(now, self.duration);
    }

    /// Clear the highlight once its deadline passed. Returns true if it was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.month = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.month = None;
        self.timer.cancel();
    }

    pub fn current(&self) -> Option<usize> {
        self.month
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}
