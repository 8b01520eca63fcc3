//! Cancellable timers driven by the event loop's elapsed time.
//!
//! Nothing here reads a clock; the owner advances each timer with the time
//! since the last tick. Once cancelled a timer stays inert, so a view that
//! cancels its timers on unmount can never be updated afterwards.

use std::time::Duration;

/// Periodic timer
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    cancelled: bool,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            cancelled: false,
        }
    }

    /// Number of periods completed during `dt`. A zero period fires once per advance.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        if self.period.is_zero() {
            return 1;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fires += 1;
        }
        fires
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// One-shot timer
#[derive(Debug, Clone)]
pub struct Timeout {
    remaining: Duration,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

impl Timeout {
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: delay,
            state: TimerState::Pending,
        }
    }

    /// True exactly once, on the advance that crosses the deadline
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != TimerState::Pending {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.state = TimerState::Fired;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == TimerState::Pending
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }
}

/// Progress of an animation over a fixed duration, in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    duration: Duration,
    elapsed: Duration,
    finished: bool,
    cancelled: bool,
}

impl FrameClock {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            finished: false,
            cancelled: false,
        }
    }

    /// Next frame's progress, or `None` once the final frame was delivered or the clock was cancelled
    pub fn advance(&mut self, dt: Duration) -> Option<f64> {
        if self.cancelled || self.finished {
            return None;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let progress = self.progress();
        self.finished = progress >= 1.0;
        Some(progress)
    }

    /// Zero-length clocks report as complete
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled && self.progress() < 1.0
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
