use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source for the countdown. Times are offsets from an
/// arbitrary origin fixed when the clock is created.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock used by the binary
#[derive(Clone, Copy, Debug)]
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

/// Hand-driven clock for tests. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Remaining milliseconds after a start or a tick. May be negative when
    /// the duration is not a multiple of the interval.
    Update(i64),
    Completed,
}

/// Fixed-duration countdown. Ticks are scheduled against an injected clock
/// and only fire while the countdown is running.
#[derive(Clone, Debug)]
pub struct Countdown {
    interval_ms: i64,
    remaining_ms: i64,
    state: TimerState,
    next_tick_at: Option<Duration>,
    completed: bool,
}

impl Countdown {
    /// Arms a countdown. A zero interval is treated as one millisecond so a
    /// running countdown always makes progress.
    pub fn new(duration: Duration, interval: Duration) -> Self {
        Self {
            interval_ms: millis(interval).max(1),
            remaining_ms: millis(duration),
            state: TimerState::Idle,
            next_tick_at: None,
            completed: false,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn has_completed(&self) -> bool {
        self.completed
    }

    /// Idle -> Running. Returns the initial update, or `None` if the
    /// countdown was already started or stopped.
    pub fn start(&mut self, now: Duration) -> Option<CountdownEvent> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.state = TimerState::Running;
        self.next_tick_at = Some(now + self.interval());
        Some(CountdownEvent::Update(self.remaining_ms))
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
        self.next_tick_at = None;
    }

    /// Fires one tick regardless of the clock.
    pub fn tick(&mut self) -> Vec<CountdownEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }

        self.remaining_ms -= self.interval_ms;
        let mut events = vec![CountdownEvent::Update(self.remaining_ms)];

        if self.remaining_ms <= 0 {
            self.completed = true;
            self.stop();
            events.push(CountdownEvent::Completed);
        }

        events
    }

    /// Fires every tick that is due at `now`, oldest first.
    pub fn poll(&mut self, now: Duration) -> Vec<CountdownEvent> {
        let mut events = Vec::new();

        while let Some(due) = self.next_tick_at {
            if due > now || self.state != TimerState::Running {
                break;
            }
            events.extend(self.tick());
            if self.state == TimerState::Running {
                self.next_tick_at = Some(due + self.interval());
            }
        }

        events
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }
}

/// Saturates instead of wrapping for durations beyond `i64` milliseconds.
fn millis(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

/// `M:SS`, partial seconds rounded up, negatives shown as `0:00`.
pub fn format_remaining(remaining_ms: i64) -> String {
    let secs = (remaining_ms.max(0) + 999) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
