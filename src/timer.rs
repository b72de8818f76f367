use std::time::{Duration, Instant};

/// The scheduled callback that drives automatic drops. The engine only starts,
/// stops and retunes it; the host decides how ticks are delivered.
pub trait DropTimer {
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
    /// Changes the interval. A stopped timer stays stopped.
    fn set_interval(&mut self, interval: Duration);
    fn is_running(&self) -> bool;
    fn interval(&self) -> Duration;
}

/// Wall-clock timer polled from the host's event loop.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(crate::game::BASE_DROP_INTERVAL_MS),
            next_fire: None,
        }
    }

    /// Returns true once per elapsed interval while running.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(deadline) if now >= deadline => {
                self.next_fire = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if running.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.next_fire
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DropTimer for IntervalTimer {
    fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_fire = Some(Instant::now() + interval);
    }

    fn stop(&mut self) {
        self.next_fire = None;
    }

    fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if self.next_fire.is_some() {
            self.next_fire = Some(Instant::now() + interval);
        }
    }

    fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Timer with no clock of its own. Ticks are delivered by whoever owns the
/// engine, which suits tests and headless drivers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTimer {
    interval: Duration,
    running: bool,
    starts: u32,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the timer has been (re)started.
    #[must_use]
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl DropTimer for ManualTimer {
    fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}
