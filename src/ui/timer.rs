/// Interval timer: a periodic deadline clock.
///
/// `next_tick` sleeps until the next deadline and reports how many whole
/// periods have passed since the previous one, so a caller that was late
/// learns how many ticks it owes.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::sim::clock::TickSource;

pub struct IntervalTimer {
    period: Duration,
    next: Instant,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_micros(1));
        IntervalTimer { period, next: Instant::now() + period }
    }
}

impl TickSource for IntervalTimer {
    fn set_interval(&mut self, interval: Duration) {
        self.period = interval.max(Duration::from_micros(1));
        self.next = Instant::now() + self.period;
    }

    fn next_tick(&mut self) -> io::Result<u32> {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
        }
        let behind = Instant::now().saturating_duration_since(self.next);
        let extra = (behind.as_nanos() / self.period.as_nanos()).min(u32::MAX as u128 - 1) as u32;
        let ticks = 1 + extra;
        self.next += self.period * ticks;
        Ok(ticks)
    }
}
