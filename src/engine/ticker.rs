use std::time::{Duration, Instant};

/// Fixed-interval schedule for poll cycles. Ticks that fall due while a
/// cycle is still running are dropped rather than queued, so cycles never
/// pile up behind a slow server.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    #[cfg(test)]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Call once the due cycle has finished. Schedules the next tick
    /// strictly after `now` and returns how many ticks were skipped.
    pub fn complete(&mut self, now: Instant) -> u32 {
        let mut skipped = 0;
        self.next += self.interval;
        while self.next <= now {
            self.next += self.interval;
            skipped += 1;
        }
        skipped
    }
}
