use std::time::{Duration, Instant};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Fixed-rate frame clock owned by the run loop.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    next_tick: Instant,
    interval: Duration,
}

impl TickScheduler {
    pub fn new(now: Instant, interval: Duration) -> Self {
        Self {
            next_tick: now + interval,
            interval,
        }
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Time until the next tick, zero once it is due.
    pub fn time_left(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.time_left(now).is_zero()
    }

    /// Schedule the following tick. A loop that fell more than one interval
    /// behind restarts from `now` instead of replaying the missed ticks.
    pub fn advance(&mut self, now: Instant) {
        self.next_tick += self.interval;
        if self.next_tick < now {
            self.next_tick = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_left_never_negative() {
        let start = Instant::now();
        let clock = TickScheduler::new(start, Duration::from_millis(10));
        assert_eq!(clock.time_left(start), Duration::from_millis(10));
        assert_eq!(clock.time_left(start + Duration::from_millis(4)), Duration::from_millis(6));
        assert_eq!(clock.time_left(start + Duration::from_secs(1)), Duration::ZERO);
        assert!(clock.is_due(start + Duration::from_millis(10)));
        assert!(!clock.is_due(start));
    }

    #[test]
    fn advance_keeps_fixed_rate() {
        let start = Instant::now();
        let mut clock = TickScheduler::new(start, Duration::from_millis(10));
        clock.advance(start + Duration::from_millis(11));
        assert_eq!(clock.next_tick(), start + Duration::from_millis(20));
    }

    #[test]
    fn advance_resyncs_after_stall() {
        let start = Instant::now();
        let mut clock = TickScheduler::new(start, Duration::from_millis(10));
        let late = start + Duration::from_millis(500);
        clock.advance(late);
        assert_eq!(clock.next_tick(), late + Duration::from_millis(10));
    }
}
