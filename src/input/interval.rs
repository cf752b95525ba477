//! Fixed-period tick source driven by frame time.

use std::time::Duration;

/// Upper bound on ticks reported by one [`IntervalTimer::advance`].
pub const MAX_CATCH_UP_TICKS: u32 = 8;

/// Counts whole periods of accumulated time, carrying the remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period: Duration,
    accumulated: Duration,
}

impl IntervalTimer {
    /// A zero period is raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` and returns how many periods completed.
    ///
    /// Backlog beyond [`MAX_CATCH_UP_TICKS`] is dropped; only the partial
    /// period is kept.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let period_nanos = self.period.as_nanos();
        let due = self.accumulated.as_nanos() / period_nanos;

        if due > MAX_CATCH_UP_TICKS as u128 {
            let remainder = self.accumulated.as_nanos() % period_nanos;
            self.accumulated = Duration::from_nanos(remainder as u64);
            let dropped = due - MAX_CATCH_UP_TICKS as u128;
            log::debug!("Pan timer dropped {} late tick(s)", dropped);
            return MAX_CATCH_UP_TICKS;
        }

        let due = due as u32;
        self.accumulated -= self.period * due;
        due
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_carries_over() {
        let mut timer = IntervalTimer::new(Duration::from_millis(20));
        assert_eq!(timer.advance(Duration::from_millis(15)), 0);
        assert_eq!(timer.advance(Duration::from_millis(15)), 1);
        assert_eq!(timer.advance(Duration::from_millis(10)), 1);
        assert_eq!(timer.advance(Duration::from_millis(19)), 0);
    }

    #[test]
    fn test_multiple_periods_in_one_frame() {
        let mut timer = IntervalTimer::new(Duration::from_millis(10));
        assert_eq!(timer.advance(Duration::from_millis(35)), 3);
        assert_eq!(timer.advance(Duration::from_millis(5)), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut timer = IntervalTimer::new(Duration::from_millis(10));
        let backlog = Duration::from_secs(2) + Duration::from_millis(4);
        assert_eq!(timer.advance(backlog), MAX_CATCH_UP_TICKS);
        // Only the 4ms partial period survives.
        assert_eq!(timer.advance(Duration::from_millis(5)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let timer = IntervalTimer::new(Duration::ZERO);
        assert_eq!(timer.period(), Duration::from_millis(1));
    }
}
