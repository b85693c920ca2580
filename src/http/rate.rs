use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::args::PositiveUsize;
use crate::error::ValidationError;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Fixed cadence of a run: one tick every `interval`, `ticks` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    pub interval: Duration,
    pub ticks: u64,
}

impl TickPlan {
    /// Interval is `1_000_000 / rate` microseconds (integer division); the tick
    /// count is the run duration in microseconds divided by that interval.
    ///
    /// # Errors
    ///
    /// Returns an error when the rate rounds the interval down to zero or the
    /// run is shorter than a single tick.
    pub fn new(rate: u64, duration: Duration) -> Result<Self, ValidationError> {
        let interval_us = MICROS_PER_SECOND.checked_div(rate).unwrap_or(0);
        if interval_us == 0 {
            return Err(ValidationError::RateTooHigh { rate });
        }
        let duration_us = duration.as_micros();
        let ticks = duration_us
            .checked_div(u128::from(interval_us))
            .and_then(|ticks| u64::try_from(ticks).ok())
            .unwrap_or(0);
        if ticks == 0 {
            return Err(ValidationError::NoTicks {
                duration_us,
                interval_us,
            });
        }
        Ok(Self {
            interval: Duration::from_micros(interval_us),
            ticks,
        })
    }

    /// Attempts dispatched over the whole run: one per target per tick.
    #[must_use]
    pub fn total_attempts(&self, target_count: usize) -> u64 {
        self.ticks
            .saturating_mul(u64::try_from(target_count).unwrap_or(u64::MAX))
    }
}

/// Semaphore bounding concurrent requests, if a limit was configured.
pub(crate) fn build_in_flight_limiter(max_in_flight: Option<PositiveUsize>) -> Option<Arc<Semaphore>> {
    max_in_flight.map(|limit| Arc::new(Semaphore::new(limit.get())))
}
