//! Arrival generation: stationary and piecewise-constant hourly-rate policies.
//!
//! Both policies are consulted once per arrival (and once to seed the first
//! arrival) and return the delay until the next arrival, or `None` when no
//! further arrival should be scheduled.

use serde::{Deserialize, Serialize};

use crate::clock::MINUTES_PER_HOUR;
use crate::distributions::{StreamId, VariateSource};

/// Operating hours covered by a rate table (6 AM to midnight).
pub const OPERATING_HOURS: usize = 18;

/// Hourly rate used when no historical data is available.
pub const FALLBACK_HOURLY_RATE: f64 = 10.0;

/// Delay before the next arrival attempt when the current hour's rate is zero.
pub const ZERO_RATE_RETRY_MINUTES: f64 = 60.0;

/// Patients per hour for each operating hour. Immutable within a replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRateTable {
    hourly: [f64; OPERATING_HOURS],
}

impl Default for ArrivalRateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

impl ArrivalRateTable {
    pub fn new(hourly: [f64; OPERATING_HOURS]) -> Self {
        Self { hourly }
    }

    pub fn uniform(rate_per_hour: f64) -> Self {
        Self::new([rate_per_hour; OPERATING_HOURS])
    }

    pub fn fallback() -> Self {
        Self::uniform(FALLBACK_HOURLY_RATE)
    }

    pub fn hourly(&self) -> &[f64; OPERATING_HOURS] {
        &self.hourly
    }

    /// Rate for the hour containing `now`, in patients per minute. Times past
    /// the last operating hour use the last hour's rate.
    pub fn rate_per_minute_at(&self, now: f64) -> f64 {
        let hour = (now.max(0.0) / MINUTES_PER_HOUR).floor() as usize;
        self.hourly[hour.min(OPERATING_HOURS - 1)] / MINUTES_PER_HOUR
    }

    pub fn expected_daily_arrivals(&self) -> f64 {
        self.hourly.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// Constant rate spread evenly over the operating day.
    Stationary { patients_per_day: f64 },
    /// Rate looked up by operating hour from a table.
    NonStationary { rates: ArrivalRateTable },
}

impl Default for ArrivalPolicy {
    fn default() -> Self {
        ArrivalPolicy::Stationary {
            patients_per_day: 225.0,
        }
    }
}

impl ArrivalPolicy {
    /// Delay from `now` to the next arrival, drawn from the arrival stream.
    ///
    /// Stationary arrivals keep scheduling while the clock is before closing,
    /// so the final arrival may land after closing. Non-stationary arrivals
    /// draw an exponential gap at the rate in force at `now` (an approximation
    /// of a non-homogeneous Poisson process, not exact thinning) and drop any
    /// arrival that would land at or after closing.
    pub fn next_delay<V: VariateSource + ?Sized>(
        &self,
        now: f64,
        closing: f64,
        source: &mut V,
    ) -> Option<f64> {
        if now >= closing {
            return None;
        }
        match self {
            ArrivalPolicy::Stationary { patients_per_day } => {
                let rate = patients_per_day / closing;
                if rate > 0.0 && rate.is_finite() {
                    Some(source.exponential(StreamId::Arrival, 1.0 / rate))
                } else {
                    None
                }
            }
            ArrivalPolicy::NonStationary { rates } => {
                let rate = rates.rate_per_minute_at(now);
                let delay = if rate > 0.0 {
                    source.exponential(StreamId::Arrival, 1.0 / rate)
                } else {
                    ZERO_RATE_RETRY_MINUTES
                };
                (now + delay < closing).then_some(delay)
            }
        }
    }

    /// Delay to the first arrival of a replication starting at `now`.
    ///
    /// A non-stationary table whose opening hour has a zero rate seeds no
    /// arrival at all, so the replication stays empty. Later zero-rate hours
    /// still use the fixed retry delay through [`ArrivalPolicy::next_delay`].
    pub fn first_delay<V: VariateSource + ?Sized>(
        &self,
        now: f64,
        closing: f64,
        source: &mut V,
    ) -> Option<f64> {
        if let ArrivalPolicy::NonStationary { rates } = self {
            if rates.rate_per_minute_at(now) <= 0.0 {
                return None;
            }
        }
        self.next_delay(now, closing, source)
    }

    /// Expected arrivals over one operating day.
    pub fn expected_daily_arrivals(&self) -> f64 {
        match self {
            ArrivalPolicy::Stationary { patients_per_day } => *patients_per_day,
            ArrivalPolicy::NonStationary { rates } => rates.expected_daily_arrivals(),
        }
    }
}
