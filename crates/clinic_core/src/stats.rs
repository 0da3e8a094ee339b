//! Statistics collectors: per-observation and time-weighted accumulators.

/// Accumulates discrete observations (e.g. per-patient waits).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscreteStat {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean (Welford).
    m2: f64,
}

impl DiscreteStat {
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the recorded observations; 0 when nothing was recorded.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance (n - 1 denominator); 0 with fewer than two observations.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Integrates a piecewise-constant quantity over simulated time.
///
/// `record` closes the interval at the previous value before switching to the
/// new one, so the mean reflects time spent at each level rather than the
/// number of changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWeightedStat {
    area: f64,
    last_value: f64,
    last_time: f64,
    start_time: f64,
    max: f64,
}

impl Default for TimeWeightedStat {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl TimeWeightedStat {
    pub fn new(start_time: f64, initial_value: f64) -> Self {
        Self {
            area: 0.0,
            last_value: initial_value,
            last_time: start_time,
            start_time,
            max: initial_value,
        }
    }

    pub fn record(&mut self, value: f64, now: f64) {
        self.area += self.last_value * (now - self.last_time);
        self.last_time = now;
        self.last_value = value;
        self.max = self.max.max(value);
    }

    /// Time-average from the start time up to `now`.
    pub fn mean(&self, now: f64) -> f64 {
        let elapsed = now - self.start_time;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.area + self.last_value * (now - self.last_time)) / elapsed
    }

    /// Largest level ever recorded, including levels replaced at the same
    /// instant.
    pub fn max(&self) -> f64 {
        self.max
    }
}
