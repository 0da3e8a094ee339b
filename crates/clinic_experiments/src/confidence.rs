//! 95% confidence intervals over replication outputs.
//!
//! Half-width is `t * s / sqrt(n)` with the sample standard deviation `s`.
//! The critical value comes from the Student-t table for `n - 1` degrees of
//! freedom when `n <= 30` and from the normal approximation otherwise.

use clinic_core::stats::DiscreteStat;
use serde::{Deserialize, Serialize};

/// Two-sided 95% normal critical value.
pub const Z_95: f64 = 1.96;

/// Two-sided 95% Student-t critical values indexed by sample size `n`
/// (so entry `n` holds the value for `n - 1` degrees of freedom).
const T_95_BY_SAMPLE_SIZE: [f64; 31] = [
    0.0, 0.0, 12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201,
    2.179, 2.160, 2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064,
    2.060, 2.056, 2.052, 2.048, 2.045,
];

/// Critical value for a 95% interval from `n` observations.
pub fn t_critical_95(n: usize) -> f64 {
    match n {
        2..=30 => T_95_BY_SAMPLE_SIZE[n],
        _ => Z_95,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub half_width: f64,
    pub lower: f64,
    pub upper: f64,
    pub samples: usize,
}

impl ConfidenceInterval {
    /// Interval from per-replication observations. One observation gives a
    /// zero-width interval at that value; none gives all zeros.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut stat = DiscreteStat::default();
        for value in samples {
            stat.record(*value);
        }
        let n = samples.len();
        let mean = stat.mean();
        let half_width = if n < 2 {
            0.0
        } else {
            t_critical_95(n) * stat.std_dev() / (n as f64).sqrt()
        };
        Self {
            mean,
            half_width,
            lower: mean - half_width,
            upper: mean + half_width,
            samples: n,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.lower.is_finite() && self.upper.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_values_follow_table_then_normal() {
        assert_eq!(t_critical_95(2), 12.706);
        assert_eq!(t_critical_95(10), 2.262);
        assert_eq!(t_critical_95(30), 2.045);
        assert_eq!(t_critical_95(31), Z_95);
        assert_eq!(t_critical_95(1), Z_95);
    }

    #[test]
    fn interval_uses_sample_standard_deviation() {
        let ci = ConfidenceInterval::from_samples(&[2.0, 4.0, 6.0, 8.0]);
        // s = sqrt(20/3), t(4) = 3.182
        let expected = 3.182 * (20.0f64 / 3.0).sqrt() / 2.0;
        assert!((ci.mean - 5.0).abs() < 1e-12);
        assert!((ci.half_width - expected).abs() < 1e-12);
        assert!((ci.upper - (5.0 + expected)).abs() < 1e-12);
        assert!(ci.contains(5.0));
    }

    #[test]
    fn degenerate_sample_sizes() {
        let single = ConfidenceInterval::from_samples(&[3.5]);
        assert_eq!(single.mean, 3.5);
        assert_eq!(single.lower, 3.5);
        assert_eq!(single.upper, 3.5);
        assert_eq!(single.half_width, 0.0);

        let empty = ConfidenceInterval::from_samples(&[]);
        assert_eq!(empty, ConfidenceInterval::default());
    }

    #[test]
    fn constant_samples_have_zero_width() {
        let ci = ConfidenceInterval::from_samples(&[1.0; 12]);
        assert_eq!(ci.half_width, 0.0);
        assert_eq!(ci.lower, ci.upper);
    }
}
