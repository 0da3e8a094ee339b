//! Service-level targets on station waits.
//!
//! Checks compare the *upper* confidence bound of each station's mean wait
//! against its ceiling, so a pass means the true mean is within the target
//! with 95% confidence.

use clinic_core::station::Station;
use serde::{Deserialize, Serialize};

use crate::metrics::StationSummary;

/// Wait ceiling in minutes. Strict ceilings require `upper < threshold`,
/// inclusive ones `upper <= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitCeiling {
    pub threshold: f64,
    pub inclusive: bool,
}

impl WaitCeiling {
    pub fn below(threshold: f64) -> Self {
        Self {
            threshold,
            inclusive: false,
        }
    }

    pub fn at_most(threshold: f64) -> Self {
        Self {
            threshold,
            inclusive: true,
        }
    }

    pub fn admits(&self, upper: f64) -> bool {
        if self.inclusive {
            upper <= self.threshold
        } else {
            upper < self.threshold
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceLevelTargets {
    pub sign_in_triage: WaitCeiling,
    pub registration: WaitCeiling,
    pub examination: WaitCeiling,
    pub trauma: WaitCeiling,
    pub treatment: WaitCeiling,
}

impl Default for ServiceLevelTargets {
    /// Triage must be very fast (< 2 min), trauma < 5 min, other stations
    /// 20 minutes at most.
    fn default() -> Self {
        Self {
            sign_in_triage: WaitCeiling::below(2.0),
            registration: WaitCeiling::at_most(20.0),
            examination: WaitCeiling::at_most(20.0),
            trauma: WaitCeiling::below(5.0),
            treatment: WaitCeiling::at_most(20.0),
        }
    }
}

impl ServiceLevelTargets {
    /// Looser targets: triage < 5, trauma < 8, others at most 25 minutes.
    pub fn relaxed() -> Self {
        Self {
            sign_in_triage: WaitCeiling::below(5.0),
            registration: WaitCeiling::at_most(25.0),
            examination: WaitCeiling::at_most(25.0),
            trauma: WaitCeiling::below(8.0),
            treatment: WaitCeiling::at_most(25.0),
        }
    }

    pub fn ceiling(&self, station: Station) -> WaitCeiling {
        match station {
            Station::SignInTriage => self.sign_in_triage,
            Station::Registration => self.registration,
            Station::Examination => self.examination,
            Station::Trauma => self.trauma,
            Station::Treatment => self.treatment,
        }
    }

    pub fn evaluate(&self, stations: &[StationSummary]) -> ServiceLevelReport {
        let checks: Vec<ServiceLevelCheck> = stations
            .iter()
            .map(|summary| {
                let ceiling = self.ceiling(summary.station);
                ServiceLevelCheck {
                    station: summary.station,
                    threshold: ceiling.threshold,
                    inclusive: ceiling.inclusive,
                    observed_upper: summary.wait.upper,
                    passed: ceiling.admits(summary.wait.upper),
                }
            })
            .collect();
        let passed = checks.iter().all(|check| check.passed);
        ServiceLevelReport { checks, passed }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevelCheck {
    pub station: Station,
    pub threshold: f64,
    pub inclusive: bool,
    pub observed_upper: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevelReport {
    pub checks: Vec<ServiceLevelCheck>,
    pub passed: bool,
}

impl ServiceLevelReport {
    pub fn failures(&self) -> impl Iterator<Item = &ServiceLevelCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceInterval;

    fn summary(station: Station, upper: f64) -> StationSummary {
        StationSummary {
            station,
            staff: 1,
            wait: ConfidenceInterval {
                mean: upper,
                upper,
                lower: upper,
                ..Default::default()
            },
            utilization: ConfidenceInterval::default(),
            mean_queue_length: ConfidenceInterval::default(),
            max_queue_length: ConfidenceInterval::default(),
        }
    }

    #[test]
    fn strict_and_inclusive_boundaries() {
        let targets = ServiceLevelTargets::default();
        let report = targets.evaluate(&[
            summary(Station::SignInTriage, 2.0),
            summary(Station::Registration, 20.0),
        ]);
        assert!(!report.checks[0].passed, "triage ceiling is strict");
        assert!(report.checks[1].passed, "registration ceiling is inclusive");
        assert!(!report.passed);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn relaxed_targets_admit_moderate_waits() {
        let stations: Vec<StationSummary> = Station::ALL
            .into_iter()
            .map(|station| summary(station, 4.5))
            .collect();
        assert!(!ServiceLevelTargets::default().evaluate(&stations).passed);
        assert!(ServiceLevelTargets::relaxed().evaluate(&stations).passed);
    }
}
