//! Greedy one-step staffing reduction.
//!
//! Starting from a scenario's staffing, each station is tried one unit lower
//! (never below one unit) while every other station stays at baseline. The
//! smallest passing configuration wins; ties keep the earliest station in
//! [`Station::ALL`] order.

use clinic_core::scenario::StaffLevels;
use clinic_core::station::Station;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ExperimentResult;
use crate::metrics::ScenarioResult;
use crate::parameters::ScenarioConfig;
use crate::runner::run_scenario;
use crate::service_levels::ServiceLevelTargets;

/// Replications per reduced-staffing trial.
pub const DEFAULT_TRIAL_REPLICATIONS: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct StaffingTrial {
    /// Station that was reduced by one unit.
    pub reduced: Station,
    pub staffing: StaffLevels,
    pub total_staff: u32,
    pub meets_targets: bool,
    pub result: ScenarioResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffingRecommendation {
    pub best: StaffLevels,
    pub total_staff: u32,
    /// Whether the baseline met the targets. When it did not, `best` is the
    /// baseline and no trials were run.
    pub meets_targets: bool,
    pub baseline: ScenarioResult,
    pub trials: Vec<StaffingTrial>,
}

pub fn optimize_staffing(
    base_config: &ScenarioConfig,
    targets: &ServiceLevelTargets,
    trial_replications: usize,
) -> ExperimentResult<StaffingRecommendation> {
    let base_config = base_config.clone().with_targets(targets.clone());
    let base_staffing = base_config.params.staffing;
    info!(
        scenario = %base_config.name,
        total_staff = base_staffing.total(),
        "testing baseline staffing"
    );
    let baseline = run_scenario(&base_config)?;

    if !baseline.meets_targets() {
        warn!(scenario = %base_config.name, "baseline staffing does not meet service levels");
        return Ok(StaffingRecommendation {
            best: base_staffing,
            total_staff: base_staffing.total(),
            meets_targets: false,
            baseline,
            trials: Vec::new(),
        });
    }

    let mut best = base_staffing;
    let mut trials = Vec::new();
    for station in Station::ALL {
        let current = base_staffing.get(station);
        if current <= 1 {
            continue;
        }
        let staffing = base_staffing.with(station, current - 1);
        let trial_config = base_config
            .clone()
            .with_staffing(staffing)
            .with_replications(trial_replications)
            .with_name(format!("{} ({} -1)", base_config.name, station.key()));
        let result = run_scenario(&trial_config)?;
        let meets_targets = result.meets_targets();
        info!(%station, staff = current - 1, meets_targets, "staffing trial");
        if meets_targets && staffing.total() < best.total() {
            best = staffing;
        }
        trials.push(StaffingTrial {
            reduced: station,
            staffing,
            total_staff: staffing.total(),
            meets_targets,
            result,
        });
    }

    Ok(StaffingRecommendation {
        best,
        total_staff: best.total(),
        meets_targets: true,
        baseline,
        trials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_levels::WaitCeiling;

    fn lenient() -> ServiceLevelTargets {
        let ceiling = WaitCeiling::at_most(f64::MAX);
        ServiceLevelTargets {
            sign_in_triage: ceiling,
            registration: ceiling,
            examination: ceiling,
            trauma: ceiling,
            treatment: ceiling,
        }
    }

    fn impossible() -> ServiceLevelTargets {
        let ceiling = WaitCeiling::below(f64::MIN);
        ServiceLevelTargets {
            sign_in_triage: ceiling,
            registration: ceiling,
            examination: ceiling,
            trauma: ceiling,
            treatment: ceiling,
        }
    }

    #[test]
    fn failing_baseline_is_returned_unchanged() {
        let config = ScenarioConfig::stationary(75, 0.1).with_replications(2);
        let recommendation = optimize_staffing(&config, &impossible(), 2).expect("runs");
        assert!(!recommendation.meets_targets);
        assert!(recommendation.trials.is_empty());
        assert_eq!(recommendation.best, config.params.staffing);
    }

    #[test]
    fn lenient_targets_take_first_reduction() {
        let config = ScenarioConfig::stationary(75, 0.1).with_replications(2);
        let recommendation = optimize_staffing(&config, &lenient(), 2).expect("runs");
        assert!(recommendation.meets_targets);
        // Every station of the 75/day table has more than one unit.
        assert_eq!(recommendation.trials.len(), 5);
        assert_eq!(recommendation.best, StaffLevels::new(1, 2, 3, 2, 3));
        assert_eq!(recommendation.total_staff, 11);
    }

    #[test]
    fn single_unit_stations_are_not_reduced() {
        let config = ScenarioConfig::stationary(75, 0.1)
            .with_staffing(StaffLevels::new(1, 1, 3, 1, 3))
            .with_replications(2);
        let recommendation = optimize_staffing(&config, &lenient(), 2).expect("runs");
        let reduced: Vec<Station> = recommendation.trials.iter().map(|t| t.reduced).collect();
        assert_eq!(reduced, vec![Station::Examination, Station::Treatment]);
    }
}
