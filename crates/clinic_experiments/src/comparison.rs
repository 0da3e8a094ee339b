//! Stationary vs historical-rate arrival models under the same staffing.
//!
//! Both scenarios share staffing, trauma fraction, replication count, and seed
//! (common random numbers), so deltas reflect the arrival model rather than
//! sampling noise between runs.

use clinic_core::arrivals::{ArrivalPolicy, ArrivalRateTable};
use clinic_core::station::Station;
use serde::Serialize;

use crate::confidence::ConfidenceInterval;
use crate::error::ExperimentResult;
use crate::metrics::ScenarioResult;
use crate::parameters::ScenarioConfig;
use crate::runner::run_scenario;

#[derive(Debug, Clone, Serialize)]
pub struct StationComparison {
    pub station: Station,
    pub stationary_wait: ConfidenceInterval,
    pub non_stationary_wait: ConfidenceInterval,
    /// Non-stationary minus stationary mean wait.
    pub wait_delta: f64,
    pub stationary_utilization: ConfidenceInterval,
    pub non_stationary_utilization: ConfidenceInterval,
    pub utilization_delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrivalModelComparison {
    pub stationary: ScenarioResult,
    pub non_stationary: ScenarioResult,
    pub stations: Vec<StationComparison>,
    pub arrivals_delta: f64,
}

impl ArrivalModelComparison {
    pub fn station(&self, station: Station) -> &StationComparison {
        &self.stations[station.index()]
    }
}

pub fn compare_arrival_models(
    stationary_config: &ScenarioConfig,
    rates: ArrivalRateTable,
    replications: usize,
) -> ExperimentResult<ArrivalModelComparison> {
    let stationary_config = stationary_config.clone().with_replications(replications);
    let non_stationary_config = stationary_config
        .clone()
        .with_arrivals(ArrivalPolicy::NonStationary { rates })
        .with_name(format!("{} (historical rates)", stationary_config.name));

    let stationary = run_scenario(&stationary_config)?;
    let non_stationary = run_scenario(&non_stationary_config)?;

    let stations = Station::ALL
        .into_iter()
        .map(|station| {
            let s = stationary.station(station);
            let n = non_stationary.station(station);
            StationComparison {
                station,
                stationary_wait: s.wait,
                non_stationary_wait: n.wait,
                wait_delta: n.wait.mean - s.wait.mean,
                stationary_utilization: s.utilization,
                non_stationary_utilization: n.utilization,
                utilization_delta: n.utilization.mean - s.utilization.mean,
            }
        })
        .collect();
    let arrivals_delta = non_stationary.total_arrivals.mean - stationary.total_arrivals.mean;

    Ok(ArrivalModelComparison {
        stationary,
        non_stationary,
        stations,
        arrivals_delta,
    })
}
