//! Metrics extraction from replication worlds and aggregation into
//! scenario-level confidence intervals.

use bevy_ecs::prelude::World;
use clinic_core::clock::SimulationClock;
use clinic_core::error::SimError;
use clinic_core::scenario::StaffLevels;
use clinic_core::station::{Station, Stations};
use clinic_core::telemetry::{EventMetrics, PatientCounters};
use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceInterval;
use crate::error::ExperimentResult;
use crate::service_levels::{ServiceLevelReport, ServiceLevelTargets};

/// One station's outputs from a single replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMetrics {
    pub station: Station,
    /// Mean wait in minutes over patients who started service.
    pub mean_wait: f64,
    /// Time-average busy units divided by capacity; 0 for an unstaffed station.
    pub utilization: f64,
    pub mean_queue_length: f64,
    pub max_queue_length: f64,
    pub patients_served: u64,
}

/// Outputs of one replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub replication: usize,
    /// Ordered like [`Station::ALL`].
    pub stations: Vec<StationMetrics>,
    pub total_arrivals: u64,
    pub trauma_patients: u64,
    pub non_trauma_patients: u64,
    pub patients_completed: u64,
    /// Clock value after the last event.
    pub end_time: f64,
    pub events_processed: u64,
}

impl ReplicationResult {
    pub fn station(&self, station: Station) -> &StationMetrics {
        &self.stations[station.index()]
    }
}

/// Read the collectors of a drained replication world.
pub fn extract_metrics(world: &World, replication: usize) -> ExperimentResult<ReplicationResult> {
    let now = world
        .get_resource::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?
        .now();
    let stations = world
        .get_resource::<Stations>()
        .ok_or(SimError::MissingResource("Stations"))?;
    let counters = world
        .get_resource::<PatientCounters>()
        .ok_or(SimError::MissingResource("PatientCounters"))?;
    let events_processed = world
        .get_resource::<EventMetrics>()
        .map(|metrics| metrics.events_processed)
        .unwrap_or(0);

    let stations = stations
        .iter()
        .map(|(station, state)| StationMetrics {
            station,
            mean_wait: state.waits.mean(),
            utilization: state.server.utilization(now),
            mean_queue_length: state.queue.mean_length(now),
            max_queue_length: state.queue.max_length(),
            patients_served: state.waits.count(),
        })
        .collect();

    Ok(ReplicationResult {
        replication,
        stations,
        total_arrivals: counters.total_arrivals,
        trauma_patients: counters.trauma_patients,
        non_trauma_patients: counters.non_trauma_patients,
        patients_completed: counters.patients_completed(),
        end_time: now,
        events_processed,
    })
}

/// Confidence intervals for one station across replications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station: Station,
    pub staff: u32,
    pub wait: ConfidenceInterval,
    pub utilization: ConfidenceInterval,
    pub mean_queue_length: ConfidenceInterval,
    pub max_queue_length: ConfidenceInterval,
}

/// Aggregated outputs of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub replications: usize,
    pub staffing: StaffLevels,
    /// Ordered like [`Station::ALL`].
    pub stations: Vec<StationSummary>,
    pub total_arrivals: ConfidenceInterval,
    pub trauma_patients: ConfidenceInterval,
    pub non_trauma_patients: ConfidenceInterval,
    pub patients_completed: ConfidenceInterval,
    pub service_levels: ServiceLevelReport,
}

fn interval<F>(results: &[ReplicationResult], metric: F) -> ConfidenceInterval
where
    F: Fn(&ReplicationResult) -> f64,
{
    let samples: Vec<f64> = results.iter().map(metric).collect();
    ConfidenceInterval::from_samples(&samples)
}

impl ScenarioResult {
    pub fn from_replications(
        name: impl Into<String>,
        staffing: StaffLevels,
        results: &[ReplicationResult],
        targets: &ServiceLevelTargets,
    ) -> Self {
        let stations: Vec<StationSummary> = Station::ALL
            .into_iter()
            .map(|station| StationSummary {
                station,
                staff: staffing.get(station),
                wait: interval(results, |r| r.station(station).mean_wait),
                utilization: interval(results, |r| r.station(station).utilization),
                mean_queue_length: interval(results, |r| r.station(station).mean_queue_length),
                max_queue_length: interval(results, |r| r.station(station).max_queue_length),
            })
            .collect();
        let service_levels = targets.evaluate(&stations);
        Self {
            name: name.into(),
            replications: results.len(),
            staffing,
            stations,
            total_arrivals: interval(results, |r| r.total_arrivals as f64),
            trauma_patients: interval(results, |r| r.trauma_patients as f64),
            non_trauma_patients: interval(results, |r| r.non_trauma_patients as f64),
            patients_completed: interval(results, |r| r.patients_completed as f64),
            service_levels,
        }
    }

    pub fn station(&self, station: Station) -> &StationSummary {
        &self.stations[station.index()]
    }

    pub fn meets_targets(&self) -> bool {
        self.service_levels.passed
    }

    /// Flat `(metric name, interval)` view used by exports.
    pub fn metric_rows(&self) -> Vec<(String, ConfidenceInterval)> {
        let mut rows = Vec::with_capacity(self.stations.len() * 4 + 4);
        for summary in &self.stations {
            let key = summary.station.key();
            rows.push((format!("{key}Wait"), summary.wait));
            rows.push((format!("{key}Utilization"), summary.utilization));
            rows.push((format!("{key}AvgQueue"), summary.mean_queue_length));
            rows.push((format!("{key}MaxQueue"), summary.max_queue_length));
        }
        rows.push(("TotalArrivals".to_string(), self.total_arrivals));
        rows.push(("TraumaPatients".to_string(), self.trauma_patients));
        rows.push(("NonTraumaPatients".to_string(), self.non_trauma_patients));
        rows.push(("PatientsCompleted".to_string(), self.patients_completed));
        rows
    }
}
