//! Replication counters and event-processing metrics.

use std::collections::HashMap;
use std::time::Instant;

use bevy_ecs::prelude::Resource;

use crate::clock::EventKind;

/// Patient flow counters for one replication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Resource)]
pub struct PatientCounters {
    pub total_arrivals: u64,
    pub trauma_patients: u64,
    pub non_trauma_patients: u64,
    /// Standard-path patients discharged right after Examination.
    pub discharged_after_examination: u64,
    /// Patients discharged after Treatment (both paths).
    pub discharged_after_treatment: u64,
}

impl PatientCounters {
    pub fn record_arrival(&mut self, is_trauma: bool) {
        self.total_arrivals += 1;
        if is_trauma {
            self.trauma_patients += 1;
        } else {
            self.non_trauma_patients += 1;
        }
    }

    pub fn patients_completed(&self) -> u64 {
        self.discharged_after_examination + self.discharged_after_treatment
    }

    /// Patients still inside the clinic.
    pub fn in_system(&self) -> u64 {
        self.total_arrivals.saturating_sub(self.patients_completed())
    }
}

/// Event dispatch counts, recorded by the runner.
#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    pub events_processed: u64,
    /// Wall-clock start, set on the first recorded event.
    pub start_time: Option<Instant>,
    pub events_by_kind: HashMap<EventKind, u64>,
}

impl EventMetrics {
    pub fn record_event(&mut self, kind: EventKind) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.events_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Wall-clock event throughput since the first event.
    pub fn events_per_second(&self) -> f64 {
        match self.start_time {
            Some(start) => {
                let elapsed = start.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    self.events_processed as f64 / elapsed
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrivals_split_by_acuity() {
        let mut counters = PatientCounters::default();
        counters.record_arrival(true);
        counters.record_arrival(false);
        counters.record_arrival(false);
        assert_eq!(counters.total_arrivals, 3);
        assert_eq!(
            counters.total_arrivals,
            counters.trauma_patients + counters.non_trauma_patients
        );
        counters.discharged_after_treatment += 1;
        assert_eq!(counters.in_system(), 2);
    }

    #[test]
    fn event_metrics_count_by_kind() {
        let mut metrics = EventMetrics::default();
        metrics.record_event(EventKind::Arrival);
        metrics.record_event(EventKind::Arrival);
        metrics.record_event(EventKind::EndTrauma);
        assert_eq!(metrics.events_processed, 3);
        assert_eq!(metrics.count(EventKind::Arrival), 2);
        assert_eq!(metrics.count(EventKind::EndTreatment), 0);
        assert!(metrics.events_per_second() >= 0.0);
        assert_eq!(EventMetrics::default().events_per_second(), 0.0);
    }
}
