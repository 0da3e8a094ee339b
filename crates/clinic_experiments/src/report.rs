//! Plain-text tables for the command-line runners.

use std::fmt;

use clinic_core::station::Station;

use crate::comparison::ArrivalModelComparison;
use crate::confidence::ConfidenceInterval;
use crate::metrics::ScenarioResult;
use crate::optimizer::StaffingRecommendation;

fn ci(interval: &ConfidenceInterval) -> String {
    format!(
        "{:>8.2} ±{:>6.2} [{:>7.2}, {:>7.2}]",
        interval.mean, interval.half_width, interval.lower, interval.upper
    )
}

/// Per-station table plus patient counters and service-level verdicts.
pub struct ScenarioReport<'a>(pub &'a ScenarioResult);

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(
            f,
            "=== {} ({} replications) ===",
            result.name, result.replications
        )?;
        writeln!(
            f,
            "{:<16} {:>5}  {:<40}  {:<40}",
            "Station", "Staff", "Wait (min)", "Utilization"
        )?;
        for summary in &result.stations {
            writeln!(
                f,
                "{:<16} {:>5}  {:<40}  {:<40}",
                summary.station.label(),
                summary.staff,
                ci(&summary.wait),
                ci(&summary.utilization)
            )?;
        }
        writeln!(f, "Total arrivals:     {}", ci(&result.total_arrivals))?;
        writeln!(f, "Trauma patients:    {}", ci(&result.trauma_patients))?;
        writeln!(f, "Non-trauma:         {}", ci(&result.non_trauma_patients))?;
        writeln!(f, "Patients completed: {}", ci(&result.patients_completed))?;
        for check in &result.service_levels.checks {
            let op = if check.inclusive { "<=" } else { "<" };
            writeln!(
                f,
                "  {:<16} upper {:>7.2} {op} {:>5.1}: {}",
                check.station.label(),
                check.observed_upper,
                check.threshold,
                if check.passed { "PASS" } else { "FAIL" }
            )?;
        }
        write!(
            f,
            "Service levels: {}",
            if result.meets_targets() { "met" } else { "NOT met" }
        )
    }
}

pub struct RecommendationReport<'a>(pub &'a StaffingRecommendation);

impl fmt::Display for RecommendationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = self.0;
        let baseline = &rec.baseline.staffing;
        writeln!(f, "Baseline staffing: {} units", baseline.total())?;
        if !rec.meets_targets {
            return write!(f, "Baseline does not meet service levels; no reduction tried");
        }
        for trial in &rec.trials {
            writeln!(
                f,
                "  {:<16} {} -> {}: {} ({} units)",
                trial.reduced.label(),
                baseline.get(trial.reduced),
                trial.staffing.get(trial.reduced),
                if trial.meets_targets { "pass" } else { "fail" },
                trial.total_staff
            )?;
        }
        writeln!(f, "Recommended staffing ({} units):", rec.total_staff)?;
        for station in Station::ALL {
            writeln!(f, "  {:<16} {}", station.label(), rec.best.get(station))?;
        }
        Ok(())
    }
}

pub struct ComparisonReport<'a>(pub &'a ArrivalModelComparison);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmp = self.0;
        writeln!(
            f,
            "{:<16} {:>10} {:>10} {:>8}   {:>8} {:>8} {:>8}",
            "Station", "Wait stat", "Wait hist", "Delta", "Util st", "Util hist", "Delta"
        )?;
        for row in &cmp.stations {
            writeln!(
                f,
                "{:<16} {:>10.2} {:>10.2} {:>+8.2}   {:>8.3} {:>8.3} {:>+8.3}",
                row.station.label(),
                row.stationary_wait.mean,
                row.non_stationary_wait.mean,
                row.wait_delta,
                row.stationary_utilization.mean,
                row.non_stationary_utilization.mean,
                row.utilization_delta
            )?;
        }
        write!(
            f,
            "Arrivals: {:.1} stationary, {:.1} historical ({:+.1})",
            cmp.stationary.total_arrivals.mean,
            cmp.non_stationary.total_arrivals.mean,
            cmp.arrivals_delta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ReplicationResult, StationMetrics};
    use crate::service_levels::ServiceLevelTargets;
    use clinic_core::scenario::StaffLevels;

    #[test]
    fn scenario_report_lists_every_station() {
        let replication = ReplicationResult {
            replication: 0,
            stations: Station::ALL
                .into_iter()
                .map(|station| StationMetrics {
                    station,
                    mean_wait: 30.0,
                    utilization: 0.9,
                    mean_queue_length: 2.0,
                    max_queue_length: 9.0,
                    patients_served: 50,
                })
                .collect(),
            total_arrivals: 50,
            trauma_patients: 5,
            non_trauma_patients: 45,
            patients_completed: 50,
            end_time: 1090.0,
            events_processed: 200,
        };
        let result = ScenarioResult::from_replications(
            "report",
            StaffLevels::uniform(1),
            &[replication],
            &ServiceLevelTargets::default(),
        );
        let text = ScenarioReport(&result).to_string();
        for station in Station::ALL {
            assert!(text.contains(station.label()));
        }
        assert!(text.contains("FAIL"));
        assert!(text.ends_with("Service levels: NOT met"));
    }
}
