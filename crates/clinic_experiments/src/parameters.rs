//! Scenario configuration and scenario-grid generation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clinic_core::arrivals::{ArrivalPolicy, ArrivalRateTable};
use clinic_core::scenario::{ClinicParams, StaffLevels};
use serde::{Deserialize, Serialize};

use crate::error::{ExperimentError, ExperimentResult};
use crate::service_levels::ServiceLevelTargets;

pub const DEFAULT_REPLICATIONS: usize = 30;

fn default_replications() -> usize {
    DEFAULT_REPLICATIONS
}

/// One scenario: clinic parameters plus how many replications to run and the
/// seed of the random streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub params: ClinicParams,
    #[serde(default = "default_replications")]
    pub replications: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub targets: ServiceLevelTargets,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, params: ClinicParams) -> Self {
        Self {
            name: name.into(),
            params,
            replications: DEFAULT_REPLICATIONS,
            seed: 0,
            targets: ServiceLevelTargets::default(),
        }
    }

    /// Constant-rate scenario with the reference staffing for its load.
    pub fn stationary(patients_per_day: u32, trauma_fraction: f64) -> Self {
        let params = ClinicParams::stationary(patients_per_day as f64)
            .with_trauma_fraction(trauma_fraction)
            .with_staffing(StaffLevels::for_daily_load(patients_per_day));
        Self::new(
            format!(
                "{patients_per_day}/day, {:.0}% trauma",
                trauma_fraction * 100.0
            ),
            params,
        )
    }

    /// Hourly-rate scenario; staffing defaults to the 225/day table.
    pub fn non_stationary(rates: ArrivalRateTable, trauma_fraction: f64) -> Self {
        let params =
            ClinicParams::non_stationary(rates).with_trauma_fraction(trauma_fraction);
        Self::new(
            format!("historical rates, {:.0}% trauma", trauma_fraction * 100.0),
            params,
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_replications(mut self, replications: usize) -> Self {
        self.replications = replications;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_staffing(mut self, staffing: StaffLevels) -> Self {
        self.params.staffing = staffing;
        self
    }

    pub fn with_arrivals(mut self, arrivals: ArrivalPolicy) -> Self {
        self.params.arrivals = arrivals;
        self
    }

    pub fn with_targets(mut self, targets: ServiceLevelTargets) -> Self {
        self.targets = targets;
        self
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ExperimentResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ExperimentResult<()> {
        if self.replications == 0 {
            return Err(ExperimentError::Config(format!(
                "scenario '{}' needs at least one replication",
                self.name
            )));
        }
        self.params.validate()?;
        Ok(())
    }
}

/// Cartesian grid of daily loads and trauma fractions, each staffed with the
/// reference table for its load.
#[derive(Debug, Clone)]
pub struct ScenarioGrid {
    daily_loads: Vec<u32>,
    trauma_fractions: Vec<f64>,
    replications: usize,
    base_seed: u64,
}

impl Default for ScenarioGrid {
    fn default() -> Self {
        Self {
            daily_loads: vec![75, 150, 225],
            trauma_fractions: vec![0.08, 0.10, 0.12],
            replications: DEFAULT_REPLICATIONS,
            base_seed: 0,
        }
    }
}

impl ScenarioGrid {
    pub fn grid() -> Self {
        Self::default()
    }

    pub fn daily_loads(mut self, loads: Vec<u32>) -> Self {
        self.daily_loads = loads;
        self
    }

    pub fn trauma_fractions(mut self, fractions: Vec<f64>) -> Self {
        self.trauma_fractions = fractions;
        self
    }

    pub fn replications(mut self, replications: usize) -> Self {
        self.replications = replications;
        self
    }

    pub fn base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Scenarios in load-major order with consecutive seeds.
    pub fn generate(&self) -> Vec<ScenarioConfig> {
        self.daily_loads
            .iter()
            .flat_map(|&load| {
                self.trauma_fractions
                    .iter()
                    .map(move |&fraction| (load, fraction))
            })
            .enumerate()
            .map(|(index, (load, fraction))| {
                ScenarioConfig::stationary(load, fraction)
                    .with_replications(self.replications)
                    .with_seed(self.base_seed.wrapping_add(index as u64))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_grid_covers_loads_and_trauma_fractions() {
        let configs = ScenarioGrid::grid().generate();
        assert_eq!(configs.len(), 9);
        assert_eq!(configs[0].name, "75/day, 8% trauma");
        assert_eq!(configs[8].params.staffing, StaffLevels::for_daily_load(225));
        let seeds: Vec<u64> = configs.iter().map(|c| c.seed).collect();
        assert_eq!(seeds, (0..9).collect::<Vec<u64>>());
    }

    #[test]
    fn custom_grid() {
        let configs = ScenarioGrid::grid()
            .daily_loads(vec![150])
            .trauma_fractions(vec![0.1])
            .replications(5)
            .base_seed(100)
            .generate();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].replications, 5);
        assert_eq!(configs[0].seed, 100);
        assert_eq!(configs[0].params.trauma_fraction, 0.1);
    }

    #[test]
    fn loads_json_config_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "name": "json scenario",
                "params": {{
                    "operating_minutes": 1080.0,
                    "trauma_fraction": 0.1,
                    "staffing": {{
                        "SignInTriage": 4, "Registration": 6, "Examination": 9,
                        "Trauma": 4, "Treatment": 8
                    }},
                    "arrivals": {{"mode": "stationary", "patients_per_day": 225.0}},
                    "discharge_after_exam": 0.4
                }}
            }}"#
        )
        .expect("write config");
        let config = ScenarioConfig::from_json_file(file.path()).expect("valid config");
        assert_eq!(config.replications, DEFAULT_REPLICATIONS);
        assert_eq!(config.params, ClinicParams::stationary(225.0));
        assert_eq!(config.targets, ServiceLevelTargets::default());
    }

    #[test]
    fn zero_replications_rejected() {
        let config = ScenarioConfig::stationary(75, 0.1).with_replications(0);
        assert!(matches!(config.validate(), Err(ExperimentError::Config(_))));
    }
}
