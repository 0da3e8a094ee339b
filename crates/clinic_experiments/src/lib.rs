//! Replication harness for the clinic simulation.
//!
//! This crate runs [`clinic_core`] replications, aggregates their outputs into
//! 95% confidence intervals, checks them against service-level targets, and
//! builds experiments on top: scenario grids, a staffing optimizer, and a
//! comparison of constant-rate against historical hourly arrivals.
//!
//! # Quick Start
//!
//! ```no_run
//! use clinic_experiments::{export_to_csv, run_scenario, ScenarioConfig};
//!
//! let config = ScenarioConfig::stationary(225, 0.10).with_replications(30);
//! let result = run_scenario(&config).unwrap();
//! println!("service levels met: {}", result.meets_targets());
//! export_to_csv(&[result], "scenario_results.csv").unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: scenario configuration and grid generation
//! - [`runner`]: sequential, parallel, and sweep execution
//! - [`metrics`]: per-replication extraction and scenario aggregation
//! - [`confidence`]: Student-t confidence intervals
//! - [`service_levels`]: wait ceilings checked on the upper CI bound
//! - [`rates`]: historical arrival-rate CSV loading
//! - [`optimizer`], [`comparison`]: experiments built on the runner
//! - [`export`], [`report`]: CSV/JSON output and text tables

pub mod comparison;
pub mod confidence;
pub mod error;
pub mod export;
pub mod metrics;
pub mod optimizer;
pub mod parameters;
pub mod rates;
pub mod report;
pub mod runner;
pub mod service_levels;

pub use comparison::{compare_arrival_models, ArrivalModelComparison};
pub use confidence::ConfidenceInterval;
pub use error::{ExperimentError, ExperimentResult};
pub use export::{export_to_csv, export_to_json};
pub use metrics::{ReplicationResult, ScenarioResult};
pub use optimizer::{optimize_staffing, StaffingRecommendation, DEFAULT_TRIAL_REPLICATIONS};
pub use parameters::{ScenarioConfig, ScenarioGrid};
pub use rates::{arrival_rates_from_reader, load_arrival_rates};
pub use runner::{run_replication, run_scenario, run_scenario_parallel, run_scenario_sweep};
pub use service_levels::{ServiceLevelReport, ServiceLevelTargets};
