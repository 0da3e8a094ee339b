//! Example: run the reference 225 patients/day scenario.
//!
//! Runs 30 sequential replications with the 225/day staffing table and prints
//! per-station confidence intervals and service-level verdicts.
//!
//! Usage: `cargo run -p clinic_experiments --example scenario_run [SCENARIO_JSON]`
//! where the optional argument is a `ScenarioConfig` JSON file.

use clinic_experiments::report::ScenarioReport;
use clinic_experiments::{run_scenario, ScenarioConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ScenarioConfig::from_json_file(path)?,
        None => ScenarioConfig::stationary(225, 0.10),
    };

    println!(
        "Running '{}' with {} replications (seed {})...",
        config.name, config.replications, config.seed
    );
    let result = run_scenario(&config)?;
    println!("\n{}", ScenarioReport(&result));

    Ok(())
}
