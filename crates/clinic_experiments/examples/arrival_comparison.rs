//! Example: compare constant-rate and historical hourly arrivals.
//!
//! Usage: `cargo run -p clinic_experiments --example arrival_comparison [ARRIVALS_CSV]`
//!
//! The stationary scenario uses the daily total implied by the hourly table,
//! so both runs see the same expected volume and only its timing differs.

use clinic_core::arrivals::ArrivalRateTable;
use clinic_core::scenario::StaffLevels;
use clinic_experiments::report::ComparisonReport;
use clinic_experiments::{compare_arrival_models, load_arrival_rates, ScenarioConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let rates = match std::env::args().nth(1) {
        Some(path) => load_arrival_rates(path)?,
        None => ArrivalRateTable::fallback(),
    };
    let daily = rates.expected_daily_arrivals().round() as u32;
    let config = ScenarioConfig::stationary(daily, 0.10).with_staffing(StaffLevels::default());

    println!("Comparing arrival models at {daily} patients/day...\n");
    let comparison = compare_arrival_models(&config, rates, config.replications)?;
    println!("{}", ComparisonReport(&comparison));

    Ok(())
}
