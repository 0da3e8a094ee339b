//! Example: run the clinic with historical hourly arrival rates.
//!
//! Usage: `cargo run -p clinic_experiments --example nonstationary_run [ARRIVALS_CSV]`
//!
//! The CSV holds one header row and one row per day of 18 hourly counts
//! (6 AM to midnight). Without an argument the fallback of 10 patients/hour
//! is used.

use clinic_core::arrivals::ArrivalRateTable;
use clinic_experiments::report::ScenarioReport;
use clinic_experiments::{load_arrival_rates, run_scenario, ScenarioConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rates = match std::env::args().nth(1) {
        Some(path) => load_arrival_rates(path)?,
        None => ArrivalRateTable::fallback(),
    };

    println!("Hourly arrival rates (patients/hour):");
    for (hour, rate) in rates.hourly().iter().enumerate() {
        println!("  {:02}:00  {:>6.2}", hour + 6, rate);
    }
    println!(
        "Expected arrivals per day: {:.1}\n",
        rates.expected_daily_arrivals()
    );

    let config = ScenarioConfig::non_stationary(rates, 0.10);
    let result = run_scenario(&config)?;
    println!("{}", ScenarioReport(&result));

    Ok(())
}
