//! Example: sweep daily loads and trauma fractions in parallel.
//!
//! This example demonstrates how to:
//! 1. Generate a scenario grid (loads 75/150/225 x trauma 8/10/12%)
//! 2. Run every scenario in parallel
//! 3. Summarize service-level outcomes
//! 4. Export results to CSV and JSON

use clinic_experiments::{export_to_csv, export_to_json, run_scenario_sweep, ScenarioGrid};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Generating scenario grid...");
    let configs = ScenarioGrid::grid().generate();
    println!("Generated {} scenarios", configs.len());

    println!("Running scenarios in parallel...");
    let results = run_scenario_sweep(&configs, None, true)?;

    println!("\n=== Service levels ===");
    for result in &results {
        let failing: Vec<String> = result
            .service_levels
            .failures()
            .map(|check| check.station.label().to_string())
            .collect();
        if failing.is_empty() {
            println!("{:<24} met", result.name);
        } else {
            println!("{:<24} NOT met ({})", result.name, failing.join(", "));
        }
    }

    println!("\nExporting results...");
    export_to_csv(&results, "scenario_results.csv")?;
    println!("Exported to scenario_results.csv");
    export_to_json(&results, "scenario_results.json")?;
    println!("Exported to scenario_results.json");

    Ok(())
}
