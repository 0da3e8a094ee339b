//! Example: look for a cheaper staffing plan that still meets service levels.
//!
//! Usage: `cargo run -p clinic_experiments --example staffing_optimizer [DAILY_LOAD] [--relaxed]`

use clinic_experiments::report::{RecommendationReport, ScenarioReport};
use clinic_experiments::{
    optimize_staffing, ScenarioConfig, ServiceLevelTargets, DEFAULT_TRIAL_REPLICATIONS,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let daily_load = args
        .iter()
        .find_map(|arg| arg.parse::<u32>().ok())
        .unwrap_or(225);
    let targets = if args.iter().any(|arg| arg == "--relaxed") {
        ServiceLevelTargets::relaxed()
    } else {
        ServiceLevelTargets::default()
    };

    let config = ScenarioConfig::stationary(daily_load, 0.10);
    println!("Optimizing staffing for '{}'...", config.name);
    let recommendation = optimize_staffing(&config, &targets, DEFAULT_TRIAL_REPLICATIONS)?;

    println!("\n{}", ScenarioReport(&recommendation.baseline));
    println!("\n{}", RecommendationReport(&recommendation));

    Ok(())
}
