//! Replication and scenario execution.
//!
//! [`run_scenario`] runs replications one after another on a single set of
//! random streams that keeps advancing between replications, so a scenario is
//! reproducible from its seed alone. [`run_scenario_parallel`] instead derives
//! independent streams per replication and spreads them over a rayon pool.
//! [`run_scenario_sweep`] runs whole scenarios in parallel, each sequential
//! internally.

use bevy_ecs::prelude::World;
use clinic_core::distributions::RandomStreams;
use clinic_core::runner::{initialize_simulation, run_to_completion, simulation_schedule};
use clinic_core::scenario::{build_replication, take_streams, ClinicParams};
use clinic_core::telemetry::EventMetrics;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::error::{ExperimentError, ExperimentResult};
use crate::metrics::{extract_metrics, ReplicationResult, ScenarioResult};
use crate::parameters::ScenarioConfig;

/// Upper bound on dispatched events per replication.
pub const MAX_STEPS_PER_REPLICATION: usize = 5_000_000;

/// Run one replication from empty initial state to an empty calendar.
///
/// `streams` is moved into the replication world and the advanced state is
/// written back afterwards, so consecutive calls continue the same streams.
pub fn run_replication(
    params: &ClinicParams,
    streams: &mut RandomStreams,
    replication: usize,
) -> ExperimentResult<ReplicationResult> {
    let mut world = World::new();
    build_replication(&mut world, params.clone(), streams.clone())?;
    initialize_simulation(&mut world)?;

    let mut schedule = simulation_schedule();
    let outcome = run_to_completion(&mut world, &mut schedule, MAX_STEPS_PER_REPLICATION);
    if let Some(advanced) = take_streams(&mut world) {
        *streams = advanced;
    }
    let steps = outcome.map_err(|source| ExperimentError::Replication {
        replication,
        source,
    })?;

    let result = extract_metrics(&world, replication)?;
    let events_per_second = world
        .get_resource::<EventMetrics>()
        .map(EventMetrics::events_per_second)
        .unwrap_or(0.0);
    debug!(
        replication,
        steps,
        events_per_second,
        arrivals = result.total_arrivals,
        completed = result.patients_completed,
        end_time = result.end_time,
        "replication finished"
    );
    Ok(result)
}

fn summarize(config: &ScenarioConfig, results: &[ReplicationResult]) -> ScenarioResult {
    let scenario = ScenarioResult::from_replications(
        config.name.clone(),
        config.params.staffing,
        results,
        &config.targets,
    );
    for check in scenario.service_levels.failures() {
        warn!(
            scenario = %scenario.name,
            station = %check.station,
            threshold = check.threshold,
            observed_upper = check.observed_upper,
            "service level not met"
        );
    }
    info!(
        scenario = %scenario.name,
        replications = scenario.replications,
        meets_targets = scenario.meets_targets(),
        "scenario finished"
    );
    scenario
}

/// Run all replications of a scenario sequentially on shared streams. The
/// scenario aborts on the first failed replication.
pub fn run_scenario(config: &ScenarioConfig) -> ExperimentResult<ScenarioResult> {
    config.validate()?;
    let mut streams = RandomStreams::new(config.seed);
    let mut results = Vec::with_capacity(config.replications);
    for replication in 0..config.replications {
        match run_replication(&config.params, &mut streams, replication) {
            Ok(result) => results.push(result),
            Err(err) => {
                error!(scenario = %config.name, replication, error = %err, "scenario aborted");
                return Err(err);
            }
        }
    }
    Ok(summarize(config, &results))
}

fn progress_bar(total: usize, show_progress: bool) -> Option<ProgressBar> {
    if !show_progress || total == 0 {
        return None;
    }
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    Some(bar)
}

/// Run the replications of one scenario in parallel. Each replication gets
/// streams derived from `(seed, replication)`, so results do not depend on
/// scheduling order but differ from [`run_scenario`].
pub fn run_scenario_parallel(
    config: &ScenarioConfig,
    show_progress: bool,
) -> ExperimentResult<ScenarioResult> {
    config.validate()?;
    let pb = progress_bar(config.replications, show_progress);
    let results: ExperimentResult<Vec<ReplicationResult>> = (0..config.replications)
        .into_par_iter()
        .map(|replication| {
            let mut streams = RandomStreams::for_replication(config.seed, replication as u64);
            let result = run_replication(&config.params, &mut streams, replication);
            if let Some(ref progress_bar) = pb {
                progress_bar.inc(1);
            }
            result
        })
        .collect();
    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }
    let results = results.map_err(|err| {
        error!(scenario = %config.name, error = %err, "scenario aborted");
        err
    })?;
    Ok(summarize(config, &results))
}

/// Run many scenarios in parallel, preserving input order.
///
/// `num_threads` of `None` uses rayon's default pool size.
pub fn run_scenario_sweep(
    configs: &[ScenarioConfig],
    num_threads: Option<usize>,
    show_progress: bool,
) -> ExperimentResult<Vec<ScenarioResult>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|err| ExperimentError::Config(format!("failed to create thread pool: {err}")))?;

    let pb = progress_bar(configs.len(), show_progress);
    let results = pool.install(|| {
        configs
            .par_iter()
            .map(|config| {
                let result = run_scenario(config);
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });
    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }
    results
}
