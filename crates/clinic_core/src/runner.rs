//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent],
//! then runs the schedule. Exactly one stage handler runs per step, selected by
//! the event kind.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{apply_deferred, ExecutorKind, IntoSystemConfigs};
use tracing::{debug, trace};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::distributions::RandomStreams;
use crate::error::{SimError, SimResult, SimulationFault};
use crate::scenario::ClinicParams;
use crate::systems::{
    arrival::arrival_system, examination::examination_end_system,
    registration::registration_end_system, sign_in_triage::sign_in_triage_end_system,
    trauma::trauma_end_system, treatment::treatment_end_system,
};
use crate::telemetry::EventMetrics;

// Condition functions for each event kind
fn is_arrival(event: Option<Res<CurrentEvent>>) -> bool {
    event.map(|e| e.0.kind == EventKind::Arrival).unwrap_or(false)
}

fn is_end_sign_in_triage(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndSignInTriage)
        .unwrap_or(false)
}

fn is_end_registration(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndRegistration)
        .unwrap_or(false)
}

fn is_end_examination(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndExamination)
        .unwrap_or(false)
}

fn is_end_trauma(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndTrauma)
        .unwrap_or(false)
}

fn is_end_treatment(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::EndTreatment)
        .unwrap_or(false)
}

/// Builds the clinic schedule: one handler per event kind plus [apply_deferred]
/// so patients spawned on arrival exist before their first completion event.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((
        arrival_system.run_if(is_arrival),
        sign_in_triage_end_system.run_if(is_end_sign_in_triage),
        registration_end_system.run_if(is_end_registration),
        examination_end_system.run_if(is_end_examination),
        trauma_end_system.run_if(is_end_trauma),
        treatment_end_system.run_if(is_end_treatment),
        // Always run apply_deferred to ensure spawned patients are available
        apply_deferred,
    ));
    schedule
}

/// Seeds the first arrival from the configured arrival policy. Call this after
/// [crate::scenario::build_replication] and before running events. Returns the
/// first arrival time, or `None` when the policy produces no arrivals at all.
pub fn initialize_simulation(world: &mut World) -> SimResult<Option<f64>> {
    let (policy, closing) = {
        let params = world
            .get_resource::<ClinicParams>()
            .ok_or(SimError::MissingResource("ClinicParams"))?;
        (params.arrivals.clone(), params.operating_minutes)
    };
    let now = world
        .get_resource::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?
        .now();
    let delay = {
        let mut streams = world
            .get_resource_mut::<RandomStreams>()
            .ok_or(SimError::MissingResource("RandomStreams"))?;
        policy.first_delay(now, closing, &mut *streams)
    };
    let Some(delay) = delay else {
        debug!("arrival policy produced no first arrival");
        return Ok(None);
    };
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_in(delay, EventKind::Arrival, None);
    debug!(first_arrival = now + delay, "seeded first arrival");
    Ok(Some(now + delay))
}

fn is_faulted(world: &World) -> bool {
    world
        .get_resource::<SimulationFault>()
        .is_some_and(|fault| fault.is_faulted())
}

/// Pops the next event and dispatches it. Returns the event, or `None` when
/// the calendar is empty or a handler has recorded a fault.
fn dispatch_next(world: &mut World, schedule: &mut Schedule) -> Option<Event> {
    if is_faulted(world) {
        return None;
    }
    let event = world.get_resource_mut::<SimulationClock>()?.pop_next()?;
    trace!(time = event.timestamp, kind = ?event.kind, "dispatch");
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }

    schedule.run(world);
    Some(event)
}

/// Runs one simulation step. Returns `true` if an event was processed, `false`
/// if the calendar was empty or the replication has faulted.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    dispatch_next(world, schedule).is_some()
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    match dispatch_next(world, schedule) {
        Some(event) => {
            hook(world, &event);
            true
        }
        None => false,
    }
}

/// Runs simulation steps until the calendar is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> usize
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook) {
        steps += 1;
    }
    steps
}

/// Drains the calendar to exhaustion and reports how the replication ended:
/// the number of steps on success, the recorded fault if a handler raised one,
/// or [SimError::StepLimitExceeded] if events remain after `max_steps`.
pub fn run_to_completion(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> SimResult<usize> {
    let steps = run_until_empty(world, schedule, max_steps);
    if let Some(err) = world
        .get_resource_mut::<SimulationFault>()
        .and_then(|mut fault| fault.take())
    {
        return Err(err);
    }
    let drained = world
        .get_resource::<SimulationClock>()
        .ok_or(SimError::MissingResource("SimulationClock"))?
        .is_empty();
    if drained {
        Ok(steps)
    } else {
        Err(SimError::StepLimitExceeded { steps })
    }
}
