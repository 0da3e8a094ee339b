#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use clinic_core::clock::Event;
use clinic_core::runner::{
    run_next_event, run_to_completion, run_until_empty_with_hook, simulation_schedule,
};

pub const MAX_STEPS: usize = 2_000_000;

/// Owns a reusable `Schedule` so tests can step or drain the calendar.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Run a single event (returns `true` if an event was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule)
    }

    /// Drain the calendar, panicking if the replication faults.
    pub fn run_full(&mut self, world: &mut World) -> usize {
        run_to_completion(world, &mut self.schedule, MAX_STEPS).expect("replication completes")
    }

    /// Drain the calendar, observing the world after every event.
    pub fn run_observed<F>(&mut self, world: &mut World, hook: F) -> usize
    where
        F: FnMut(&World, &Event),
    {
        run_until_empty_with_hook(world, &mut self.schedule, MAX_STEPS, hook)
    }
}
