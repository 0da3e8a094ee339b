//! Shared setup for unit and integration tests.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::distributions::RandomStreams;
use crate::ecs::Patient;
use crate::scenario::{build_replication, ClinicParams};
use crate::station::{Station, Stations};

/// A world with all replication resources inserted.
///
/// # Panics
///
/// Panics if `params` fail validation.
pub fn replication_world(params: ClinicParams, seed: u64) -> World {
    let mut world = World::new();
    build_replication(&mut world, params, RandomStreams::new(seed))
        .expect("test params should validate");
    world
}

/// Pop the earliest pending event and make it the current event, the way the
/// runner does before dispatch.
///
/// # Panics
///
/// Panics if the calendar is empty.
pub fn pop_as_current(world: &mut World) -> Event {
    let event = world
        .resource_mut::<SimulationClock>()
        .pop_next()
        .expect("calendar should not be empty");
    world.insert_resource(CurrentEvent(event));
    event
}

/// Spawn `patient`, occupy one unit at `station` for it, and schedule its
/// completion `duration` minutes from now.
///
/// # Panics
///
/// Panics if the station has no free unit.
pub fn start_service(
    world: &mut World,
    station: Station,
    patient: Patient,
    duration: f64,
) -> Entity {
    let entity = world.spawn(patient).id();
    let now = world.resource::<SimulationClock>().now();
    assert!(
        world
            .resource_mut::<Stations>()
            .get_mut(station)
            .server
            .try_seize(now),
        "station should have a free unit"
    );
    world.resource_mut::<SimulationClock>().schedule_in(
        duration,
        EventKind::service_complete(station),
        Some(entity),
    );
    entity
}
