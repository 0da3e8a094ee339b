use tracing::trace;

use crate::systems::context::ClinicContext;

/// Admit the arriving patient, then schedule the next arrival.
pub fn arrival_system(mut ctx: ClinicContext) {
    let patient = ctx.admit_patient();
    let next = ctx.schedule_next_arrival();
    trace!(time = ctx.now(), ?patient, next_arrival = ?next, "patient arrived");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Schedule;

    use crate::clock::{EventKind, SimulationClock};
    use crate::ecs::Patient;
    use crate::scenario::{ClinicParams, StaffLevels};
    use crate::station::{Station, Stations};
    use crate::telemetry::PatientCounters;
    use crate::test_helpers::{pop_as_current, replication_world};

    #[test]
    fn arrival_spawns_patient_and_starts_triage() {
        let mut world = replication_world(ClinicParams::stationary(225.0), 7);
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(0.0, EventKind::Arrival, None);
        pop_as_current(&mut world);

        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        schedule.run(&mut world);

        assert_eq!(world.resource::<PatientCounters>().total_arrivals, 1);
        assert_eq!(world.query::<&Patient>().iter(&world).count(), 1);
        let triage = world.resource::<Stations>().get(Station::SignInTriage);
        assert_eq!(triage.server.busy(), 1);
        assert_eq!(triage.waits.count(), 1);
        assert_eq!(triage.waits.mean(), 0.0);
        // Triage completion plus the next arrival.
        assert_eq!(world.resource::<SimulationClock>().pending_event_count(), 2);
    }

    #[test]
    fn unstaffed_triage_leaves_patient_waiting() {
        let params = ClinicParams::stationary(225.0).with_staffing(StaffLevels::uniform(0));
        let mut world = replication_world(params, 7);
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(0.0, EventKind::Arrival, None);
        pop_as_current(&mut world);

        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        schedule.run(&mut world);

        let triage = world.resource::<Stations>().get(Station::SignInTriage);
        assert_eq!(triage.queue.len(), 1);
        assert_eq!(triage.server.busy(), 0);
        // Only the next arrival is pending.
        assert_eq!(world.resource::<SimulationClock>().pending_event_count(), 1);
    }

    #[test]
    fn full_trauma_fraction_marks_every_patient() {
        let params = ClinicParams::stationary(225.0).with_trauma_fraction(1.0);
        let mut world = replication_world(params, 3);
        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        for _ in 0..10 {
            world
                .resource_mut::<SimulationClock>()
                .schedule_in(0.0, EventKind::Arrival, None);
            pop_as_current(&mut world);
            schedule.run(&mut world);
        }
        let counters = world.resource::<PatientCounters>();
        assert_eq!(counters.trauma_patients, 10);
        assert_eq!(counters.non_trauma_patients, 0);
    }
}
