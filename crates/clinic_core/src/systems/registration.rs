use crate::station::Station;
use crate::systems::context::ClinicContext;

pub fn registration_end_system(mut ctx: ClinicContext) {
    let Some((entity, patient)) = ctx.finish_service(Station::Registration) else {
        return;
    };
    ctx.route(entity, &patient, Station::Registration, Some(Station::Examination));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Schedule;

    use crate::ecs::Patient;
    use crate::scenario::ClinicParams;
    use crate::station::Stations;
    use crate::test_helpers::{pop_as_current, replication_world, start_service};

    #[test]
    fn registration_hands_off_to_examination() {
        let mut world = replication_world(ClinicParams::default(), 4);
        let entity = start_service(
            &mut world,
            Station::Registration,
            Patient::arrived(0.0, false),
            5.0,
        );
        pop_as_current(&mut world);
        let mut schedule = Schedule::default();
        schedule.add_systems(registration_end_system);
        schedule.run(&mut world);

        let stations = world.resource::<Stations>();
        assert_eq!(stations.get(Station::Registration).server.busy(), 0);
        assert_eq!(stations.get(Station::Examination).server.busy(), 1);
        assert_eq!(
            world.get::<Patient>(entity).and_then(|p| p.registration_done_at),
            Some(5.0)
        );
    }
}
