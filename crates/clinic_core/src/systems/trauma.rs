use crate::station::Station;
use crate::systems::context::ClinicContext;

pub fn trauma_end_system(mut ctx: ClinicContext) {
    let Some((entity, patient)) = ctx.finish_service(Station::Trauma) else {
        return;
    };
    ctx.route(entity, &patient, Station::Trauma, Some(Station::Treatment));
}
