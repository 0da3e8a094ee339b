use crate::station::Station;
use crate::systems::context::ClinicContext;

/// Treatment is the last stage on both paths.
pub fn treatment_end_system(mut ctx: ClinicContext) {
    let Some((entity, patient)) = ctx.finish_service(Station::Treatment) else {
        return;
    };
    ctx.route(entity, &patient, Station::Treatment, None);
}
