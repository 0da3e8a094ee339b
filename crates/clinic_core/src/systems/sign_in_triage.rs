use crate::station::Station;
use crate::systems::context::ClinicContext;

/// Trauma patients go to Trauma, everyone else to Registration.
pub fn sign_in_triage_end_system(mut ctx: ClinicContext) {
    let Some((entity, patient)) = ctx.finish_service(Station::SignInTriage) else {
        return;
    };
    let next = patient.next_station(Station::SignInTriage);
    ctx.route(entity, &patient, Station::SignInTriage, next);
}
