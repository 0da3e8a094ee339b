use crate::distributions::StreamId;
use crate::station::Station;
use crate::systems::context::ClinicContext;

/// Discharge or send on to Treatment, decided on the discharge stream.
pub fn examination_end_system(mut ctx: ClinicContext) {
    let Some((entity, patient)) = ctx.finish_service(Station::Examination) else {
        return;
    };
    let discharge_probability = ctx.params().discharge_after_exam;
    let next = if ctx.draw(StreamId::DischargeDecision) < discharge_probability {
        None
    } else {
        patient.next_station(Station::Examination)
    };
    ctx.route(entity, &patient, Station::Examination, next);
}
