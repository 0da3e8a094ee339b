//! Shared state access for the stage handlers.
//!
//! Every handler runs against the same set of replication resources, bundled
//! here as one [`SystemParam`]. Serving is driven by a work-list of stations
//! ([`ServeRequests`]): a stage completion pushes the next station and then its
//! own station, and [`ClinicContext::serve_pending`] drains them in that order.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut, Resource};
use bevy_ecs::system::SystemParam;
use tracing::error;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::distributions::{RandomStreams, StreamId, VariateSource};
use crate::ecs::Patient;
use crate::error::{SimError, SimulationFault};
use crate::queue::QueuedPatient;
use crate::scenario::ClinicParams;
use crate::station::{Station, Stations};
use crate::telemetry::PatientCounters;

/// Stations waiting for a serve attempt, in request order.
#[derive(Debug, Default, Resource)]
pub struct ServeRequests(VecDeque<Station>);

impl ServeRequests {
    pub fn push(&mut self, station: Station) {
        self.0.push_back(station);
    }

    pub fn pop(&mut self) -> Option<Station> {
        self.0.pop_front()
    }
}

#[derive(SystemParam)]
pub struct ClinicContext<'w, 's> {
    event: Res<'w, CurrentEvent>,
    clock: ResMut<'w, SimulationClock>,
    params: Res<'w, ClinicParams>,
    stations: ResMut<'w, Stations>,
    streams: ResMut<'w, RandomStreams>,
    counters: ResMut<'w, PatientCounters>,
    fault: ResMut<'w, SimulationFault>,
    requests: ResMut<'w, ServeRequests>,
    patients: Query<'w, 's, &'static mut Patient>,
    commands: Commands<'w, 's>,
}

impl<'w, 's> ClinicContext<'w, 's> {
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn params(&self) -> &ClinicParams {
        &self.params
    }

    /// Uniform draw in `[0, 1)` from `stream`.
    pub fn draw(&mut self, stream: StreamId) -> f64 {
        self.streams.uniform(stream)
    }

    /// Create a patient at the current time, decide acuity, and send it to
    /// Sign-in/Triage.
    pub fn admit_patient(&mut self) -> Entity {
        let now = self.now();
        let is_trauma = self.draw(StreamId::TraumaDecision) < self.params.trauma_fraction;
        let patient = self.commands.spawn(Patient::arrived(now, is_trauma)).id();
        self.counters.record_arrival(is_trauma);
        self.join_queue(
            Station::SignInTriage,
            QueuedPatient {
                patient,
                eligible_since: now,
                is_trauma,
            },
        );
        self.serve_pending();
        patient
    }

    /// Schedule the next arrival if the arrival policy allows one. Returns the
    /// scheduled arrival time.
    pub fn schedule_next_arrival(&mut self) -> Option<f64> {
        let now = self.now();
        let delay = self.params.arrivals.next_delay(
            now,
            self.params.operating_minutes,
            &mut *self.streams,
        )?;
        self.clock.schedule_in(delay, EventKind::Arrival, None);
        Some(now + delay)
    }

    /// Append a patient to a station queue and request a serve attempt there.
    pub fn join_queue(&mut self, station: Station, entry: QueuedPatient) {
        let now = self.now();
        self.stations.get_mut(station).queue.enqueue(entry, now);
        self.requests.push(station);
    }

    /// Drain the work-list: at each requested station, start service for
    /// waiting patients while a server unit is free.
    pub fn serve_pending(&mut self) {
        let now = self.clock.now();
        while let Some(station) = self.requests.pop() {
            let state = self.stations.get_mut(station);
            while !state.queue.is_empty() && state.server.try_seize(now) {
                let Some(entry) = state.queue.dequeue(now) else {
                    break;
                };
                state.waits.record(now - entry.eligible_since);
                let duration = self.params.service_times.sample(
                    &mut *self.streams,
                    station,
                    entry.is_trauma,
                );
                self.clock.schedule_in(
                    duration,
                    EventKind::service_complete(station),
                    Some(entry.patient),
                );
            }
        }
    }

    /// Close out the service the current event completes: free the server
    /// unit and stamp the patient. Returns `None` after recording a fault when
    /// the state machine has desynchronized.
    pub fn finish_service(&mut self, station: Station) -> Option<(Entity, Patient)> {
        let now = self.now();
        let kind = self.event.0.kind;
        if let Err(err) = self.stations.get_mut(station).server.release(now) {
            self.raise(err);
            return None;
        }
        let Some(entity) = self.event.0.patient else {
            self.raise(SimError::MissingPatient { kind });
            return None;
        };
        let Ok(mut patient) = self.patients.get_mut(entity) else {
            self.raise(SimError::MissingPatient { kind });
            return None;
        };
        patient.complete(station, now);
        Some((entity, *patient))
    }

    /// Send a patient that just finished `from` to `next`, or discharge it.
    /// Then serve the next station followed by `from`, whose freed unit may
    /// take the next waiter.
    pub fn route(
        &mut self,
        entity: Entity,
        patient: &Patient,
        from: Station,
        next: Option<Station>,
    ) {
        let now = self.now();
        match next {
            Some(next) => self.join_queue(
                next,
                QueuedPatient {
                    patient: entity,
                    eligible_since: now,
                    is_trauma: patient.is_trauma,
                },
            ),
            None => {
                match from {
                    Station::Examination => self.counters.discharged_after_examination += 1,
                    _ => self.counters.discharged_after_treatment += 1,
                }
                self.commands.entity(entity).despawn();
            }
        }
        self.requests.push(from);
        self.serve_pending();
    }

    fn raise(&mut self, err: SimError) {
        error!(time = self.clock.now(), error = %err, "invariant violation");
        self.fault.record(err);
    }
}
