//! Event calendar and simulation clock.
//!
//! Simulated time is measured in minutes from opening (6 AM). The calendar is a
//! min-heap keyed on `(timestamp, seq)`, so events scheduled for the same
//! instant pop in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

use crate::station::Station;

pub const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Arrival,
    EndSignInTriage,
    EndRegistration,
    EndExamination,
    EndTrauma,
    EndTreatment,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Arrival,
        EventKind::EndSignInTriage,
        EventKind::EndRegistration,
        EventKind::EndExamination,
        EventKind::EndTrauma,
        EventKind::EndTreatment,
    ];

    /// Completion event for a station's service.
    pub fn service_complete(station: Station) -> Self {
        match station {
            Station::SignInTriage => EventKind::EndSignInTriage,
            Station::Registration => EventKind::EndRegistration,
            Station::Examination => EventKind::EndExamination,
            Station::Trauma => EventKind::EndTrauma,
            Station::Treatment => EventKind::EndTreatment,
        }
    }

    /// Station whose service this event completes, if any.
    pub fn station(self) -> Option<Station> {
        match self {
            EventKind::Arrival => None,
            EventKind::EndSignInTriage => Some(Station::SignInTriage),
            EventKind::EndRegistration => Some(Station::Registration),
            EventKind::EndExamination => Some(Station::Examination),
            EventKind::EndTrauma => Some(Station::Trauma),
            EventKind::EndTreatment => Some(Station::Treatment),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// Absolute simulated time in minutes.
    pub timestamp: f64,
    /// Insertion sequence number; breaks ties between equal timestamps.
    pub seq: u64,
    pub kind: EventKind,
    /// Patient carried by stage-completion events.
    pub patient: Option<Entity>,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event being dispatched in the current step.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: f64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an event at an absolute time. Scheduling into the past is a
    /// programming error; release builds clamp the timestamp to `now`.
    pub fn schedule_at(&mut self, timestamp: f64, kind: EventKind, patient: Option<Entity>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let timestamp = timestamp.max(self.now);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            seq,
            kind,
            patient,
        });
    }

    /// Schedule an event `delay` minutes after now.
    pub fn schedule_in(&mut self, delay: f64, kind: EventKind, patient: Option<Entity>) {
        debug_assert!(delay >= 0.0, "event delay must be non-negative");
        self.schedule_at(self.now + delay.max(0.0), kind, patient);
    }

    /// Remove the earliest event and advance the clock to its timestamp.
    /// Returns `None` once the calendar is drained.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<f64> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10.0, EventKind::Arrival, None);
        clock.schedule_at(5.0, EventKind::EndTrauma, None);
        clock.schedule_at(20.0, EventKind::Arrival, None);

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5.0);
        assert_eq!(clock.now(), 5.0);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10.0);
        assert_eq!(clock.now(), 10.0);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20.0);
        assert_eq!(clock.now(), 20.0);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn equal_timestamps_pop_in_insertion_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(7.5, EventKind::EndTreatment, None);
        clock.schedule_at(7.5, EventKind::Arrival, None);
        clock.schedule_at(7.5, EventKind::EndRegistration, None);

        let kinds: Vec<_> = std::iter::from_fn(|| clock.pop_next())
            .map(|event| event.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::EndTreatment,
                EventKind::Arrival,
                EventKind::EndRegistration
            ]
        );
    }

    #[test]
    fn schedule_in_is_relative_to_now() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(30.0, EventKind::Arrival, None);
        clock.pop_next().expect("event");
        clock.schedule_in(2.5, EventKind::EndSignInTriage, None);
        assert_eq!(clock.next_event_time(), Some(32.5));
        assert_eq!(clock.pending_event_count(), 1);
    }

    #[test]
    fn service_complete_round_trips_station() {
        for station in Station::ALL {
            assert_eq!(EventKind::service_complete(station).station(), Some(station));
        }
        assert_eq!(EventKind::Arrival.station(), None);
    }
}
