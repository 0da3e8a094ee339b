use bevy_ecs::prelude::Component;

use crate::station::Station;

/// Which of the two care paths a patient follows after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarePath {
    /// Sign-in/Triage -> Trauma -> Treatment.
    TraumaDirect,
    /// Sign-in/Triage -> Registration -> Examination -> (Treatment).
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Patient {
    /// Simulation time of arrival (minutes).
    pub created_at: f64,
    /// Decided once at arrival.
    pub is_trauma: bool,
    pub triage_done_at: Option<f64>,
    pub registration_done_at: Option<f64>,
    pub examination_done_at: Option<f64>,
    pub trauma_done_at: Option<f64>,
    pub treatment_done_at: Option<f64>,
}

impl Patient {
    pub fn arrived(now: f64, is_trauma: bool) -> Self {
        Self {
            created_at: now,
            is_trauma,
            triage_done_at: None,
            registration_done_at: None,
            examination_done_at: None,
            trauma_done_at: None,
            treatment_done_at: None,
        }
    }

    pub fn care_path(&self) -> CarePath {
        if self.is_trauma {
            CarePath::TraumaDirect
        } else {
            CarePath::Standard
        }
    }

    pub fn completed_at(&self, station: Station) -> Option<f64> {
        match station {
            Station::SignInTriage => self.triage_done_at,
            Station::Registration => self.registration_done_at,
            Station::Examination => self.examination_done_at,
            Station::Trauma => self.trauma_done_at,
            Station::Treatment => self.treatment_done_at,
        }
    }

    /// Stamp completion of `station` at `now`.
    pub fn complete(&mut self, station: Station, now: f64) {
        let slot = match station {
            Station::SignInTriage => &mut self.triage_done_at,
            Station::Registration => &mut self.registration_done_at,
            Station::Examination => &mut self.examination_done_at,
            Station::Trauma => &mut self.trauma_done_at,
            Station::Treatment => &mut self.treatment_done_at,
        };
        *slot = Some(now);
    }

    /// Station that follows `station` on this patient's path. `None` means the
    /// path ends there. Examination is the branching point for standard
    /// patients: the caller decides discharge before asking for Treatment.
    pub fn next_station(&self, station: Station) -> Option<Station> {
        match (self.care_path(), station) {
            (CarePath::TraumaDirect, Station::SignInTriage) => Some(Station::Trauma),
            (CarePath::TraumaDirect, Station::Trauma) => Some(Station::Treatment),
            (CarePath::Standard, Station::SignInTriage) => Some(Station::Registration),
            (CarePath::Standard, Station::Registration) => Some(Station::Examination),
            (CarePath::Standard, Station::Examination) => Some(Station::Treatment),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trauma_path_skips_registration_and_examination() {
        let patient = Patient::arrived(0.0, true);
        assert_eq!(patient.care_path(), CarePath::TraumaDirect);
        assert_eq!(
            patient.next_station(Station::SignInTriage),
            Some(Station::Trauma)
        );
        assert_eq!(patient.next_station(Station::Trauma), Some(Station::Treatment));
        assert_eq!(patient.next_station(Station::Treatment), None);
    }

    #[test]
    fn standard_path_visits_registration_then_examination() {
        let patient = Patient::arrived(0.0, false);
        assert_eq!(
            patient.next_station(Station::SignInTriage),
            Some(Station::Registration)
        );
        assert_eq!(
            patient.next_station(Station::Registration),
            Some(Station::Examination)
        );
        assert_eq!(
            patient.next_station(Station::Examination),
            Some(Station::Treatment)
        );
    }

    #[test]
    fn completion_stamps_are_per_stage() {
        let mut patient = Patient::arrived(2.0, false);
        patient.complete(Station::SignInTriage, 5.0);
        patient.complete(Station::Examination, 30.0);
        assert_eq!(patient.completed_at(Station::SignInTriage), Some(5.0));
        assert_eq!(patient.completed_at(Station::Registration), None);
    }
}
