//! Scenario setup: staffing, arrival policy, and replication world building.

use bevy_ecs::prelude::{Resource, World};
use serde::{Deserialize, Serialize};

use crate::arrivals::{ArrivalPolicy, ArrivalRateTable, OPERATING_HOURS};
use crate::clock::{SimulationClock, MINUTES_PER_HOUR};
use crate::distributions::{RandomStreams, ServiceTimeModel};
use crate::error::{SimError, SimResult, SimulationFault};
use crate::station::{Station, Stations};
use crate::systems::context::ServeRequests;
use crate::telemetry::{EventMetrics, PatientCounters};

/// Default operating day: 6 AM to midnight.
pub const DEFAULT_OPERATING_MINUTES: f64 = OPERATING_HOURS as f64 * MINUTES_PER_HOUR;

/// Share of examined non-trauma patients discharged without treatment.
pub const DEFAULT_DISCHARGE_AFTER_EXAM: f64 = 0.40;

/// Staff units per station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaffLevels {
    pub sign_in_triage: u32,
    pub registration: u32,
    pub examination: u32,
    pub trauma: u32,
    pub treatment: u32,
}

impl Default for StaffLevels {
    fn default() -> Self {
        Self::for_daily_load(225)
    }
}

impl StaffLevels {
    pub fn new(
        sign_in_triage: u32,
        registration: u32,
        examination: u32,
        trauma: u32,
        treatment: u32,
    ) -> Self {
        Self {
            sign_in_triage,
            registration,
            examination,
            trauma,
            treatment,
        }
    }

    /// Same capacity at every station.
    pub fn uniform(capacity: u32) -> Self {
        Self::new(capacity, capacity, capacity, capacity, capacity)
    }

    /// Reference staffing for a daily load. Loads between the reference points
    /// use the next larger table; loads above 225 use the 225 table.
    pub fn for_daily_load(patients_per_day: u32) -> Self {
        match patients_per_day {
            0..=75 => Self::new(2, 2, 3, 2, 3),
            76..=150 => Self::new(3, 4, 6, 3, 5),
            _ => Self::new(4, 6, 9, 4, 8),
        }
    }

    pub fn get(&self, station: Station) -> u32 {
        match station {
            Station::SignInTriage => self.sign_in_triage,
            Station::Registration => self.registration,
            Station::Examination => self.examination,
            Station::Trauma => self.trauma,
            Station::Treatment => self.treatment,
        }
    }

    pub fn set(&mut self, station: Station, capacity: u32) {
        match station {
            Station::SignInTriage => self.sign_in_triage = capacity,
            Station::Registration => self.registration = capacity,
            Station::Examination => self.examination = capacity,
            Station::Trauma => self.trauma = capacity,
            Station::Treatment => self.treatment = capacity,
        }
    }

    pub fn with(mut self, station: Station, capacity: u32) -> Self {
        self.set(station, capacity);
        self
    }

    pub fn total(&self) -> u32 {
        Station::ALL.iter().map(|station| self.get(*station)).sum()
    }
}

/// Parameters of one clinic replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct ClinicParams {
    /// Closing time in minutes after opening.
    pub operating_minutes: f64,
    /// Probability an arriving patient is a trauma case.
    pub trauma_fraction: f64,
    pub staffing: StaffLevels,
    pub arrivals: ArrivalPolicy,
    #[serde(default)]
    pub service_times: ServiceTimeModel,
    /// Probability a non-trauma patient leaves right after examination.
    pub discharge_after_exam: f64,
}

impl Default for ClinicParams {
    fn default() -> Self {
        Self {
            operating_minutes: DEFAULT_OPERATING_MINUTES,
            trauma_fraction: 0.10,
            staffing: StaffLevels::default(),
            arrivals: ArrivalPolicy::default(),
            service_times: ServiceTimeModel::default(),
            discharge_after_exam: DEFAULT_DISCHARGE_AFTER_EXAM,
        }
    }
}

impl ClinicParams {
    /// Constant-rate arrivals averaging `patients_per_day` over the day.
    pub fn stationary(patients_per_day: f64) -> Self {
        Self {
            arrivals: ArrivalPolicy::Stationary { patients_per_day },
            ..Default::default()
        }
    }

    /// Hourly-rate arrivals from a table.
    pub fn non_stationary(rates: ArrivalRateTable) -> Self {
        Self {
            arrivals: ArrivalPolicy::NonStationary { rates },
            ..Default::default()
        }
    }

    pub fn with_trauma_fraction(mut self, trauma_fraction: f64) -> Self {
        self.trauma_fraction = trauma_fraction;
        self
    }

    pub fn with_staffing(mut self, staffing: StaffLevels) -> Self {
        self.staffing = staffing;
        self
    }

    pub fn with_service_times(mut self, service_times: ServiceTimeModel) -> Self {
        self.service_times = service_times;
        self
    }

    pub fn with_operating_minutes(mut self, operating_minutes: f64) -> Self {
        self.operating_minutes = operating_minutes;
        self
    }

    pub fn with_discharge_after_exam(mut self, probability: f64) -> Self {
        self.discharge_after_exam = probability;
        self
    }

    /// Reject parameters the event loop cannot run with. Zero capacities and
    /// zero or negative arrival rates are degenerate but valid scenarios.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.operating_minutes.is_finite() && self.operating_minutes > 0.0) {
            return Err(SimError::Config(format!(
                "operating_minutes must be positive, got {}",
                self.operating_minutes
            )));
        }
        for (name, p) in [
            ("trauma_fraction", self.trauma_fraction),
            ("discharge_after_exam", self.discharge_after_exam),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::Config(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        self.service_times.validate()
    }
}

/// Populates `world` with a fresh calendar, stations, collectors, and counters
/// for one replication. `streams` is moved in; take it back with
/// [`take_streams`] after the run so stream state carries over to the next
/// replication.
pub fn build_replication(
    world: &mut World,
    params: ClinicParams,
    streams: RandomStreams,
) -> SimResult<()> {
    params.validate()?;
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Stations::new(&params.staffing));
    world.insert_resource(PatientCounters::default());
    world.insert_resource(EventMetrics::default());
    world.insert_resource(SimulationFault::default());
    world.insert_resource(ServeRequests::default());
    world.insert_resource(streams);
    world.insert_resource(params);
    Ok(())
}

/// Remove the random streams from a finished replication world.
pub fn take_streams(world: &mut World) -> Option<RandomStreams> {
    world.remove_resource::<RandomStreams>()
}
