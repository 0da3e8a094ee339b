//! The five clinic stations and their per-replication state.

use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::queue::StationQueue;
use crate::scenario::StaffLevels;
use crate::servers::ServerPool;
use crate::stats::DiscreteStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Station {
    SignInTriage,
    Registration,
    Examination,
    Trauma,
    Treatment,
}

impl Station {
    pub const ALL: [Station; 5] = [
        Station::SignInTriage,
        Station::Registration,
        Station::Examination,
        Station::Trauma,
        Station::Treatment,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Identifier used in configuration files and exported metric names.
    pub fn key(self) -> &'static str {
        match self {
            Station::SignInTriage => "SignInTriage",
            Station::Registration => "Registration",
            Station::Examination => "Examination",
            Station::Trauma => "Trauma",
            Station::Treatment => "Treatment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Station::SignInTriage => "Sign-in/Triage",
            Station::Registration => "Registration",
            Station::Examination => "Examination",
            Station::Trauma => "Trauma",
            Station::Treatment => "Treatment",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Server pool, waiting line, and wait-time collector of one station.
#[derive(Debug, Clone)]
pub struct StationState {
    pub server: ServerPool,
    pub queue: StationQueue,
    pub waits: DiscreteStat,
}

impl StationState {
    pub fn new(station: Station, capacity: u32) -> Self {
        Self {
            server: ServerPool::new(station, capacity),
            queue: StationQueue::default(),
            waits: DiscreteStat::default(),
        }
    }
}

/// All station state for one replication, indexed by [`Station`].
#[derive(Debug, Clone, Resource)]
pub struct Stations {
    states: [StationState; 5],
}

impl Stations {
    pub fn new(staffing: &StaffLevels) -> Self {
        Self {
            states: Station::ALL.map(|station| StationState::new(station, staffing.get(station))),
        }
    }

    pub fn get(&self, station: Station) -> &StationState {
        &self.states[station.index()]
    }

    pub fn get_mut(&mut self, station: Station) -> &mut StationState {
        &mut self.states[station.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Station, &StationState)> {
        Station::ALL.into_iter().zip(self.states.iter())
    }
}
