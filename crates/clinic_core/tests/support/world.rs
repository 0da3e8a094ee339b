#![allow(dead_code)]

use bevy_ecs::prelude::World;
use clinic_core::arrivals::{ArrivalPolicy, ArrivalRateTable};
use clinic_core::distributions::{RandomStreams, ServiceTimeModel};
use clinic_core::runner::initialize_simulation;
use clinic_core::scenario::{build_replication, ClinicParams, StaffLevels};

/// Builder for reproducible replication worlds.
#[derive(Debug, Clone)]
pub struct TestWorldBuilder {
    seed: u64,
    params: ClinicParams,
}

impl Default for TestWorldBuilder {
    fn default() -> Self {
        Self {
            seed: 42,
            params: ClinicParams::default(),
        }
    }
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Constant-rate arrivals with the reference staffing for that load.
    pub fn with_daily_load(mut self, patients_per_day: u32) -> Self {
        self.params.arrivals = ArrivalPolicy::Stationary {
            patients_per_day: patients_per_day as f64,
        };
        self.params.staffing = StaffLevels::for_daily_load(patients_per_day);
        self
    }

    pub fn with_rate_table(mut self, rates: ArrivalRateTable) -> Self {
        self.params.arrivals = ArrivalPolicy::NonStationary { rates };
        self
    }

    pub fn with_staffing(mut self, staffing: StaffLevels) -> Self {
        self.params.staffing = staffing;
        self
    }

    pub fn with_trauma_fraction(mut self, trauma_fraction: f64) -> Self {
        self.params.trauma_fraction = trauma_fraction;
        self
    }

    pub fn with_service_times(mut self, service_times: ServiceTimeModel) -> Self {
        self.params.service_times = service_times;
        self
    }

    /// Build the world and seed the first arrival.
    pub fn build(self) -> World {
        let mut world = World::new();
        build_replication(&mut world, self.params, RandomStreams::new(self.seed))
            .expect("test params should validate");
        initialize_simulation(&mut world).expect("replication resources present");
        world
    }
}
