//! Named service-time distributions and the per-stream variate source.
//!
//! Every random decision in the clinic draws from its own stream so outcomes
//! are reproducible and decorrelated: changing how many service times one
//! station samples never shifts the routing or arrival draws.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, LogNormal, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::station::Station;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    Arrival,
    Triage,
    Registration,
    Examination,
    Trauma,
    Treatment,
    TraumaDecision,
    DischargeDecision,
}

impl StreamId {
    pub const COUNT: usize = 8;

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stream that feeds a station's service times.
    pub fn for_station(station: Station) -> Self {
        match station {
            Station::SignInTriage => StreamId::Triage,
            Station::Registration => StreamId::Registration,
            Station::Examination => StreamId::Examination,
            Station::Trauma => StreamId::Trauma,
            Station::Treatment => StreamId::Treatment,
        }
    }
}

/// A named distribution, parameterized by the moments of the variate itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variate {
    Exponential { mean: f64 },
    /// Lognormal with the given mean and variance of the (non-log) variate.
    LogNormal { mean: f64, variance: f64 },
    Normal { mean: f64, variance: f64 },
}

impl Variate {
    pub fn mean(&self) -> f64 {
        match *self {
            Variate::Exponential { mean }
            | Variate::LogNormal { mean, .. }
            | Variate::Normal { mean, .. } => mean,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        let ok = match *self {
            Variate::Exponential { mean } => mean.is_finite() && mean > 0.0,
            Variate::LogNormal { mean, variance } => {
                mean.is_finite() && mean > 0.0 && variance.is_finite() && variance >= 0.0
            }
            Variate::Normal { mean, variance } => {
                mean.is_finite() && variance.is_finite() && variance >= 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(SimError::Config(format!("invalid distribution {self:?}")))
        }
    }

    /// Draw one value. Parameters rejected by [`Variate::validate`] degrade to
    /// the mean rather than panicking.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Variate::Exponential { mean } => match Exp::new(1.0 / mean) {
                Ok(dist) => dist.sample(rng),
                Err(_) => mean,
            },
            Variate::LogNormal { mean, variance } => {
                let sigma_sq = (1.0 + variance / (mean * mean)).ln();
                let mu = mean.ln() - 0.5 * sigma_sq;
                match LogNormal::new(mu, sigma_sq.sqrt()) {
                    Ok(dist) => dist.sample(rng),
                    Err(_) => mean,
                }
            }
            Variate::Normal { mean, variance } => match Normal::new(mean, variance.sqrt()) {
                Ok(dist) => dist.sample(rng),
                Err(_) => mean,
            },
        }
    }
}

/// Source of uniform and named-distribution draws, addressed by stream.
pub trait VariateSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self, stream: StreamId) -> f64;

    fn sample(&mut self, stream: StreamId, variate: &Variate) -> f64;

    /// Exponential draw with the given mean.
    fn exponential(&mut self, stream: StreamId, mean: f64) -> f64 {
        self.sample(stream, &Variate::Exponential { mean })
    }
}

/// Eight independent seeded generators, one per [`StreamId`].
#[derive(Debug, Clone, Resource)]
pub struct RandomStreams {
    seed: u64,
    streams: [StdRng; StreamId::COUNT],
}

impl RandomStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: std::array::from_fn(|i| {
                StdRng::seed_from_u64(seed ^ (i as u64 + 1).wrapping_mul(MIXING_CONSTANT))
            }),
        }
    }

    /// Independent streams for one replication of a parallel run.
    pub fn for_replication(base_seed: u64, replication: u64) -> Self {
        let mut root = StdRng::seed_from_u64(base_seed);
        let salt: u64 = root.gen();
        Self::new(salt ^ replication.wrapping_add(1).wrapping_mul(MIXING_CONSTANT.rotate_left(17)))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self, stream: StreamId) -> &mut StdRng {
        &mut self.streams[stream.index()]
    }
}

impl VariateSource for RandomStreams {
    fn uniform(&mut self, stream: StreamId) -> f64 {
        self.rng(stream).gen::<f64>()
    }

    fn sample(&mut self, stream: StreamId, variate: &Variate) -> f64 {
        variate.sample(self.rng(stream))
    }
}

/// Per-stage service-time distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTimeModel {
    pub sign_in_triage: Variate,
    pub registration: Variate,
    pub examination: Variate,
    pub trauma: Variate,
    pub treatment_trauma: Variate,
    pub treatment_standard: Variate,
    /// Draws at or below zero are replaced by this floor (minutes).
    pub min_service_minutes: f64,
}

impl Default for ServiceTimeModel {
    fn default() -> Self {
        Self {
            sign_in_triage: Variate::Exponential { mean: 3.0 },
            registration: Variate::LogNormal {
                mean: 5.0,
                variance: 2.0,
            },
            examination: Variate::Normal {
                mean: 16.0,
                variance: 3.0,
            },
            trauma: Variate::Exponential { mean: 90.0 },
            treatment_trauma: Variate::LogNormal {
                mean: 30.0,
                variance: 4.0,
            },
            treatment_standard: Variate::LogNormal {
                mean: 13.3,
                variance: 2.0,
            },
            min_service_minutes: 0.1,
        }
    }
}

impl ServiceTimeModel {
    pub fn variate_for(&self, station: Station, is_trauma: bool) -> &Variate {
        match station {
            Station::SignInTriage => &self.sign_in_triage,
            Station::Registration => &self.registration,
            Station::Examination => &self.examination,
            Station::Trauma => &self.trauma,
            Station::Treatment if is_trauma => &self.treatment_trauma,
            Station::Treatment => &self.treatment_standard,
        }
    }

    /// Sample a service duration for `station` from its dedicated stream.
    pub fn sample<V: VariateSource + ?Sized>(
        &self,
        source: &mut V,
        station: Station,
        is_trauma: bool,
    ) -> f64 {
        let duration = source.sample(
            StreamId::for_station(station),
            self.variate_for(station, is_trauma),
        );
        if duration > 0.0 {
            duration
        } else {
            self.min_service_minutes
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        for variate in [
            &self.sign_in_triage,
            &self.registration,
            &self.examination,
            &self.trauma,
            &self.treatment_trauma,
            &self.treatment_standard,
        ] {
            variate.validate()?;
        }
        if self.min_service_minutes.is_nan() || self.min_service_minutes <= 0.0 {
            return Err(SimError::Config(
                "min_service_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
