//! Discrete-event simulation of patient flow through a five-station clinic.
//!
//! A replication is a `bevy_ecs` [`World`](bevy_ecs::prelude::World) holding
//! the event calendar, station state, random streams, and counters as
//! resources, with patients as entities. [`runner`] pops events in time order
//! and dispatches each to the stage handler registered for its kind.

pub mod arrivals;
pub mod clock;
pub mod distributions;
pub mod ecs;
pub mod error;
pub mod queue;
pub mod runner;
pub mod scenario;
pub mod servers;
pub mod station;
pub mod stats;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
