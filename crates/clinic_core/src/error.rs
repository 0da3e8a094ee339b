//! Simulation error type.
//!
//! Configuration problems surface as [`SimError::Config`] before a replication
//! starts. Everything else indicates that the patient state machine has
//! desynchronized; handlers record it in [`SimulationFault`] and the runner
//! stops the event loop at the next step.

use bevy_ecs::prelude::Resource;
use thiserror::Error;

use crate::clock::EventKind;
use crate::station::Station;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("released an idle server at {station}")]
    ReleaseIdleServer { station: Station },

    #[error("{kind:?} event dispatched without a live patient")]
    MissingPatient { kind: EventKind },

    #[error("event loop exceeded {steps} steps without draining the calendar")]
    StepLimitExceeded { steps: usize },

    #[error("missing world resource: {0}")]
    MissingResource(&'static str),

    #[error("simulation configuration error: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// First invariant violation raised during the current replication.
#[derive(Debug, Default, Resource)]
pub struct SimulationFault(Option<SimError>);

impl SimulationFault {
    /// Keep the first fault; later ones are consequences of it.
    pub fn record(&mut self, error: SimError) {
        if self.0.is_none() {
            self.0 = Some(error);
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.0.is_some()
    }

    pub fn error(&self) -> Option<&SimError> {
        self.0.as_ref()
    }

    pub fn take(&mut self) -> Option<SimError> {
        self.0.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_keeps_first_error() {
        let mut fault = SimulationFault::default();
        assert!(!fault.is_faulted());
        fault.record(SimError::ReleaseIdleServer {
            station: Station::Trauma,
        });
        fault.record(SimError::MissingPatient {
            kind: EventKind::EndTreatment,
        });
        assert_eq!(
            fault.take(),
            Some(SimError::ReleaseIdleServer {
                station: Station::Trauma
            })
        );
        assert!(!fault.is_faulted());
    }
}
