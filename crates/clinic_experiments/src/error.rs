use clinic_core::error::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("replication {replication} failed: {source}")]
    Replication {
        replication: usize,
        #[source]
        source: SimError,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("experiment configuration error: {0}")]
    Config(String),
}

pub type ExperimentResult<T> = Result<T, ExperimentError>;
