use swarm_chain::ChainError;
use swarm_core::SwarmError;
use swarm_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("generator configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] SwarmError),

    #[error("survey area: {0}")]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The record sink failed.  The run is aborted and the partial output
    /// must be treated as invalid.
    #[error("record sink failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub type SimResult<T> = Result<T, SimError>;
