//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `swarm-spatial`.
///
/// Everything except `SamplingExhausted` is raised while validating the
/// survey polygon, before any generation starts.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("survey polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),

    #[error("survey polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("survey polygon is degenerate (area {area})")]
    DegenerateArea { area: f64 },

    #[error("survey polygon edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },

    #[error("no point accepted inside the survey polygon after {attempts} attempts")]
    SamplingExhausted { attempts: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
