//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `SwarmError` as one
//! variant where they need to surface configuration problems.

use thiserror::Error;

/// The top-level error type for `swarm-core`.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `swarm-*` crates.
pub type SwarmResult<T> = Result<T, SwarmError>;
