//! `swarm-chain` — per-zone event chains and drone-failure records.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`chain`]   | `Zone`, `ZoneChain`, `expand_zone`                              |
//! | [`failure`] | `disabled_record`: the optional end-of-batch failure event      |
//! | [`params`]  | `ChainParams` and the uniform ranges each stage draws from      |
//! | [`error`]   | `ChainError`, `ChainResult<T>`                                  |
//!
//! # Design notes
//!
//! Everything here is a pure function of its inputs and the RNG it is
//! handed.  The batch driver gives each zone its own `ZoneRng`, so chains
//! can be expanded on any thread in any order and still come out the same.
//! Deciding *whether* a record is emitted (the record budget) is the
//! driver's job, not this crate's.

pub mod chain;
pub mod error;
pub mod failure;
pub mod params;

#[cfg(test)]
mod tests;

pub use chain::{Zone, ZoneChain, expand_zone};
pub use error::{ChainError, ChainResult};
pub use failure::disabled_record;
pub use params::ChainParams;
