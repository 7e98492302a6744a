//! `swarm-sim` — the batch driver for the drone swarm generator.
//!
//! # Batch loop
//!
//! ```text
//! while budget not spent:
//!   ① Mode     — one Weeds/Irrigation draw for the whole batch.
//!   ② Zones    — allocate zones_per_batch IDs; sample + expand each zone
//!                (parallel with the `parallel` feature).
//!   ③ Emit     — records to the sink one at a time; stop the run the
//!                instant the budget is spent, even mid-chain.
//!   ④ Failure  — with probability `failure`, one drone_disabled record.
//! ```
//!
//! Zone IDs are allocated and the budget is checked only on the driver
//! thread, so the exact-count guarantee holds with or without Rayon.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Expands each batch's zones on Rayon's thread pool.     |
//!
//! The workspace binary turns `parallel` on, so a workspace-wide test run
//! only builds the Rayon path.  Run `cargo test -p swarm-sim` for the
//! sequential path and `cargo test -p swarm-sim --features parallel` for the
//! parallel one; the latter also checks both expansions zone by zone.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use swarm_core::RunConfig;
//! use swarm_sim::{GeneratorBuilder, NoopObserver, VecSink};
//!
//! let config = RunConfig { target_records: 1_000, ..RunConfig::default() };
//! let mut generator = GeneratorBuilder::new(config).build()?;
//! let mut sink = VecSink::new();
//! generator.run(&mut sink, &mut NoopObserver)?;
//! assert_eq!(sink.records.len(), 1_000);
//! ```

pub mod budget;
pub mod builder;
pub mod error;
pub mod generator;
pub mod observer;
pub mod sink;
pub mod summary;


pub use budget::{RecordBudget, ZoneBlock, ZoneIdAllocator};
pub use builder::GeneratorBuilder;
pub use error::{SimError, SimResult};
pub use generator::Generator;
pub use observer::{NoopObserver, RunObserver};
pub use sink::{RecordSink, VecSink};
pub use summary::{BatchProgress, RunSummary};
