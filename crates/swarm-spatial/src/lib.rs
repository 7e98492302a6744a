//! `swarm-spatial` — the survey polygon and the area sampler.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`area`]    | `SurveyArea` (validated polygon), `BoundingBox`             |
//! | [`sampler`] | `sample_point`, `AreaSampler`                               |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `BoundingBox`.          |

pub mod area;
pub mod error;
pub mod sampler;


pub use area::{BoundingBox, SurveyArea};
pub use error::{SpatialError, SpatialResult};
pub use sampler::{AreaSampler, DEFAULT_MAX_ATTEMPTS, sample_point};
