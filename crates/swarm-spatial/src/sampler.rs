//! Uniform point sampling inside a [`SurveyArea`].
//!
//! Candidates are drawn uniformly in the bounding box and kept once
//! [`SurveyArea::contains`] accepts them.  The accepted points are uniform
//! over the polygon.  Expected draws per point are `1 / acceptance_ratio`;
//! `max_attempts` turns a pathological polygon into an error instead of a
//! hang.

use rand::Rng;

use swarm_core::Point;

use crate::{SpatialError, SpatialResult, SurveyArea};

/// Default rejection-sampling guard.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100_000;

/// Draw one point strictly inside `area`.
///
/// Pure apart from `rng`: safe to call concurrently from independent
/// workers, each with its own RNG.
pub fn sample_point<R: Rng + ?Sized>(
    area:         &SurveyArea,
    rng:          &mut R,
    max_attempts: u32,
) -> SpatialResult<Point> {
    let bbox = area.bbox();
    for _ in 0..max_attempts {
        let candidate = Point::new(
            rng.gen_range(bbox.min.x..bbox.max.x),
            rng.gen_range(bbox.min.y..bbox.max.y),
        );
        if area.contains(candidate) {
            return Ok(candidate);
        }
    }
    Err(SpatialError::SamplingExhausted { attempts: max_attempts })
}

/// A survey area bundled with its sampling guard.
///
/// Cheap to share by reference across Rayon workers (`SurveyArea` is
/// read-only after construction).
#[derive(Clone, Debug)]
pub struct AreaSampler {
    area:         SurveyArea,
    max_attempts: u32,
}

impl AreaSampler {
    pub fn new(area: SurveyArea) -> Self {
        Self { area, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    /// Override the rejection guard.  Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[inline]
    pub fn area(&self) -> &SurveyArea {
        &self.area
    }

    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpatialResult<Point> {
        sample_point(&self.area, rng, self.max_attempts)
    }
}
