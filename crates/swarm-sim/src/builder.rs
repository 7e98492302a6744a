//! Fluent builder for constructing a [`Generator`].

use swarm_chain::ChainParams;
use swarm_core::{RunConfig, SimRng};
use swarm_spatial::{AreaSampler, SurveyArea};

use crate::budget::{RecordBudget, ZoneIdAllocator};
use crate::{Generator, RunSummary, SimError, SimResult};

/// Fluent builder for [`Generator`].
///
/// All validation happens in [`build`](Self::build), before any record is
/// generated: scalar settings, branch probabilities, and the survey polygon
/// (degenerate or self-intersecting polygons are configuration errors, not
/// hangs).  A polygon that fills so little of its bounding box that a zone
/// could plausibly run out of `max_sample_attempts` is rejected here too.
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                     |
/// |---------------|---------------------------------------------|
/// | `.area(a)`    | `SurveyArea::new(config.polygon)`           |
/// | `.seed(s)`    | `config.seed`                               |
///
/// # Example
///
/// ```rust,ignore
/// let mut generator = GeneratorBuilder::new(RunConfig::default()).seed(7).build()?;
/// let mut file = CsvFile::create(path)?;
/// let summary = generator.run(&mut file, &mut NoopObserver)?;
/// file.commit()?;
/// ```
pub struct GeneratorBuilder {
    config: RunConfig,
    area:   Option<SurveyArea>,
}

impl GeneratorBuilder {
    pub fn new(config: RunConfig) -> Self {
        Self { config, area: None }
    }

    /// Use an already-validated survey area instead of `config.polygon`.
    pub fn area(mut self, area: SurveyArea) -> Self {
        self.area = Some(area);
        self
    }

    /// Override the master seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Validate everything and return a ready-to-run [`Generator`].
    pub fn build(self) -> SimResult<Generator> {
        self.config.validate()?;

        let area = match self.area {
            Some(a) => a,
            None    => SurveyArea::new(self.config.polygon.clone())?,
        };
        let sampler = AreaSampler::new(area).with_max_attempts(self.config.max_sample_attempts);
        check_sampling_odds(&sampler)?;
        let chain = ChainParams::from_config(&self.config)?;

        Ok(Generator {
            rng:     SimRng::new(self.config.seed),
            budget:  RecordBudget::new(self.config.target_records),
            zones:   ZoneIdAllocator::new(),
            summary: RunSummary::default(),
            sampler,
            chain,
            config:  self.config,
        })
    }
}

/// A zone exhausts its attempts with probability `exp(-MIN_SAMPLING_EXPONENT)`
/// or less (about 2e-9).
const MIN_SAMPLING_EXPONENT: f64 = 20.0;

/// Reject areas where `(1 - ratio)^max_attempts > exp(-MIN_SAMPLING_EXPONENT)`.
fn check_sampling_odds(sampler: &AreaSampler) -> SimResult<()> {
    let ratio = sampler.area().acceptance_ratio().min(1.0);
    let attempts = sampler.max_attempts();
    // -ln((1 - r)^n); infinite when the polygon fills its box.
    let exponent = -(attempts as f64) * (-ratio).ln_1p();
    if exponent >= MIN_SAMPLING_EXPONENT {
        return Ok(());
    }
    Err(SimError::Config(format!(
        "survey area fills {ratio:.3e} of its bounding box; {attempts} sampling attempts per zone \
         are not enough (raise max_sample_attempts or widen the polygon)"
    )))
}
