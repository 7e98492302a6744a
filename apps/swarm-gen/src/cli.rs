//! Command-line surface and the config layering it drives:
//! defaults, then an optional JSON file, then individual flags.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use swarm_core::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "swarm-gen")]
#[command(about = "Synthetic telemetry generator for a simulated agricultural drone swarm")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a telemetry CSV with an exact record count
    Generate(GenerateArgs),

    /// Stream a telemetry CSV through the auditor and print its report
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// JSON file with `RunConfig` fields; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exact number of records to emit
    #[arg(short, long)]
    pub target: Option<u64>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// RNG seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Fleet size
    #[arg(long)]
    pub drones: Option<u32>,

    /// Zones sampled per batch
    #[arg(long)]
    pub zones_per_batch: Option<u32>,

    /// Worker threads for zone expansion (default: all cores)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl GenerateArgs {
    /// Layer the config file and flags over `RunConfig::default()`.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RunConfig::default(),
        };
        if let Some(target) = self.target {
            config.target_records = target;
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(drones) = self.drones {
            config.drone_count = drones;
        }
        if let Some(zones) = self.zones_per_batch {
            config.zones_per_batch = zones;
        }
        if self.threads.is_some() {
            config.num_threads = self.threads;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Telemetry CSV to check
    pub file: PathBuf,

    /// Config the file was generated with; enables the polygon containment check
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail unless the file holds exactly this many records
    #[arg(short, long)]
    pub expected: Option<u64>,

    /// Violations listed in the report (all are counted)
    #[arg(long, default_value = "20")]
    pub max_violations: usize,
}

/// Read a `RunConfig` from JSON.  Fields absent from the file keep their
/// default values.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}
