//! `swarm-gen` — drone swarm telemetry generator.
//!
//! ```text
//! swarm-gen generate [--config run.json] [--target N] [--output PATH] ...
//! swarm-gen verify data/drone_events_million.csv [--config run.json] [--expected N]
//! ```
//!
//! Logging goes through `tracing`; set `RUST_LOG` to change the filter
//! (default `swarm_gen=info,swarm_sim=info`).
//!
//! Run with:
//!   cargo run -p swarm-gen --release -- generate

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli;
mod progress;


use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swarm_output::{AuditRules, CsvFile, audit_path};
use swarm_sim::GeneratorBuilder;
use swarm_spatial::SurveyArea;

use cli::{Cli, Command, GenerateArgs, VerifyArgs, load_config};
use progress::{ProgressLogger, mem_mb};

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swarm_gen=info,swarm_sim=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Generate(args) => generate(&args),
        Command::Verify(args) => verify(&args),
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

fn generate(args: &GenerateArgs) -> Result<ExitCode> {
    let config = args.resolve()?;

    if let Some(threads) = config.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let mut generator = GeneratorBuilder::new(config.clone()).build()?;
    let area = generator.sampler().area();
    info!(
        target_records = config.target_records,
        drones = config.drone_count,
        zones_per_batch = config.zones_per_batch,
        seed = config.seed,
        threads = rayon::current_num_threads(),
        "survey area {:.1} m² ({} vertices), acceptance ratio {:.3}",
        area.area(),
        area.vertices().len(),
        area.acceptance_ratio(),
    );
    if area.acceptance_ratio() < 0.01 {
        warn!("survey area fills under 1% of its bounding box; sampling will be slow");
    }

    if let Some(parent) = config.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut file = CsvFile::create(&config.output_path)
        .with_context(|| format!("staging {}", config.output_path.display()))?;
    info!("writing {}  mem={:.0} MB", config.output_path.display(), mem_mb());

    // On error `file` is dropped uncommitted and the staged rows are deleted.
    let mut progress = ProgressLogger::new(config.progress_interval_batches);
    let summary = generator.run(&mut file, &mut progress)?;
    let rows = file
        .commit()
        .with_context(|| format!("publishing {}", config.output_path.display()))?;

    info!("{summary}");
    for event in swarm_core::EventType::ALL {
        info!(
            "  {:<16} {:>10}  ({:5.1} %)",
            event.as_str(),
            summary.count(event),
            summary.count(event) as f64 / summary.records.max(1) as f64 * 100.0,
        );
    }
    info!("done in {:.3}s: {rows} rows → {}", progress.elapsed(), config.output_path.display());
    Ok(ExitCode::SUCCESS)
}

// ── verify ────────────────────────────────────────────────────────────────────

fn verify(args: &VerifyArgs) -> Result<ExitCode> {
    let area = match &args.config {
        Some(path) => Some(SurveyArea::new(load_config(path)?.polygon)?),
        None => None,
    };
    let rules = AuditRules {
        area,
        expected_records: args.expected,
        max_violations: args.max_violations,
    };

    let report = audit_path(&args.file, &rules)
        .with_context(|| format!("auditing {}", args.file.display()))?;

    println!("{report}");
    for v in &report.violations {
        println!("  {v}");
    }
    let unlisted = report.violation_count - report.violations.len() as u64;
    if unlisted > 0 {
        println!("  … and {unlisted} more");
    }

    if report.is_clean() {
        info!("{} passed audit", args.file.display());
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{}: {} violations", args.file.display(), report.violation_count);
        Ok(ExitCode::FAILURE)
    }
}
