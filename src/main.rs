use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use framecheck::{
    compare, CommandPublisher, FrameCadence, HarnessConfig, Identity, RegressionRunner,
    ScrollerScene, SnapshotStore,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Visual regression harness for rendered frame sequences", long_about = None)]
struct Cli {
    /// Harness configuration file (RON)
    #[arg(long, default_value = "harness.ron")]
    config: PathBuf,
    #[arg(long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the built-in scroller scene and verify sampled frames
    Run {
        #[arg(long)]
        ticks: Option<u64>,
        #[arg(long)]
        interval: Option<u64>,
        /// Print the run result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two images and print the RMSE distortion
    Diff {
        a: PathBuf,
        b: PathBuf,
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Promote a recorded candidate to be the new baseline
    Accept {
        /// Test-case name identity
        #[arg(long, conflicts_with = "tick")]
        name: Option<String>,
        /// Tick-index identity
        #[arg(long)]
        tick: Option<u64>,
    },
    /// Remove stray candidate files from the snapshot directory
    Clean,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let (cfg, load_err) = HarnessConfig::load_or_default(&cli.config);
    if let Some(e) = load_err {
        warn!("using default config ({}): {e}", cli.config.display());
    }
    for w in cfg.validate() {
        warn!("config: {w}");
    }

    match cli.command {
        Commands::Run {
            ticks,
            interval,
            json,
        } => {
            let store = SnapshotStore::new(cfg.snapshot.dir.clone())
                .with_keep_candidates(cfg.snapshot.keep_candidates);
            let mut runner = RegressionRunner::new(store, cfg.run.tolerance);
            if cfg.publish.enabled && !cfg.publish.command.trim().is_empty() {
                runner =
                    runner.with_publisher(Box::new(CommandPublisher::new(&cfg.publish.command)));
            }

            let mut scene = ScrollerScene::new(800, 600);
            let mut cadence = FrameCadence::new();
            cadence.drive(6, |_, scene: &mut ScrollerScene| scene.queue_jump());
            cadence.observe(interval.unwrap_or(cfg.run.capture_interval));

            let result = runner.run(&mut scene, ticks.unwrap_or(cfg.run.ticks), &mut cadence)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for msg in result.failure_messages() {
                    eprintln!("{msg}");
                }
                println!(
                    "{} sampled frames, {} failed, {} column pairs passed",
                    result.records.len(),
                    result.failures().count(),
                    scene.columns_passed()
                );
            }
            Ok(if result.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Diff { a, b, tolerance } => {
            let comparison = compare(&a, &b);
            let tolerance = tolerance.unwrap_or(cfg.run.tolerance);
            println!(
                "distortion {:.6} ({:.2}%) -> {}",
                comparison.distortion(),
                comparison.distortion() * 100.0,
                if comparison.exceeds(tolerance) {
                    "FAIL"
                } else {
                    "ok"
                }
            );
            Ok(if comparison.exceeds(tolerance) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Accept { name, tick } => {
            let identity = match (name, tick) {
                (Some(name), None) => Identity::from_case_name(&name),
                (None, Some(index)) => Identity::tick(index),
                _ => anyhow::bail!("pass exactly one of --name or --tick"),
            };
            let mut store = SnapshotStore::new(cfg.snapshot.dir.clone());
            let baseline = store
                .promote(&identity)
                .with_context(|| format!("promote '{identity}'"))?;
            println!("accepted {} -> {}", identity, baseline.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clean => {
            let mut store = SnapshotStore::new(cfg.snapshot.dir.clone());
            let removed = store.clean().context("sweep candidates")?;
            println!("removed {removed} stray candidate file(s)");
            Ok(ExitCode::SUCCESS)
        }
    }
}
