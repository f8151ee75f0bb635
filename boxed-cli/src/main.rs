//! BoxED Inspector
//!
//! Loads a BoxED dataset tree and logs a short summary: participant, scene
//! and object counts, packing sequences, and scene durations.

use boxed_data::{Dataset, LoadOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// boxed - BoxED dataset loader and inspector
#[derive(Parser, Debug)]
#[command(name = "boxed")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root folder of the dataset
    root: PathBuf,

    /// Load per-scene camera trajectories (large)
    #[arg(long)]
    cam: bool,

    /// Fail when an object has no matching trajectory file
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = LoadOptions {
        load_camera_trajectories: args.cam,
        strict_trajectories: args.strict,
    };

    let dataset = match Dataset::load(&args.root, options) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("failed to load dataset: {e}");
            std::process::exit(1);
        }
    };

    let scenes: usize = dataset.participants().iter().map(|p| p.scenes.len()).sum();
    let objects: usize = dataset
        .participants()
        .iter()
        .flat_map(|p| &p.scenes)
        .map(|s| s.objects.len())
        .sum();
    info!(
        "{} participants, {} scenes, {} objects",
        dataset.participants().len(),
        scenes,
        objects
    );

    match dataset.scene_durations() {
        Ok(durations) if !durations.is_empty() => {
            let total: i64 = durations.iter().sum();
            info!(
                "mean scene duration: {} ms over {} scenes",
                total / durations.len() as i64,
                durations.len()
            );
        }
        Ok(_) => info!("no scenes found"),
        Err(e) => warn!("scene durations unavailable: {e}"),
    }

    let unique = dataset.sequences(true, false);
    info!("{} unique-objects packing sequences", unique.len());
}
