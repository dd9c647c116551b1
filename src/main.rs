//! Replays recorded face-tracker output through the expression pipeline.

use anyhow::{Context, Result};
use brow_expression::{
    clock::SystemClock,
    config::{Config, EXAMPLE_CONFIG},
    replay::replay,
};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON Lines file of detection records (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Load configuration if provided
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Failed to load config file: {}. Using defaults.", e);
                    Config::default()
                }
            }
        }
        None => Config::default(),
    };

    let mut pipeline = config.build_pipeline().context("Invalid configuration")?;
    let clock = SystemClock::new();
    let stdout = io::stdout().lock();

    let summary = match &args.input {
        Some(path) => {
            info!("Replaying detections from: {}", path.display());
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            replay(&mut pipeline, BufReader::new(file), stdout, &clock)?
        }
        None => {
            info!("Replaying detections from stdin");
            replay(&mut pipeline, io::stdin().lock(), stdout, &clock)?
        }
    };

    if summary.updated == 0 {
        log::warn!("No tick produced a face update");
    }

    Ok(())
}
