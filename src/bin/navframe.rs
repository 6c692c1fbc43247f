//! Navframe CLI Binary
//!
//! Command-line interface for replaying navigation scripts and inspecting
//! persisted suspend/resume state.

use clap::Parser;
use navframe::cli::{run, Cli};
use navframe::config::{ConfigLoader, NavframeConfig};
use navframe::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let mut config = load_config(&cli);
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    info!("navframe CLI starting");

    match run(&cli, &config) {
        Ok(output) => {
            info!("command completed");
            print!("{output}");
        }
        Err(e) => {
            error!("command failed: {e:#}");
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

/// Config-file load failures fall back to defaults so the tools stay
/// usable; the problem is reported once logging is up.
fn load_config(cli: &Cli) -> NavframeConfig {
    match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: {e}, using default configuration");
            NavframeConfig::default()
        }
    }
}
