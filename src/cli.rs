//! Command-line surface: replay navigation scripts and inspect persisted
//! bundles without an embedding application shell.

use crate::api::{NavigateOptions, NavigationApi};
use crate::config::NavframeConfig;
use crate::registry::FrameRegistry;
use crate::store::{BundleStore, MemoryBundleStore, SledBundleStore};
use crate::transition::TransitionSpec;
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "navframe", version, about = "Nested navigation-frame engine tools")]
pub struct Cli {
    /// Path to a config file (defaults to the user-level config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drive a JSON navigation script against a fresh engine and print the
    /// active chain after each step
    Replay {
        /// Script file: a JSON array of steps
        script: PathBuf,
    },
    /// Summarize a persisted suspend/resume bundle
    Inspect {
        /// Bundle database directory (defaults to the configured data dir)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// One step of a replay script, e.g.
/// `{"op":"navigate","page":"players-list"}` or `{"op":"hardware-back"}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Navigate {
        page: String,
        #[serde(default)]
        transition: Option<TransitionSpec>,
        #[serde(default)]
        hosts_nested: bool,
    },
    Back,
    HardwareBack,
    Complete,
    Background,
    Foreground,
}

pub fn run(cli: &Cli, config: &NavframeConfig) -> anyhow::Result<String> {
    match &cli.command {
        Commands::Replay { script } => replay(script, config),
        Commands::Inspect { db } => inspect(db.as_deref(), config),
    }
}

fn replay(script: &Path, config: &NavframeConfig) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("cannot read script {}", script.display()))?;
    let steps: Vec<Step> =
        serde_json::from_str(&raw).with_context(|| format!("invalid script {}", script.display()))?;

    let registry = Arc::new(FrameRegistry::new(config.navigation.suspended_frame_cap));
    let api = NavigationApi::new(registry, Arc::new(MemoryBundleStore::new()));

    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        let outcome = apply_step(&api, step);
        let chain = render_chain(&api);
        let label = match outcome {
            Ok(()) => "ok".to_string(),
            Err(err) => format!("rejected: {err}"),
        };
        writeln!(out, "{index:>3}  {step:<50?}  {label:<30}  [{chain}]")?;
    }
    Ok(out)
}

fn apply_step(api: &NavigationApi, step: &Step) -> Result<(), crate::error::NavigationError> {
    match step {
        Step::Navigate {
            page,
            transition,
            hosts_nested,
        } => {
            let options = NavigateOptions {
                transition: (*transition).unwrap_or_default(),
                hosts_nested: *hosts_nested,
                frame: None,
            };
            api.navigate_to(page, options)
        }
        Step::Back => api.go_back().map(|_| ()),
        Step::HardwareBack => api.on_hardware_back().map(|_| ()),
        Step::Complete => api.complete_transition().map(|_| ()),
        Step::Background => api.on_app_background(),
        Step::Foreground => api.on_app_foreground(),
    }
}

fn render_chain(api: &NavigationApi) -> String {
    api.active_pages()
        .iter()
        .map(|page| page.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

fn inspect(db: Option<&Path>, config: &NavframeConfig) -> anyhow::Result<String> {
    let path = db
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.storage.bundle_db_path());
    let store = SledBundleStore::new(&path)
        .with_context(|| format!("cannot open bundle database {}", path.display()))?;
    let Some(bundle) = store.load().context("cannot load bundle")? else {
        return Ok(format!("no bundle persisted at {}", path.display()));
    };

    let mut out = String::new();
    writeln!(out, "root: {}", bundle.root)?;
    writeln!(out, "frames: {}", bundle.frame_count())?;
    for record in &bundle.frames {
        let pages = record
            .snapshot
            .stack
            .iter()
            .map(|entry| entry.page.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        match &record.parent {
            Some(link) => writeln!(
                out,
                "  {} (nested in {} at {}): [{pages}]",
                record.id, link.frame, link.page
            )?,
            None => writeln!(out, "  {} (root): [{pages}]", record.id)?,
        }
    }
    Ok(out)
}
