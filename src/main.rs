//! slotforge - drive an inventory container from a layout file
//!
//! Loads a TOML session (inventories, contents and slot layout), applies an
//! optional JSON command script and prints the final slot contents as JSON.

mod command_script;
mod config;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use command_script::CommandScript;
use config::SessionConfig;
use session::Session;
use slotforge_core::ActorId;
use slotforge_testkit::{canonical_json, ContainerSnapshot, JsonlSink};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run scripted clicks and quick transfers against a container layout",
    long_about = None
)]
struct Args {
    /// TOML file describing inventories and slots
    #[arg(long)]
    layout: PathBuf,
    /// JSON command script to apply
    #[arg(long)]
    script: Option<PathBuf>,
    /// Write one JSON line per script step here
    #[arg(long)]
    events: Option<PathBuf>,
    /// Actor id used for every interaction
    #[arg(long, default_value_t = 1)]
    actor: u64,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting slotforge v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let snapshot = run(&args)?;
    print!("{}", canonical_json(&snapshot)?);
    Ok(())
}

fn run(args: &Args) -> Result<ContainerSnapshot> {
    let config = SessionConfig::load_from_path(&args.layout)?;
    let container = config.build_container()?;
    let mut session = Session::new(container, ActorId(args.actor));

    if let Some(path) = &args.script {
        let script = CommandScript::from_path(path)
            .with_context(|| format!("failed to load script {}", path.display()))?;
        let mut sink = args
            .events
            .as_ref()
            .map(JsonlSink::create)
            .transpose()
            .context("failed to create event log")?;
        let reports = session.run(&script, sink.as_mut())?;
        info!(steps = reports.len(), "script finished");
    }

    Ok(ContainerSnapshot::capture(session.container()))
}
