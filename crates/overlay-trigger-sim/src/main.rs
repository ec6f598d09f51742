//! overlay-sim
//!
//! Replays a script of interaction commands against a visibility controller
//! on a simulated clock and prints the overlay state after each command.
//!
//! Usage:
//!   overlay-sim --script hover.txt                  # autonomous overlay
//!   overlay-sim --bound --initial-visible < s.txt   # bound to an external flag
//!   OVERLAY_SIM_CONFIG=overlay.toml overlay-sim --script s.txt

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use overlay_trigger::TriggerSet;
use overlay_trigger_sim::{load_config, parse_script, read_script, Simulation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "overlay-sim", version, about = "Scripted overlay visibility simulator")]
struct Cli {
    /// Overlay config (TOML); falls back to OVERLAY_SIM_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Script file; reads stdin when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Bind visibility to an external flag
    #[arg(long)]
    bound: bool,

    /// Initial value of the external flag
    #[arg(long, requires = "bound")]
    initial_visible: bool,

    /// Override the configured triggers, e.g. "hover,focus"
    #[arg(short, long)]
    trigger: Option<TriggerSet>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(trigger) = cli.trigger {
        config.trigger = trigger;
    }

    let source = read_script(cli.script.as_deref()).context("Failed to read script")?;
    let steps = parse_script(&source)?;

    let mut sim = if cli.bound {
        Simulation::bound(config, cli.initial_visible)
    } else {
        Simulation::new(config)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    sim.run(&steps, &mut out)?;
    out.flush()?;

    let stats = sim.engine_stats();
    tracing::info!(
        "{} steps, {} handles created, {} live",
        steps.len(),
        stats.created,
        stats.live()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
