//! Command-line interface for the Warden simulator
//!
//! Runs a headless fight against a scripted duelist and prints a summary.

use clap::Parser;
use std::path::PathBuf;

use crate::game::Behavior;

/// Headless Warden encounter simulator
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Simulate the Warden boss encounter headlessly")]
#[command(version)]
pub struct Args {
    /// Seed for the encounter's random choices
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// RON tuning file (defaults to the user config location)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Stop after this many ticks (60 per second)
    #[arg(long, default_value = "54000")]
    pub max_ticks: u64,

    /// Duelist damage per second against the boss
    #[arg(long, default_value = "600")]
    pub dps: u64,

    /// How the duelist moves
    #[arg(long, value_enum, default_value_t = Behavior::Orbit)]
    pub behavior: Behavior,

    /// World difficulty: normal, expert or master
    #[arg(long, default_value = "normal")]
    pub difficulty: String,

    /// Duelist health
    #[arg(long, default_value = "3000")]
    pub health: u32,

    /// Write the default tuning to this path and exit
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub export_config: Option<PathBuf>,

    /// Write a snapshot of the encounter here when the run stops
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub snapshot: Option<PathBuf>,

    /// Resume the encounter from a snapshot
    #[arg(long, value_name = "SNAPSHOT_FILE")]
    pub resume: Option<PathBuf>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// A resumed fight carries its tuning inside the snapshot
    pub fn reads_config(&self) -> bool {
        self.resume.is_none()
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
