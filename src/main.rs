//! Warden - Entry Point
//!
//! Loads tuning, runs one headless fight and reports how it went.

use anyhow::{bail, Context, Result};

use warden::cli::{parse_args, Args};
use warden::data::{default_config_path, EncounterConfig};
use warden::game::{run_to_limit, Fight, FightReport, FightSettings};
use warden::progression::Difficulty;
use warden::save::EncounterSnapshot;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Warden simulator v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args();

    if let Some(path) = &args.export_config {
        EncounterConfig::default()
            .export(path)
            .with_context(|| format!("exporting default config to {}", path.display()))?;
        println!("Wrote default tuning to {}", path.display());
        return Ok(());
    }

    let Some(difficulty) = Difficulty::from_name(&args.difficulty) else {
        bail!("unknown difficulty '{}' (expected normal, expert or master)", args.difficulty);
    };

    let settings = FightSettings {
        seed: args.seed,
        max_ticks: args.max_ticks,
        dps: args.dps,
        behavior: args.behavior,
        difficulty,
        duelist_health: args.health,
    };

    if !args.reads_config() {
        if let Some(path) = &args.config {
            log::warn!("Ignoring {}: a resumed fight keeps the snapshot's tuning", path.display());
        }
    }

    let mut fight = match &args.resume {
        Some(path) => {
            let snapshot = EncounterSnapshot::load(path)
                .with_context(|| format!("resuming from {}", path.display()))?;
            Fight::resume(snapshot, &settings)
        }
        None => Fight::new(load_config(&args)?, &settings),
    };

    run_to_limit(&mut fight, settings.max_ticks);
    let report = fight.report();

    if let Some(path) = &args.snapshot {
        fight
            .snapshot()
            .save(path)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).context("serializing report")?);
    } else {
        print_summary(&report);
    }

    log::info!("Warden simulator finished");
    Ok(())
}

/// Explicit `--config` must load; the default location may be absent
fn load_config(args: &Args) -> Result<EncounterConfig> {
    let config = match &args.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EncounterConfig::load_or_default(&default_config_path()),
    };
    config.validate().context("invalid encounter config")?;
    Ok(config)
}

fn print_summary(report: &FightReport) {
    println!("Outcome:      {:?}", report.outcome);
    println!("Duration:     {} ticks ({:.1}s)", report.ticks, report.seconds);
    println!("Awakened:     {}", report.awakened);
    println!("Boss health:  {}", report.boss_health);
    println!("Duelist:      {} health, {} hits taken ({} damage)",
        report.duelist_health, report.hits_taken, report.damage_taken);
    println!("Spawned:      {} projectiles, {} effects, {} cues",
        report.projectiles_spawned, report.effects_spawned, report.cues_played);
    println!();
    println!("Phases:");
    for change in &report.phase_trace {
        println!("  {:>6}  {:?}", change.tick, change.phase);
    }
    if !report.narration.is_empty() {
        println!();
        for line in &report.narration {
            println!("  \"{}\"", line);
        }
    }
}
