//! Headless fight runner
//!
//! Wires the Warden, a scripted duelist, the arena and recording
//! collaborators together and runs the fight tick by tick.

use serde::Serialize;

use crate::audio::CueRecorder;
use crate::data::EncounterConfig;
use crate::ecs::Vec2;
use crate::encounter::{Phase, TickOutcome};
use crate::entities::{spawn_warden, BossKind, SpawnedBoss};
use crate::host::{Avatar, BossHandle, BossTheme, Collaborators, NarrativeHook};
use crate::progression::Difficulty;
use crate::save::EncounterSnapshot;

use super::arena::Arena;
use super::duelist::{Behavior, Duelist, DUELIST_RADIUS};
use super::time::{TickClock, TICK_RATE};

/// Where the Warden appears relative to the duelist
const BOSS_SPAWN: Vec2 = Vec2::new(0.0, -900.0);

/// Knobs for one headless fight
#[derive(Debug, Clone)]
pub struct FightSettings {
    pub seed: u64,
    pub max_ticks: u64,
    /// Duelist damage per simulated second
    pub dps: u64,
    pub behavior: Behavior,
    pub difficulty: Difficulty,
    pub duelist_health: u32,
}

impl Default for FightSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: 60 * 60 * 15,
            dps: 600,
            behavior: Behavior::Orbit,
            difficulty: Difficulty::Normal,
            duelist_health: 3000,
        }
    }
}

/// How a fight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FightOutcome {
    /// Both lives spent
    BossDefeated,
    /// The duelist fell and the Warden withdrew
    BossWithdrew,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseChange {
    pub tick: u64,
    pub phase: Phase,
}

/// Summary of one fight
#[derive(Debug, Clone, Serialize)]
pub struct FightReport {
    pub ticks: u64,
    pub seconds: f32,
    pub outcome: FightOutcome,
    pub awakened: bool,
    pub projectiles_spawned: u64,
    pub effects_spawned: u64,
    pub cues_played: u64,
    pub hits_taken: u32,
    pub damage_taken: u64,
    pub duelist_health: u32,
    pub boss_health: u64,
    pub phase_trace: Vec<PhaseChange>,
    pub narration: Vec<String>,
}

/// Narrator that keeps the lines it would have shown
#[derive(Debug)]
pub struct ArenaNarrator {
    kind: BossKind,
    awakened: bool,
    lines: Vec<String>,
}

impl ArenaNarrator {
    pub fn new(kind: BossKind) -> Self {
        Self { kind, awakened: false, lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn say(&mut self, line: &str) {
        log::info!("{}", line);
        self.lines.push(line.to_string());
    }
}

impl NarrativeHook for ArenaNarrator {
    fn register_boss(&mut self, handle: BossHandle, theme: BossTheme) {
        self.awakened = theme == self.kind.theme(true);
        log::debug!("{} bar shown for {:?} ({:?})", self.kind.name(), handle, theme);
        let line = self.kind.tier_description(0, self.awakened);
        self.say(line);
    }

    fn announce_phase(&mut self, tier: u8) {
        let line = self.kind.tier_description(tier, self.awakened);
        self.say(line);
    }

    fn announce_awakening(&mut self) {
        self.say("The Warden's light gutters... then blazes anew!");
    }

    fn announce_defeat(&mut self) {
        self.say("The Warden scatters into dying starlight.");
    }
}

/// One fight in progress
pub struct Fight {
    boss: SpawnedBoss,
    duelists: Vec<Duelist>,
    arena: Arena,
    audio: CueRecorder,
    narrator: ArenaNarrator,
    clock: TickClock,
    trace: Vec<PhaseChange>,
    hits_taken: u32,
    damage_taken: u64,
    finished: Option<TickOutcome>,
}

impl Fight {
    pub fn new(config: EncounterConfig, settings: &FightSettings) -> Self {
        let boss = spawn_warden(config, settings.difficulty, BOSS_SPAWN, BossHandle(1), settings.seed);
        Self::with_boss(boss, settings)
    }

    /// Continue a fight from a snapshot. The duelist starts fresh.
    pub fn resume(snapshot: EncounterSnapshot, settings: &FightSettings) -> Self {
        log::info!("Resuming fight from tick {}", snapshot.tick);
        let (controller, body) = snapshot.restore();
        let boss = SpawnedBoss { kind: BossKind::Warden, body, controller };
        Self::with_boss(boss, settings)
    }

    fn with_boss(boss: SpawnedBoss, settings: &FightSettings) -> Self {
        let per_tick = (settings.dps / TICK_RATE as u64).max(1);
        let phase = boss.controller.phase();
        Self {
            narrator: ArenaNarrator::new(boss.kind),
            boss,
            duelists: vec![Duelist::new(Vec2::ZERO, settings.behavior, settings.duelist_health, per_tick)],
            arena: Arena::new(),
            audio: CueRecorder::default(),
            clock: TickClock::default(),
            trace: vec![PhaseChange { tick: 0, phase }],
            hits_taken: 0,
            damage_taken: 0,
            finished: None,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn phase(&self) -> Phase {
        self.boss.controller.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Advance the whole fight by one tick
    pub fn step(&mut self) -> TickOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }

        let boss_position = self.boss.body.position;
        for duelist in &mut self.duelists {
            duelist.update(boss_position);
            let damage = duelist.attack(boss_position);
            self.boss.body.take_damage(damage);
        }

        let outcome = {
            let mut fx = Collaborators::new(&mut self.arena, &mut self.audio, &mut self.narrator);
            self.boss.controller.tick(&mut self.boss.body, &mut self.duelists, &mut fx)
        };

        self.arena.step(self.boss.body.position);
        for duelist in self.duelists.iter_mut().filter(|d| d.is_active()) {
            for damage in self.arena.hits_on(duelist.position(), DUELIST_RADIUS) {
                self.hits_taken += 1;
                self.damage_taken += duelist.apply_damage(damage) as u64;
            }
        }

        self.clock.advance();
        let phase = self.boss.controller.phase();
        if self.trace.last().map(|c| c.phase) != Some(phase) {
            self.trace.push(PhaseChange { tick: self.clock.ticks(), phase });
        }

        if outcome != TickOutcome::Continue {
            log::info!("Fight over after {} ticks: {:?}", self.clock.ticks(), outcome);
            self.finished = Some(outcome);
        }
        outcome
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot::capture(self.clock.ticks(), &self.boss.controller, &self.boss.body)
    }

    pub fn report(&self) -> FightReport {
        let outcome = match self.finished {
            Some(TickOutcome::Defeated) => FightOutcome::BossDefeated,
            Some(TickOutcome::Despawned) => FightOutcome::BossWithdrew,
            _ => FightOutcome::TimedOut,
        };
        FightReport {
            ticks: self.clock.ticks(),
            seconds: self.clock.elapsed(),
            outcome,
            awakened: self.boss.controller.state().has_awakened,
            projectiles_spawned: self.arena.projectiles_spawned(),
            effects_spawned: self.arena.effects_spawned(),
            cues_played: self.audio.total(),
            hits_taken: self.hits_taken,
            damage_taken: self.damage_taken,
            duelist_health: self.duelists.iter().map(|d| d.health()).sum(),
            boss_health: self.boss.body.health_current,
            phase_trace: self.trace.clone(),
            narration: self.narrator.lines().to_vec(),
        }
    }
}

/// Run a fight until it ends or hits the tick limit
pub fn run_fight(config: EncounterConfig, settings: &FightSettings) -> FightReport {
    let mut fight = Fight::new(config, settings);
    run_to_limit(&mut fight, settings.max_ticks);
    fight.report()
}

/// Step `fight` until it finishes or `max_ticks` total have elapsed
pub fn run_to_limit(fight: &mut Fight, max_ticks: u64) {
    while !fight.is_finished() && fight.ticks() < max_ticks {
        fight.step();
    }
}
