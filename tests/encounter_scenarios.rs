//! Encounter scenario tests
//!
//! Drives the Warden through whole fights and checks:
//! - Phase bookkeeping stays consistent on every tick
//! - Tier and aggression never decrease within a life
//! - The first death awakens the Warden, the second one ends the fight
//! - Tier announcements fire once per threshold crossing
//! - Range policy: enrage when kept at distance, rescue teleport when far
//! - Snapshots and config files round-trip through disk
//! - Damage queued from another thread lands on the next tick

use std::thread;

use warden::audio::{CueId, CueRecorder};
use warden::combat::StatusId;
use warden::data::EncounterConfig;
use warden::ecs::Vec2;
use warden::encounter::{BossBody, EncounterController, Phase, SharedEncounter, TickOutcome};
use warden::game::{run_fight, run_to_limit, Behavior, Fight, FightOutcome, FightSettings};
use warden::host::{Avatar, BossHandle, BossTheme, Collaborators, NarrativeHook, NullSpawner};
use warden::save::EncounterSnapshot;

// ============================================================================
// Helpers
// ============================================================================

/// Target the test moves by hand
struct Puppet {
    position: Vec2,
    active: bool,
}

impl Puppet {
    fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), active: true }
    }
}

impl Avatar for Puppet {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn apply_impulse(&mut self, _: Vec2) {}
    fn apply_status(&mut self, _: StatusId, _: u32) {}
    fn health(&self) -> u32 {
        1000
    }
    fn apply_damage(&mut self, _: u32) -> u32 {
        0
    }
}

#[derive(Default)]
struct Transcript {
    themes: Vec<BossTheme>,
    tiers: Vec<u8>,
    awakenings: u32,
    defeats: u32,
}

impl NarrativeHook for Transcript {
    fn register_boss(&mut self, _: BossHandle, theme: BossTheme) {
        self.themes.push(theme);
    }
    fn announce_phase(&mut self, tier: u8) {
        self.tiers.push(tier);
    }
    fn announce_awakening(&mut self) {
        self.awakenings += 1;
    }
    fn announce_defeat(&mut self) {
        self.defeats += 1;
    }
}

struct Rig {
    controller: EncounterController,
    body: BossBody,
    targets: Vec<Puppet>,
    spawner: NullSpawner,
    audio: CueRecorder,
    transcript: Transcript,
}

impl Rig {
    fn new(seed: u64) -> Self {
        let config = EncounterConfig {
            spawn_duration: 10,
            ..Default::default()
        };
        Self {
            controller: EncounterController::new(config, BossHandle(7), seed),
            body: BossBody::new(Vec2::new(0.0, -300.0), 10_000),
            targets: vec![Puppet::at(0.0, 0.0)],
            spawner: NullSpawner::default(),
            audio: CueRecorder::new(1 << 16),
            transcript: Transcript::default(),
        }
    }

    fn step(&mut self) -> TickOutcome {
        let mut fx = Collaborators::new(&mut self.spawner, &mut self.audio, &mut self.transcript);
        self.controller.tick(&mut self.body, &mut self.targets, &mut fx)
    }

    fn run_until(&mut self, max: u32, done: impl Fn(&Self) -> bool) {
        for _ in 0..max {
            self.step();
            if done(self) {
                return;
            }
        }
        panic!("condition not reached in {} ticks", max);
    }

    fn set_health(&mut self, fraction: f64) {
        self.body.health_current = (self.body.health_max as f64 * fraction).round() as u64;
    }
}

fn brutal_settings(seed: u64) -> FightSettings {
    FightSettings {
        seed,
        max_ticks: 20_000,
        dps: 60_000,
        behavior: Behavior::Idle,
        duelist_health: 1_000_000_000,
        ..Default::default()
    }
}

// ============================================================================
// Whole fights
// ============================================================================

#[test]
fn test_overwhelming_duelist_defeats_both_forms() {
    let report = run_fight(EncounterConfig::default(), &brutal_settings(3));

    assert_eq!(report.outcome, FightOutcome::BossDefeated);
    assert!(report.awakened);
    assert_eq!(report.boss_health, 0);

    let phases: Vec<Phase> = report.phase_trace.iter().map(|c| c.phase).collect();
    let awakening = phases.iter().position(|&p| p == Phase::Awakening).expect("never awakened");
    let dying = phases.iter().position(|&p| p == Phase::Dying).expect("never died");
    assert!(awakening < dying);
    assert_eq!(phases.iter().filter(|&&p| p == Phase::Awakening).count(), 1);
    assert_eq!(phases.last(), Some(&Phase::Dying));
}

#[test]
fn test_fight_state_invariants_hold_every_tick() {
    let mut fight = Fight::new(EncounterConfig::default(), &brutal_settings(11));

    let mut last_tier = 0;
    let mut last_aggression = 0.0;
    let mut awakened = false;

    while !fight.is_finished() && fight.ticks() < 20_000 {
        fight.step();
        let snapshot = fight.snapshot();
        let state = snapshot.controller.state();

        if state.phase != Phase::Attack {
            assert_eq!(state.current_attack, None, "attack outside Attack at tick {}", fight.ticks());
        }
        if !state.phase.uses_sub_phase() {
            assert_eq!(state.sub_phase, 0);
        }

        if state.has_awakened && !awakened {
            awakened = true;
            assert!(state.aggression >= 0.5);
            last_tier = state.difficulty_tier;
            last_aggression = state.aggression;
            continue;
        }
        assert!(state.difficulty_tier >= last_tier);
        assert!(state.aggression >= last_aggression);
        last_tier = state.difficulty_tier;
        last_aggression = state.aggression;
    }

    assert!(awakened);
}

#[test]
fn test_fleeing_duelist_outlasts_the_clock() {
    let settings = FightSettings {
        seed: 5,
        max_ticks: 3000,
        behavior: Behavior::Flee,
        duelist_health: 1_000_000,
        ..Default::default()
    };
    let report = run_fight(EncounterConfig::default(), &settings);
    assert_eq!(report.outcome, FightOutcome::TimedOut);
    assert!(!report.awakened);
    assert!(report.phase_trace.iter().any(|c| c.phase == Phase::Attack));
}

// ============================================================================
// Controller scenarios
// ============================================================================

#[test]
fn test_tier_announced_once_per_crossing() {
    let mut rig = Rig::new(1);
    rig.run_until(100, |r| r.controller.phase() == Phase::Idle);

    rig.set_health(0.71);
    for _ in 0..5 {
        rig.step();
    }
    assert!(rig.transcript.tiers.is_empty());

    rig.set_health(0.69);
    for _ in 0..30 {
        rig.step();
    }
    assert_eq!(rig.transcript.tiers, vec![1]);
    assert_eq!(rig.controller.state().difficulty_tier, 1);

    // Healing does not take the tier back
    rig.set_health(0.95);
    for _ in 0..30 {
        rig.step();
    }
    assert_eq!(rig.controller.state().difficulty_tier, 1);
    assert_eq!(rig.transcript.tiers, vec![1]);
}

#[test]
fn test_two_stage_death() {
    let mut rig = Rig::new(2);
    rig.run_until(100, |r| r.controller.phase() == Phase::Idle);

    rig.body.health_current = 0;
    assert_eq!(rig.step(), TickOutcome::Continue);
    assert_eq!(rig.controller.phase(), Phase::Awakening);
    assert!(rig.body.health_current >= 1);
    assert!(rig.body.invulnerable);

    rig.run_until(2000, |r| r.controller.phase() != Phase::Awakening);
    assert!(rig.controller.state().has_awakened);
    assert_eq!(rig.body.health_current, rig.body.health_max);
    assert!(!rig.body.invulnerable);
    assert_eq!(rig.controller.state().difficulty_tier, 0);
    assert!(rig.controller.state().aggression >= 0.5);
    assert_eq!(rig.transcript.awakenings, 1);
    assert_eq!(rig.transcript.themes.last(), Some(&BossTheme::AwakenedWarden));

    rig.body.health_current = 0;
    rig.step();
    assert_eq!(rig.controller.phase(), Phase::Dying);

    let mut outcome = TickOutcome::Continue;
    for _ in 0..2000 {
        outcome = rig.step();
        if outcome != TickOutcome::Continue {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Defeated);
    assert_eq!(rig.transcript.defeats, 1);
    assert_eq!(rig.audio.count(CueId::Death), 1);
}

#[test]
fn test_distance_enrages_and_closing_in_recovers() {
    let mut rig = Rig::new(4);
    rig.run_until(100, |r| r.controller.phase() == Phase::Idle);

    let ranges = rig.controller.config().ranges.clone();
    let gap = (ranges.enrage_distance + ranges.teleport_distance) / 2.0;

    // An attack in flight delays the switch until it finishes
    let mut enraged = false;
    for _ in 0..5000 {
        let boss = rig.body.position;
        rig.targets[0].position = boss + Vec2::new(gap, 0.0);
        rig.step();
        if rig.controller.phase() == Phase::Enraged {
            enraged = true;
            break;
        }
    }
    assert!(enraged);

    let mut recovered = false;
    for _ in 0..600 {
        rig.targets[0].position = rig.body.position + Vec2::new(50.0, 0.0);
        rig.step();
        if rig.controller.phase() != Phase::Enraged {
            recovered = true;
            break;
        }
    }
    assert!(recovered);
}

#[test]
fn test_far_target_triggers_rescue_teleport() {
    let mut rig = Rig::new(6);
    rig.run_until(100, |r| r.controller.phase() == Phase::Idle);

    let far = rig.controller.config().ranges.teleport_distance + 500.0;
    rig.targets[0].position = rig.body.position + Vec2::new(far, 0.0);
    rig.step();

    assert!(rig.audio.count(CueId::Teleport) >= 1);
    let distance = rig.body.position.distance(rig.targets[0].position);
    assert!(distance <= rig.controller.config().ranges.enrage_distance);
}

#[test]
fn test_lost_target_departs() {
    let mut rig = Rig::new(8);
    rig.run_until(100, |r| r.controller.phase() == Phase::Idle);

    rig.targets[0].active = false;
    let mut outcome = TickOutcome::Continue;
    for _ in 0..2000 {
        outcome = rig.step();
        if outcome != TickOutcome::Continue {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Despawned);
    assert!(!rig.controller.state().has_awakened);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_snapshot_resume_continues_from_disk() {
    let settings = FightSettings {
        seed: 21,
        max_ticks: 1200,
        ..Default::default()
    };
    let mut fight = Fight::new(EncounterConfig::default(), &settings);
    run_to_limit(&mut fight, 600);

    let path = std::env::temp_dir().join(format!("warden-scenario-{}.json", std::process::id()));
    let snapshot = fight.snapshot();
    snapshot.save(&path).unwrap();
    let loaded = EncounterSnapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.tick, 600);
    assert_eq!(loaded.controller.state(), snapshot.controller.state());
    assert_eq!(loaded.body, snapshot.body);

    let mut resumed = Fight::resume(loaded, &settings);
    assert_eq!(resumed.phase(), fight.phase());
    run_to_limit(&mut resumed, 100);
    assert_eq!(resumed.ticks(), 100);
}

#[test]
fn test_config_exports_and_reloads() {
    let path = std::env::temp_dir().join(format!("warden-config-{}.ron", std::process::id()));
    let mut config = EncounterConfig::default();
    config.spawn_duration = 77;
    config.export(&path).unwrap();

    let loaded = EncounterConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_missing_config_falls_back_to_default() {
    let path = std::env::temp_dir().join("warden-no-such-config.ron");
    assert_eq!(EncounterConfig::load_or_default(&path), EncounterConfig::default());
}

// ============================================================================
// Shared access
// ============================================================================

#[test]
fn test_damage_from_other_threads_lands_on_next_tick() {
    let controller = EncounterController::new(EncounterConfig::default(), BossHandle(1), 0);
    let shared = SharedEncounter::new(controller, BossBody::new(Vec2::ZERO, 10_000));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sender = shared.damage_sender();
            thread::spawn(move || {
                for _ in 0..10 {
                    sender.send(5);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(shared.pending_damage(), 200);

    let mut targets = vec![Puppet::at(0.0, 300.0)];
    let (mut spawner, mut audio) = (NullSpawner::default(), CueRecorder::default());
    let mut transcript = Transcript::default();
    let mut fx = Collaborators::new(&mut spawner, &mut audio, &mut transcript);
    shared.tick(&mut targets, &mut fx);

    assert_eq!(shared.pending_damage(), 0);
    let (current, max) = shared.health();
    assert!(current < max);
}
