//! Attack pattern library
//!
//! Every pattern is a small sub-state machine keyed by `sub_phase` and
//! `timer`: telegraph, execute, optionally repeat, recover, then hand control
//! back to the phase controller by returning `AttackStep::End`. Patterns end
//! by timer alone, so a lost target never leaves one stuck.

pub mod teleport_strike;
pub mod barrage;
pub mod ring_burst;
pub mod chain_combo;
pub mod constellation;
pub mod line_sweep;
pub mod safe_arc;
pub mod gravity_well;
pub mod finale;

use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::audio::CueId;
use crate::data::EncounterConfig;
use crate::ecs::Vec2;
use crate::host::{Avatar, Collaborators, EffectKind, ProjectileStyle, Rgb, TargetView};

use super::body::BossBody;
use super::scaling::{Scaling, MAX_TIER};
use super::state::{AttackKind, AttackMemory, EncounterState};

/// Returned by a pattern each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStep {
    Continue,
    /// The attack is over; the controller decides what comes next
    End,
}

/// Everything a pattern may read or touch during one tick
pub struct AttackContext<'a, 'b> {
    pub state: &'a mut EncounterState,
    pub body: &'a mut BossBody,
    /// The live target, if one is still valid
    pub target: Option<&'a mut dyn Avatar>,
    /// Last known target position/velocity; valid even without a target
    pub aim: TargetView,
    pub scaling: Scaling,
    pub config: &'a EncounterConfig,
    pub fx: &'a mut Collaborators<'b>,
    pub rng: &'a mut ChaCha8Rng,
}

impl AttackContext<'_, '_> {
    pub fn timer(&self) -> u32 {
        self.state.timer
    }

    pub fn memory(&mut self) -> &mut AttackMemory {
        &mut self.state.attack_memory
    }

    /// Projectile damage after the body's multiplier
    pub fn damage(&self) -> u32 {
        (self.config.projectile_damage as f32 * self.body.damage_mult).round() as u32
    }

    /// Theme colour for the current form and tier
    pub fn color(&self) -> Rgb {
        let palette = &self.config.palette;
        if self.state.difficulty_tier >= MAX_TIER {
            palette.wrath
        } else if self.state.has_awakened {
            palette.awakened
        } else {
            palette.primary
        }
    }

    pub fn fire(&mut self, origin: Vec2, velocity: Vec2, style: ProjectileStyle) {
        let damage = self.damage();
        self.fx.projectile(origin, velocity, damage, style);
    }

    /// Evenly spaced radial volley
    pub fn fire_ring(&mut self, center: Vec2, count: u32, speed: f32, offset: f32, style: ProjectileStyle) {
        for direction in ring_directions(count, offset) {
            self.fire(center, direction * speed, style);
        }
    }

    /// Fan of `count` shots centred on `direction`, `spread` radians wide
    pub fn fire_fan(&mut self, origin: Vec2, direction: Vec2, count: u32, spread: f32, speed: f32, style: ProjectileStyle) {
        for direction in fan_directions(direction, count, spread) {
            self.fire(origin, direction * speed, style);
        }
    }

    pub fn telegraph(&mut self, position: Vec2, scale: f32, lifetime: u32) {
        let color = self.config.palette.warning;
        self.fx.effect(EffectKind::Telegraph, position, color, scale, lifetime);
    }

    pub fn effect(&mut self, kind: EffectKind, position: Vec2, scale: f32, lifetime: u32) {
        let color = self.color();
        self.fx.effect(kind, position, color, scale, lifetime);
    }

    pub fn cue(&mut self, id: CueId, position: Vec2) {
        self.fx.cue(id, position);
    }

    /// Short-range blink with departure and arrival flashes
    pub fn blink(&mut self, to: Vec2) {
        let from = self.body.position;
        self.effect(EffectKind::Departure, from, 1.2, 20);
        self.body.teleport(to);
        self.effect(EffectKind::Arrival, to, 1.2, 20);
        self.cue(CueId::Teleport, to);
    }

    /// Charge particles converging on the boss as `progress` goes 0 -> 1
    pub fn converge(&mut self, radius: f32, progress: f32, points: u32) {
        let center = self.body.position;
        let spin = progress * TAU * 0.25;
        let radius = radius * (1.0 - progress.clamp(0.0, 1.0));
        for direction in ring_directions(points, spin) {
            self.effect(EffectKind::Charge, center + direction * radius, 0.8, 6);
        }
    }

    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Sub-phase beyond what the pattern defines: log, assert in debug, end
    pub fn overrun(&mut self, kind: AttackKind) -> AttackStep {
        log::error!(
            "{} reached sub-phase {} of {}",
            kind.name(),
            self.state.sub_phase,
            kind.sub_phase_count()
        );
        debug_assert!(false, "{:?} sub-phase overrun", kind);
        AttackStep::End
    }
}

/// Unit vectors for `count` evenly spaced angles starting at `offset`
pub fn ring_directions(count: u32, offset: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::from_angle(offset + i as f32 * TAU / count as f32))
        .collect()
}

/// Unit vectors spread symmetrically around `direction`
pub fn fan_directions(direction: Vec2, count: u32, spread: f32) -> Vec<Vec2> {
    if count <= 1 {
        return vec![direction];
    }
    let step = spread / (count - 1) as f32;
    (0..count)
        .map(|i| direction.rotate(-spread / 2.0 + step * i as f32))
        .collect()
}

/// Pick the next attack for `tier`: uniform over the tier-gated pool, never
/// repeating the previous attack while alternatives exist.
pub fn select_next_attack(state: &mut EncounterState, config: &EncounterConfig, rng: &mut ChaCha8Rng) -> AttackKind {
    let mut pool = config.pool_for_tier(state.difficulty_tier);
    debug_assert!(!pool.is_empty(), "attack pool for tier {} is empty", state.difficulty_tier);

    if pool.len() > 1 {
        if let Some(last) = state.last_attack {
            pool.retain(|&attack| attack != last);
        }
    }

    let attack = pool.choose(rng).copied().unwrap_or(AttackKind::Barrage);
    state.last_attack = Some(attack);
    attack
}

/// Reset attack-local state for a fresh attack
pub fn begin_attack(state: &mut EncounterState, attack: AttackKind) {
    state.current_attack = Some(attack);
    state.attack_memory = AttackMemory::default();
    state.sub_phase = 0;
    state.timer = 0;
}

/// Run one tick of `attack`
pub fn run_attack(attack: AttackKind, ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    match attack {
        AttackKind::TeleportStrike => teleport_strike::tick(ctx),
        AttackKind::Barrage => barrage::tick(ctx),
        AttackKind::RingBurst => ring_burst::tick(ctx),
        AttackKind::ChainCombo => chain_combo::tick(ctx),
        AttackKind::Constellation => constellation::tick(ctx),
        AttackKind::LineSweep => line_sweep::tick(ctx),
        AttackKind::SafeArcRadial => safe_arc::tick(ctx),
        AttackKind::GravityWell => gravity_well::tick(ctx),
        AttackKind::Finale => finale::tick(ctx),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fakes for driving a single pattern without the controller

    use rand::SeedableRng;

    use super::*;
    use crate::audio::CueRecorder;
    use crate::combat::StatusId;
    use crate::host::{NarrativeHook, BossHandle, BossTheme, ProjectileHandle, Spawner};

    #[derive(Default)]
    pub struct RecordingSpawner {
        pub projectiles: Vec<(Vec2, Vec2, u32, ProjectileStyle)>,
        pub effects: Vec<(EffectKind, Vec2)>,
    }

    impl Spawner for RecordingSpawner {
        fn spawn_projectile(&mut self, origin: Vec2, velocity: Vec2, damage: u32, style: ProjectileStyle) -> ProjectileHandle {
            self.projectiles.push((origin, velocity, damage, style));
            ProjectileHandle(self.projectiles.len() as u64)
        }

        fn spawn_visual_effect(&mut self, kind: EffectKind, position: Vec2, _: Rgb, _: f32, _: u32) {
            self.effects.push((kind, position));
        }
    }

    #[derive(Default)]
    pub struct Quiet;

    impl NarrativeHook for Quiet {
        fn register_boss(&mut self, _: BossHandle, _: BossTheme) {}
        fn announce_phase(&mut self, _: u8) {}
    }

    pub struct StillTarget {
        pub position: Vec2,
        pub impulses: Vec<Vec2>,
        pub statuses: Vec<StatusId>,
    }

    impl StillTarget {
        pub fn at(position: Vec2) -> Self {
            Self { position, impulses: Vec::new(), statuses: Vec::new() }
        }
    }

    impl Avatar for StillTarget {
        fn position(&self) -> Vec2 {
            self.position
        }
        fn velocity(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn is_active(&self) -> bool {
            true
        }
        fn apply_impulse(&mut self, impulse: Vec2) {
            self.impulses.push(impulse);
        }
        fn apply_status(&mut self, status: StatusId, _: u32) {
            self.statuses.push(status);
        }
        fn health(&self) -> u32 {
            500
        }
        fn apply_damage(&mut self, amount: u32) -> u32 {
            amount
        }
    }

    /// Result of running one attack to completion
    pub struct Run {
        pub ticks: u32,
        pub spawner: RecordingSpawner,
        pub audio: CueRecorder,
        pub target: StillTarget,
        pub state: EncounterState,
        pub body: BossBody,
    }

    /// Drive `attack` tick by tick the way the controller does, until it ends
    pub fn run_to_end(attack: AttackKind, tier: u8, aggression: f32, with_target: bool) -> Run {
        run_to_end_seeded(attack, tier, aggression, with_target, 7)
    }

    pub fn run_to_end_seeded(attack: AttackKind, tier: u8, aggression: f32, with_target: bool, seed: u64) -> Run {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        state.difficulty_tier = tier;
        state.aggression = aggression;
        state.enter_phase(crate::encounter::state::Phase::Attack);
        begin_attack(&mut state, attack);
        state.entered_this_tick = false;

        let mut body = BossBody::new(Vec2::new(0.0, -300.0), 10_000);
        let mut target = StillTarget::at(Vec2::ZERO);
        let mut spawner = RecordingSpawner::default();
        let mut audio = CueRecorder::new(4096);
        let mut narrator = Quiet;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut ticks = 0;
        loop {
            ticks += 1;
            assert!(ticks < 5_000, "{:?} never ended", attack);
            let mut fx = Collaborators::new(&mut spawner, &mut audio, &mut narrator);
            let mut ctx = AttackContext {
                state: &mut state,
                body: &mut body,
                target: if with_target { Some(&mut target as &mut dyn Avatar) } else { None },
                aim: TargetView { position: Vec2::ZERO, velocity: Vec2::ZERO },
                scaling: Scaling::new(tier, aggression),
                config: &config,
                fx: &mut fx,
                rng: &mut rng,
            };
            let step = run_attack(attack, &mut ctx);
            body.integrate();
            state.advance_tick();
            if step == AttackStep::End {
                break;
            }
        }

        Run { ticks, spawner, audio, target, state, body }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::testing::run_to_end;
    use super::*;

    #[test]
    fn test_ring_directions_evenly_spaced() {
        let dirs = ring_directions(4, 0.0);
        assert_eq!(dirs.len(), 4);
        assert!((dirs[1].y - 1.0).abs() < 1e-5);
        assert!((dirs[2].x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fan_is_symmetric() {
        let dirs = fan_directions(Vec2::new(1.0, 0.0), 3, 0.5);
        assert_eq!(dirs.len(), 3);
        assert!((dirs[0].y + dirs[2].y).abs() < 1e-5);
        assert!(dirs[1].y.abs() < 1e-5);
        assert_eq!(fan_directions(Vec2::UP, 1, 1.0), vec![Vec2::UP]);
    }

    #[test]
    fn test_selection_never_repeats() {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for tier in 0..=MAX_TIER {
            state.difficulty_tier = tier;
            let mut previous = None;
            for _ in 0..200 {
                let attack = select_next_attack(&mut state, &config, &mut rng);
                assert_ne!(Some(attack), previous);
                assert!(config.pool_for_tier(tier).contains(&attack));
                previous = Some(attack);
            }
        }
    }

    #[test]
    fn test_single_entry_pool_may_repeat() {
        let config = EncounterConfig {
            attack_pool: vec![crate::data::PoolEntry::new(AttackKind::RingBurst, 0)],
            ..Default::default()
        };
        let mut state = EncounterState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_next_attack(&mut state, &config, &mut rng), AttackKind::RingBurst);
        assert_eq!(select_next_attack(&mut state, &config, &mut rng), AttackKind::RingBurst);
    }

    #[test]
    fn test_selection_covers_pool() {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        state.difficulty_tier = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(select_next_attack(&mut state, &config, &mut rng));
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_every_attack_ends_without_target() {
        for attack in AttackKind::ALL {
            let run = run_to_end(attack, 3, 1.0, false);
            assert!(run.ticks > 1, "{:?} ended immediately", attack);
            assert!(!run.spawner.projectiles.is_empty(), "{:?} fired nothing", attack);
        }
    }

    #[test]
    fn test_aggression_shortens_attacks() {
        for attack in AttackKind::ALL {
            let calm = run_to_end(attack, 0, 0.0, true);
            let furious = run_to_end(attack, 0, 1.0, true);
            assert!(furious.ticks < calm.ticks, "{:?} did not speed up", attack);
        }
    }
}
