//! Phase controller
//!
//! The top-level state machine. Each tick it checks for death, picks a
//! target, updates tier and aggression, applies the range policy and then
//! runs whatever the current phase does.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::audio::CueId;
use crate::data::EncounterConfig;
use crate::ecs::Vec2;
use crate::host::{Avatar, BossHandle, BossTheme, Collaborators, EffectKind, ProjectileStyle, TargetView};

use super::attacks::{begin_attack, run_attack, select_next_attack, AttackContext, AttackStep};
use super::body::BossBody;
use super::lifecycle::{self, SequenceStep};
use super::scaling::{update_aggression, update_tier, Scaling, MAX_TIER};
use super::state::{EncounterState, Phase};
use super::targeting::{approach_velocity, compute_hover_position, enforce_range_policy, select_target};

/// What the host should do with the boss after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    /// No target remained and the withdrawal finished; remove quietly
    Despawned,
    /// Second death played out; removal permitted
    Defeated,
}

/// Drives one Warden encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterController {
    config: EncounterConfig,
    state: EncounterState,
    rng: ChaCha8Rng,
    handle: BossHandle,
}

impl EncounterController {
    pub fn new(config: EncounterConfig, handle: BossHandle, seed: u64) -> Self {
        Self {
            config,
            state: EncounterState::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            handle,
        }
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn handle(&self) -> BossHandle {
        self.handle
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Report a zero-health event. Returns true once removal is permitted.
    pub fn intercept_death(&mut self, body: &mut BossBody) -> bool {
        lifecycle::intercept_death(&mut self.state, body, &self.config)
    }

    /// Advance the encounter by one simulation tick
    pub fn tick<A: Avatar>(
        &mut self,
        body: &mut BossBody,
        targets: &mut [A],
        fx: &mut Collaborators<'_>,
    ) -> TickOutcome {
        if self.state.removal_permitted {
            return TickOutcome::Defeated;
        }

        // Zero health preempts everything else
        if body.is_depleted() && !self.state.phase.is_sequence() {
            self.intercept_death(body);
            return self.finish_tick(body);
        }

        match self.state.phase {
            Phase::Awakening => {
                lifecycle::tick_awakening(&mut self.state, body, &self.config, self.handle, fx);
                return self.finish_tick(body);
            }
            Phase::Dying => {
                let step = lifecycle::tick_dying(&mut self.state, body, &self.config, fx);
                self.finish_tick(body);
                return match step {
                    SequenceStep::Finished => TickOutcome::Defeated,
                    SequenceStep::Running => TickOutcome::Continue,
                };
            }
            _ => {}
        }

        // Targeting
        let index = if self.state.departing {
            None
        } else {
            select_target(body.position, targets)
        };
        self.state.target = index;
        let aim = match index {
            Some(i) => {
                let view = TargetView::of(&targets[i]);
                self.state.last_target_position = view.position;
                view
            }
            None => TargetView {
                position: self.state.last_target_position,
                velocity: Vec2::ZERO,
            },
        };

        // A running attack finishes on its own timer; anything else withdraws
        if index.is_none() && self.state.phase != Phase::Attack {
            return self.tick_departure(body);
        }

        if self.state.phase != Phase::Spawning {
            self.update_scaling(body, fx);

            let verdict = enforce_range_policy(&mut self.state, body, aim.position, &self.config, fx);
            match self.state.phase {
                Phase::Idle | Phase::Reposition if verdict.enrage => {
                    self.state.enter_phase(Phase::Enraged);
                    fx.cue(CueId::Enrage, body.position);
                    fx.effect(EffectKind::Burst, body.position, self.config.palette.wrath, 2.5, 30);
                    log::info!("The Warden is enraged by the distance");
                }
                Phase::Enraged if verdict.recovered => {
                    self.state.enter_phase(Phase::Idle);
                    self.state.attack_cooldown = Scaling::from_state(&self.state).ticks(self.config.base_attack_cooldown);
                    log::debug!("Enrage subsided");
                }
                _ => {}
            }
        }

        if self.state.phase == Phase::Spawning && self.state.timer == 0 {
            fx.narrative.register_boss(self.handle, BossTheme::Warden);
            fx.cue(CueId::Roar, body.position);
            fx.effect(EffectKind::Arrival, body.position, self.config.palette.primary, 3.0, 60);
            log::info!("The Warden descends");
        }

        let scaling = Scaling::from_state(&self.state);
        match self.state.phase {
            Phase::Spawning => self.tick_spawning(body, aim),
            Phase::Idle => self.tick_idle(body, aim, scaling),
            Phase::Attack => self.tick_attack(body, targets, index, aim, scaling, fx),
            Phase::Reposition => self.tick_reposition(body, aim, scaling),
            Phase::Enraged => self.tick_enraged(body, aim, scaling, fx),
            Phase::CosmicWrath => self.tick_wrath(body, aim, scaling),
            Phase::Awakening | Phase::Dying => {}
        }

        self.finish_tick(body)
    }

    fn finish_tick(&mut self, body: &mut BossBody) -> TickOutcome {
        body.integrate();
        self.state.tick_cooldowns();
        self.state.advance_tick();
        TickOutcome::Continue
    }

    /// Fight clock, tier crossings and the forced escalation at tier 3
    fn update_scaling(&mut self, body: &BossBody, fx: &mut Collaborators<'_>) {
        update_aggression(&mut self.state, &self.config);

        if let Some(tier) = update_tier(&mut self.state, body.health_fraction(), &self.config) {
            for announced in (self.state.announced_tier + 1)..=tier {
                fx.narrative.announce_phase(announced);
                fx.effect(EffectKind::Burst, body.position, self.config.palette.warning, 2.0 + announced as f32, 40);
                fx.cue(CueId::PhaseShift, body.position);
                log::info!("The Warden reaches tier {}", announced);
            }
            self.state.announced_tier = self.state.announced_tier.max(tier);
        }

        if self.state.difficulty_tier >= MAX_TIER
            && !matches!(self.state.phase, Phase::Attack | Phase::CosmicWrath)
        {
            self.enter_wrath(body.position, fx);
        }
    }

    fn enter_wrath(&mut self, position: Vec2, fx: &mut Collaborators<'_>) {
        let cooldown = Scaling::from_state(&self.state).ticks(self.config.wrath_attack_cooldown);
        self.state.attack_cooldown = self.state.attack_cooldown.min(cooldown);
        if self.state.enter_phase(Phase::CosmicWrath) && !self.state.wrath_announced {
            self.state.wrath_announced = true;
            fx.cue(CueId::Wrath, position);
            fx.effect(EffectKind::Burst, position, self.config.palette.wrath, 4.0, 40);
            log::info!("The Warden enters Cosmic Wrath");
        }
    }

    fn tick_departure(&mut self, body: &mut BossBody) -> TickOutcome {
        let params = &self.config.departure;
        if !self.state.departing {
            log::info!("No target remains; the Warden withdraws");
            self.state.departing = true;
            self.state.departure_ticks = 0;
        }

        body.velocity.x *= 0.95;
        body.velocity.y = (body.velocity.y + params.descent_acceleration).min(params.max_descent_speed);
        self.state.departure_ticks += 1;
        let done = self.state.departure_ticks >= params.duration;
        self.finish_tick(body);

        if done {
            log::info!("The Warden has withdrawn");
            TickOutcome::Despawned
        } else {
            TickOutcome::Continue
        }
    }

    fn hover(&self, body: &mut BossBody, aim: TargetView, speed_mult: f32) {
        let params = &self.config.hover;
        let destination = compute_hover_position(aim.position, self.state.fight_ticks, params);
        let desired = approach_velocity(body.position, destination, params.max_speed * speed_mult);
        body.steer(desired, params.acceleration);
    }

    fn tick_spawning(&mut self, body: &mut BossBody, aim: TargetView) {
        self.hover(body, aim, 0.5);
        if self.state.timer >= self.config.spawn_duration {
            self.state.enter_phase(Phase::Idle);
            self.state.attack_cooldown = self.config.first_attack_cooldown;
        }
    }

    fn tick_idle(&mut self, body: &mut BossBody, aim: TargetView, scaling: Scaling) {
        self.hover(body, aim, scaling.speed_mult());
        self.state.attack_cooldown = self.state.attack_cooldown.saturating_sub(1);
        if self.state.attack_cooldown == 0 {
            self.start_attack();
        }
    }

    fn start_attack(&mut self) {
        let attack = select_next_attack(&mut self.state, &self.config, &mut self.rng);
        self.state.enter_phase(Phase::Attack);
        begin_attack(&mut self.state, attack);
        log::debug!("Attack: {} (tier {})", attack.name(), self.state.difficulty_tier);
    }

    fn tick_attack<A: Avatar>(
        &mut self,
        body: &mut BossBody,
        targets: &mut [A],
        index: Option<usize>,
        aim: TargetView,
        scaling: Scaling,
        fx: &mut Collaborators<'_>,
    ) {
        let Some(attack) = self.state.current_attack else {
            log::error!("Attack phase without an attack");
            self.end_attack(body.position, scaling, fx);
            return;
        };

        let target = index
            .and_then(|i| targets.get_mut(i))
            .map(|t| t as &mut dyn Avatar);
        let mut ctx = AttackContext {
            state: &mut self.state,
            body: &mut *body,
            target,
            aim,
            scaling,
            config: &self.config,
            fx: &mut *fx,
            rng: &mut self.rng,
        };

        if run_attack(attack, &mut ctx) == AttackStep::End {
            self.end_attack(body.position, scaling, fx);
        }
    }

    fn end_attack(&mut self, position: Vec2, scaling: Scaling, fx: &mut Collaborators<'_>) {
        if self.state.difficulty_tier >= MAX_TIER {
            self.state.attack_cooldown = scaling.ticks(self.config.wrath_attack_cooldown);
            self.enter_wrath(position, fx);
        } else {
            self.state.enter_phase(Phase::Reposition);
            let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            self.state.reposition_offset = Vec2::new(
                side * self.rng.gen_range(180.0..360.0),
                -self.config.hover.height,
            );
        }
    }

    fn tick_reposition(&mut self, body: &mut BossBody, aim: TargetView, scaling: Scaling) {
        let params = &self.config.hover;
        let destination = aim.position + self.state.reposition_offset;
        let desired = approach_velocity(body.position, destination, params.max_speed * 1.5 * scaling.speed_mult());
        body.steer(desired, params.acceleration * 2.0);

        if self.state.timer >= self.config.reposition_duration {
            self.state.enter_phase(Phase::Idle);
            self.state.attack_cooldown = scaling.ticks(self.config.base_attack_cooldown);
        }
    }

    fn tick_enraged(&mut self, body: &mut BossBody, aim: TargetView, scaling: Scaling, fx: &mut Collaborators<'_>) {
        let params = &self.config.enraged;
        let chase = body.position.direction_to(aim.position) * scaling.speed(params.chase_speed);
        body.steer(chase, 0.1);

        if self.state.timer % scaling.ticks(params.fire_interval) == 0 {
            let direction = body.position.direction_to(aim.lead(10.0));
            let damage = (self.config.projectile_damage as f32 * body.damage_mult * params.damage_mult).round() as u32;
            fx.projectile(body.position, direction * scaling.speed(params.bolt_speed), damage, ProjectileStyle::Bolt);
        }
    }

    fn tick_wrath(&mut self, body: &mut BossBody, aim: TargetView, scaling: Scaling) {
        self.hover(body, aim, scaling.speed_mult());
        self.state.attack_cooldown = self.state.attack_cooldown.saturating_sub(1);
        if self.state.attack_cooldown == 0 {
            self.start_attack();
        }
    }
}
