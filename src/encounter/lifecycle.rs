//! Two-stage death
//!
//! The first time health reaches zero the Warden does not die: it collapses,
//! refills and comes back stronger. Only the second zero-health event runs
//! the dying timeline and then permits removal.

use std::f32::consts::TAU;

use crate::audio::CueId;
use crate::data::EncounterConfig;
use crate::ecs::Vec2;
use crate::host::{BossHandle, BossTheme, Collaborators, EffectKind};

use super::attacks::ring_directions;
use super::body::BossBody;
use super::state::{EncounterState, Phase};

/// Returned by the sequence tick functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    Running,
    Finished,
}

/// Absorb a zero-health event.
///
/// Returns true only once removal is permitted, i.e. after the dying
/// timeline has fully played. Calls during a running sequence change
/// nothing.
pub fn intercept_death(state: &mut EncounterState, body: &mut BossBody, config: &EncounterConfig) -> bool {
    if state.removal_permitted {
        return true;
    }
    if state.phase.is_sequence() {
        return false;
    }

    body.invulnerable = true;
    body.velocity = Vec2::ZERO;

    if !state.has_awakened {
        body.health_current = config.awakening.min_alive_health.clamp(1, body.health_max);
        state.enter_phase(Phase::Awakening);
        log::info!("The Warden collapses... and begins to awaken");
    } else {
        body.health_current = 0;
        state.enter_phase(Phase::Dying);
        log::info!("The Warden is unravelling");
    }
    false
}

/// One tick of the awakening timeline: collapse, rising energy, form
/// change, rebirth burst
pub fn tick_awakening(
    state: &mut EncounterState,
    body: &mut BossBody,
    config: &EncounterConfig,
    handle: BossHandle,
    fx: &mut Collaborators<'_>,
) -> SequenceStep {
    let params = &config.awakening;
    let stage = state.sub_phase as usize;
    let Some(&duration) = params.stage_durations.get(stage) else {
        log::error!("Awakening reached stage {}", stage);
        debug_assert!(false, "awakening stage overrun");
        finish_awakening(state, body, config);
        return SequenceStep::Finished;
    };
    let duration = duration.max(1);
    let position = body.position;
    let palette = &config.palette;

    match stage {
        // Collapse
        0 => {
            if state.timer == 0 {
                fx.narrative.announce_awakening();
                fx.cue(CueId::Collapse, position);
            }
            body.velocity = Vec2::new(0.0, 1.5 * (1.0 - state.timer as f32 / duration as f32));
        }
        // Rising energy, health climbs back
        1 => {
            body.velocity = Vec2::ZERO;
            let progress = (state.timer + 1) as f32 / duration as f32;
            let floor = body.health_current.min(params.min_alive_health.max(1));
            let refill = ((body.health_max - floor) as f64 * progress.min(1.0) as f64) as u64;
            body.health_current = body.health_current.max(floor + refill).min(body.health_max);
            if state.timer % 6 == 0 {
                let radius = 400.0 * (1.0 - progress);
                for direction in ring_directions(10, progress * TAU) {
                    fx.effect(EffectKind::Charge, position + direction * radius, palette.awakened, 0.8, 6);
                }
            }
        }
        // Form change
        2 => {
            if state.timer == 0 {
                fx.narrative.register_boss(handle, BossTheme::AwakenedWarden);
                fx.cue(CueId::PhaseShift, position);
                fx.effect(EffectKind::Rebirth, position, palette.awakened, 2.0, duration);
            }
        }
        // Rebirth burst
        _ => {
            if state.timer == 0 {
                fx.effect(EffectKind::Burst, position, palette.awakened, 4.0, 30);
                fx.cue(CueId::Rebirth, position);
            }
        }
    }

    if state.timer + 1 >= duration {
        if stage + 1 < params.stage_durations.len() {
            state.enter_sub_phase(state.sub_phase + 1);
        } else {
            finish_awakening(state, body, config);
            return SequenceStep::Finished;
        }
    }
    SequenceStep::Running
}

/// Second life: full health, raised multipliers, fresh scaling
fn finish_awakening(state: &mut EncounterState, body: &mut BossBody, config: &EncounterConfig) {
    let params = &config.awakening;
    state.has_awakened = true;
    body.heal_to_full();
    body.invulnerable = false;
    body.damage_mult *= params.damage_boost;
    body.defense_mult *= params.defense_boost;

    state.difficulty_tier = 0;
    state.announced_tier = 0;
    state.wrath_announced = false;
    state.fight_ticks = 0;
    state.aggression_seed = config.awakened_aggression_seed.clamp(0.0, 1.0);
    state.aggression = state.aggression_seed;
    state.enrage_meter = 0;
    state.last_attack = None;
    state.attack_cooldown = config.first_attack_cooldown;
    state.enter_phase(Phase::Idle);

    log::info!(
        "The Warden awakens: damage x{:.2}, defense x{:.2}",
        body.damage_mult,
        body.defense_mult
    );
}

/// One tick of the dying timeline: unravel, then a final burst
pub fn tick_dying(
    state: &mut EncounterState,
    body: &mut BossBody,
    config: &EncounterConfig,
    fx: &mut Collaborators<'_>,
) -> SequenceStep {
    let params = &config.dying;
    let position = body.position;
    let palette = &config.palette;
    body.velocity = Vec2::ZERO;

    match state.sub_phase {
        0 => {
            let duration = params.unravel_duration.max(1);
            if state.timer == 0 {
                fx.cue(CueId::Collapse, position);
            }
            if state.timer % 10 == 0 {
                // Golden-angle spiral of fragments
                let angle = state.timer as f32 * 2.4;
                let spread = 60.0 + state.timer as f32;
                fx.effect(EffectKind::Burst, position + Vec2::from_angle(angle) * spread, palette.secondary, 1.0, 20);
            }
            if state.timer + 1 >= duration {
                state.enter_sub_phase(1);
            }
            SequenceStep::Running
        }
        _ => {
            let duration = params.final_burst_duration.max(1);
            if state.timer == 0 {
                fx.effect(EffectKind::Burst, position, palette.primary, 5.0, duration);
                fx.cue(CueId::Death, position);
            }
            if state.timer + 1 >= duration {
                state.removal_permitted = true;
                fx.narrative.announce_defeat();
                log::info!("The Warden is defeated");
                return SequenceStep::Finished;
            }
            SequenceStep::Running
        }
    }
}
