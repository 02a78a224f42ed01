//! Gravity well: a sink opens where the target stood, dragging it inward and
//! shedding slow rotating rings of orbs from its rim.

use crate::audio::CueId;
use crate::combat::StatusId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::{AttackContext, AttackStep};

const TELEGRAPH: u32 = 40;
const ACTIVE: u32 = 180;
const RECOVER: u32 = 30;
const PULL: f32 = 0.35;
const PULL_RADIUS: f32 = 900.0;
const EDGE_RADIUS: f32 = 160.0;
const EMIT_INTERVAL: u32 = 20;
const STATUS_INTERVAL: u32 = 30;
const GRAVITATED_TICKS: u32 = 35;
const BURN_TICKS: u32 = 60;
const ORB_SPEED: f32 = 5.0;
const ROTATION_STEP: f32 = 0.3;

/// Impulse dragging something at `position` toward `anchor`; zero outside
/// the well's reach or at its centre
pub fn well_pull(anchor: Vec2, position: Vec2, strength: f32) -> Vec2 {
    let distance = position.distance(anchor);
    if distance > PULL_RADIUS || distance < 1.0 {
        return Vec2::ZERO;
    }
    position.direction_to(anchor) * strength
}

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;

    match ctx.state.sub_phase {
        0 => {
            ctx.body.steer(Vec2::ZERO, 0.15);
            if ctx.timer() == 0 {
                let anchor = ctx.aim.position;
                ctx.memory().anchor = anchor;
                ctx.telegraph(anchor, 3.0, s.ticks(TELEGRAPH));
                ctx.cue(CueId::Telegraph, anchor);
            }
            if ctx.timer() >= s.ticks(TELEGRAPH) {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            let anchor = ctx.state.attack_memory.anchor;
            let active = s.ticks(ACTIVE);

            if ctx.timer() == 0 {
                ctx.effect(EffectKind::Well, anchor, 3.0, active);
                ctx.cue(CueId::GravityHum, anchor);
            }

            let apply_status = ctx.timer() % STATUS_INTERVAL == 0;
            if let Some(target) = ctx.target.as_deref_mut() {
                let pull = well_pull(anchor, target.position(), PULL * s.speed_mult());
                if pull != Vec2::ZERO {
                    target.apply_impulse(pull);
                    if apply_status {
                        target.apply_status(StatusId::Gravitated, GRAVITATED_TICKS);
                    }
                }
                // Standing in the core burns
                if apply_status && target.position().distance(anchor) <= EDGE_RADIUS {
                    target.apply_status(StatusId::CosmicBurn, BURN_TICKS);
                }
            }

            if ctx.timer() % s.ticks(EMIT_INTERVAL) == 0 {
                let bearing = ctx.state.attack_memory.bearing;
                let count = s.count(6, 1);
                for direction in super::ring_directions(count, bearing) {
                    let origin = anchor + direction * EDGE_RADIUS;
                    ctx.fire(origin, direction * s.speed(ORB_SPEED), ProjectileStyle::Orb);
                }
                ctx.memory().bearing = bearing + ROTATION_STEP;
            }

            if ctx.timer() >= active {
                ctx.state.enter_sub_phase(2);
            }
            AttackStep::Continue
        }
        2 => {
            if ctx.timer() == 0 {
                let anchor = ctx.state.attack_memory.anchor;
                ctx.cue(CueId::Collapse, anchor);
            }
            if ctx.timer() >= s.ticks(RECOVER) {
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::GravityWell),
    }
}
