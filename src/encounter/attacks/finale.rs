//! Finale: the tier-3 showpiece. A long charge, a window of rotating rings,
//! a closing safe-arc volley, then a long recovery.

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::safe_arc::fire_safe_arc;
use super::{AttackContext, AttackStep};

const CHARGE: u32 = 90;
const BURST_WINDOW: u32 = 150;
const BURST_INTERVAL: u32 = 10;
const RING_COUNT: u32 = 8;
const RING_SPEED: f32 = 7.0;
const ROTATION_STEP: f32 = 0.21;
const CLOSING_COUNT: u32 = 40;
const RECOVER: u32 = 60;

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;

    match ctx.state.sub_phase {
        0 => {
            ctx.body.steer(Vec2::ZERO, 0.2);
            let charge = s.ticks(CHARGE);
            if ctx.timer() == 0 {
                let position = ctx.body.position;
                ctx.cue(CueId::Charge, position);
                ctx.effect(EffectKind::Burst, position, 3.0, charge);
            }
            if ctx.timer() % 4 == 0 {
                ctx.converge(520.0, ctx.timer() as f32 / charge as f32, 16);
            }
            if ctx.timer() >= charge {
                let bearing = ctx.random_angle();
                ctx.memory().bearing = bearing;
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            if ctx.timer() % s.ticks(BURST_INTERVAL) == 0 {
                let center = ctx.body.position;
                let bearing = ctx.state.attack_memory.bearing;
                ctx.fire_ring(center, RING_COUNT, s.speed(RING_SPEED), bearing, ProjectileStyle::Star);
                ctx.memory().bearing = bearing + ROTATION_STEP;
                ctx.memory().repeats += 1;
                if ctx.timer() == 0 {
                    ctx.cue(CueId::Volley, center);
                }
            }
            if ctx.timer() >= s.ticks(BURST_WINDOW) {
                ctx.state.enter_sub_phase(2);
            }
            AttackStep::Continue
        }
        2 => {
            let toward = (ctx.aim.position - ctx.body.position).angle();
            ctx.memory().bearing = toward;
            fire_safe_arc(ctx, CLOSING_COUNT);
            ctx.state.enter_sub_phase(3);
            AttackStep::Continue
        }
        3 => {
            ctx.body.steer(Vec2::ZERO, 0.1);
            if ctx.timer() >= s.ticks(RECOVER) {
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::Finale),
    }
}
