//! Chain combo: a string of short blinks around the target, each link
//! ending in a tight fan of bolts.

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::ProjectileStyle;

use super::{AttackContext, AttackStep};

const LINK_DELAY: u32 = 20;
const FAN_HOLD: u32 = 12;
const RECOVER: u32 = 36;
const LINK_RADIUS: f32 = 220.0;
const FAN_COUNT: u32 = 5;
const FAN_SPREAD: f32 = 0.5;
const SPEED: f32 = 11.0;

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;
    let links = s.count(3, 1);

    match ctx.state.sub_phase {
        0 => {
            if ctx.timer() == 0 {
                let aim = ctx.aim.position;
                let angle = ctx.random_angle();
                ctx.blink(aim + Vec2::from_angle(angle) * LINK_RADIUS);
                ctx.telegraph(aim, 1.0, s.ticks(LINK_DELAY));
            }
            if ctx.timer() >= s.ticks(LINK_DELAY) {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            if ctx.timer() == 0 {
                let origin = ctx.body.position;
                let direction = origin.direction_to(ctx.aim.lead(8.0));
                ctx.fire_fan(origin, direction, FAN_COUNT, FAN_SPREAD, s.speed(SPEED), ProjectileStyle::Bolt);
                ctx.cue(CueId::Volley, origin);
            }
            if ctx.timer() >= s.ticks(FAN_HOLD) {
                ctx.memory().repeats += 1;
                if ctx.state.attack_memory.repeats < links {
                    ctx.state.enter_sub_phase(0);
                } else {
                    ctx.state.enter_sub_phase(2);
                }
            }
            AttackStep::Continue
        }
        2 => {
            if ctx.timer() >= s.ticks(RECOVER) {
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::ChainCombo),
    }
}
