//! Teleport strike: blink beside the target, dash through with a short
//! volley, repeat once per strike. Strike count grows with tier.

use crate::audio::CueId;
use crate::combat::StatusId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::ProjectileStyle;

use super::{AttackContext, AttackStep};

const TELEGRAPH: u32 = 40;
const DASH: u32 = 24;
const RECOVER: u32 = 30;
const BLINK_RADIUS: f32 = 260.0;
const DASH_SPEED: f32 = 18.0;
const VOLLEY_SPEED: f32 = 10.0;
const DASH_DRAG: f32 = 0.92;
/// Distance at which the dash counts as hitting the target
const CONTACT_RADIUS: f32 = 80.0;
const IMPACT_COOLDOWN: u32 = 45;
const DAZE_TICKS: u32 = 20;

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;
    let strikes = s.count(2, 1);

    match ctx.state.sub_phase {
        // Telegraph the landing spot
        0 => {
            if ctx.timer() == 0 {
                let angle = ctx.random_angle();
                let destination = ctx.aim.position + Vec2::from_angle(angle) * BLINK_RADIUS;
                ctx.memory().anchor = destination;
                ctx.telegraph(destination, 1.5, s.ticks(TELEGRAPH));
                ctx.cue(CueId::Telegraph, destination);
            }
            ctx.body.steer(Vec2::ZERO, 0.2);

            if ctx.timer() >= s.ticks(TELEGRAPH) {
                let destination = ctx.state.attack_memory.anchor;
                ctx.blink(destination);
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        // Dash and volley
        1 => {
            if ctx.timer() == 0 {
                let origin = ctx.body.position;
                let direction = origin.direction_to(ctx.aim.lead(6.0));
                ctx.memory().direction = direction;
                ctx.body.velocity = direction * s.speed(DASH_SPEED);
                ctx.fire_fan(origin, direction, 3, 0.3, s.speed(VOLLEY_SPEED), ProjectileStyle::Bolt);
                ctx.cue(CueId::Dash, origin);
                ctx.state.dash_cooldown = s.ticks(DASH);
            } else {
                ctx.body.velocity *= DASH_DRAG;
            }

            let position = ctx.body.position;
            if ctx.state.impact_cooldown == 0 {
                if let Some(target) = ctx.target.as_deref_mut() {
                    if target.position().distance(position) <= CONTACT_RADIUS {
                        let shove = position.direction_to(target.position()) * s.speed(8.0);
                        target.apply_impulse(shove);
                        target.apply_status(StatusId::Dazed, DAZE_TICKS);
                        ctx.state.impact_cooldown = IMPACT_COOLDOWN;
                    }
                }
            }

            if ctx.timer() >= s.ticks(DASH) {
                ctx.memory().repeats += 1;
                if ctx.state.attack_memory.repeats < strikes {
                    ctx.state.enter_sub_phase(0);
                } else {
                    ctx.state.enter_sub_phase(2);
                }
            }
            AttackStep::Continue
        }
        // Recover
        2 => {
            ctx.body.steer(Vec2::ZERO, 0.1);
            if ctx.timer() >= s.ticks(RECOVER) {
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::TeleportStrike),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_to_end;
    use super::*;

    #[test]
    fn test_strike_count_scales_with_tier() {
        let low = run_to_end(AttackKind::TeleportStrike, 0, 0.0, true);
        let high = run_to_end(AttackKind::TeleportStrike, 2, 0.0, true);
        assert_eq!(low.state.attack_memory.repeats, 2);
        assert_eq!(high.state.attack_memory.repeats, 4);
        // Three bolts per strike
        assert_eq!(low.spawner.projectiles.len(), 6);
        assert_eq!(high.spawner.projectiles.len(), 12);
        assert_eq!(low.audio.count(CueId::Teleport), 2);
    }

    #[test]
    fn test_blinks_land_near_target() {
        let run = run_to_end(AttackKind::TeleportStrike, 0, 0.0, true);
        for (origin, _, _, _) in &run.spawner.projectiles {
            assert!(origin.length() <= BLINK_RADIUS + 1.0);
        }
    }
}
