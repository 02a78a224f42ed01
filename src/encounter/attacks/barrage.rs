//! Barrage: a fixed window of aimed shots raining from a band above the
//! target, the interval between shots shrinking as the window runs.

use rand::Rng;

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::scaling::Scaling;
use crate::encounter::state::AttackKind;
use crate::encounter::targeting::{approach_velocity, compute_hover_position};
use crate::host::ProjectileStyle;

use super::{AttackContext, AttackStep};

const TELEGRAPH: u32 = 45;
const WINDOW: u32 = 240;
const RECOVER: u32 = 30;
const START_INTERVAL: u32 = 14;
const MIN_INTERVAL: u32 = 3;
const SPEED: f32 = 9.0;
const BAND_HALF_WIDTH: f32 = 400.0;
const BAND_MIN_HEIGHT: f32 = 350.0;
const BAND_MAX_HEIGHT: f32 = 500.0;

/// Ticks until the next shot at `progress` (0..1) through the window
pub fn shot_interval(progress: f32, scaling: &Scaling) -> u32 {
    let base = START_INTERVAL as f32 * (1.0 - 0.5 * progress.clamp(0.0, 1.0));
    scaling.ticks(base.round() as u32).max(MIN_INTERVAL)
}

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;

    // Keep hovering while the sky does the work
    let hover = compute_hover_position(ctx.aim.position, ctx.state.fight_ticks, &ctx.config.hover);
    let desired = approach_velocity(ctx.body.position, hover, ctx.config.hover.max_speed);
    ctx.body.steer(desired, ctx.config.hover.acceleration);

    match ctx.state.sub_phase {
        0 => {
            if ctx.timer() == 0 {
                let position = ctx.body.position;
                ctx.cue(CueId::Charge, position);
            }
            if ctx.timer() % 5 == 0 {
                let progress = ctx.timer() as f32 / s.ticks(TELEGRAPH) as f32;
                ctx.converge(220.0, progress, 5);
            }
            if ctx.timer() >= s.ticks(TELEGRAPH) {
                ctx.memory().next_fire = 0;
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            let window = s.ticks(WINDOW);
            let timer = ctx.timer();

            if timer >= ctx.state.attack_memory.next_fire {
                let offset = Vec2::new(
                    ctx.rng.gen_range(-BAND_HALF_WIDTH..BAND_HALF_WIDTH),
                    -ctx.rng.gen_range(BAND_MIN_HEIGHT..BAND_MAX_HEIGHT),
                );
                let origin = ctx.aim.position + offset;
                let velocity = origin.direction_to(ctx.aim.position) * s.speed(SPEED);
                ctx.telegraph(origin, 0.6, 10);
                ctx.fire(origin, velocity, ProjectileStyle::Star);
                if timer == 0 {
                    ctx.cue(CueId::Volley, origin);
                }

                let interval = shot_interval(timer as f32 / window as f32, &s);
                ctx.memory().next_fire = timer + interval;
            }

            if timer >= window {
                ctx.state.enter_sub_phase(2);
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
        _ => ctx.overrun(AttackKind::Barrage),
    }
}
