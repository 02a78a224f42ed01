//! Ring burst: warning sparks converge on the boss, then one instantaneous
//! radial volley of evenly spaced stars.

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::{AttackContext, AttackStep};

const CHARGE: u32 = 75;
const RECOVER: u32 = 40;
const RING_RADIUS: f32 = 420.0;
const SPEED: f32 = 8.0;

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;

    match ctx.state.sub_phase {
        0 => {
            ctx.body.steer(Vec2::ZERO, 0.15);
            let charge = s.ticks(CHARGE);
            if ctx.timer() == 0 {
                let position = ctx.body.position;
                ctx.cue(CueId::Charge, position);
            }
            if ctx.timer() % 5 == 0 {
                ctx.converge(RING_RADIUS, ctx.timer() as f32 / charge as f32, 8);
            }
            if ctx.timer() >= charge {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            let center = ctx.body.position;
            let count = s.count(16, 4);
            let offset = ctx.random_angle();
            ctx.fire_ring(center, count, s.speed(SPEED), offset, ProjectileStyle::Star);
            ctx.effect(EffectKind::Burst, center, 2.5, 20);
            ctx.cue(CueId::Volley, center);
            ctx.state.enter_sub_phase(2);
            AttackStep::Continue
        }
        2 => {
            ctx.body.steer(Vec2::ZERO, 0.1);
            if ctx.timer() >= s.ticks(RECOVER) {
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::RingBurst),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_to_end;
    use super::*;

    #[test]
    fn test_single_volley_sized_by_tier() {
        let run = run_to_end(AttackKind::RingBurst, 0, 0.0, true);
        assert_eq!(run.spawner.projectiles.len(), 16);
        assert_eq!(run.audio.count(CueId::Volley), 1);

        let run = run_to_end(AttackKind::RingBurst, 3, 0.0, true);
        assert_eq!(run.spawner.projectiles.len(), 28);
    }

    #[test]
    fn test_volley_is_one_instant() {
        let run = run_to_end(AttackKind::RingBurst, 1, 0.0, true);
        let first = run.spawner.projectiles[0].0;
        assert!(run.spawner.projectiles.iter().all(|p| p.0 == first));
        let speeds: Vec<f32> = run.spawner.projectiles.iter().map(|p| p.1.length()).collect();
        assert!(speeds.iter().all(|v| (v - speeds[0]).abs() < 1e-3));
    }
}
