//! Line sweep: blink off to one side, draw a warning line through the
//! target, then push rows of shards down it.

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::{AttackContext, AttackStep};

const TELEGRAPH: u32 = 50;
const FIRE_WINDOW: u32 = 30;
const ROW_INTERVAL: u32 = 3;
const RECOVER: u32 = 30;
const SIDE_OFFSET: Vec2 = Vec2::new(600.0, -120.0);
const SPACING: f32 = 28.0;
const SPEED: f32 = 16.0;
const WARNING_LENGTH: f32 = 1200.0;

/// `width` shard origins centred on `center`, spread across `direction`
pub fn sweep_row(center: Vec2, direction: Vec2, width: u32, spacing: f32) -> Vec<Vec2> {
    let across = direction.perp();
    let half = (width.saturating_sub(1)) as f32 / 2.0;
    (0..width)
        .map(|i| center + across * ((i as f32 - half) * spacing))
        .collect()
}

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;

    match ctx.state.sub_phase {
        0 => {
            if ctx.timer() == 0 {
                let aim = ctx.aim.position;
                let side = if ctx.body.position.x <= aim.x { -1.0 } else { 1.0 };
                let anchor = aim + Vec2::new(SIDE_OFFSET.x * side, SIDE_OFFSET.y);
                ctx.blink(anchor);

                let mut direction = anchor.direction_to(aim);
                if direction == Vec2::ZERO {
                    direction = Vec2::new(1.0, 0.0);
                }
                ctx.memory().anchor = anchor;
                ctx.memory().direction = direction;

                let warning = ctx.config.palette.warning;
                let lifetime = s.ticks(TELEGRAPH);
                for step in 1..=8 {
                    let point = anchor + direction * (WARNING_LENGTH * step as f32 / 8.0);
                    ctx.fx.effect(EffectKind::WarningLine, point, warning, 0.6, lifetime);
                }
                ctx.cue(CueId::Telegraph, anchor);
            }
            if ctx.timer() >= s.ticks(TELEGRAPH) {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            let window = s.ticks(FIRE_WINDOW);
            if ctx.timer() % s.ticks(ROW_INTERVAL) == 0 && ctx.timer() < window {
                let memory = &ctx.state.attack_memory;
                let (anchor, direction) = (memory.anchor, memory.direction);
                for origin in sweep_row(anchor, direction, s.count(7, 2), SPACING) {
                    ctx.fire(origin, direction * s.speed(SPEED), ProjectileStyle::Shard);
                }
                if ctx.timer() == 0 {
                    ctx.cue(CueId::Volley, anchor);
                }
            }
            if ctx.timer() >= window {
                ctx.state.enter_sub_phase(2);
            }
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
        _ => ctx.overrun(AttackKind::LineSweep),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::run_to_end;
    use super::*;

    #[test]
    fn test_row_is_centred_and_perpendicular() {
        let row = sweep_row(Vec2::ZERO, Vec2::new(1.0, 0.0), 3, 10.0);
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|p| p.x.abs() < 1e-5));
        assert!((row[0].y + row[2].y).abs() < 1e-5);
        assert!((row[0].distance(row[2]) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_rows_travel_toward_target() {
        let run = run_to_end(AttackKind::LineSweep, 0, 0.0, true);
        // 30-tick window, a row every 3 ticks, 7 wide
        assert_eq!(run.spawner.projectiles.len(), 10 * 7);
        let (origin, velocity, _, _) = run.spawner.projectiles[3];
        let toward = origin.direction_to(Vec2::ZERO);
        assert!(velocity.normalize_or_zero().distance(toward) < 0.2);
    }

    #[test]
    fn test_rows_come_faster_with_aggression() {
        let calm = run_to_end(AttackKind::LineSweep, 0, 0.0, true);
        let furious = run_to_end(AttackKind::LineSweep, 0, 1.0, true);
        // Shorter window, but rows every 2 ticks instead of 3
        assert_eq!(furious.spawner.projectiles.len() % 7, 0);
        assert!(furious.spawner.projectiles.len() > calm.spawner.projectiles.len());
    }

    #[test]
    fn test_wider_rows_at_higher_tier() {
        let run = run_to_end(AttackKind::LineSweep, 2, 0.0, true);
        let rows = run.spawner.projectiles.len() / 11;
        assert_eq!(run.spawner.projectiles.len() % 11, 0);
        assert!(rows > 0);
    }
}
