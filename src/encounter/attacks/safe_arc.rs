//! Safe-arc radial: dense rings with one open wedge the target must find.
//! The wedge narrows as the tier climbs.

use std::f32::consts::{PI, TAU};

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::{AttackContext, AttackStep};

const CHARGE: u32 = 120;
const GAP: u32 = 40;
const RECOVER: u32 = 45;
const COUNT: u32 = 36;
const SPEED: f32 = 7.5;
const BASE_WIDTH_DEG: f32 = 40.0;
const WIDTH_PER_TIER_DEG: f32 = 8.0;
const MIN_WIDTH_DEG: f32 = 16.0;
/// Largest nudge of the wedge centre, as a fraction of the wedge width
const MAX_NUDGE: f32 = 0.125;

/// Width of the open wedge at `tier`, radians
pub fn safe_arc_width(tier: u8) -> f32 {
    (BASE_WIDTH_DEG - WIDTH_PER_TIER_DEG * tier as f32)
        .max(MIN_WIDTH_DEG)
        .to_radians()
}

/// Smallest absolute difference between two angles
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        TAU - d
    } else {
        d
    }
}

/// Angles of a `count`-way ring with the wedge of `width` centred on
/// `bearing` left open
pub fn safe_arc_angles(count: u32, bearing: f32, width: f32) -> Vec<f32> {
    (0..count)
        .map(|i| bearing + PI + i as f32 * TAU / count as f32)
        .filter(|&angle| angular_distance(angle, bearing) > width / 2.0)
        .collect()
}

/// One ring around the boss with the gap facing the stored bearing
pub(super) fn fire_safe_arc(ctx: &mut AttackContext<'_, '_>, count: u32) {
    let s = ctx.scaling;
    let center = ctx.body.position;
    let width = safe_arc_width(s.tier);
    for angle in safe_arc_angles(count, ctx.state.attack_memory.bearing, width) {
        ctx.fire(center, Vec2::from_angle(angle) * s.speed(SPEED), ProjectileStyle::Star);
    }
    ctx.cue(CueId::Volley, center);
}

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;
    let volleys = 1 + s.tier as u32 / 2;

    match ctx.state.sub_phase {
        0 => {
            ctx.body.steer(Vec2::ZERO, 0.15);
            let charge = s.ticks(CHARGE);
            if ctx.timer() == 0 {
                let position = ctx.body.position;
                ctx.cue(CueId::Charge, position);
            }
            if ctx.timer() % 6 == 0 {
                ctx.converge(360.0, ctx.timer() as f32 / charge as f32, 12);
            }
            if ctx.timer() >= charge {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        1 => {
            if ctx.timer() == 0 {
                // Wedge opens toward the target, nudged a little each volley
                // but never far enough to uncover the target
                let toward = (ctx.aim.position - ctx.body.position).angle();
                let nudge = (ctx.random_angle() / TAU * 2.0 - 1.0) * MAX_NUDGE * safe_arc_width(s.tier);
                ctx.memory().bearing = toward + nudge;

                let marker = ctx.body.position + Vec2::from_angle(ctx.state.attack_memory.bearing) * 160.0;
                ctx.effect(EffectKind::Marker, marker, 0.8, s.ticks(GAP));
                fire_safe_arc(ctx, COUNT);
                ctx.memory().repeats += 1;
            }
            if ctx.timer() >= s.ticks(GAP) {
                if ctx.state.attack_memory.repeats < volleys {
                    ctx.state.enter_sub_phase(1);
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
        _ => ctx.overrun(AttackKind::SafeArcRadial),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{run_to_end, run_to_end_seeded};
    use super::*;

    #[test]
    fn test_width_narrows_with_floor() {
        assert!((safe_arc_width(0) - 40f32.to_radians()).abs() < 1e-5);
        assert!(safe_arc_width(1) < safe_arc_width(0));
        assert!((safe_arc_width(3) - 16f32.to_radians()).abs() < 1e-5);
        assert_eq!(safe_arc_width(9), safe_arc_width(3));
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert!(angular_distance(0.1, TAU - 0.1) - 0.2 < 1e-5);
        assert!((angular_distance(PI, 0.0) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_gap_faces_bearing() {
        let width = safe_arc_width(0);
        let angles = safe_arc_angles(36, 1.0, width);
        assert!(angles.len() < 36);
        assert!(angles.iter().all(|&a| angular_distance(a, 1.0) > width / 2.0));
        // Everything outside the wedge is still covered
        assert!(angles.iter().any(|&a| angular_distance(a, 1.0 + PI) < 0.01));
    }

    #[test]
    fn test_volleys_by_tier() {
        let run = run_to_end(AttackKind::SafeArcRadial, 0, 0.0, true);
        assert_eq!(run.state.attack_memory.repeats, 1);
        assert_eq!(run.audio.count(CueId::Volley), 1);

        let run = run_to_end(AttackKind::SafeArcRadial, 2, 0.0, true);
        assert_eq!(run.state.attack_memory.repeats, 2);
    }

    #[test]
    fn test_target_stands_in_gap() {
        let run = run_to_end(AttackKind::SafeArcRadial, 0, 0.0, true);
        let (origin, _, _, _) = run.spawner.projectiles[0];
        let toward = (Vec2::ZERO - origin).angle();
        for (_, velocity, _, _) in &run.spawner.projectiles {
            assert!(angular_distance(velocity.angle(), toward) > 0.0);
        }
        let closest = run
            .spawner
            .projectiles
            .iter()
            .map(|(_, v, _, _)| angular_distance(v.angle(), toward))
            .fold(f32::MAX, f32::min);
        assert!(closest > safe_arc_width(0) / 2.0 - MAX_NUDGE * safe_arc_width(0) - 1e-4);
    }

    #[test]
    fn test_narrowest_gap_still_covers_target() {
        let width = safe_arc_width(3);
        let clearance = width / 2.0 - MAX_NUDGE * width;
        for seed in 0..200 {
            let run = run_to_end_seeded(AttackKind::SafeArcRadial, 3, 1.0, true, seed);
            assert!(!run.spawner.projectiles.is_empty());
            for (origin, velocity, _, _) in &run.spawner.projectiles {
                let toward = (Vec2::ZERO - *origin).angle();
                let off = angular_distance(velocity.angle(), toward);
                assert!(off > 3f32.to_radians(), "seed {} fired {:.3} rad off target", seed, off);
                assert!(off >= clearance - 1e-4);
            }
        }
    }
}
