//! Constellation: stars are placed one by one around the target, joined into
//! a closed figure, and every edge of the figure then sheds shards.

use rand::Rng;

use crate::audio::CueId;
use crate::ecs::Vec2;
use crate::encounter::state::AttackKind;
use crate::host::{EffectKind, ProjectileStyle};

use super::{AttackContext, AttackStep};

const CHARGE: u32 = 90;
const PAUSE: u32 = 45;
const RECOVER: u32 = 40;
const SCATTER_RADIUS: f32 = 420.0;
/// Never place a star right on top of the target
const MIN_SCATTER: f32 = 120.0;
const PER_EDGE: u32 = 6;
const SPEED: f32 = 12.0;

/// Edges of the closed figure through `markers`, in placement order
pub fn constellation_edges(markers: &[Vec2]) -> Vec<(Vec2, Vec2)> {
    if markers.len() < 2 {
        return Vec::new();
    }
    markers
        .iter()
        .enumerate()
        .map(|(i, &a)| (a, markers[(i + 1) % markers.len()]))
        .collect()
}

/// `count` evenly spaced points along an edge, ends excluded
pub fn edge_points(a: Vec2, b: Vec2, count: u32) -> Vec<Vec2> {
    (0..count)
        .map(|i| a.lerp(b, (i as f32 + 0.5) / count as f32))
        .collect()
}

pub fn tick(ctx: &mut AttackContext<'_, '_>) -> AttackStep {
    let s = ctx.scaling;
    let stars = s.count(5, 1);

    match ctx.state.sub_phase {
        // Place stars progressively over the charge
        0 => {
            ctx.body.steer(Vec2::ZERO, 0.15);
            let charge = s.ticks(CHARGE);
            if ctx.timer() == 0 {
                let position = ctx.body.position;
                ctx.cue(CueId::Charge, position);
            }

            let due = ((ctx.timer() + 1) * stars / charge.max(1)).min(stars) as usize;
            while ctx.state.attack_memory.markers.len() < due {
                let angle = ctx.random_angle();
                let distance = ctx.rng.gen_range(MIN_SCATTER..SCATTER_RADIUS);
                let star = ctx.aim.position + Vec2::from_angle(angle) * distance;
                ctx.memory().markers.push(star);
                ctx.effect(EffectKind::Marker, star, 1.0, charge + s.ticks(PAUSE));
            }

            if ctx.timer() >= charge {
                ctx.state.enter_sub_phase(1);
            }
            AttackStep::Continue
        }
        // Draw the figure
        1 => {
            if ctx.timer() == 0 {
                let lifetime = s.ticks(PAUSE);
                for (a, b) in constellation_edges(&ctx.state.attack_memory.markers) {
                    for point in edge_points(a, b, 3) {
                        ctx.fx.effect(EffectKind::WarningLine, point, ctx.config.palette.warning, 0.5, lifetime);
                    }
                }
                let position = ctx.body.position;
                ctx.cue(CueId::Telegraph, position);
            }
            if ctx.timer() >= s.ticks(PAUSE) {
                ctx.state.enter_sub_phase(2);
            }
            AttackStep::Continue
        }
        // Every edge fires at once
        2 => {
            let aim = ctx.aim.position;
            for (a, b) in constellation_edges(&ctx.state.attack_memory.markers) {
                let fallback = (b - a).perp().normalize_or_zero();
                for point in edge_points(a, b, PER_EDGE) {
                    let mut direction = point.direction_to(aim);
                    if direction == Vec2::ZERO {
                        direction = fallback;
                    }
                    ctx.fire(point, direction * s.speed(SPEED), ProjectileStyle::Shard);
                }
            }
            ctx.cue(CueId::Volley, aim);
            ctx.state.enter_sub_phase(3);
            AttackStep::Continue
        }
        3 => {
            if ctx.timer() >= s.ticks(RECOVER) {
                ctx.memory().markers.clear();
                AttackStep::End
            } else {
                AttackStep::Continue
            }
        }
        _ => ctx.overrun(AttackKind::Constellation),
    }
}
