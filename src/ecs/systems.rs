//! ECS Systems
//!
//! Per-tick systems over the arena's spawned entities.

use hecs::{Entity, World};

use crate::ecs::{Lifetime, Position, Projectile, Vec2, Velocity};

/// Projectiles farther than this from the arena centre are culled
pub const ARENA_RADIUS: f32 = 6000.0;

/// Integrate velocity into position for everything that moves
pub fn move_entities(world: &mut World) {
    for (_, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0;
    }
}

/// Count lifetimes down and despawn whatever ran out. Returns the number
/// despawned.
pub fn expire_lifetimes(world: &mut World) -> usize {
    let mut expired: Vec<Entity> = Vec::new();
    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining = lifetime.remaining.saturating_sub(1);
        if lifetime.remaining == 0 {
            expired.push(entity);
        }
    }

    for entity in &expired {
        let _ = world.despawn(*entity);
    }
    expired.len()
}

/// Despawn projectiles that left the arena
pub fn cull_projectiles(world: &mut World, center: Vec2) -> usize {
    let stray: Vec<Entity> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (pos, _))| pos.0.distance(center) > ARENA_RADIUS)
        .map(|(entity, _)| entity)
        .collect();

    for entity in &stray {
        let _ = world.despawn(*entity);
    }
    stray.len()
}

/// Remove every projectile overlapping a circle and return their damage
pub fn collect_hits(world: &mut World, position: Vec2, radius: f32) -> Vec<u32> {
    let hits: Vec<(Entity, u32)> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (pos, projectile))| pos.0.distance(position) <= radius + projectile.radius())
        .map(|(entity, (_, projectile))| (entity, projectile.damage))
        .collect();

    hits.into_iter()
        .map(|(entity, damage)| {
            let _ = world.despawn(entity);
            damage
        })
        .collect()
}
