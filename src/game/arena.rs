//! Reference arena
//!
//! A `hecs` world that receives the boss's projectiles and effects, moves
//! them, expires them and resolves hits against the duelist.

use hecs::World;

use crate::ecs::{
    collect_hits, cull_projectiles, expire_lifetimes, move_entities, Lifetime, Position, Projectile,
    Vec2, Velocity, VisualEffect,
};
use crate::host::{EffectKind, ProjectileHandle, ProjectileStyle, Rgb, Spawner};

/// Projectiles despawn after this many ticks if nothing else removes them
const PROJECTILE_LIFETIME: u32 = 600;

/// Arena state for one fight
pub struct Arena {
    world: World,
    next_handle: u64,
    projectiles_spawned: u64,
    effects_spawned: u64,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            next_handle: 1,
            projectiles_spawned: 0,
            effects_spawned: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Projectiles currently alive
    pub fn live_projectiles(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    pub fn projectiles_spawned(&self) -> u64 {
        self.projectiles_spawned
    }

    pub fn effects_spawned(&self) -> u64 {
        self.effects_spawned
    }

    /// Move, expire and cull everything for one tick
    pub fn step(&mut self, center: Vec2) {
        move_entities(&mut self.world);
        expire_lifetimes(&mut self.world);
        cull_projectiles(&mut self.world, center);
    }

    /// Damage of every projectile touching a circle; those projectiles are consumed
    pub fn hits_on(&mut self, position: Vec2, radius: f32) -> Vec<u32> {
        collect_hits(&mut self.world, position, radius)
    }

    fn handle(&mut self) -> ProjectileHandle {
        let handle = ProjectileHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner for Arena {
    fn spawn_projectile(&mut self, origin: Vec2, velocity: Vec2, damage: u32, style: ProjectileStyle) -> ProjectileHandle {
        self.world.spawn((
            Position(origin),
            Velocity(velocity),
            Projectile { damage, style },
            Lifetime::new(PROJECTILE_LIFETIME),
        ));
        self.projectiles_spawned += 1;
        self.handle()
    }

    fn spawn_visual_effect(&mut self, kind: EffectKind, position: Vec2, color: Rgb, scale: f32, lifetime: u32) {
        self.world.spawn((
            Position(position),
            VisualEffect { kind, color, scale },
            Lifetime::new(lifetime.max(1)),
        ));
        self.effects_spawned += 1;
    }
}
