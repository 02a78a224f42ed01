//! Projectile and visual effect spawning

use serde::{Deserialize, Serialize};

use crate::ecs::Vec2;

/// Opaque handle to a spawned projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileHandle(pub u64);

/// Projectile archetypes the host knows how to simulate and draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileStyle {
    /// Small fast aimed shot
    Bolt,
    /// Radial volley star
    Star,
    /// Dense line-sweep shard
    Shard,
    /// Slow heavy orb (gravity well, finale)
    Orb,
}

/// Cosmetic effects requested by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Warning marker for an upcoming hit
    Telegraph,
    /// Warning line between two points
    WarningLine,
    /// Converging charge particle
    Charge,
    /// Outward burst
    Burst,
    /// Teleport departure flash
    Departure,
    /// Teleport arrival flash
    Arrival,
    /// Persistent constellation star marker
    Marker,
    /// Gravity well core
    Well,
    /// Awakening/dying spectacle
    Rebirth,
}

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fire-and-forget spawning of projectiles and effects
pub trait Spawner {
    fn spawn_projectile(
        &mut self,
        origin: Vec2,
        velocity: Vec2,
        damage: u32,
        style: ProjectileStyle,
    ) -> ProjectileHandle;

    fn spawn_visual_effect(
        &mut self,
        kind: EffectKind,
        position: Vec2,
        color: Rgb,
        scale: f32,
        lifetime: u32,
    );
}

/// Spawner that discards everything, counting projectiles only
#[derive(Debug, Default)]
pub struct NullSpawner {
    pub projectiles: u64,
    pub effects: u64,
}

impl Spawner for NullSpawner {
    fn spawn_projectile(
        &mut self,
        _origin: Vec2,
        _velocity: Vec2,
        _damage: u32,
        _style: ProjectileStyle,
    ) -> ProjectileHandle {
        self.projectiles += 1;
        ProjectileHandle(self.projectiles)
    }

    fn spawn_visual_effect(&mut self, _: EffectKind, _: Vec2, _: Rgb, _: f32, _: u32) {
        self.effects += 1;
    }
}
