//! Boss physical body
//!
//! Position, motion, health and the multipliers awakening raises. The host
//! owns this alongside the controller and may apply damage to it at any time.

use serde::{Deserialize, Serialize};

use crate::ecs::Vec2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossBody {
    pub position: Vec2,
    /// World units per tick, integrated by the controller
    pub velocity: Vec2,
    pub health_current: u64,
    pub health_max: u64,
    /// Damage is ignored while set
    pub invulnerable: bool,
    /// Applied to every projectile the boss fires
    pub damage_mult: f32,
    /// Incoming damage is divided by this
    pub defense_mult: f32,
}

impl BossBody {
    pub fn new(position: Vec2, health_max: u64) -> Self {
        let health_max = health_max.max(1);
        Self {
            position,
            velocity: Vec2::ZERO,
            health_current: health_max,
            health_max,
            invulnerable: false,
            damage_mult: 1.0,
            defense_mult: 1.0,
        }
    }

    /// Apply damage, returning the amount actually removed.
    ///
    /// A no-op while invulnerable.
    pub fn take_damage(&mut self, amount: u64) -> u64 {
        if self.invulnerable || amount == 0 {
            return 0;
        }
        let scaled = ((amount as f64 / self.defense_mult.max(0.01) as f64).ceil() as u64).max(1);
        let actual = scaled.min(self.health_current);
        self.health_current -= actual;
        actual
    }

    pub fn heal_to_full(&mut self) {
        self.health_current = self.health_max;
    }

    pub fn is_depleted(&self) -> bool {
        self.health_current == 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health_current as f32 / self.health_max as f32
    }

    /// Move instantly, dropping all momentum
    pub fn teleport(&mut self, to: Vec2) {
        self.position = to;
        self.velocity = Vec2::ZERO;
    }

    /// Steer velocity toward `target_velocity` by `rate` (0..1)
    pub fn steer(&mut self, target_velocity: Vec2, rate: f32) {
        self.velocity = self.velocity.lerp(target_velocity, rate.clamp(0.0, 1.0));
    }

    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut body = BossBody::new(Vec2::ZERO, 100);
        body.invulnerable = true;
        assert_eq!(body.take_damage(50), 0);
        assert_eq!(body.health_current, 100);
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut body = BossBody::new(Vec2::ZERO, 100);
        assert_eq!(body.take_damage(250), 100);
        assert!(body.is_depleted());
    }

    #[test]
    fn test_defense_reduces_damage() {
        let mut body = BossBody::new(Vec2::ZERO, 100);
        body.defense_mult = 2.0;
        assert_eq!(body.take_damage(10), 5);
        assert_eq!(body.take_damage(1), 1);
    }

    #[test]
    fn test_teleport_zeroes_velocity() {
        let mut body = BossBody::new(Vec2::ZERO, 10);
        body.velocity = Vec2::new(5.0, 5.0);
        body.teleport(Vec2::new(100.0, 0.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position, Vec2::new(100.0, 0.0));
    }
}
