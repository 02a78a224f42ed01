//! Scripted duelist
//!
//! A stand-in opponent for headless fights. It moves by a fixed behaviour,
//! takes hits and status effects, builds momentum while moving fast, and
//! spends it on burst damage against the boss.

use std::f32::consts::FRAC_PI_2;

use crate::combat::{StatusId, StatusEffects};
use crate::ecs::Vec2;
use crate::host::Avatar;
use crate::progression::{Momentum, MomentumTier};

/// Collision radius used when resolving projectile hits
pub const DUELIST_RADIUS: f32 = 20.0;

const BASE_SPEED: f32 = 9.0;
const ORBIT_RADIUS: f32 = 500.0;
const KITE_DISTANCE: f32 = 1200.0;
/// Fraction of velocity kept each tick, so impulses fade out
const DRAG: f32 = 0.85;
/// Furthest the duelist can reach the boss from
const WEAPON_RANGE: f32 = 1500.0;
/// Overdrive burst, as a multiple of one tick's damage
const BURST_MULT: u64 = 60;

/// How the duelist moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Behavior {
    /// Circle the boss at mid range
    #[default]
    Orbit,
    /// Hold a long distance from the boss
    Kite,
    /// Run straight away
    Flee,
    /// Stand still
    Idle,
}

#[derive(Debug, Clone)]
pub struct Duelist {
    position: Vec2,
    velocity: Vec2,
    health: u32,
    max_health: u32,
    behavior: Behavior,
    statuses: StatusEffects,
    momentum: Momentum,
    /// Damage per tick dealt to the boss while in range
    damage_per_tick: u64,
}

impl Duelist {
    pub fn new(position: Vec2, behavior: Behavior, max_health: u32, damage_per_tick: u64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            health: max_health,
            max_health,
            behavior,
            statuses: StatusEffects::default(),
            momentum: Momentum::default(),
            damage_per_tick,
        }
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    /// Run one tick of movement and status effects relative to the boss
    pub fn update(&mut self, boss: Vec2) {
        if !self.is_active() {
            return;
        }

        let burn = self.statuses.tick();
        if burn.damage_dealt > 0 {
            self.apply_damage(burn.damage_dealt);
        }

        let speed = BASE_SPEED * self.statuses.speed_mult();
        let away = boss.direction_to(self.position);
        let away = if away == Vec2::ZERO { Vec2::new(1.0, 0.0) } else { away };
        let distance = self.position.distance(boss);

        let desired = match self.behavior {
            Behavior::Orbit => {
                let tangent = away.rotate(FRAC_PI_2);
                let correction = away * ((ORBIT_RADIUS - distance) / ORBIT_RADIUS).clamp(-1.0, 1.0);
                (tangent + correction).normalize_or_zero() * speed
            }
            Behavior::Kite => {
                let correction = ((KITE_DISTANCE - distance) / 200.0).clamp(-1.0, 1.0);
                away * correction * speed
            }
            Behavior::Flee => away * speed,
            Behavior::Idle => Vec2::ZERO,
        };

        self.velocity = self.velocity * DRAG + desired * (1.0 - DRAG);
        self.position += self.velocity;
        self.momentum.update(self.velocity.length());
    }

    /// Damage dealt to the boss this tick, including any momentum burst
    pub fn attack(&mut self, boss: Vec2) -> u64 {
        if !self.is_active() || self.position.distance(boss) > WEAPON_RANGE {
            return 0;
        }
        if self.momentum.spend(MomentumTier::Overdrive) {
            log::debug!("Duelist spends Overdrive momentum");
            return self.damage_per_tick * BURST_MULT;
        }
        self.damage_per_tick
    }
}

impl Avatar for Duelist {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn is_active(&self) -> bool {
        self.health > 0
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    fn apply_status(&mut self, status: StatusId, duration: u32) {
        self.statuses.apply(status, duration);
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn apply_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        if dealt > 0 && self.health == 0 {
            log::info!("The duelist falls");
        }
        dealt
    }
}
