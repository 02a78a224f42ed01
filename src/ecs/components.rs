//! ECS Components
//!
//! Shared 2D math plus the components used by the reference arena host.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::host::{EffectKind, ProjectileStyle, Rgb};

// ============================================================================
// Math
// ============================================================================

/// A 2D vector in world units (pixels). Positive Y points down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const UP: Vec2 = Vec2 { x: 0.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, 0 = +X)
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Normalized copy, or zero for a (near) zero vector
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::ZERO
        } else {
            self / len
        }
    }

    /// Angle of this vector in radians
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Perpendicular (rotated a quarter turn)
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Direction from `self` toward `other`
    pub fn direction_to(self, other: Vec2) -> Self {
        (other - self).normalize_or_zero()
    }

    pub fn clamp_length(self, max: f32) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ============================================================================
// Position & Movement
// ============================================================================

/// Position in the arena
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Velocity in world units per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

// ============================================================================
// Spawned entities
// ============================================================================

/// A hostile projectile spawned by the boss
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub damage: u32,
    pub style: ProjectileStyle,
}

impl Projectile {
    /// Collision radius for this projectile's style
    pub fn radius(&self) -> f32 {
        match self.style {
            ProjectileStyle::Bolt => 10.0,
            ProjectileStyle::Star => 14.0,
            ProjectileStyle::Shard => 8.0,
            ProjectileStyle::Orb => 22.0,
        }
    }
}

/// Purely cosmetic effect, tracked only so it can expire
#[derive(Debug, Clone, Copy)]
pub struct VisualEffect {
    pub kind: EffectKind,
    pub color: Rgb,
    pub scale: f32,
}

/// Ticks until the entity is despawned
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: u32,
}

impl Lifetime {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }
}
