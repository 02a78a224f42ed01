//! Target capability interface
//!
//! Whatever "controllable avatar" type the host has, the core only needs
//! these operations on it.

use crate::combat::StatusId;
use crate::ecs::Vec2;

/// An opponent the boss can target
pub trait Avatar {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    /// False once defeated or disconnected
    fn is_active(&self) -> bool;
    fn apply_impulse(&mut self, impulse: Vec2);
    fn apply_status(&mut self, status: StatusId, duration: u32);
    fn health(&self) -> u32;
    /// Returns damage actually dealt
    fn apply_damage(&mut self, amount: u32) -> u32;
}

/// Read-only copy of the parts of a target attacks aim with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl TargetView {
    pub fn of(avatar: &dyn Avatar) -> Self {
        Self {
            position: avatar.position(),
            velocity: avatar.velocity(),
        }
    }

    /// Where the target will be in `ticks` if it keeps moving straight
    pub fn lead(&self, ticks: f32) -> Vec2 {
        self.position + self.velocity * ticks
    }
}
