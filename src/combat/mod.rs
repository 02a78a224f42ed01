//! Combat system
//!
//! Status effects the encounter inflicts on its targets.

pub mod status;

pub use status::{StatusId, StatusEffect, StatusEffects, StatusTickResult};
