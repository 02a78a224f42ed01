//! Cue definitions and mappings
//!
//! Defines all sound events the encounter can request.

use serde::{Deserialize, Serialize};

/// Cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueId {
    // === Encounter ===
    /// Boss entrance roar
    Roar,
    /// Difficulty tier announced
    PhaseShift,
    /// Enrage triggered
    Enrage,
    /// CosmicWrath entered
    Wrath,

    // === Attacks ===
    /// Warning before an attack commits
    Telegraph,
    /// Short-range teleport
    Teleport,
    /// Dash impulse
    Dash,
    /// Projectile volley fired
    Volley,
    /// Charge build-up
    Charge,
    /// Gravity well hum
    GravityHum,

    // === Lifecycle ===
    /// Collapse at the start of awakening
    Collapse,
    /// Rebirth burst at the end of awakening
    Rebirth,
    /// Final death burst
    Death,
}

/// Cue categories for volume mixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueCategory {
    Encounter,
    Attack,
    Lifecycle,
}

impl CueId {
    /// Get the category for this cue
    pub fn category(&self) -> CueCategory {
        match self {
            CueId::Roar | CueId::PhaseShift | CueId::Enrage | CueId::Wrath => {
                CueCategory::Encounter
            }
            CueId::Collapse | CueId::Rebirth | CueId::Death => CueCategory::Lifecycle,
            _ => CueCategory::Attack,
        }
    }

    /// Default volume for this cue (0.0 - 1.0)
    pub fn default_volume(&self) -> f32 {
        match self {
            CueId::Telegraph | CueId::Charge => 0.5,
            CueId::Volley | CueId::Dash | CueId::Teleport => 0.7,
            CueId::GravityHum => 0.4,
            _ => 1.0,
        }
    }

    /// Default pitch for this cue
    pub fn default_pitch(&self) -> f32 {
        match self {
            CueId::Collapse => 0.6,
            CueId::Death => 0.8,
            CueId::Volley => 1.1,
            _ => 1.0,
        }
    }
}
