//! Status effects system
//!
//! Debuffs the boss applies to avatars (burn, pull, daze) and the container
//! avatars keep them in.

use serde::{Deserialize, Serialize};

/// Status effect identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusId {
    /// Damage over time from cosmic projectiles
    CosmicBurn,
    /// Caught in a gravity well, movement slowed
    Gravitated,
    /// Briefly cannot act after a dash impact
    Dazed,
}

impl StatusId {
    /// Get display name for this effect
    pub fn name(&self) -> &'static str {
        match self {
            StatusId::CosmicBurn => "Cosmic Burn",
            StatusId::Gravitated => "Gravitated",
            StatusId::Dazed => "Dazed",
        }
    }

    /// Damage dealt per tick while active
    pub fn damage_per_tick(&self) -> u32 {
        match self {
            StatusId::CosmicBurn => 1,
            _ => 0,
        }
    }

    /// Movement speed multiplier while active
    pub fn speed_mult(&self) -> f32 {
        match self {
            StatusId::Gravitated => 0.6,
            StatusId::Dazed => 0.0,
            StatusId::CosmicBurn => 1.0,
        }
    }
}

/// A status effect on an avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: StatusId,
    /// Remaining duration in ticks
    pub remaining: u32,
}

/// Result of ticking status effects
#[derive(Debug, Clone, Default)]
pub struct StatusTickResult {
    /// Total damage dealt from DoT effects
    pub damage_dealt: u32,
    /// Whether any effects expired
    pub effects_expired: bool,
}

/// Collection of active status effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Add a status effect, refreshing duration if it is already active
    pub fn apply(&mut self, id: StatusId, duration: u32) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == id) {
            existing.remaining = existing.remaining.max(duration);
        } else {
            self.effects.push(StatusEffect { id, remaining: duration });
        }
    }

    /// Check if an effect is active
    pub fn has(&self, id: StatusId) -> bool {
        self.effects.iter().any(|e| e.id == id)
    }

    /// Combined movement multiplier of all active effects
    pub fn speed_mult(&self) -> f32 {
        self.effects.iter().map(|e| e.id.speed_mult()).product()
    }

    /// Tick all effects once, returning DoT damage
    pub fn tick(&mut self) -> StatusTickResult {
        let mut result = StatusTickResult::default();

        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
            result.damage_dealt += effect.id.damage_per_tick();
        }

        let before_count = self.effects.len();
        self.effects.retain(|e| e.remaining > 0);
        result.effects_expired = self.effects.len() < before_count;

        result
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
