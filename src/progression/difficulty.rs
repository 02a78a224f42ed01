//! World difficulty modes
//!
//! Applied once when the boss spawns; the in-fight escalation lives in
//! `encounter::scaling`.

use serde::{Deserialize, Serialize};

/// Global world difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Normal,
    Expert,
    Master,
}

impl Difficulty {
    /// Health multiplier for bosses
    pub fn boss_health_mult(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Expert => 1.6,
            Difficulty::Master => 2.2,
        }
    }

    /// Damage multiplier for boss projectiles
    pub fn boss_damage_mult(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Expert => 1.5,
            Difficulty::Master => 1.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Expert => "Expert",
            Difficulty::Master => "Master",
        }
    }

    /// Parse a difficulty name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "expert" => Some(Difficulty::Expert),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }

    /// Scale a base health pool, never below 1
    pub fn scale_health(&self, base: u64) -> u64 {
        ((base as f64 * self.boss_health_mult() as f64).round() as u64).max(1)
    }
}
