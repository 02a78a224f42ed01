//! Encounter configuration
//!
//! Tuning values are base constants; attacks and phases scale them through
//! `Scaling` at runtime. Durations are in ticks (60 per second), distances
//! in world units.

use serde::{Deserialize, Serialize};

use crate::encounter::AttackKind;
use crate::host::Rgb;

use super::loader::ConfigError;

/// Complete tuning for one Warden encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Entrance sequence length
    pub spawn_duration: u32,
    /// Repositioning window after each attack
    pub reposition_duration: u32,
    /// Idle cooldown seeded after repositioning
    pub base_attack_cooldown: u32,
    /// Cooldown before the very first attack
    pub first_attack_cooldown: u32,
    /// Cooldown between chained attacks inside CosmicWrath
    pub wrath_attack_cooldown: u32,
    /// Health fractions at or below which tiers 1, 2 and 3 begin
    pub tier_thresholds: [f32; 3],
    /// Fight length at which aggression saturates
    pub max_aggression_ticks: u32,
    /// Aggression the second life starts from
    pub awakened_aggression_seed: f32,
    /// Base projectile damage before the body's damage multiplier
    pub projectile_damage: u32,
    pub ranges: RangePolicy,
    pub hover: HoverParams,
    pub awakening: AwakeningParams,
    pub dying: DyingParams,
    pub departure: DepartureParams,
    pub enraged: EnragedParams,
    pub palette: Palette,
    /// Tier-gated attack pool
    pub attack_pool: Vec<PoolEntry>,
}

/// Distance bands enforced against the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangePolicy {
    pub enrage_distance: f32,
    pub teleport_distance: f32,
    /// Meter gained per tick while beyond enrage distance
    pub enrage_gain: u32,
    /// Meter lost per tick while in range
    pub enrage_decay: u32,
    /// Meter value that forces Enraged
    pub enrage_threshold: u32,
    /// How far from the target a rescue teleport lands
    pub teleport_arrival_offset: f32,
}

/// Idle hovering around the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverParams {
    pub height: f32,
    pub sway_x: f32,
    pub sway_y: f32,
    /// Radians per tick
    pub freq_x: f32,
    pub freq_y: f32,
    pub acceleration: f32,
    pub max_speed: f32,
}

/// Scripted awakening timeline and its rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwakeningParams {
    /// Collapse, rising energy, form change, rebirth burst
    pub stage_durations: [u32; 4],
    pub damage_boost: f32,
    pub defense_boost: f32,
    /// Health the body is clamped to when the first death is intercepted
    pub min_alive_health: u64,
}

/// Final death timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DyingParams {
    pub unravel_duration: u32,
    pub final_burst_duration: u32,
}

/// Passive descent when no target remains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartureParams {
    pub descent_acceleration: f32,
    pub max_descent_speed: f32,
    pub duration: u32,
}

/// Behaviour while Enraged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnragedParams {
    pub chase_speed: f32,
    pub fire_interval: u32,
    pub bolt_speed: f32,
    pub damage_mult: f32,
}

/// Colours handed to the effect collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub warning: Rgb,
    pub wrath: Rgb,
    pub awakened: Rgb,
}

/// One attack and the tier from which it may be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub attack: AttackKind,
    pub min_tier: u8,
}

impl PoolEntry {
    pub const fn new(attack: AttackKind, min_tier: u8) -> Self {
        Self { attack, min_tier }
    }
}

/// The Warden's attack pool: each tier only adds options
pub fn default_attack_pool() -> Vec<PoolEntry> {
    vec![
        PoolEntry::new(AttackKind::TeleportStrike, 0),
        PoolEntry::new(AttackKind::Barrage, 0),
        PoolEntry::new(AttackKind::RingBurst, 0),
        PoolEntry::new(AttackKind::ChainCombo, 1),
        PoolEntry::new(AttackKind::LineSweep, 1),
        PoolEntry::new(AttackKind::Constellation, 2),
        PoolEntry::new(AttackKind::SafeArcRadial, 2),
        PoolEntry::new(AttackKind::GravityWell, 2),
        PoolEntry::new(AttackKind::Finale, 3),
    ]
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            spawn_duration: 120,
            reposition_duration: 40,
            base_attack_cooldown: 90,
            first_attack_cooldown: 60,
            wrath_attack_cooldown: 12,
            tier_thresholds: [0.7, 0.4, 0.2],
            max_aggression_ticks: 60 * 60 * 3,
            awakened_aggression_seed: 0.5,
            projectile_damage: 60,
            ranges: RangePolicy::default(),
            hover: HoverParams::default(),
            awakening: AwakeningParams::default(),
            dying: DyingParams::default(),
            departure: DepartureParams::default(),
            enraged: EnragedParams::default(),
            palette: Palette::default(),
            attack_pool: default_attack_pool(),
        }
    }
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            enrage_distance: 1600.0,
            teleport_distance: 3200.0,
            enrage_gain: 1,
            enrage_decay: 4,
            enrage_threshold: 180,
            teleport_arrival_offset: 240.0,
        }
    }
}

impl Default for HoverParams {
    fn default() -> Self {
        Self {
            height: 300.0,
            sway_x: 160.0,
            sway_y: 40.0,
            freq_x: 0.035,
            freq_y: 0.05,
            acceleration: 0.08,
            max_speed: 14.0,
        }
    }
}

impl Default for AwakeningParams {
    fn default() -> Self {
        Self {
            stage_durations: [90, 90, 60, 60],
            damage_boost: 1.25,
            defense_boost: 1.2,
            min_alive_health: 1,
        }
    }
}

impl Default for DyingParams {
    fn default() -> Self {
        Self {
            unravel_duration: 150,
            final_burst_duration: 30,
        }
    }
}

impl Default for DepartureParams {
    fn default() -> Self {
        Self {
            descent_acceleration: 0.3,
            max_descent_speed: 24.0,
            duration: 180,
        }
    }
}

impl Default for EnragedParams {
    fn default() -> Self {
        Self {
            chase_speed: 22.0,
            fire_interval: 20,
            bolt_speed: 15.0,
            damage_mult: 1.5,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb(120, 90, 255),
            secondary: Rgb(255, 220, 120),
            warning: Rgb(255, 80, 80),
            wrath: Rgb(255, 60, 160),
            awakened: Rgb(80, 240, 255),
        }
    }
}

impl EncounterConfig {
    /// Attacks selectable at `tier`, in pool order
    pub fn pool_for_tier(&self, tier: u8) -> Vec<AttackKind> {
        self.attack_pool
            .iter()
            .filter(|entry| entry.min_tier <= tier)
            .map(|entry| entry.attack)
            .collect()
    }

    /// Total length of the awakening timeline
    pub fn awakening_duration(&self) -> u32 {
        self.awakening.stage_durations.iter().sum()
    }

    /// Reject configurations the controller cannot run safely
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_for_tier(0).is_empty() {
            return Err(ConfigError::Invalid("tier 0 attack pool is empty".into()));
        }
        if let Some(entry) = self.attack_pool.iter().find(|e| e.min_tier > 3) {
            return Err(ConfigError::Invalid(format!(
                "{:?} gated behind tier {}, highest tier is 3",
                entry.attack, entry.min_tier
            )));
        }
        for (i, entry) in self.attack_pool.iter().enumerate() {
            if self.attack_pool[..i].iter().any(|e| e.attack == entry.attack) {
                return Err(ConfigError::Invalid(format!(
                    "{:?} appears more than once in the attack pool",
                    entry.attack
                )));
            }
        }

        let [t1, t2, t3] = self.tier_thresholds;
        let in_unit = |t: f32| t > 0.0 && t < 1.0;
        if !(in_unit(t1) && in_unit(t2) && in_unit(t3) && t1 > t2 && t2 > t3) {
            return Err(ConfigError::Invalid(format!(
                "tier thresholds must be strictly decreasing in (0, 1), got {:?}",
                self.tier_thresholds
            )));
        }

        if self.ranges.teleport_distance <= self.ranges.enrage_distance {
            return Err(ConfigError::Invalid(
                "teleport distance must exceed enrage distance".into(),
            ));
        }
        if self.ranges.enrage_threshold == 0 || self.ranges.enrage_gain == 0 {
            return Err(ConfigError::Invalid(
                "enrage threshold and gain must be positive".into(),
            ));
        }
        if self.max_aggression_ticks == 0 {
            return Err(ConfigError::Invalid("max_aggression_ticks must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.awakened_aggression_seed) {
            return Err(ConfigError::Invalid(
                "awakened aggression seed must be within [0, 1]".into(),
            ));
        }
        if self.awakening.min_alive_health == 0 {
            return Err(ConfigError::Invalid("min_alive_health must be at least 1".into()));
        }

        Ok(())
    }
}
