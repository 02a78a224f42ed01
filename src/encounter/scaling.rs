//! Difficulty tier and aggression
//!
//! Remaining health maps to a discrete tier, elapsed fight time to a
//! continuous aggression scalar. Together they produce the multipliers every
//! attack and phase scales its base constants by.

use crate::data::EncounterConfig;

use super::state::EncounterState;

/// Highest difficulty tier
pub const MAX_TIER: u8 = 3;

/// Tier for a remaining-health fraction. A fraction at or below a threshold
/// has crossed it.
pub fn tier_for_fraction(fraction: f32, thresholds: &[f32; 3]) -> u8 {
    thresholds.iter().filter(|&&t| fraction <= t).count() as u8
}

/// Raise the tier if health has crossed further thresholds.
///
/// Returns the new tier when it changed. The tier never goes down here; only
/// the awakening reset lowers it.
pub fn update_tier(state: &mut EncounterState, fraction: f32, config: &EncounterConfig) -> Option<u8> {
    let tier = tier_for_fraction(fraction, &config.tier_thresholds);
    if tier > state.difficulty_tier {
        log::debug!("Difficulty tier {} -> {}", state.difficulty_tier, tier);
        state.difficulty_tier = tier;
        Some(tier)
    } else {
        None
    }
}

/// Aggression after `fight_ticks` of a life that started at `seed`
pub fn aggression_for(seed: f32, fight_ticks: u32, max_ticks: u32) -> f32 {
    (seed + fight_ticks as f32 / max_ticks.max(1) as f32).clamp(0.0, 1.0)
}

/// Count one fight tick and refresh aggression; never decreases within a life
pub fn update_aggression(state: &mut EncounterState, config: &EncounterConfig) {
    state.fight_ticks = state.fight_ticks.saturating_add(1);
    let aggression = aggression_for(state.aggression_seed, state.fight_ticks, config.max_aggression_ticks);
    state.aggression = state.aggression.max(aggression);
}

/// Snapshot of the multipliers for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub tier: u8,
    pub aggression: f32,
}

impl Scaling {
    pub fn new(tier: u8, aggression: f32) -> Self {
        Self {
            tier: tier.min(MAX_TIER),
            aggression: aggression.clamp(0.0, 1.0),
        }
    }

    pub fn from_state(state: &EncounterState) -> Self {
        Self::new(state.difficulty_tier, state.aggression)
    }

    /// Projectile and movement speed multiplier
    pub fn speed_mult(&self) -> f32 {
        1.0 + self.aggression * 0.4
    }

    /// Cooldown and telegraph duration multiplier
    pub fn rate_mult(&self) -> f32 {
        1.0 - self.aggression * 0.25
    }

    fn tier_speed(&self) -> f32 {
        1.0 + 0.08 * self.tier as f32
    }

    fn tier_rate(&self) -> f32 {
        1.0 - 0.05 * self.tier as f32
    }

    /// Scale a base duration or interval; never shorter than one tick
    pub fn ticks(&self, base: u32) -> u32 {
        ((base as f32 * self.rate_mult() * self.tier_rate()).round() as u32).max(1)
    }

    /// Scale a base speed
    pub fn speed(&self, base: f32) -> f32 {
        base * self.speed_mult() * self.tier_speed()
    }

    /// A count that grows by `per_tier` each tier
    pub fn count(&self, base: u32, per_tier: u32) -> u32 {
        base + per_tier * self.tier as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [f32; 3] = [0.7, 0.4, 0.2];

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for_fraction(1.0, &THRESHOLDS), 0);
        assert_eq!(tier_for_fraction(0.71, &THRESHOLDS), 0);
        assert_eq!(tier_for_fraction(0.69, &THRESHOLDS), 1);
        assert_eq!(tier_for_fraction(0.4, &THRESHOLDS), 2);
        assert_eq!(tier_for_fraction(0.21, &THRESHOLDS), 2);
        assert_eq!(tier_for_fraction(0.19, &THRESHOLDS), 3);
        assert_eq!(tier_for_fraction(0.0, &THRESHOLDS), 3);
    }

    #[test]
    fn test_tier_never_regresses() {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        assert_eq!(update_tier(&mut state, 0.5, &config), Some(1));
        assert_eq!(update_tier(&mut state, 0.9, &config), None);
        assert_eq!(state.difficulty_tier, 1);
        assert_eq!(update_tier(&mut state, 0.1, &config), Some(3));
    }

    #[test]
    fn test_aggression_ramp_and_clamp() {
        assert_eq!(aggression_for(0.0, 0, 100), 0.0);
        assert!((aggression_for(0.0, 50, 100) - 0.5).abs() < 1e-6);
        assert_eq!(aggression_for(0.0, 500, 100), 1.0);
        assert!((aggression_for(0.5, 0, 100) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_aggression_monotonic() {
        let config = EncounterConfig {
            max_aggression_ticks: 10,
            ..Default::default()
        };
        let mut state = EncounterState::new();
        let mut last = state.aggression;
        for _ in 0..20 {
            update_aggression(&mut state, &config);
            assert!(state.aggression >= last);
            last = state.aggression;
        }
        assert_eq!(state.aggression, 1.0);
    }

    #[test]
    fn test_multipliers() {
        let calm = Scaling::new(0, 0.0);
        assert_eq!(calm.speed_mult(), 1.0);
        assert_eq!(calm.rate_mult(), 1.0);
        assert_eq!(calm.ticks(60), 60);

        let furious = Scaling::new(0, 1.0);
        assert!((furious.speed_mult() - 1.4).abs() < 1e-6);
        assert!((furious.rate_mult() - 0.75).abs() < 1e-6);
        assert_eq!(furious.ticks(60), 45);
        assert_eq!(furious.ticks(0), 1);
    }

    #[test]
    fn test_higher_tier_is_faster() {
        let low = Scaling::new(0, 0.3);
        let high = Scaling::new(3, 0.3);
        assert!(high.ticks(100) < low.ticks(100));
        assert!(high.speed(10.0) > low.speed(10.0));
        assert_eq!(high.count(2, 1), 5);
    }
}
