//! Momentum resource
//!
//! Moving fast builds a capped resource; standing still bleeds it away.
//! Filling it past each threshold unlocks a stronger movement ability.

use serde::{Deserialize, Serialize};

/// Ability tiers unlocked by stored momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MomentumTier {
    None,
    /// Short dash
    Swift,
    /// Dash that ignores knockback
    Surge,
    /// Full-speed charge with contact damage
    Overdrive,
}

impl MomentumTier {
    /// Fraction of the cap required to reach this tier
    pub fn threshold(&self) -> f32 {
        match self {
            MomentumTier::None => 0.0,
            MomentumTier::Swift => 0.25,
            MomentumTier::Surge => 0.5,
            MomentumTier::Overdrive => 1.0,
        }
    }

    /// Resource consumed by using this tier's ability
    pub fn cost_fraction(&self) -> f32 {
        match self {
            MomentumTier::None => 0.0,
            MomentumTier::Swift => 0.25,
            MomentumTier::Surge => 0.5,
            MomentumTier::Overdrive => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    pub cap: f32,
    /// Speed below which no momentum is gained
    pub speed_threshold: f32,
    /// Momentum per unit of speed above the threshold
    pub gain_per_speed: f32,
    /// Momentum lost per tick below the threshold
    pub decay_per_tick: f32,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            cap: 100.0,
            speed_threshold: 4.0,
            gain_per_speed: 0.15,
            decay_per_tick: 0.5,
        }
    }
}

/// Per-avatar momentum state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    value: f32,
    params: MomentumParams,
}

impl Momentum {
    pub fn new(params: MomentumParams) -> Self {
        Self { value: 0.0, params }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn fraction(&self) -> f32 {
        self.value / self.params.cap
    }

    /// Feed one tick of movement at `speed`
    pub fn update(&mut self, speed: f32) {
        if speed > self.params.speed_threshold {
            self.value += (speed - self.params.speed_threshold) * self.params.gain_per_speed;
        } else {
            self.value -= self.params.decay_per_tick;
        }
        self.value = self.value.clamp(0.0, self.params.cap);
    }

    /// Highest tier currently unlocked
    pub fn tier(&self) -> MomentumTier {
        let fraction = self.fraction();
        [MomentumTier::Overdrive, MomentumTier::Surge, MomentumTier::Swift]
            .into_iter()
            .find(|tier| fraction >= tier.threshold())
            .unwrap_or(MomentumTier::None)
    }

    /// Spend a tier's ability; false if it is not unlocked
    pub fn spend(&mut self, tier: MomentumTier) -> bool {
        if tier == MomentumTier::None || self.tier() < tier {
            return false;
        }
        self.value = (self.value - tier.cost_fraction() * self.params.cap).max(0.0);
        true
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(MomentumParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_and_caps() {
        let mut momentum = Momentum::default();
        for _ in 0..1000 {
            momentum.update(14.0);
        }
        assert_eq!(momentum.value(), 100.0);
        assert_eq!(momentum.tier(), MomentumTier::Overdrive);
    }

    #[test]
    fn test_idle_decays_to_zero() {
        let mut momentum = Momentum::default();
        for _ in 0..20 {
            momentum.update(14.0);
        }
        assert!(momentum.value() > 0.0);
        for _ in 0..1000 {
            momentum.update(0.0);
        }
        assert_eq!(momentum.value(), 0.0);
        assert_eq!(momentum.tier(), MomentumTier::None);
    }

    #[test]
    fn test_spend_requires_tier() {
        let mut momentum = Momentum::default();
        // 10 ticks at speed 14 -> 10 * 10 * 0.15 = 15
        for _ in 0..10 {
            momentum.update(14.0);
        }
        assert_eq!(momentum.tier(), MomentumTier::None);
        assert!(!momentum.spend(MomentumTier::Swift));

        for _ in 0..30 {
            momentum.update(14.0);
        }
        assert_eq!(momentum.tier(), MomentumTier::Surge);
        assert!(!momentum.spend(MomentumTier::Overdrive));
        assert!(momentum.spend(MomentumTier::Swift));
        assert!((momentum.value() - 35.0).abs() < 1e-3);
    }
}
