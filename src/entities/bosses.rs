//! Boss definitions and spawning
//!
//! A boss is a `BossBody` the host simulates plus an `EncounterController`
//! that drives it. Difficulty mode is applied here, once, at spawn.

use crate::data::EncounterConfig;
use crate::ecs::Vec2;
use crate::encounter::{BossBody, EncounterController};
use crate::host::{BossHandle, BossTheme};
use crate::progression::Difficulty;

/// Bosses this crate knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossKind {
    Warden,
}

impl BossKind {
    pub fn name(&self) -> &'static str {
        match self {
            BossKind::Warden => "The Warden",
        }
    }

    /// Health bar theme for the first and second life
    pub fn theme(&self, awakened: bool) -> BossTheme {
        match (self, awakened) {
            (BossKind::Warden, false) => BossTheme::Warden,
            (BossKind::Warden, true) => BossTheme::AwakenedWarden,
        }
    }

    /// Health before difficulty scaling
    pub fn base_health(&self) -> u64 {
        match self {
            BossKind::Warden => 40_000,
        }
    }

    /// Line shown when the fight reaches `tier`
    pub fn tier_description(&self, tier: u8, awakened: bool) -> &'static str {
        match (tier, awakened) {
            (0, false) => "The Warden descends from the dark between stars.",
            (1, false) => "Constellations flare as the Warden quickens!",
            (2, false) => "The Warden bends gravity itself to hold you!",
            (3, false) => "Cosmic Wrath! The Warden holds nothing back!",
            (0, true) => "The Warden rises again, reborn in starfire.",
            (1, true) => "Starfire pours from the Warden's wounds!",
            (2, true) => "The sky cracks around the reborn Warden!",
            _ => "The Warden's wrath burns without end!",
        }
    }
}

/// A freshly spawned boss
#[derive(Debug, Clone)]
pub struct SpawnedBoss {
    pub kind: BossKind,
    pub body: BossBody,
    pub controller: EncounterController,
}

/// Spawn the Warden at `position`
pub fn spawn_warden(
    config: EncounterConfig,
    difficulty: Difficulty,
    position: Vec2,
    handle: BossHandle,
    seed: u64,
) -> SpawnedBoss {
    let kind = BossKind::Warden;
    let mut body = BossBody::new(position, difficulty.scale_health(kind.base_health()));
    body.damage_mult = difficulty.boss_damage_mult();

    log::info!(
        "Spawning {} ({} difficulty, {} health, seed {})",
        kind.name(),
        difficulty.name(),
        body.health_max,
        seed
    );

    SpawnedBoss {
        kind,
        body,
        controller: EncounterController::new(config, handle, seed),
    }
}
