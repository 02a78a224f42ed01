//! Health bar and narrative hooks (UI facing)

use serde::{Deserialize, Serialize};

/// Identifies the boss entity to UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BossHandle(pub u64);

/// Health bar/music theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossTheme {
    Warden,
    AwakenedWarden,
}

pub trait NarrativeHook {
    fn register_boss(&mut self, handle: BossHandle, theme: BossTheme);
    /// One-shot per tier crossing
    fn announce_phase(&mut self, tier: u8);
    fn announce_awakening(&mut self) {}
    fn announce_defeat(&mut self) {}
}

/// Narrator that only logs
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl NarrativeHook for SilentNarrator {
    fn register_boss(&mut self, handle: BossHandle, theme: BossTheme) {
        log::debug!("Boss {:?} registered with theme {:?}", handle, theme);
    }

    fn announce_phase(&mut self, tier: u8) {
        log::debug!("Tier {} announced", tier);
    }
}
