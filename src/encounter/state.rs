//! Encounter state register
//!
//! The small integer-keyed state every other part of the encounter reads and
//! mutates: top-level phase, frame timer, current attack and sub-phase.

use serde::{Deserialize, Serialize};

use crate::ecs::Vec2;

/// Top-level encounter state. Exactly one is active at any tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Spawning,
    Idle,
    Attack,
    Reposition,
    Enraged,
    CosmicWrath,
    Dying,
    Awakening,
}

impl Phase {
    /// Scripted sequences during which normal logic is suspended
    pub fn is_sequence(&self) -> bool {
        matches!(self, Phase::Dying | Phase::Awakening)
    }

    /// Phases in which `sub_phase` carries meaning
    pub fn uses_sub_phase(&self) -> bool {
        matches!(self, Phase::Attack | Phase::Dying | Phase::Awakening)
    }
}

/// The Warden's attack patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    TeleportStrike,
    Barrage,
    RingBurst,
    ChainCombo,
    Constellation,
    LineSweep,
    SafeArcRadial,
    GravityWell,
    Finale,
}

impl AttackKind {
    pub const ALL: [AttackKind; 9] = [
        AttackKind::TeleportStrike,
        AttackKind::Barrage,
        AttackKind::RingBurst,
        AttackKind::ChainCombo,
        AttackKind::Constellation,
        AttackKind::LineSweep,
        AttackKind::SafeArcRadial,
        AttackKind::GravityWell,
        AttackKind::Finale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::TeleportStrike => "Teleport Strike",
            AttackKind::Barrage => "Barrage",
            AttackKind::RingBurst => "Ring Burst",
            AttackKind::ChainCombo => "Chain Combo",
            AttackKind::Constellation => "Constellation",
            AttackKind::LineSweep => "Line Sweep",
            AttackKind::SafeArcRadial => "Safe-Arc Radial",
            AttackKind::GravityWell => "Gravity Well",
            AttackKind::Finale => "Finale",
        }
    }

    /// Number of sub-phases the routine defines
    pub fn sub_phase_count(&self) -> u32 {
        match self {
            AttackKind::Constellation | AttackKind::Finale => 4,
            _ => 3,
        }
    }
}

/// Attack-local data retained for the duration of one attack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackMemory {
    /// Completed repeats (strikes, links, volleys)
    pub repeats: u32,
    /// Teleport destination, line origin or gravity-well anchor
    pub anchor: Vec2,
    /// Committed direction for dashes and sweeps
    pub direction: Vec2,
    /// Bearing of the safe arc or burst rotation, radians
    pub bearing: f32,
    /// Tick (attack timer) of the next scheduled shot
    pub next_fire: u32,
    /// Constellation star positions
    pub markers: Vec<Vec2>,
}

/// Mutable state of one encounter, created on spawn and dropped on removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterState {
    pub phase: Phase,
    /// Frames since the last phase or sub-phase change
    pub timer: u32,
    pub current_attack: Option<AttackKind>,
    pub sub_phase: u32,
    pub difficulty_tier: u8,
    pub aggression: f32,
    /// Aggression at the start of the current life
    pub aggression_seed: f32,
    /// Ticks fought in the current life
    pub fight_ticks: u32,
    pub last_attack: Option<AttackKind>,
    pub attack_cooldown: u32,
    pub dash_cooldown: u32,
    pub teleport_cooldown: u32,
    pub impact_cooldown: u32,
    pub has_awakened: bool,
    /// Highest tier announced this life
    pub announced_tier: u8,
    /// Cosmic Wrath entry has been announced this life
    #[serde(default)]
    pub wrath_announced: bool,
    /// Ticks spent out of enrage range, decaying back in range
    pub enrage_meter: u32,
    /// Index of the current target in the host's roster
    pub target: Option<usize>,
    pub last_target_position: Vec2,
    /// No target remained; descending before despawn
    pub departing: bool,
    pub departure_ticks: u32,
    pub removal_permitted: bool,
    pub attack_memory: AttackMemory,
    /// Offset from the target picked when repositioning began
    pub reposition_offset: Vec2,
    /// Phase-entry one-shots fired over the encounter, for diagnostics
    pub transitions: u64,
    /// A transition happened this tick; the next `advance_tick` keeps timer at 0
    #[serde(default)]
    pub entered_this_tick: bool,
}

impl EncounterState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Spawning,
            timer: 0,
            current_attack: None,
            sub_phase: 0,
            difficulty_tier: 0,
            aggression: 0.0,
            aggression_seed: 0.0,
            fight_ticks: 0,
            last_attack: None,
            attack_cooldown: 0,
            dash_cooldown: 0,
            teleport_cooldown: 0,
            impact_cooldown: 0,
            has_awakened: false,
            announced_tier: 0,
            wrath_announced: false,
            enrage_meter: 0,
            target: None,
            last_target_position: Vec2::ZERO,
            departing: false,
            departure_ticks: 0,
            removal_permitted: false,
            attack_memory: AttackMemory::default(),
            reposition_offset: Vec2::ZERO,
            transitions: 0,
            entered_this_tick: false,
        }
    }

    /// Count one frame in the current phase/sub-phase.
    ///
    /// A tick that changed phase or sub-phase does not count, so the first
    /// tick processed in the new state always sees `timer == 0`.
    pub fn advance_tick(&mut self) {
        if self.entered_this_tick {
            self.entered_this_tick = false;
        } else {
            self.timer = self.timer.saturating_add(1);
        }
    }

    /// Switch phase, resetting timer and sub-phase.
    ///
    /// Returns false and changes nothing if already in `phase`, so callers
    /// fire entry effects only on `true`.
    pub fn enter_phase(&mut self, phase: Phase) -> bool {
        if self.phase == phase {
            return false;
        }
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        if self.phase == Phase::Attack {
            self.current_attack = None;
        }
        self.phase = phase;
        self.timer = 0;
        self.sub_phase = 0;
        self.transitions += 1;
        self.entered_this_tick = true;
        true
    }

    pub fn enter_sub_phase(&mut self, sub_phase: u32) {
        self.sub_phase = sub_phase;
        self.timer = 0;
        self.entered_this_tick = true;
    }

    /// Tick all ability throttles down by one
    pub fn tick_cooldowns(&mut self) {
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.teleport_cooldown = self.teleport_cooldown.saturating_sub(1);
        self.impact_cooldown = self.impact_cooldown.saturating_sub(1);
    }
}

impl Default for EncounterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_spawning() {
        let state = EncounterState::new();
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.timer, 0);
        assert!(!state.has_awakened);
    }

    #[test]
    fn test_transition_tick_does_not_count() {
        let mut state = EncounterState::new();
        state.enter_phase(Phase::Idle);
        state.advance_tick();
        assert_eq!(state.timer, 0);
        state.advance_tick();
        assert_eq!(state.timer, 1);
    }

    #[test]
    fn test_enter_phase_resets_counters() {
        let mut state = EncounterState::new();
        state.advance_tick();
        state.advance_tick();
        state.sub_phase = 3;

        assert!(state.enter_phase(Phase::Idle));
        assert_eq!(state.timer, 0);
        assert_eq!(state.sub_phase, 0);
    }

    #[test]
    fn test_enter_same_phase_is_noop() {
        let mut state = EncounterState::new();
        assert!(state.enter_phase(Phase::Idle));
        state.advance_tick();
        state.advance_tick();
        let transitions = state.transitions;

        assert!(!state.enter_phase(Phase::Idle));
        assert_eq!(state.timer, 1);
        assert_eq!(state.transitions, transitions);
    }

    #[test]
    fn test_leaving_attack_clears_current_attack() {
        let mut state = EncounterState::new();
        state.enter_phase(Phase::Attack);
        state.current_attack = Some(AttackKind::Barrage);
        state.enter_phase(Phase::Reposition);
        assert_eq!(state.current_attack, None);
    }

    #[test]
    fn test_enter_sub_phase() {
        let mut state = EncounterState::new();
        state.advance_tick();
        state.enter_sub_phase(2);
        assert_eq!(state.sub_phase, 2);
        assert_eq!(state.timer, 0);
    }
}
