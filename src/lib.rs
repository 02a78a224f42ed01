//! Warden - A cosmic boss encounter
//!
//! The Warden fight as a self-contained, tick-driven controller: phases,
//! a library of telegraphed attack patterns, health-tier and fight-length
//! escalation, and a death that has to happen twice. The host supplies
//! spawning, audio, narrative and the opponent through small traits.

pub mod ecs;
pub mod host;
pub mod audio;
pub mod combat;
pub mod data;
pub mod progression;
pub mod entities;
pub mod encounter;
pub mod save;
pub mod game;
pub mod cli;

// Re-export commonly used types
pub use encounter::{EncounterController, EncounterState, BossBody, Phase, AttackKind, TickOutcome};
pub use data::EncounterConfig;
pub use ecs::Vec2;
