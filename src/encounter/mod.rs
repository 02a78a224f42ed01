//! The Warden encounter
//!
//! A single boss fight driven one tick at a time: a phase controller over a
//! library of attack patterns, scaled by health tier and fight length, with
//! a two-stage death.

pub mod state;
pub mod body;
pub mod scaling;
pub mod targeting;
pub mod attacks;
pub mod lifecycle;
pub mod controller;
pub mod shared;

pub use state::{Phase, AttackKind, AttackMemory, EncounterState};
pub use body::BossBody;
pub use scaling::{Scaling, MAX_TIER};
pub use targeting::{select_target, compute_hover_position, enforce_range_policy, RangeVerdict};
pub use attacks::{select_next_attack, AttackStep};
pub use controller::{EncounterController, TickOutcome};
pub use shared::{SharedEncounter, DamageSender};
