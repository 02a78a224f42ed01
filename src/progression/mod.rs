//! Progression systems

pub mod difficulty;
pub mod momentum;

pub use difficulty::Difficulty;
pub use momentum::{Momentum, MomentumTier, MomentumParams};
