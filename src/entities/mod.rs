//! Boss definitions

pub mod bosses;

pub use bosses::{BossKind, SpawnedBoss, spawn_warden};
