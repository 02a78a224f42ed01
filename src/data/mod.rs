//! Data loading and encounter tuning
//!
//! Every constant and lookup table the encounter uses lives in
//! `EncounterConfig`, injected at construction and optionally loaded from
//! a RON file.

pub mod config;
pub mod loader;

pub use config::{
    EncounterConfig, RangePolicy, HoverParams, AwakeningParams, DyingParams,
    DepartureParams, EnragedParams, Palette, PoolEntry, default_attack_pool,
};
pub use loader::{ConfigError, default_config_path};
