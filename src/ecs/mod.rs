//! Entity Component System module
//!
//! 2D math shared by the whole crate, plus the components and systems the
//! reference arena runs on `hecs`.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{move_entities, expire_lifetimes, cull_projectiles, collect_hits, ARENA_RADIUS};
