//! Encounter snapshots
//!
//! Saving and restoring a running fight.

pub mod snapshot;

pub use snapshot::{
    EncounterSnapshot, SnapshotError, SNAPSHOT_VERSION,
    snapshot_directory, snapshot_path,
};
