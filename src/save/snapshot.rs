//! Encounter snapshots
//!
//! A running encounter (controller state, RNG and body) written to JSON so a
//! fight can be resumed or replayed exactly from any tick.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::encounter::{BossBody, EncounterController};

/// Snapshot format version for compatibility checking
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Complete state of one encounter at a tick boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub version: u32,
    /// Ticks simulated before the snapshot was taken
    pub tick: u64,
    pub controller: EncounterController,
    pub body: BossBody,
}

impl EncounterSnapshot {
    pub fn capture(tick: u64, controller: &EncounterController, body: &BossBody) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            tick,
            controller: controller.clone(),
            body: body.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: EncounterSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io { path: path.to_path_buf(), source };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, self.to_json()?).map_err(io_err)?;
        log::info!("Encounter snapshot at tick {} written to {}", self.tick, path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        log::info!("Encounter snapshot at tick {} loaded from {}", snapshot.tick, path.display());
        Ok(snapshot)
    }

    /// Split back into a runnable controller and body
    pub fn restore(self) -> (EncounterController, BossBody) {
        (self.controller, self.body)
    }
}

/// Directory snapshots are written to by default
pub fn snapshot_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "warden", "Warden") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("snapshots");
        path
    } else {
        PathBuf::from("./snapshots")
    }
}

/// Default path for a named snapshot
pub fn snapshot_path(name: &str) -> PathBuf {
    let mut path = snapshot_directory();
    path.push(format!("{}.json", name));
    path
}
