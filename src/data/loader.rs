//! RON config loader
//!
//! Loads encounter tuning from external RON files, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::EncounterConfig;

/// File name used when no explicit path is given
const CONFIG_FILE: &str = "warden.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "warden", "Warden") {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push(CONFIG_FILE);
        path
    } else {
        PathBuf::from(".").join(CONFIG_FILE)
    }
}

impl EncounterConfig {
    /// Parse and validate a config from RON text
    pub fn from_ron(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: EncounterConfig = ron::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&content, path)?;
        log::info!("Encounter config loaded from {:?}", path);
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Pretty RON for this config
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Write this config to `path`, creating parent directories
    pub fn export(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(path, self.to_ron()?).map_err(io_err)?;
        log::info!("Encounter config written to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::AttackKind;

    #[test]
    fn test_partial_ron_uses_defaults() {
        let ron = "(spawn_duration: 30, ranges: (enrage_threshold: 60))";
        let config = EncounterConfig::from_ron(ron, Path::new("inline.ron"))
            .expect("partial config should parse");
        assert_eq!(config.spawn_duration, 30);
        assert_eq!(config.ranges.enrage_threshold, 60);
        assert_eq!(config.ranges.enrage_decay, 4);
        assert_eq!(config.attack_pool.len(), 9);
    }

    #[test]
    fn test_export_then_load() {
        let dir = std::env::temp_dir().join(format!("warden-config-{}", std::process::id()));
        let path = dir.join("warden.ron");
        let mut config = EncounterConfig::default();
        config.attack_pool.retain(|e| e.attack != AttackKind::Finale);

        config.export(&path).expect("export should succeed");
        let loaded = EncounterConfig::load(&path).expect("load should succeed");
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("warden-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("warden.ron");
        fs::write(&path, "(tier_thresholds: (0.1, 0.5, 0.9))").expect("write");

        assert!(matches!(EncounterConfig::load(&path), Err(ConfigError::Invalid(_))));
        assert_eq!(EncounterConfig::load_or_default(&path), EncounterConfig::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/warden.ron");
        assert!(matches!(EncounterConfig::load(path), Err(ConfigError::Io { .. })));
    }
}
