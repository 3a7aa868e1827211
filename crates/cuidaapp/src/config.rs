//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading
//! from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `CUIDA_USE_MOCK`, `CUIDA_SIMULATE_LATENCY`,
//!    `CUIDA_MOOD_LIMIT`, `CUIDA_DIARY_LIMIT`.
//! 2. **Data directory file**: `<data_dir>/cuida.toml`, if present.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `use_mock` | `true` | Use the local mock services. Only the local implementation exists |
//! | `simulate_latency` | `false` | Sleep before each service call to mimic a network backend |
//! | `mood_limit` | `7` | Moods returned when no limit is given |
//! | `diary_limit` | `20` | Diary entries returned when no limit is given |

use crate::api::ListLimits;
use crate::error::{CuidaError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "cuida.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CuidaConfig {
    /// Use the local mock services instead of a remote backend.
    #[config(default = true, env = "CUIDA_USE_MOCK")]
    pub use_mock: bool,

    /// Pause before each service call, like a network round trip would.
    #[config(default = false, env = "CUIDA_SIMULATE_LATENCY")]
    pub simulate_latency: bool,

    #[config(default = 7, env = "CUIDA_MOOD_LIMIT")]
    pub mood_limit: usize,

    #[config(default = 20, env = "CUIDA_DIARY_LIMIT")]
    pub diary_limit: usize,
}

impl Default for CuidaConfig {
    fn default() -> Self {
        Self {
            use_mock: true,
            simulate_latency: false,
            mood_limit: 7,
            diary_limit: 20,
        }
    }
}

impl CuidaConfig {
    /// Load from the environment and `<data_dir>/cuida.toml`. A missing file is fine.
    pub fn load(data_dir: &Path) -> Result<Self> {
        CuidaConfig::builder()
            .env()
            .file(config_path(data_dir))
            .load()
            .map_err(|e| CuidaError::Config(e.to_string()))
    }

    pub fn list_limits(&self) -> ListLimits {
        ListLimits {
            moods: self.mood_limit,
            diary: self.diary_limit,
        }
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CuidaConfig::default();
        assert!(config.use_mock);
        assert!(!config.simulate_latency);
        assert_eq!(config.list_limits(), ListLimits::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            config_path(dir.path()),
            "simulate_latency = true\nmood_limit = 3\n",
        )
        .unwrap();

        let config = CuidaConfig::builder()
            .file(config_path(dir.path()))
            .load()
            .unwrap();
        assert!(config.simulate_latency);
        assert_eq!(config.mood_limit, 3);
        assert_eq!(config.diary_limit, 20);
        assert!(config.use_mock);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CuidaConfig::builder()
            .file(config_path(dir.path()))
            .load()
            .unwrap();
        assert_eq!(config, CuidaConfig::default());
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "mood_limit = \"many\"\n").unwrap();
        assert!(matches!(
            CuidaConfig::load(dir.path()),
            Err(CuidaError::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CuidaConfig {
            simulate_latency: true,
            diary_limit: 5,
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        let back: CuidaConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
