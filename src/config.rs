//! Editor configuration
//!
//! Stored as RON. Every field has a default, so a config file only needs the
//! values it changes:
//!
//! ```ron
//! (
//!   blueprints_dir: "my_blueprints",
//!   initial_instance_id: 5000,
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::blueprint::BLUEPRINTS_DIR;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ele.ron";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Paths and starting values for an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory scanned for `<name>.xml` templates
    pub blueprints_dir: PathBuf,
    /// Project file used by load/save
    pub project_file: PathBuf,
    /// Track XML written by generate
    pub track_file: PathBuf,
    /// Instance counter at startup (last id already used in the track)
    pub initial_instance_id: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            blueprints_dir: PathBuf::from(BLUEPRINTS_DIR),
            project_file: PathBuf::from("project.dat"),
            track_file: PathBuf::from("track.xml"),
            initial_instance_id: 0,
        }
    }
}

impl EditorConfig {
    /// Resolve the config to use.
    ///
    /// An explicit path must exist. Otherwise `ele.ron` in the working
    /// directory, then the user config directory, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for path in default_locations() {
            if path.is_file() {
                return Self::load(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: EditorConfig = ron::from_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save a config file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let ron_string = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, ron_string)?;
        Ok(())
    }
}

/// Per-user config file (`<config_dir>/ele/config.ron`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ele").join("config.ron"))
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    paths.extend(user_config_path());
    paths
}
