//! Global remindr configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{RemindrError, RemindrResult};

static DEFAULT_DATA_FILE: &str = "~/.remindr/events.dat";

/// Default window for reminders, in hours.
pub const DEFAULT_UPCOMING_HOURS: u32 = 24;

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_upcoming_hours() -> u32 {
    DEFAULT_UPCOMING_HOURS
}

/// Configuration at ~/.config/remindr/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindrConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_upcoming_hours")]
    pub upcoming_hours: u32,

    /// Hard limit on stored events. Unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_events: Option<usize>,
}

impl Default for RemindrConfig {
    fn default() -> Self {
        RemindrConfig {
            data_file: default_data_file(),
            upcoming_hours: DEFAULT_UPCOMING_HOURS,
            max_events: None,
        }
    }
}

impl RemindrConfig {
    pub fn config_path() -> RemindrResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RemindrError::Config("Could not determine config directory".into()))?
            .join("remindr");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented-out default on first run.
    pub fn load() -> RemindrResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> RemindrResult<Self> {
        let config: RemindrConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| RemindrError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RemindrError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Data file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RemindrResult<()> {
        let contents = format!(
            "\
# remindr configuration

# Where events are stored:
# data_file = \"{}\"

# How far ahead `remindr reminders` looks, in hours:
# upcoming_hours = {}

# Refuse to store more than this many events:
# max_events = 1000
",
            DEFAULT_DATA_FILE, DEFAULT_UPCOMING_HOURS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RemindrError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RemindrError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("remindr").join("config.toml");

        RemindrConfig::create_default_config(&path).unwrap();
        let config = RemindrConfig::load_from(&path).unwrap();

        assert_eq!(config, RemindrConfig::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = RemindrConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.upcoming_hours, DEFAULT_UPCOMING_HOURS);
        assert_eq!(config.max_events, None);
    }

    #[test]
    fn values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_file = \"/tmp/remindr/events.dat\"\nupcoming_hours = 48\nmax_events = 10\n",
        )
        .unwrap();

        let config = RemindrConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/remindr/events.dat"));
        assert_eq!(config.upcoming_hours, 48);
        assert_eq!(config.max_events, Some(10));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "upcoming_hours = \"soon\"\n").unwrap();

        assert!(matches!(
            RemindrConfig::load_from(&path),
            Err(RemindrError::Config(_))
        ));
    }
}
