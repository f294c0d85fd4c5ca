//! Configuration file support for liftlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftlog/config.toml`.

use crate::generator::{Equipment, Experience, Goal};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Whose records the CLI reads and writes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

/// Defaults for `liftlog generate` when flags are omitted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub goal: Goal,

    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,

    #[serde(default)]
    pub experience: Experience,

    #[serde(default)]
    pub equipment: Equipment,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            goal: Goal::default(),
            days_per_week: default_days_per_week(),
            experience: Experience::default(),
            equipment: Equipment::default(),
        }
    }
}

/// Profile fallbacks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Weekly goal used until the user sets one
    #[serde(default = "default_weekly_goal_days")]
    pub weekly_goal_days: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            weekly_goal_days: default_weekly_goal_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("liftlog")
}

fn default_user_id() -> String {
    "local".into()
}

fn default_days_per_week() -> u32 {
    4
}

fn default_weekly_goal_days() -> u32 {
    4
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the rest of the system can't use
    pub fn validate(&self) -> Result<()> {
        if self.user.id.trim().is_empty() {
            return Err(Error::Config("user.id must not be empty".into()));
        }
        if !(1..=7).contains(&self.profile.weekly_goal_days) {
            return Err(Error::Config(format!(
                "profile.weekly_goal_days must be between 1 and 7, got {}",
                self.profile.weekly_goal_days
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("liftlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user.id, "local");
        assert_eq!(config.generator.days_per_week, 4);
        assert_eq!(config.generator.goal, Goal::Muscle);
        assert_eq!(config.generator.equipment, Equipment::Gym);
        assert_eq!(config.profile.weekly_goal_days, 4);
        assert!(config.data.data_dir.ends_with("liftlog"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("liftlog").join("config.toml");

        let mut config = Config::default();
        config.generator.experience = Experience::Advanced;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.generator.experience, Experience::Advanced);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[generator]
goal = "fat-loss"
equipment = "home"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.goal, Goal::FatLoss);
        assert_eq!(config.generator.equipment, Equipment::Home);
        assert_eq!(config.generator.days_per_week, 4); // default
        assert_eq!(config.user.id, "local"); // default
    }

    #[test]
    fn test_invalid_weekly_goal_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[profile]\nweekly_goal_days = 9\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
