use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio_system::{ChannelKind, DEFAULT_MAX_LOAD};
use crate::error::ConfigError;

/// Load above which breathing starts (the shipped mod uses 5 G; an older build used 6 G)
pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 5.0;

/// Level compensating for the clips being louder than the rest of the mix
pub const DEFAULT_ATTENUATION: f32 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Clip directory, relative to the installation directory
    pub sounds_dir: String,

    /// Looped breathing clip file name
    pub breathing_clip: String,

    /// One-shot recovery clip file name
    pub ending_clip: String,

    /// G-load strictly above which breathing plays
    pub activation_threshold: f32,

    /// Fixed attenuation applied to both channels (0.0-1.0)
    pub attenuation: f32,

    /// G-load mapped to full breathing volume
    pub max_load: f32,

    /// Host tick interval in milliseconds
    pub tick_ms: u64,

    /// Gain of the interior bus offered by the host
    pub interior_bus_gain: f32,

    /// Log directory; relative paths resolve against the installation directory.
    /// Unset means the per-user config folder.
    pub log_dir: Option<String>,

    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sounds_dir: "Sounds".to_string(),
            breathing_clip: ChannelKind::Breathing.default_file_name().to_string(),
            ending_clip: ChannelKind::Ending.default_file_name().to_string(),
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            attenuation: DEFAULT_ATTENUATION,
            max_load: DEFAULT_MAX_LOAD,
            tick_ms: 16,
            interior_bus_gain: 1.0,
            log_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the installation directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            tracing::info!("Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::LoadFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::SaveFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.activation_threshold.is_finite() || self.activation_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "activation_threshold must be a non-negative number, got {}",
                self.activation_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.attenuation) {
            return Err(ConfigError::Invalid(format!(
                "attenuation must be within 0.0-1.0, got {}",
                self.attenuation
            )));
        }
        if !self.max_load.is_finite() || self.max_load <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_load must be positive, got {}",
                self.max_load
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be at least 1".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory holding the executable and its Sounds folder
    pub fn install_dir() -> Result<PathBuf, ConfigError> {
        let exe_path = env::current_exe().map_err(|e| ConfigError::InstallDirUnresolved(Some(e)))?;
        exe_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or(ConfigError::InstallDirUnresolved(None))
    }

    /// Get the config file path (in the installation directory)
    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::install_dir()?.join("config").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join("gbreathing_config_tests").join(name)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sounds_dir, "Sounds");
        assert_eq!(config.breathing_clip, "GBreath.ogg");
        assert_eq!(config.ending_clip, "GBreath_End.ogg");
        assert_eq!(config.activation_threshold, 5.0);
        assert_eq!(config.attenuation, 0.5);
        assert_eq!(config.max_load, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let path = temp_config_path("roundtrip.json");
        let config = Config {
            activation_threshold: 6.0,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "attenuation": 0.3 }"#).unwrap();
        assert_eq!(config.attenuation, 0.3);
        assert_eq!(config.activation_threshold, DEFAULT_ACTIVATION_THRESHOLD);
        assert_eq!(config.breathing_clip, "GBreath.ogg");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            Config {
                attenuation: 1.5,
                ..Config::default()
            },
            Config {
                attenuation: -0.1,
                ..Config::default()
            },
            Config {
                activation_threshold: f32::NAN,
                ..Config::default()
            },
            Config {
                max_load: 0.0,
                ..Config::default()
            },
            Config {
                tick_ms: 0,
                ..Config::default()
            },
            Config {
                log_level: String::new(),
                ..Config::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let path = temp_config_path("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "max_load": -2.0 }"#).unwrap();

        let result = Config::load_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from(&temp_config_path("does_not_exist.json"));
        assert!(matches!(result, Err(ConfigError::LoadFailed { .. })));
    }
}
