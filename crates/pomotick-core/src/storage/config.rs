//! TOML-based application configuration.
//!
//! Stores user preferences for:
//! - Completion sound playback (player command, file, volume)
//! - Terminal presentation (colors, screen clearing)
//! - Log filtering
//!
//! Session durations are fixed and deliberately absent.
//!
//! Configuration is stored at `~/.config/pomotick/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Default sound location, relative to the data directory.
pub const DEFAULT_SOUND_FILE: &str = "sounds/complete.wav";

/// Completion sound configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sound file; relative paths resolve against the data directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_player")]
    pub player: String,
    /// Player arguments. `{file}` and `{volume}` are substituted.
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

/// Terminal presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomotick/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_true() -> bool {
    true
}
fn default_player() -> String {
    "afplay".into()
}
fn default_player_args() -> Vec<String> {
    vec!["-v".into(), "{volume}".into(), "{file}".into()]
}
fn default_volume() -> f64 {
    0.5
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            player: default_player(),
            args: default_player_args(),
            volume: default_volume(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            clear_screen: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl SoundConfig {
    /// Absolute path of the sound file to play.
    pub fn resolved_file(&self, base_dir: &Path) -> PathBuf {
        match &self.file {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => base_dir.join(file),
            None => base_dir.join(DEFAULT_SOUND_FILE),
        }
    }

    /// Player arguments with placeholders filled in.
    pub fn expanded_args(&self, file: &Path) -> Vec<String> {
        let file = file.display().to_string();
        let volume = self.volume.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{file}", &file).replace("{volume}", &volume))
            .collect()
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |node, part| node.get(part))
    }

    /// Replace the leaf at `key`, coercing `value` to the type already there.
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut parent = root;
        if let Some(path) = parent_path {
            for part in path.split('.') {
                parent = parent.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
            ),
            serde_json::Value::Number(_) => {
                let n: f64 = value
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("'{value}' is not a finite number")))?
            }
            serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            serde_json::Value::Object(_) => return Err(unknown()),
            // Strings and unset optional values.
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Location of `config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid values, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sound.volume.is_finite() || self.sound.volume < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "sound.volume".into(),
                message: format!("must be a non-negative number, got {}", self.sound.volume),
            });
        }
        if self.sound.enabled && self.sound.player.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "sound.player".into(),
                message: "must name a program when sound is enabled".into(),
            });
        }
        Ok(())
    }
}
