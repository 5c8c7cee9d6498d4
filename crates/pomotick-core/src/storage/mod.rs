mod config;

pub use config::{Config, LogConfig, SoundConfig, UiConfig, DEFAULT_SOUND_FILE};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `config.toml` and sounds.
///
/// `POMOTICK_CONFIG_DIR` wins when set. Otherwise `~/.config/pomotick`, or
/// `~/.config/pomotick-dev` with `POMOTICK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMOTICK_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::NoDataDir("home directory not found".into()))?
                .join(".config");
            let env = std::env::var("POMOTICK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomotick-dev")
            } else {
                base_dir.join("pomotick")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
