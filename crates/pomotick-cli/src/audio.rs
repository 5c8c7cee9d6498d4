//! Fire-and-forget completion sounds.
//!
//! Playback runs in a detached task. Failures are logged and never reach
//! the timer.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use pomotick_core::storage::SoundConfig;
use pomotick_core::Config;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio file not found: {0}")]
    MissingFile(PathBuf),

    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("audio playback failed ({status}): {stderr}")]
    Playback { status: ExitStatus, stderr: String },
}

/// A fully resolved playback command.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayCommand {
    pub program: String,
    pub args: Vec<String>,
    pub file: PathBuf,
}

impl PlayCommand {
    pub fn from_sound(sound: &SoundConfig, base_dir: &std::path::Path) -> Self {
        let file = sound.resolved_file(base_dir);
        Self {
            program: sound.player.clone(),
            args: sound.expanded_args(&file),
            file,
        }
    }

    /// Run the player to completion.
    pub async fn run(self) -> Result<(), AudioError> {
        if !self.file.exists() {
            return Err(AudioError::MissingFile(self.file));
        }
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() || !stderr.is_empty() {
            return Err(AudioError::Playback {
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AudioPlayer {
    command: Option<PlayCommand>,
}

impl AudioPlayer {
    /// Silent when muted, disabled, or when the sound file does not exist.
    pub fn from_config(config: &Config, base_dir: &std::path::Path, muted: bool) -> Self {
        if muted || !config.sound.enabled {
            return Self::silent();
        }
        let command = PlayCommand::from_sound(&config.sound, base_dir);
        if !command.file.exists() {
            tracing::debug!(file = %command.file.display(), "no completion sound installed");
            return Self::silent();
        }
        Self {
            command: Some(command),
        }
    }

    pub fn silent() -> Self {
        Self { command: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.command.is_some()
    }

    /// Start playback without waiting for it. Must be called from within a
    /// tokio runtime.
    pub fn play_completion(&self) {
        let Some(command) = self.command.clone() else {
            return;
        };
        tokio::spawn(async move {
            let file = command.file.clone();
            if let Err(e) = command.run().await {
                tracing::warn!(error = %e, file = %file.display(), "could not play completion sound");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomotick_core::storage::DEFAULT_SOUND_FILE;
    use std::path::Path;

    #[test]
    fn command_from_default_config() {
        let cmd = PlayCommand::from_sound(&SoundConfig::default(), Path::new("/data"));
        assert_eq!(cmd.program, "afplay");
        assert_eq!(cmd.file, PathBuf::from("/data/sounds/complete.wav"));
        assert_eq!(cmd.args, vec!["-v", "0.5", "/data/sounds/complete.wav"]);
    }

    fn data_dir_with_sound() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sounds")).unwrap();
        std::fs::write(dir.path().join(DEFAULT_SOUND_FILE), b"RIFF").unwrap();
        dir
    }

    #[test]
    fn muted_or_disabled_player_is_silent() {
        let dir = data_dir_with_sound();
        let mut config = Config::default();
        assert!(AudioPlayer::from_config(&config, dir.path(), false).is_enabled());
        assert!(!AudioPlayer::from_config(&config, dir.path(), true).is_enabled());
        config.sound.enabled = false;
        assert!(!AudioPlayer::from_config(&config, dir.path(), false).is_enabled());
    }

    #[test]
    fn missing_sound_file_disables_playback() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        assert!(!AudioPlayer::from_config(&config, dir.path(), false).is_enabled());
    }

    #[tokio::test]
    async fn missing_file_is_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = PlayCommand {
            program: "afplay".into(),
            args: vec![],
            file: dir.path().join("nope.wav"),
        };
        assert!(matches!(cmd.run().await, Err(AudioError::MissingFile(_))));
    }

    #[tokio::test]
    async fn unknown_player_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ding.wav");
        std::fs::write(&file, b"RIFF").unwrap();
        let cmd = PlayCommand {
            program: "pomotick-definitely-not-a-player".into(),
            args: vec![file.display().to_string()],
            file,
        };
        assert!(matches!(cmd.run().await, Err(AudioError::Spawn { .. })));
    }

    #[tokio::test]
    async fn silent_player_spawns_nothing() {
        AudioPlayer::silent().play_completion();
    }
}
