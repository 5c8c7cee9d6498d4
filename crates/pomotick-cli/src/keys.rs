//! Keyboard controls while a session is running.
//!
//! Raw mode is held by [`KeyReader`] for its lifetime. A background thread
//! polls crossterm for key presses and hands translated commands to a sink.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Stop the session and go back to the menu.
    Cancel,
    /// Pause when running, resume when paused.
    TogglePause,
}

/// Map a key press to a session command.
pub fn translate(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyCommand::Cancel);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(KeyCommand::Cancel),
        KeyCode::Char(' ') => Some(KeyCommand::TogglePause),
        _ => None,
    }
}

/// Owns raw mode and the reader thread. Dropping it stops the thread and
/// restores the terminal.
pub struct KeyReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyReader {
    /// Enable raw mode and start forwarding commands to `sink`.
    ///
    /// The thread exits once `sink` returns `false` or the reader is dropped.
    pub fn spawn<F>(sink: F) -> io::Result<Self>
    where
        F: Fn(KeyCommand) -> bool + Send + 'static,
    {
        terminal::enable_raw_mode()?;
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let spawned = std::thread::Builder::new()
            .name("pomotick-keys".into())
            .spawn(move || read_keys(&flag, sink));

        match spawned {
            Ok(handle) => Ok(Self {
                stop,
                handle: Some(handle),
            }),
            Err(e) => {
                terminal::disable_raw_mode().ok();
                Err(e)
            }
        }
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("keyboard thread panicked");
            }
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

fn read_keys<F>(stop: &AtomicBool, sink: F)
where
    F: Fn(KeyCommand) -> bool,
{
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                tracing::warn!(error = %e, "keyboard poll failed");
                return;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(command) = translate(key) {
                    tracing::debug!(?command, "key command");
                    if !sink(command) {
                        return;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "keyboard read failed");
                return;
            }
        }
    }
}
