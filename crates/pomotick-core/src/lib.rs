//! # pomotick Core Library
//!
//! This library provides the core logic for the pomotick Pomodoro timer.
//! The `pomotick` binary is a thin terminal layer over it.
//!
//! ## Architecture
//!
//! - **Session Clock**: counts one session down, one `tick()` per second
//! - **Pomodoro Engine**: a tick-driven state machine that owns the clock,
//!   the armed per-second trigger and the focus/break transition policy
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: Core session state machine
//! - [`Scheduler`]: Seam for whatever delivers the per-second ticks
//! - [`Event`]: Everything the engine reports to display and audio
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod validation;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    format_clock, ManualScheduler, PomodoroEngine, Scheduler, SessionClock, SessionType,
    TimerState, TriggerId, SESSIONS_UNTIL_LONG_BREAK,
};
