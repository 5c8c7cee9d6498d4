//! Pomodoro engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads; a [`Scheduler`] delivers one tick per second and the host feeds
//! each one back through `tick_from()`.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running <-> Paused
//!    ^          |           |
//!    +----------+-----------+   (stop)
//! ```
//!
//! A session that runs to zero starts its follow-up immediately, so the
//! engine stays `Running` across transitions.
//!
//! ## Usage
//!
//! ```
//! use pomotick_core::{ManualScheduler, PomodoroEngine, SessionType};
//!
//! let mut engine = PomodoroEngine::new(ManualScheduler::new());
//! engine.start_session(SessionType::Work, 3);
//! for _ in 0..3 {
//!     for event in engine.tick() {
//!         println!("{event:?}");
//!     }
//! }
//! assert_eq!(engine.current_session(), SessionType::ShortBreak);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::scheduler::{Scheduler, TriggerId};
use super::session::{SessionType, SESSIONS_UNTIL_LONG_BREAK};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Core pomodoro engine.
///
/// Owns the session state machine and the single armed trigger.
#[derive(Debug)]
pub struct PomodoroEngine<S: Scheduler> {
    scheduler: S,
    state: TimerState,
    current_session: SessionType,
    /// Last non-break session entered; resumed after every break.
    primary_session_type: SessionType,
    clock: SessionClock,
    /// Duration the current session was started with.
    total_secs: u64,
    completed_focus_sessions: u32,
    sessions_until_long_break: u32,
    trigger: Option<TriggerId>,
    next_trigger: u64,
}

impl<S: Scheduler> PomodoroEngine<S> {
    /// Create a stopped engine. Nothing is armed until a session starts.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: TimerState::Stopped,
            current_session: SessionType::Work,
            primary_session_type: SessionType::Work,
            clock: SessionClock::new(),
            total_secs: 0,
            completed_focus_sessions: 0,
            sessions_until_long_break: SESSIONS_UNTIL_LONG_BREAK,
            trigger: None,
            next_trigger: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn current_session(&self) -> SessionType {
        self.current_session
    }

    pub fn primary_session_type(&self) -> SessionType {
        self.primary_session_type
    }

    pub fn remaining_secs(&self) -> u64 {
        self.clock.remaining()
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    pub fn sessions_until_long_break(&self) -> u32 {
        self.sessions_until_long_break
    }

    /// The trigger whose ticks are currently accepted.
    pub fn armed_trigger(&self) -> Option<TriggerId> {
        self.trigger
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            session_type: self.current_session,
            remaining_secs: self.clock.remaining(),
            total_secs: self.total_secs,
            completed_focus_sessions: self.completed_focus_sessions,
            sessions_until_long_break: self.sessions_until_long_break,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start `session_type` for `duration_secs` seconds.
    ///
    /// Valid from any state; this is also how auto-transitions begin the
    /// follow-up session. `duration_secs` must be positive.
    pub fn start_session(&mut self, session_type: SessionType, duration_secs: u64) -> Event {
        self.disarm();

        self.current_session = session_type;
        if session_type.is_focus() {
            self.primary_session_type = session_type;
        }
        if session_type == SessionType::LongBreak {
            self.completed_focus_sessions = 0;
        }
        self.clock.start(duration_secs);
        self.total_secs = duration_secs;
        self.state = TimerState::Running;
        self.arm();

        tracing::debug!(
            session = %session_type,
            duration_secs,
            trigger = ?self.trigger,
            "session started"
        );
        Event::SessionStarted {
            session_type,
            duration_secs,
            at: Utc::now(),
        }
    }

    /// Start `session_type` at its default duration.
    pub fn start_default(&mut self, session_type: SessionType) -> Event {
        self.start_session(session_type, session_type.default_duration_secs())
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.clock.remaining(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.clock.remaining(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Stopped => None,
        }
    }

    /// Cancel the session. The trigger is disarmed before this returns.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state == TimerState::Stopped {
            return None;
        }
        self.disarm();
        self.clock.cancel();
        self.completed_focus_sessions = 0;
        self.state = TimerState::Stopped;
        tracing::debug!(session = %self.current_session, "session stopped");
        Some(Event::TimerStopped { at: Utc::now() })
    }

    /// Deliver a tick from trigger `id`. Ticks from any trigger other than
    /// the armed one are dropped.
    pub fn tick_from(&mut self, id: TriggerId) -> Vec<Event> {
        if self.trigger != Some(id) {
            tracing::trace!(%id, "dropping tick from disarmed trigger");
            return Vec::new();
        }
        self.tick()
    }

    /// Advance the running session by one second.
    ///
    /// Returns the completion and follow-up start events when the session
    /// reaches zero, and nothing otherwise.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        if self.clock.tick().elapsed {
            self.complete_current_session()
        } else {
            Vec::new()
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_current_session(&mut self) -> Vec<Event> {
        let finished = self.current_session;

        let next = if finished.is_break() {
            self.primary_session_type
        } else {
            self.completed_focus_sessions += 1;
            match finished {
                // Dev is always followed by a long break; the counter is not consulted.
                SessionType::Dev => SessionType::LongBreak,
                _ if self.completed_focus_sessions >= self.sessions_until_long_break => {
                    SessionType::LongBreak
                }
                _ => SessionType::ShortBreak,
            }
        };

        tracing::debug!(
            finished = %finished,
            next = %next,
            completed_focus_sessions = self.completed_focus_sessions,
            "session completed"
        );
        let completed = Event::SessionCompleted {
            session_type: finished,
            completed_focus_sessions: self.completed_focus_sessions,
            at: Utc::now(),
        };
        let started = self.start_default(next);
        vec![completed, started]
    }

    fn arm(&mut self) {
        self.next_trigger += 1;
        let id = TriggerId(self.next_trigger);
        self.scheduler.arm(id);
        self.trigger = Some(id);
    }

    fn disarm(&mut self) {
        if let Some(id) = self.trigger.take() {
            self.scheduler.disarm(id);
        }
    }
}
