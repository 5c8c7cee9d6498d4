use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionType, TimerState};

/// Every state change in the engine produces an Event.
/// Display and audio collaborators consume them; the engine never renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        session_type: SessionType,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session ran to zero. `completed_focus_sessions` is the count after
    /// this completion was recorded, before any long-break reset.
    SessionCompleted {
        session_type: SessionType,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        session_type: SessionType,
        remaining_secs: u64,
        total_secs: u64,
        completed_focus_sessions: u32,
        sessions_until_long_break: u32,
        at: DateTime<Utc>,
    },
}

