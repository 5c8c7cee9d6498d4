use serde::{Deserialize, Serialize};

/// Completed focus sessions before a long break is due.
pub const SESSIONS_UNTIL_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Work,
    Study,
    Dev,
    ShortBreak,
    LongBreak,
    /// Caller-supplied length; the carried duration doubles as its default.
    Custom { duration_secs: u64 },
}

impl SessionType {
    /// Every fixed session type, in menu order.
    pub const FIXED: [SessionType; 5] = [
        SessionType::Dev,
        SessionType::Work,
        SessionType::Study,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    pub fn custom_minutes(minutes: u64) -> Self {
        SessionType::Custom {
            duration_secs: minutes.saturating_mul(60),
        }
    }

    /// Default duration in seconds.
    pub fn default_duration_secs(&self) -> u64 {
        match self {
            SessionType::Work => 25 * 60,
            SessionType::Study => 30 * 60,
            SessionType::Dev => 60 * 60,
            SessionType::ShortBreak => 5 * 60,
            SessionType::LongBreak => 15 * 60,
            SessionType::Custom { duration_secs } => *duration_secs,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, SessionType::ShortBreak | SessionType::LongBreak)
    }

    pub fn is_focus(&self) -> bool {
        !self.is_break()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Work => "Work Session",
            SessionType::Study => "Study Session",
            SessionType::Dev => "Development Session",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
            SessionType::Custom { .. } => "Custom Session",
        }
    }

    /// Bracketed tag used on the countdown line.
    pub fn tag(&self) -> &'static str {
        match self {
            SessionType::Work => "WORK",
            SessionType::Study => "STUDY",
            SessionType::Dev => "DEV",
            SessionType::ShortBreak => "SHORT BREAK",
            SessionType::LongBreak => "LONG BREAK",
            SessionType::Custom { .. } => "CUSTOM",
        }
    }

    /// Lowercase noun for "Back to ..." messages.
    pub fn noun(&self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::Study => "study",
            SessionType::Dev => "dev",
            SessionType::ShortBreak => "short break",
            SessionType::LongBreak => "long break",
            SessionType::Custom { .. } => "custom",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
