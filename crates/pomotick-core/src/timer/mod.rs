mod clock;
mod engine;
mod scheduler;
mod session;

pub use clock::{format_clock, ClockTick, SessionClock};
pub use engine::{PomodoroEngine, TimerState};
pub use scheduler::{ManualScheduler, Scheduler, TriggerId};
pub use session::{SessionType, SESSIONS_UNTIL_LONG_BREAK};
