//! Per-second trigger abstraction.
//!
//! The engine owns exactly one [`Scheduler`] and at most one armed
//! [`TriggerId`] at a time. Hosts deliver ticks back through
//! `PomodoroEngine::tick_from`, which drops ticks from disarmed triggers.

use serde::{Deserialize, Serialize};

/// Identifies one armed per-second trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub u64);

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

pub trait Scheduler {
    /// Begin delivering one tick per second tagged with `id`.
    fn arm(&mut self, id: TriggerId);

    /// Stop delivering ticks for `id`. Must not return before the trigger
    /// is cancelled.
    fn disarm(&mut self, id: TriggerId);
}

/// Scheduler for hosts that call `tick()` themselves.
///
/// Records which trigger is armed so callers and tests can observe the
/// arm/disarm discipline.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    armed: Vec<TriggerId>,
    arm_count: usize,
    disarm_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers currently armed, oldest first.
    pub fn armed(&self) -> &[TriggerId] {
        &self.armed
    }

    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub fn disarm_count(&self) -> usize {
        self.disarm_count
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, id: TriggerId) {
        self.arm_count += 1;
        self.armed.push(id);
    }

    fn disarm(&mut self, id: TriggerId) {
        self.disarm_count += 1;
        self.armed.retain(|armed| *armed != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_tracks_armed_set() {
        let mut s = ManualScheduler::new();
        s.arm(TriggerId(1));
        s.arm(TriggerId(2));
        s.disarm(TriggerId(1));
        assert_eq!(s.armed(), &[TriggerId(2)]);
        assert_eq!(s.arm_count(), 2);
        assert_eq!(s.disarm_count(), 1);
    }
}
