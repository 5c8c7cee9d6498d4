//! Integration tests driving a full pomodoro cycle through the public API.

use pomotick_core::{Event, ManualScheduler, PomodoroEngine, SessionType, TimerState};

/// Tick until the current session completes; returns the completion and
/// the follow-up start.
fn run_to_completion(engine: &mut PomodoroEngine<ManualScheduler>) -> (Event, Event) {
    for _ in 0..=engine.remaining_secs() {
        let events = engine.tick();
        if !events.is_empty() {
            assert_eq!(events.len(), 2, "unexpected events: {events:?}");
            return (events[0].clone(), events[1].clone());
        }
    }
    panic!("session never completed");
}

fn started_type(event: &Event) -> SessionType {
    match event {
        Event::SessionStarted { session_type, .. } => *session_type,
        other => panic!("expected SessionStarted, got {other:?}"),
    }
}

#[test]
fn four_work_sessions_earn_a_long_break() {
    let mut engine = PomodoroEngine::new(ManualScheduler::new());
    engine.start_default(SessionType::Work);

    let mut followups = Vec::new();
    for _ in 0..8 {
        let (_, started) = run_to_completion(&mut engine);
        followups.push(started_type(&started));
    }

    assert_eq!(
        followups,
        vec![
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::ShortBreak,
            SessionType::Work,
            SessionType::LongBreak,
            SessionType::Work,
        ]
    );
    assert_eq!(engine.completed_focus_sessions(), 0);
    assert_eq!(engine.state(), TimerState::Running);
}

#[test]
fn development_goes_straight_to_long_break_and_back() {
    let mut engine = PomodoroEngine::new(ManualScheduler::new());
    engine.start_session(SessionType::Dev, 3);

    let (completed, started) = run_to_completion(&mut engine);
    assert!(matches!(
        completed,
        Event::SessionCompleted {
            session_type: SessionType::Dev,
            completed_focus_sessions: 1,
            ..
        }
    ));
    assert_eq!(started_type(&started), SessionType::LongBreak);
    assert_eq!(engine.remaining_secs(), 900);

    let (_, started) = run_to_completion(&mut engine);
    assert_eq!(started_type(&started), SessionType::Dev);
    assert_eq!(engine.remaining_secs(), 3600);
}

#[test]
fn custom_session_resumes_at_its_own_length() {
    let mut engine = PomodoroEngine::new(ManualScheduler::new());
    engine.start_default(SessionType::custom_minutes(2));
    assert_eq!(engine.total_secs(), 120);

    let (_, started) = run_to_completion(&mut engine);
    assert_eq!(started_type(&started), SessionType::ShortBreak);

    let (_, started) = run_to_completion(&mut engine);
    assert_eq!(started_type(&started), SessionType::custom_minutes(2));
    assert_eq!(engine.total_secs(), 120);
}

#[test]
fn events_serialize_with_a_type_tag() {
    let mut engine = PomodoroEngine::new(ManualScheduler::new());
    let started = engine.start_default(SessionType::Study);

    let json = serde_json::to_value(&started).unwrap();
    assert_eq!(json["type"], "session_started");
    assert_eq!(json["session_type"], "study");
    assert_eq!(json["duration_secs"], 1800);

    let snapshot = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(snapshot["type"], "state_snapshot");
    assert_eq!(snapshot["state"], "running");
    assert_eq!(snapshot["sessions_until_long_break"], 4);

    let back: Event = serde_json::from_value(json).unwrap();
    assert_eq!(back, started);
}
