//! Property tests for engine invariants over arbitrary control sequences.

use pomotick_core::{Event, ManualScheduler, PomodoroEngine, SessionType, TimerState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Start(SessionType, u64),
    Tick(u64),
    Pause,
    Resume,
    Stop,
}

fn session_type() -> impl Strategy<Value = SessionType> {
    prop_oneof![
        Just(SessionType::Work),
        Just(SessionType::Study),
        Just(SessionType::Dev),
        Just(SessionType::ShortBreak),
        Just(SessionType::LongBreak),
        (1u64..5).prop_map(SessionType::custom_minutes),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (session_type(), 1u64..20).prop_map(|(t, d)| Op::Start(t, d)),
        (1u64..40).prop_map(Op::Tick),
        Just(Op::Pause),
        Just(Op::Resume),
        Just(Op::Stop),
    ]
}

fn apply(engine: &mut PomodoroEngine<ManualScheduler>, op: &Op) -> Vec<Event> {
    match op {
        Op::Start(t, d) => vec![engine.start_session(*t, *d)],
        Op::Tick(n) => (0..*n).flat_map(|_| engine.tick()).collect(),
        Op::Pause => engine.pause().into_iter().collect(),
        Op::Resume => engine.resume().into_iter().collect(),
        Op::Stop => engine.stop().into_iter().collect(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(ops in proptest::collection::vec(op(), 1..60)) {
        let mut engine = PomodoroEngine::new(ManualScheduler::new());
        for op in &ops {
            let events = apply(&mut engine, op);

            let limit = engine.sessions_until_long_break();
            prop_assert!(engine.completed_focus_sessions() <= limit);
            for event in &events {
                if let Event::SessionCompleted { completed_focus_sessions, .. } = event {
                    prop_assert!(*completed_focus_sessions <= limit);
                }
            }

            prop_assert!(!engine.primary_session_type().is_break());
            prop_assert!(engine.scheduler().armed().len() <= 1);

            match engine.state() {
                TimerState::Stopped => {
                    prop_assert_eq!(engine.remaining_secs(), 0);
                    prop_assert_eq!(engine.completed_focus_sessions(), 0);
                    prop_assert!(engine.armed_trigger().is_none());
                }
                TimerState::Running | TimerState::Paused => {
                    prop_assert!(engine.armed_trigger().is_some());
                    prop_assert_eq!(engine.scheduler().armed(), &[engine.armed_trigger().unwrap()][..]);
                }
            }

            if engine.current_session() == SessionType::LongBreak
                && events.iter().any(|e| matches!(e, Event::SessionStarted { .. }))
            {
                prop_assert_eq!(engine.completed_focus_sessions(), 0);
            }
        }
    }

    #[test]
    fn paused_engine_ignores_ticks(
        t in session_type(),
        duration in 2u64..100,
        before in 0u64..50,
        during in 1u64..200,
    ) {
        let mut engine = PomodoroEngine::new(ManualScheduler::new());
        engine.start_session(t, duration);
        let before = before.min(duration - 1);
        for _ in 0..before {
            engine.tick();
        }
        let remaining = engine.remaining_secs();

        prop_assert!(engine.pause().is_some());
        prop_assert!(engine.pause().is_none());
        for _ in 0..during {
            prop_assert!(engine.tick().is_empty());
        }
        prop_assert!(engine.resume().is_some());

        prop_assert_eq!(engine.state(), TimerState::Running);
        prop_assert_eq!(engine.remaining_secs(), remaining);
    }

    #[test]
    fn exactly_one_completion_per_full_run(t in session_type(), duration in 1u64..300) {
        let mut engine = PomodoroEngine::new(ManualScheduler::new());
        engine.start_session(t, duration);
        let completions: usize = (0..duration)
            .map(|_| {
                engine
                    .tick()
                    .iter()
                    .filter(|e| matches!(e, Event::SessionCompleted { .. }))
                    .count()
            })
            .sum();
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(engine.state(), TimerState::Running);
    }
}
