//! The session event loop.
//!
//! Ticks and key commands arrive on one channel and are handled strictly
//! one at a time on the current-thread runtime, so the engine is never
//! touched concurrently.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::time::Duration;

use pomotick_core::{Event, PomodoroEngine, Scheduler, SessionType, TimerState, TriggerId};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::audio::AudioPlayer;
use crate::display::Display;
use crate::keys::{KeyCommand, KeyReader};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMessage {
    Tick(TriggerId),
    Key(KeyCommand),
}

/// One interval task per armed trigger, each posting `Tick(id)` once a second.
pub struct TokioScheduler {
    tx: UnboundedSender<LoopMessage>,
    tasks: HashMap<TriggerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<LoopMessage>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn armed_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn arm(&mut self, id: TriggerId) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(LoopMessage::Tick(id)).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, handle);
    }

    fn disarm(&mut self, id: TriggerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

/// Display and audio collaborators for one run.
pub struct SessionContext {
    pub display: Display,
    pub audio: AudioPlayer,
}

/// Run `session` and its automatic follow-ups until the user cancels.
/// The engine is stopped when this returns.
pub async fn run_session(
    ctx: &SessionContext,
    session: SessionType,
    duration_secs: u64,
) -> std::io::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = PomodoroEngine::new(TokioScheduler::new(tx.clone()));

    let key_tx = tx;
    let _keys = match KeyReader::spawn(move |command| key_tx.send(LoopMessage::Key(command)).is_ok()) {
        Ok(reader) => Some(reader),
        Err(e) => {
            tracing::warn!(error = %e, "keyboard controls unavailable");
            None
        }
    };

    ctx.display.clear()?;
    ctx.display.print_lines(ctx.display.banner("       POMODORO TIMER"))?;
    ctx.display.print_lines([ctx.display.controls_line(), String::new()])?;

    let mut session_loop = SessionLoop::new(engine, ctx);
    session_loop.start(session, duration_secs)?;
    session_loop.run(rx).await
}

/// Engine plus presentation state for the running loop.
struct SessionLoop<'a, S: Scheduler> {
    engine: PomodoroEngine<S>,
    ctx: &'a SessionContext,
    /// Session whose completion is waiting for its follow-up's start event.
    finished: Option<SessionType>,
}

impl<'a, S: Scheduler> SessionLoop<'a, S> {
    fn new(engine: PomodoroEngine<S>, ctx: &'a SessionContext) -> Self {
        Self {
            engine,
            ctx,
            finished: None,
        }
    }

    fn start(&mut self, session: SessionType, duration_secs: u64) -> std::io::Result<()> {
        let event = self.engine.start_session(session, duration_secs);
        self.present(&event)
    }

    async fn run(&mut self, mut rx: UnboundedReceiver<LoopMessage>) -> std::io::Result<()> {
        while let Some(message) = rx.recv().await {
            if self.handle(message)?.is_break() {
                break;
            }
        }
        self.engine.stop();
        Ok(())
    }

    fn handle(&mut self, message: LoopMessage) -> std::io::Result<ControlFlow<()>> {
        match message {
            LoopMessage::Tick(id) => {
                let before = self.engine.snapshot();
                let events = self.engine.tick_from(id);
                if events.is_empty() {
                    if self.engine.state() == TimerState::Running
                        && self.engine.armed_trigger() == Some(id)
                    {
                        self.render_countdown()?;
                    }
                } else {
                    self.render(&final_frame(before))?;
                    for event in &events {
                        self.present(event)?;
                    }
                }
            }
            LoopMessage::Key(KeyCommand::TogglePause) => {
                if let Some(event) = self.engine.toggle_pause() {
                    self.present(&event)?;
                }
            }
            LoopMessage::Key(KeyCommand::Cancel) => {
                if let Some(event) = self.engine.stop() {
                    self.present(&event)?;
                }
                self.ctx.display.print_line(&self.ctx.display.cancelled_line())?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn render_countdown(&self) -> std::io::Result<()> {
        self.render(&self.engine.snapshot())
    }

    fn render(&self, snapshot: &Event) -> std::io::Result<()> {
        if let Some(line) = self.ctx.display.countdown_line(snapshot) {
            self.ctx.display.overwrite_line(&line)?;
        }
        Ok(())
    }

    fn present(&mut self, event: &Event) -> std::io::Result<()> {
        let ctx = self.ctx;
        let display = &ctx.display;
        match event {
            Event::SessionCompleted { session_type, .. } => {
                ctx.audio.play_completion();
                self.finished = Some(*session_type);
            }
            Event::SessionStarted {
                session_type,
                duration_secs,
                ..
            } => {
                let mut lines = vec![String::new()];
                if let Some(finished) = self.finished.take() {
                    lines.extend(display.transition_lines(finished, *session_type));
                }
                lines.push(String::new());
                lines.push(display.started_line(*session_type, *duration_secs));
                display.print_lines(lines)?;
            }
            Event::TimerPaused { .. } => {
                display.print_lines([String::new(), display.paused_line()])?;
            }
            Event::TimerResumed { .. } => {
                display.print_lines([display.resumed_line(), String::new()])?;
            }
            Event::TimerStopped { .. } => {
                display.print_lines([String::new(), display.stopped_line()])?;
            }
            Event::StateSnapshot { .. } => self.render_countdown()?,
        }
        Ok(())
    }
}

/// The frame shown on the tick that finishes a session: the finishing
/// session's snapshot with the clock at zero.
fn final_frame(mut snapshot: Event) -> Event {
    if let Event::StateSnapshot { remaining_secs, .. } = &mut snapshot {
        *remaining_secs = 0;
    }
    snapshot
}
