//! Terminal rendering of engine events and snapshots.
//!
//! Output is written with `\r\n` line endings because the countdown runs
//! with the terminal in raw mode.

use std::io::{self, IsTerminal, Write};

use crossterm::style::{style, Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use pomotick_core::{format_clock, Config, Event, SessionType};

// Catppuccin Mocha
const MAUVE: Color = rgb(203, 166, 247);
const RED: Color = rgb(243, 139, 168);
const PEACH: Color = rgb(250, 179, 135);
const YELLOW: Color = rgb(249, 226, 175);
const GREEN: Color = rgb(166, 227, 161);
const TEAL: Color = rgb(148, 226, 213);
const SKY: Color = rgb(137, 220, 235);
const BLUE: Color = rgb(137, 180, 250);
const TEXT: Color = rgb(205, 214, 244);
const SUBTEXT1: Color = rgb(186, 194, 222);
const OVERLAY2: Color = rgb(147, 153, 178);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone)]
pub struct Display {
    color: bool,
    clear_screen: bool,
    interactive: bool,
}

impl Display {
    pub fn new(color: bool, clear_screen: bool) -> Self {
        let interactive = io::stdout().is_terminal();
        Self {
            color: color && interactive,
            clear_screen: clear_screen && interactive,
            interactive,
        }
    }

    /// No colors, no screen clearing, no in-place rewrites.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            clear_screen: false,
            interactive: false,
        }
    }

    pub fn from_config(config: &Config, no_color: bool) -> Self {
        Self::new(config.ui.color && !no_color, config.ui.clear_screen)
    }

    /// Whether stdout is a terminal a person is looking at.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = style(text).with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    pub fn session_color(session: SessionType) -> Color {
        match session {
            SessionType::Dev => SKY,
            SessionType::Work => RED,
            SessionType::Study => BLUE,
            SessionType::ShortBreak => GREEN,
            SessionType::LongBreak => TEAL,
            SessionType::Custom { .. } => MAUVE,
        }
    }

    pub fn session_tag(&self, session: SessionType) -> String {
        self.paint(
            &format!("[{}]", session.tag()),
            Self::session_color(session),
            false,
        )
    }

    /// `[WORK] 24:59 remaining (1/4 sessions completed)`
    pub fn countdown_line(&self, snapshot: &Event) -> Option<String> {
        let Event::StateSnapshot {
            session_type,
            remaining_secs,
            completed_focus_sessions,
            sessions_until_long_break,
            ..
        } = snapshot
        else {
            return None;
        };
        let progress =
            format!("({completed_focus_sessions}/{sessions_until_long_break} sessions completed)");
        Some(format!(
            "{} {} remaining {}",
            self.session_tag(*session_type),
            self.paint(&format_clock(*remaining_secs), YELLOW, true),
            self.paint(&progress, OVERLAY2, false),
        ))
    }

    /// Messages announcing the hand-off from `finished` to `next`.
    pub fn transition_lines(&self, finished: SessionType, next: SessionType) -> Vec<String> {
        let mut lines = Vec::new();
        match finished {
            SessionType::Dev => lines.push(self.paint(
                "Dev session complete! Time for a 15 minute break!",
                GREEN,
                true,
            )),
            SessionType::ShortBreak | SessionType::LongBreak => {
                lines.push(self.paint(
                    &format!("Break's over! Back to {}!", next.noun()),
                    RED,
                    true,
                ));
            }
            focus => {
                let name = match focus {
                    SessionType::Work => "Work",
                    SessionType::Study => "Study",
                    _ => "Custom",
                };
                lines.push(self.paint(
                    &format!("{name} session complete! Great job!"),
                    GREEN,
                    true,
                ));
                if next == SessionType::LongBreak {
                    lines.push(self.paint("Time for a long break! You've earned it!", TEAL, true));
                } else {
                    lines.push(self.paint("Time for a short break!", GREEN, true));
                }
            }
        }
        lines
    }

    /// Header printed when a session starts: `[WORK] 25:00`.
    pub fn started_line(&self, session: SessionType, duration_secs: u64) -> String {
        format!(
            "{} {}",
            self.session_tag(session),
            self.paint(&format_clock(duration_secs), YELLOW, false)
        )
    }

    pub fn paused_line(&self) -> String {
        self.paint("[PAUSED] Timer paused! Press SPACE to resume...", YELLOW, false)
    }

    pub fn resumed_line(&self) -> String {
        self.paint("[RESUMED] Timer resumed!", GREEN, false)
    }

    pub fn stopped_line(&self) -> String {
        self.paint("Pomodoro stopped! Great work today!", TEAL, true)
    }

    pub fn cancelled_line(&self) -> String {
        self.paint("Session cancelled. Returning to menu...", YELLOW, false)
    }

    pub fn banner(&self, title: &str) -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        vec![
            self.paint(&rule, MAUVE, true),
            self.paint(title, MAUVE, true),
            self.paint(&rule, MAUVE, true),
        ]
    }

    pub fn controls_line(&self) -> String {
        self.paint("Controls: [SPACE] pause/resume | [Ctrl+C] cancel", SUBTEXT1, false)
    }

    pub fn menu_lines(&self) -> Vec<String> {
        let mut lines = self.banner("               POMODORO TIMER CLI");
        lines.push(self.paint("Built with Rust", SUBTEXT1, false));
        lines.push(String::new());
        lines.push(self.paint("Select session type:", TEXT, false));
        let entries = [
            "Development Session (60 minutes)",
            "Work Session (25 minutes)",
            "Study Session (30 minutes)",
            "Short Break (5 minutes)",
            "Long Break (15 minutes)",
            "Custom Duration",
            "Exit",
        ];
        for (i, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                self.paint(&format!("  {}.", i + 1), PEACH, false),
                self.paint(&format!(" {entry}"), TEXT, false)
            ));
        }
        lines.push(String::new());
        lines
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, YELLOW, false)
    }

    pub fn error_line(&self, text: &str) -> String {
        self.paint(text, RED, false)
    }

    pub fn goodbye_line(&self) -> String {
        self.paint("Goodbye!", TEAL, false)
    }

    // ── Output ───────────────────────────────────────────────────────

    pub fn clear(&self) -> io::Result<()> {
        if !self.clear_screen {
            return Ok(());
        }
        let mut out = io::stdout();
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        out.flush()
    }

    /// Print whole lines, terminating each with `\r\n`.
    pub fn print_lines<I, S>(&self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = io::stdout().lock();
        for line in lines {
            write!(out, "{}\r\n", line.as_ref())?;
        }
        out.flush()
    }

    pub fn print_line(&self, line: &str) -> io::Result<()> {
        self.print_lines([line])
    }

    /// Print without a newline, for prompts.
    pub fn print_inline(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{text}")?;
        out.flush()
    }

    /// Rewrite the current line in place.
    pub fn overwrite_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.interactive {
            queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
            write!(out, "{line}")?;
        } else {
            write!(out, "{line}\r\n")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomotick_core::{ManualScheduler, PomodoroEngine};

    fn plain() -> Display {
        Display::plain()
    }

    fn work_snapshot_after(ticks: u64) -> Event {
        let mut engine = PomodoroEngine::new(ManualScheduler::new());
        engine.start_default(SessionType::Work);
        for _ in 0..ticks {
            engine.tick();
        }
        engine.snapshot()
    }

    #[test]
    fn countdown_line_shows_tag_time_and_progress() {
        let line = plain().countdown_line(&work_snapshot_after(1)).unwrap();
        assert_eq!(line, "[WORK] 24:59 remaining (0/4 sessions completed)");
    }

    #[test]
    fn countdown_line_ignores_other_events() {
        let mut engine = PomodoroEngine::new(ManualScheduler::new());
        let started = engine.start_default(SessionType::Work);
        assert!(plain().countdown_line(&started).is_none());
    }

    #[test]
    fn dev_completion_message() {
        let lines = plain().transition_lines(SessionType::Dev, SessionType::LongBreak);
        assert_eq!(lines, vec!["Dev session complete! Time for a 15 minute break!"]);
    }

    #[test]
    fn focus_completion_announces_break_length() {
        let d = plain();
        assert_eq!(
            d.transition_lines(SessionType::Study, SessionType::ShortBreak),
            vec!["Study session complete! Great job!", "Time for a short break!"]
        );
        assert_eq!(
            d.transition_lines(SessionType::Work, SessionType::LongBreak),
            vec![
                "Work session complete! Great job!",
                "Time for a long break! You've earned it!"
            ]
        );
        assert_eq!(
            d.transition_lines(SessionType::custom_minutes(3), SessionType::ShortBreak)[0],
            "Custom session complete! Great job!"
        );
    }

    #[test]
    fn break_completion_names_primary() {
        let d = plain();
        assert_eq!(
            d.transition_lines(SessionType::ShortBreak, SessionType::Study),
            vec!["Break's over! Back to study!"]
        );
        assert_eq!(
            d.transition_lines(SessionType::LongBreak, SessionType::Dev),
            vec!["Break's over! Back to dev!"]
        );
    }

    #[test]
    fn started_line_uses_clock_format() {
        assert_eq!(
            plain().started_line(SessionType::ShortBreak, 300),
            "[SHORT BREAK] 5:00"
        );
    }

    #[test]
    fn menu_lists_seven_numbered_choices() {
        let lines = plain().menu_lines();
        assert!(lines.iter().any(|l| l == "  1. Development Session (60 minutes)"));
        assert!(lines.iter().any(|l| l == "  7. Exit"));
    }

    #[test]
    fn color_wraps_text_in_escape_codes() {
        let colored = Display {
            color: true,
            clear_screen: false,
            interactive: true,
        };
        let tag = colored.session_tag(SessionType::Work);
        assert!(tag.contains("[WORK]"));
        assert!(tag.starts_with('\u{1b}'));
    }
}
