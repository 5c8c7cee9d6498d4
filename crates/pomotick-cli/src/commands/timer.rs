use std::error::Error;
use std::io;
use std::time::Duration;

use clap::ValueEnum;
use pomotick_core::storage::data_dir;
use pomotick_core::validation::custom_session;
use pomotick_core::{Config, SessionType};
use tokio::runtime::{Builder, Runtime};

use crate::audio::AudioPlayer;
use crate::display::Display;
use crate::menu::{self, MenuOutcome};
use crate::runner::{self, SessionContext};

/// How long "Session cancelled" stays up before the menu returns.
const CANCEL_PAUSE: Duration = Duration::from_millis(1500);

/// Session kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionArg {
    Work,
    Study,
    Dev,
    ShortBreak,
    LongBreak,
    Custom,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub no_sound: bool,
    pub no_color: bool,
}

/// Turn command-line arguments into a validated session.
pub fn resolve_session(
    arg: SessionArg,
    minutes: Option<&str>,
) -> Result<SessionType, Box<dyn Error>> {
    let session = match (arg, minutes) {
        (SessionArg::Custom, Some(minutes)) => custom_session(minutes)?,
        (SessionArg::Custom, None) => return Err("custom sessions need --minutes".into()),
        (_, Some(_)) => return Err("--minutes only applies to custom sessions".into()),
        (SessionArg::Work, None) => SessionType::Work,
        (SessionArg::Study, None) => SessionType::Study,
        (SessionArg::Dev, None) => SessionType::Dev,
        (SessionArg::ShortBreak, None) => SessionType::ShortBreak,
        (SessionArg::LongBreak, None) => SessionType::LongBreak,
    };
    Ok(session)
}

fn context(config: &Config, opts: RunOptions) -> SessionContext {
    let display = Display::from_config(config, opts.no_color);
    let audio = match data_dir() {
        Ok(dir) => AudioPlayer::from_config(config, &dir, opts.no_sound),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory; completion sounds disabled");
            AudioPlayer::silent()
        }
    };
    tracing::debug!(sound = audio.is_enabled(), "session context ready");
    SessionContext { display, audio }
}

fn runtime() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// Interactive menu loop. Returns when the user chooses Exit.
pub fn menu(config: &Config, opts: RunOptions) -> Result<(), Box<dyn Error>> {
    let ctx = context(config, opts);
    let rt = runtime()?;
    let stdin = io::stdin();

    loop {
        let choice = menu::prompt(&mut stdin.lock(), &ctx.display)?;
        let session = match choice {
            MenuOutcome::Start(session) => session,
            MenuOutcome::Exit => {
                ctx.display.print_line(&ctx.display.goodbye_line())?;
                return Ok(());
            }
        };

        tracing::info!(session = %session, "starting from menu");
        rt.block_on(runner::run_session(
            &ctx,
            session,
            session.default_duration_secs(),
        ))?;
        if ctx.display.is_interactive() {
            std::thread::sleep(CANCEL_PAUSE);
        }
    }
}

/// Start one session directly and keep cycling until cancelled.
pub fn start(
    config: &Config,
    opts: RunOptions,
    arg: SessionArg,
    minutes: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let session = resolve_session(arg, minutes)?;
    let ctx = context(config, opts);
    let rt = runtime()?;
    tracing::info!(session = %session, "starting from command line");
    rt.block_on(runner::run_session(
        &ctx,
        session,
        session.default_duration_secs(),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sessions_resolve_without_minutes() {
        assert_eq!(resolve_session(SessionArg::Dev, None).unwrap(), SessionType::Dev);
        assert_eq!(
            resolve_session(SessionArg::ShortBreak, None).unwrap(),
            SessionType::ShortBreak
        );
    }

    #[test]
    fn custom_needs_valid_minutes() {
        assert_eq!(
            resolve_session(SessionArg::Custom, Some("45")).unwrap(),
            SessionType::Custom { duration_secs: 2700 }
        );
        assert!(resolve_session(SessionArg::Custom, None).is_err());
        assert!(resolve_session(SessionArg::Custom, Some("0")).is_err());
        assert!(resolve_session(SessionArg::Custom, Some("soon")).is_err());
    }

    #[test]
    fn minutes_rejected_for_fixed_sessions() {
        let err = resolve_session(SessionArg::Work, Some("10")).unwrap_err();
        assert!(err.to_string().contains("only applies to custom"));
    }
}
