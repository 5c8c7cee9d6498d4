//! Interactive session picker.

use std::io::{self, BufRead};
use std::time::Duration;

use pomotick_core::validation::custom_session;
use pomotick_core::{SessionType, ValidationError};

use crate::display::Display;

/// How long an error stays on screen before the menu is redrawn.
const ERROR_PAUSE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Session(SessionType),
    Custom,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Start(SessionType),
    Exit,
}

pub fn parse_choice(input: &str) -> Result<MenuChoice, ValidationError> {
    match input.trim() {
        "1" => Ok(MenuChoice::Session(SessionType::Dev)),
        "2" => Ok(MenuChoice::Session(SessionType::Work)),
        "3" => Ok(MenuChoice::Session(SessionType::Study)),
        "4" => Ok(MenuChoice::Session(SessionType::ShortBreak)),
        "5" => Ok(MenuChoice::Session(SessionType::LongBreak)),
        "6" => Ok(MenuChoice::Custom),
        "7" => Ok(MenuChoice::Exit),
        other => Err(ValidationError::InvalidChoice(other.to_string())),
    }
}

/// Show the menu until the user picks a session or exits.
///
/// End of input counts as exit.
pub fn prompt<R: BufRead>(input: &mut R, display: &Display) -> io::Result<MenuOutcome> {
    loop {
        display.clear()?;
        display.print_lines(display.menu_lines())?;
        display.print_inline(&display.prompt("Enter choice (1-7): "))?;

        let Some(line) = read_line(input)? else {
            return Ok(MenuOutcome::Exit);
        };
        match parse_choice(&line) {
            Ok(MenuChoice::Session(session)) => return Ok(MenuOutcome::Start(session)),
            Ok(MenuChoice::Exit) => return Ok(MenuOutcome::Exit),
            Ok(MenuChoice::Custom) => {
                display.print_inline(&display.prompt("Enter duration in minutes: "))?;
                let Some(minutes) = read_line(input)? else {
                    return Ok(MenuOutcome::Exit);
                };
                match custom_session(&minutes) {
                    Ok(session) => return Ok(MenuOutcome::Start(session)),
                    Err(e) => {
                        tracing::debug!(error = %e, "rejected custom duration");
                        display.print_line(
                            &display.error_line("Invalid duration. Returning to menu..."),
                        )?;
                        pause_on_error(display);
                    }
                }
            }
            Err(_) => {
                display.print_line(&display.error_line("Invalid choice. Please try again."))?;
                pause_on_error(display);
            }
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn pause_on_error(display: &Display) {
    if display.is_interactive() {
        std::thread::sleep(ERROR_PAUSE);
    }
}
