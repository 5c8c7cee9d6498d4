//! Input validation for values that end up as engine arguments.
//!
//! The engine assumes every duration it receives is positive; callers run
//! user input through here first.

use crate::error::ValidationError;
use crate::timer::SessionType;

/// Longest custom session accepted, in minutes.
pub const MAX_CUSTOM_MINUTES: u64 = 24 * 60;

/// Parse a custom session length typed by the user.
///
/// Accepts a positive whole number of minutes, surrounding whitespace
/// allowed.
pub fn parse_custom_minutes(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if minutes <= 0 {
        return Err(ValidationError::NonPositive);
    }
    let minutes = minutes as u64;
    if minutes > MAX_CUSTOM_MINUTES {
        return Err(ValidationError::TooLarge {
            minutes,
            max: MAX_CUSTOM_MINUTES,
        });
    }
    Ok(minutes)
}

/// Build a custom session from user input.
pub fn custom_session(input: &str) -> Result<SessionType, ValidationError> {
    parse_custom_minutes(input).map(SessionType::custom_minutes)
}
