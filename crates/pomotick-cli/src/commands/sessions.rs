use pomotick_core::{format_clock, SessionType, SESSIONS_UNTIL_LONG_BREAK};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let listing: Vec<_> = SessionType::FIXED
            .iter()
            .map(|session| {
                serde_json::json!({
                    "session_type": session,
                    "label": session.label(),
                    "duration_secs": session.default_duration_secs(),
                    "is_break": session.is_break(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for session in SessionType::FIXED {
        println!(
            "{:<22}{:>6}",
            session.label(),
            format_clock(session.default_duration_secs())
        );
    }
    println!("{:<22}{:>6}", "Custom Session", "N:00");
    println!();
    println!(
        "A long break follows every {SESSIONS_UNTIL_LONG_BREAK} completed work or study sessions; \
         development sessions are always followed by one."
    );
    Ok(())
}
