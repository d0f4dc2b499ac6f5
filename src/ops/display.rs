//! Derived display values. Everything here is computed from the current
//! [`Session`] and player readings; nothing is stored.

use crate::types::session::{Session, Status};

/// Fraction of the track played, clamped to `[0, 1]`. A missing or zero
/// duration reads as 0 so the progress bar never divides by zero.
pub fn progress_ratio(position: f64, duration: f64) -> f32 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0) as f32
}

/// Format seconds as `M:SS`, flooring to whole seconds. Anything that is not
/// a usable time (NaN, infinite, negative) renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Section summary line, shown only while paused with a nonempty section.
pub fn section_summary(session: &Session) -> Option<String> {
    if session.play_state != crate::types::session::PlayState::Paused || !session.has_section() {
        return None;
    }
    let length = (session.section_end - session.section_start).round() as i64;
    Some(format!(
        "Section {} ~ {} ({length} s)",
        format_time(session.section_start),
        format_time(session.section_end),
    ))
}

pub fn status_line(status: &Status) -> String {
    match status {
        Status::NoFile => "Drop an audio file or pick one to start".to_string(),
        Status::FileLoaded => "File loaded. Press play to start".to_string(),
        Status::Playing => "Playing".to_string(),
        Status::Repeating => "Repeating section".to_string(),
        Status::Paused => "Paused".to_string(),
        Status::RepeatDone => "Section repeat finished - paused".to_string(),
        Status::Ended => "Playback finished".to_string(),
        Status::LoadFailed(message) => format!("Could not load file: {message}"),
    }
}
