//! State transitions for the section-repeat player.
//!
//! Each function mutates the [`Session`] and returns the commands the audio
//! player must execute for the transition. Nothing in here touches the UI or
//! GStreamer, so the whole state machine is testable on its own.

use tracing::{debug, info};

use crate::types::session::{PlayState, Session, Status};
use crate::types::track::TrackInfo;

/// A command for the audio capability, produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Seek(f64),
    SetRate(f64),
    Stop,
}

/// A new track was loaded into the player. Replaces any previous track and
/// clears the section marks.
pub fn track_loaded(session: &mut Session, track: TrackInfo) -> Vec<PlayerCommand> {
    info!(file = %track.file_name, "track loaded");
    session.track = Some(track);
    session.play_state = PlayState::Idle;
    session.section_start = 0.0;
    session.section_end = 0.0;
    session.status = Status::FileLoaded;
    Vec::new()
}

/// Play pressed. Records the current position as the start-of-section mark
/// and starts playback. No-op while already audible or without a track.
pub fn press_play(session: &mut Session, position: f64) -> Vec<PlayerCommand> {
    if session.track.is_none() || session.is_audible() {
        return Vec::new();
    }
    session.section_start = position;
    session.play_state = PlayState::Playing;
    session.status = Status::Playing;
    info!(start = position, "play");
    vec![PlayerCommand::Play]
}

/// Pause pressed. Records the current position as the end-of-section mark.
/// Pausing during a repeat exits the repeat.
pub fn press_pause(session: &mut Session, position: f64) -> Vec<PlayerCommand> {
    if session.track.is_none() || !session.is_audible() {
        return Vec::new();
    }
    session.section_end = position;
    session.play_state = PlayState::Paused;
    session.status = Status::Paused;
    info!(end = position, "pause");
    vec![PlayerCommand::Pause]
}

/// Repeat pressed. Only valid while paused with a nonempty section; seeks
/// back to the start mark and plays toward the end mark.
pub fn press_repeat(session: &mut Session) -> Vec<PlayerCommand> {
    if !session.repeat_enabled() {
        return Vec::new();
    }
    session.play_state = PlayState::Repeating;
    session.status = Status::Repeating;
    info!(
        start = session.section_start,
        end = session.section_end,
        "repeating section"
    );
    vec![
        PlayerCommand::Seek(session.section_start),
        PlayerCommand::Play,
    ]
}

/// Position report from the player. While repeating, reaching the end mark
/// pauses and parks the playhead exactly on it.
pub fn position_tick(session: &mut Session, position: f64) -> Vec<PlayerCommand> {
    if session.play_state != PlayState::Repeating || position < session.section_end {
        return Vec::new();
    }
    session.play_state = PlayState::Paused;
    session.status = Status::RepeatDone;
    info!(end = session.section_end, "section repeat finished");
    vec![
        PlayerCommand::Pause,
        PlayerCommand::Seek(session.section_end),
    ]
}

/// User seek (progress bar click or arrow keys). While playing normally the
/// start-of-section mark moves with the seek; while repeating the marks are
/// left alone so the loop stays intact.
pub fn seek_to(session: &mut Session, position: f64) -> Vec<PlayerCommand> {
    if session.track.is_none() {
        return Vec::new();
    }
    if session.play_state == PlayState::Playing {
        session.section_start = position;
        debug!(start = position, "seek moved start mark");
    }
    vec![PlayerCommand::Seek(position)]
}

/// The track played through to its end.
pub fn track_ended(session: &mut Session) -> Vec<PlayerCommand> {
    if session.track.is_none() {
        return Vec::new();
    }
    session.play_state = PlayState::Idle;
    session.status = Status::Ended;
    info!("playback ended");
    Vec::new()
}

/// Remove the current track and reset every mark.
pub fn remove_track(session: &mut Session) -> Vec<PlayerCommand> {
    session.track = None;
    session.play_state = PlayState::Idle;
    session.section_start = 0.0;
    session.section_end = 0.0;
    session.status = Status::NoFile;
    info!("track removed");
    vec![PlayerCommand::Stop]
}

/// Apply a new playback rate from the slider or a preset.
pub fn set_rate(session: &mut Session, rate: f64) -> Vec<PlayerCommand> {
    if session.track.is_none() || !rate.is_finite() || rate <= 0.0 {
        return Vec::new();
    }
    session.playback_rate = rate;
    debug!(rate, "playback rate changed");
    vec![PlayerCommand::SetRate(rate)]
}

/// The pipeline reported a fatal error; tear it down and say so.
pub fn load_failed(session: &mut Session, message: &str) -> Vec<PlayerCommand> {
    session.track = None;
    session.play_state = PlayState::Idle;
    session.section_start = 0.0;
    session.section_end = 0.0;
    session.status = Status::LoadFailed(message.to_string());
    tracing::warn!(message, "load failed");
    vec![PlayerCommand::Stop]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        let track = TrackInfo {
            file_name: "song.mp3".to_string(),
            path: Path::new("/music/song.mp3").to_path_buf(),
            size: 1024,
            mime_type: "audio/mp3".to_string(),
        };
        track_loaded(&mut session, track);
        session
    }

    #[test]
    fn test_play_records_start_mark() {
        let mut session = loaded_session();
        let commands = press_play(&mut session, 3.5);
        assert_eq!(commands, vec![PlayerCommand::Play]);
        assert_eq!(session.play_state, PlayState::Playing);
        assert_eq!(session.section_start, 3.5);
        assert_eq!(session.status, Status::Playing);
    }

    #[test]
    fn test_play_without_track_is_noop() {
        let mut session = Session::new();
        assert!(press_play(&mut session, 0.0).is_empty());
        assert_eq!(session.play_state, PlayState::Idle);
    }

    #[test]
    fn test_pause_records_end_mark() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        let commands = press_pause(&mut session, 10.0);
        assert_eq!(commands, vec![PlayerCommand::Pause]);
        assert_eq!(session.play_state, PlayState::Paused);
        assert_eq!(session.section_end, 10.0);
    }

    #[test]
    fn test_repeat_requires_nonempty_section() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        press_pause(&mut session, 0.0);
        assert!(!session.repeat_enabled());
        assert!(press_repeat(&mut session).is_empty());
        assert_eq!(session.play_state, PlayState::Paused);
    }

    #[test]
    fn test_repeat_scenario_full_loop() {
        // load (100 s) -> play at 0 -> pause at 10 -> repeat -> reach 10
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        press_pause(&mut session, 10.0);
        assert!(session.repeat_enabled());

        let commands = press_repeat(&mut session);
        assert_eq!(
            commands,
            vec![PlayerCommand::Seek(0.0), PlayerCommand::Play]
        );
        assert_eq!(session.play_state, PlayState::Repeating);

        // Positions before the end mark do nothing
        assert!(position_tick(&mut session, 5.0).is_empty());
        assert_eq!(session.play_state, PlayState::Repeating);

        let commands = position_tick(&mut session, 10.02);
        assert_eq!(
            commands,
            vec![PlayerCommand::Pause, PlayerCommand::Seek(10.0)]
        );
        assert_eq!(session.play_state, PlayState::Paused);
        assert_eq!(session.status, Status::RepeatDone);
        // Section survives, so the loop can be repeated again
        assert!(session.repeat_enabled());
    }

    #[test]
    fn test_seek_while_playing_moves_start_mark() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        let commands = seek_to(&mut session, 50.0);
        assert_eq!(commands, vec![PlayerCommand::Seek(50.0)]);
        assert_eq!(session.section_start, 50.0);
    }

    #[test]
    fn test_seek_while_repeating_keeps_marks() {
        let mut session = loaded_session();
        press_play(&mut session, 2.0);
        press_pause(&mut session, 8.0);
        press_repeat(&mut session);

        let commands = seek_to(&mut session, 50.0);
        assert_eq!(commands, vec![PlayerCommand::Seek(50.0)]);
        assert_eq!(session.section_start, 2.0);
        assert_eq!(session.section_end, 8.0);
        // Backward or forward seeks do not exit the repeat...
        assert_eq!(session.play_state, PlayState::Repeating);
        // ...and a position past the end mark still completes the loop.
        assert!(!position_tick(&mut session, 50.0).is_empty());
        assert_eq!(session.play_state, PlayState::Paused);
    }

    #[test]
    fn test_remove_track_while_repeating_resets_everything() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        press_pause(&mut session, 10.0);
        press_repeat(&mut session);

        let commands = remove_track(&mut session);
        assert_eq!(commands, vec![PlayerCommand::Stop]);
        assert!(session.track.is_none());
        assert_eq!(session.play_state, PlayState::Idle);
        assert_eq!(session.section_start, 0.0);
        assert_eq!(session.section_end, 0.0);
        assert!(!session.repeat_enabled());
        assert_eq!(session.status, Status::NoFile);
    }

    #[test]
    fn test_ended_clears_flags() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        assert!(track_ended(&mut session).is_empty());
        assert_eq!(session.play_state, PlayState::Idle);
        assert_eq!(session.status, Status::Ended);
    }

    #[test]
    fn test_set_rate_applies_and_echoes() {
        let mut session = loaded_session();
        let commands = set_rate(&mut session, 1.5);
        assert_eq!(commands, vec![PlayerCommand::SetRate(1.5)]);
        assert_eq!(session.playback_rate, 1.5);
    }

    #[test]
    fn test_set_rate_rejects_nonpositive() {
        let mut session = loaded_session();
        assert!(set_rate(&mut session, 0.0).is_empty());
        assert!(set_rate(&mut session, -1.0).is_empty());
        assert!(set_rate(&mut session, f64::NAN).is_empty());
        assert_eq!(session.playback_rate, 1.0);
    }

    #[test]
    fn test_load_failure_clears_track() {
        let mut session = loaded_session();
        let commands = load_failed(&mut session, "no decoder for stream");
        assert_eq!(commands, vec![PlayerCommand::Stop]);
        assert!(session.track.is_none());
        assert_eq!(
            session.status,
            Status::LoadFailed("no decoder for stream".to_string())
        );
    }

    #[test]
    fn test_loading_new_track_replaces_old_marks() {
        let mut session = loaded_session();
        press_play(&mut session, 0.0);
        press_pause(&mut session, 10.0);

        let other = TrackInfo {
            file_name: "other.wav".to_string(),
            path: Path::new("/music/other.wav").to_path_buf(),
            size: 42,
            mime_type: "audio/wav".to_string(),
        };
        track_loaded(&mut session, other);
        assert_eq!(session.section_start, 0.0);
        assert_eq!(session.section_end, 0.0);
        assert_eq!(session.play_state, PlayState::Idle);
        assert_eq!(session.status, Status::FileLoaded);
    }
}
