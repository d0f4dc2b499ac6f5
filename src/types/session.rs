use crate::types::track::TrackInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Idle,
    Playing,
    Paused,
    Repeating,
}

/// What the status line should say. Exactly one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    NoFile,
    FileLoaded,
    Playing,
    Repeating,
    Paused,
    RepeatDone,
    Ended,
    LoadFailed(String),
}

/// All mutable player state. Created once at startup, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub track: Option<TrackInfo>,
    pub play_state: PlayState,
    /// Position where the user last pressed Play (start-of-section mark).
    pub section_start: f64,
    /// Position where the user last pressed Pause (end-of-section mark).
    pub section_end: f64,
    pub playback_rate: f64,
    pub status: Status,
}

impl Session {
    pub fn new() -> Self {
        Session {
            track: None,
            play_state: PlayState::Idle,
            section_start: 0.0,
            section_end: 0.0,
            playback_rate: 1.0,
            status: Status::NoFile,
        }
    }

    /// Repeat is only offered once the user has played, then paused at a
    /// different position, so a nonempty section exists.
    pub fn repeat_enabled(&self) -> bool {
        self.track.is_some()
            && self.play_state == PlayState::Paused
            && self.section_start != self.section_end
    }

    /// True while the pipeline should be producing sound.
    pub fn is_audible(&self) -> bool {
        matches!(self.play_state, PlayState::Playing | PlayState::Repeating)
    }

    pub fn has_section(&self) -> bool {
        self.section_start != self.section_end
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
