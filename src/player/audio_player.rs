//! GStreamer-backed audio playback. One `playbin` pipeline per loaded file;
//! the UI thread drives it with synchronous calls and drains its bus once a
//! frame, so no extra threads or locks are needed here.

use std::path::Path;

use gstreamer as gst;
use gstreamer::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("cannot build playback pipeline: {0}")]
    Pipeline(#[from] gst::glib::BoolError),
    #[error("cannot resolve file path {0}")]
    Uri(String),
}

/// Asynchronous notifications drained from the pipeline bus.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Preroll finished; duration and position are now queryable.
    MetadataReady,
    /// The track played through to its end.
    Ended,
    /// Fatal pipeline error (unsupported or corrupt input, missing decoder).
    Error(String),
}

/// Thin wrapper around a `playbin` element. All operations silently no-op
/// when no track is loaded.
pub struct AudioPlayer {
    playbin: Option<gst::Element>,
    rate: f64,
}

impl AudioPlayer {
    pub fn new() -> Self {
        AudioPlayer {
            playbin: None,
            rate: 1.0,
        }
    }

    /// Load a file, atomically replacing any current pipeline. The new
    /// pipeline prerolls paused; decode errors surface later via [`poll`].
    ///
    /// [`poll`]: AudioPlayer::poll
    pub fn load(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.stop();
        let uri = gst::glib::filename_to_uri(path, None)
            .map_err(|e| PlayerError::Uri(e.to_string()))?;
        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()?;
        if playbin.set_state(gst::State::Paused).is_err() {
            warn!(%uri, "pipeline refused to preroll");
        }
        debug!(%uri, "pipeline created");
        self.playbin = Some(playbin);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.playbin.is_some()
    }

    pub fn play(&mut self) {
        if let Some(playbin) = &self.playbin {
            let _ = playbin.set_state(gst::State::Playing);
        }
    }

    pub fn pause(&mut self) {
        if let Some(playbin) = &self.playbin {
            let _ = playbin.set_state(gst::State::Paused);
        }
    }

    /// Tear down and drop the pipeline.
    pub fn stop(&mut self) {
        if let Some(playbin) = self.playbin.take() {
            let _ = playbin.set_state(gst::State::Null);
        }
    }

    /// Flushing accurate seek, preserving the current rate.
    pub fn seek(&mut self, seconds: f64) {
        let Some(playbin) = &self.playbin else { return };
        let target = clock_from_secs(seconds);
        if let Err(e) = playbin.seek(
            self.rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            target,
            gst::SeekType::None,
            gst::ClockTime::NONE,
        ) {
            warn!(seconds, error = %e, "seek failed");
        }
    }

    /// Change the playback rate in place. Rate changes ride on a flushing
    /// seek to the current position.
    pub fn set_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        self.rate = rate;
        let Some(playbin) = &self.playbin else { return };
        let position = playbin
            .query_position::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO);
        if let Err(e) = playbin.seek(
            rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            position,
            gst::SeekType::None,
            gst::ClockTime::NONE,
        ) {
            warn!(rate, error = %e, "rate change failed");
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Track length in seconds, `None` before preroll completes.
    pub fn duration(&self) -> Option<f64> {
        self.playbin
            .as_ref()?
            .query_duration::<gst::ClockTime>()
            .map(clock_to_secs)
    }

    /// Current playhead in seconds, `None` before preroll completes.
    pub fn position(&self) -> Option<f64> {
        self.playbin
            .as_ref()?
            .query_position::<gst::ClockTime>()
            .map(clock_to_secs)
    }

    /// Drain pending bus messages without blocking. A fatal error tears the
    /// pipeline down before it is reported.
    pub fn poll(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        let Some(playbin) = &self.playbin else {
            return events;
        };
        let Some(bus) = playbin.bus() else {
            return events;
        };
        while let Some(message) = bus.pop() {
            match message.view() {
                gst::MessageView::Eos(..) => events.push(PlayerEvent::Ended),
                gst::MessageView::Error(err) => {
                    events.push(PlayerEvent::Error(err.error().to_string()));
                }
                gst::MessageView::AsyncDone(..) | gst::MessageView::DurationChanged(..) => {
                    events.push(PlayerEvent::MetadataReady);
                }
                _ => {}
            }
        }
        if events.iter().any(|e| matches!(e, PlayerEvent::Error(_))) {
            self.stop();
        }
        events
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clock_to_secs(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

fn clock_from_secs(seconds: f64) -> gst::ClockTime {
    gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64)
}
