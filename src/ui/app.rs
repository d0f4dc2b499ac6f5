use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use tracing::debug;

use crate::ops::transitions::{self, PlayerCommand};
use crate::player::audio_player::{AudioPlayer, PlayerEvent};
use crate::types::session::Session;
use crate::types::track::TrackInfo;
use crate::ui::transport::{self, TransportEvent};

/// Seek step for the arrow keys, in seconds.
const ARROW_SEEK_STEP: f64 = 5.0;

pub struct AppState {
    pub session: Session,
    pub player: AudioPlayer,
}

pub struct AbloopApp {
    pub state: AppState,
}

impl AbloopApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn apply(&mut self, commands: Vec<PlayerCommand>) {
        for command in commands {
            match command {
                PlayerCommand::Play => self.state.player.play(),
                PlayerCommand::Pause => self.state.player.pause(),
                PlayerCommand::Seek(seconds) => self.state.player.seek(seconds),
                PlayerCommand::SetRate(rate) => self.state.player.set_rate(rate),
                PlayerCommand::Stop => self.state.player.stop(),
            }
        }
    }

    /// Load a file into the player, ignoring anything that is not audio.
    fn load_track(&mut self, path: PathBuf) {
        let Some(track) = TrackInfo::from_path(&path) else {
            debug!(path = %path.display(), "ignoring non-audio file");
            return;
        };
        match self.state.player.load(&path) {
            Ok(()) => {
                // Pipelines start at 1.0x; carry the session rate over.
                let rate = self.state.session.playback_rate;
                self.state.player.set_rate(rate);
                let commands = transitions::track_loaded(&mut self.state.session, track);
                self.apply(commands);
            }
            Err(e) => {
                let commands = transitions::load_failed(&mut self.state.session, &e.to_string());
                self.apply(commands);
            }
        }
    }

    fn current_position(&self) -> f64 {
        self.state.player.position().unwrap_or(0.0)
    }

    fn handle_transport_event(&mut self, event: TransportEvent) {
        let position = self.current_position();
        let commands = match event {
            TransportEvent::PlayPressed => transitions::press_play(&mut self.state.session, position),
            TransportEvent::PausePressed => {
                transitions::press_pause(&mut self.state.session, position)
            }
            TransportEvent::RepeatPressed => transitions::press_repeat(&mut self.state.session),
            TransportEvent::SeekTo(seconds) => transitions::seek_to(&mut self.state.session, seconds),
            TransportEvent::RateChanged(rate) => transitions::set_rate(&mut self.state.session, rate),
            TransportEvent::RemoveTrack => transitions::remove_track(&mut self.state.session),
        };
        self.apply(commands);
    }

    /// Keyboard shortcuts, active only once a track is loaded: space toggles
    /// play/pause, R repeats when eligible, arrows seek by a fixed step.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if self.state.session.track.is_none() {
            return;
        }
        let (space, repeat_key, left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });
        if space {
            if self.state.session.is_audible() {
                self.handle_transport_event(TransportEvent::PausePressed);
            } else {
                self.handle_transport_event(TransportEvent::PlayPressed);
            }
        }
        if repeat_key {
            self.handle_transport_event(TransportEvent::RepeatPressed);
        }
        if left || right {
            let duration = self.state.player.duration().unwrap_or(0.0);
            let step = if left { -ARROW_SEEK_STEP } else { ARROW_SEEK_STEP };
            let target = (self.current_position() + step).clamp(0.0, duration);
            self.handle_transport_event(TransportEvent::SeekTo(target));
        }
    }
}

impl eframe::App for AbloopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain pipeline bus events first
        for event in self.state.player.poll() {
            match event {
                PlayerEvent::MetadataReady => {
                    debug!(duration = ?self.state.player.duration(), "metadata ready");
                }
                PlayerEvent::Ended => {
                    let commands = transitions::track_ended(&mut self.state.session);
                    self.apply(commands);
                }
                PlayerEvent::Error(message) => {
                    let commands = transitions::load_failed(&mut self.state.session, &message);
                    self.apply(commands);
                }
            }
        }

        // While audible, pull the position so the repeat end mark is checked
        // and the progress display keeps moving.
        if self.state.session.is_audible() {
            if let Some(position) = self.state.player.position() {
                let commands = transitions::position_tick(&mut self.state.session, position);
                self.apply(commands);
            }
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.handle_keyboard(ctx);

        // Files dropped anywhere in the window
        let dropped: Vec<_> = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.load_track(path);
            }
        }

        // Status line at the bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let color = transport::status_color(&self.state.session);
                ui.colored_label(color, "●");
                ui.label(crate::ops::display::status_line(&self.state.session.status));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.track.is_some() {
                let position = self.current_position();
                let duration = self.state.player.duration().unwrap_or(0.0);
                let events = transport::player_panel(ui, &self.state.session, position, duration);
                for event in events {
                    self.handle_transport_event(event);
                }
            } else if let Some(path) = transport::upload_panel(ui) {
                self.load_track(path);
            }
        });
    }
}
