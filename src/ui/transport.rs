use eframe::egui;

use crate::ops::display;
use crate::types::session::{PlayState, Session};
use crate::types::track::AUDIO_EXTENSIONS;

pub const SPEED_PRESETS: &[f64] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// What the user did in the transport panel this frame. The app translates
/// these into state transitions and player commands.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    PlayPressed,
    PausePressed,
    RepeatPressed,
    SeekTo(f64),
    RateChanged(f64),
    RemoveTrack,
}

/// Upload area shown while no track is loaded. Returns the picked file, if
/// any; drag-drop is handled at the app level since drops can land anywhere.
pub fn upload_panel(ui: &mut egui::Ui) -> Option<std::path::PathBuf> {
    let mut picked = None;
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Section repeat player");
        ui.label("Play marks the section start, pause marks its end,");
        ui.label("repeat loops between the two marks.");
        ui.add_space(20.0);
        if ui.button("Choose an audio file…").clicked() {
            picked = rfd::FileDialog::new()
                .add_filter("Audio", AUDIO_EXTENSIONS)
                .pick_file();
        }
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("…or drop one anywhere in this window")
                .color(egui::Color32::GRAY),
        );
    });
    picked
}

/// Transport panel shown while a track is loaded: file row, buttons,
/// progress bar, speed controls and the section summary.
pub fn player_panel(
    ui: &mut egui::Ui,
    session: &Session,
    position: f64,
    duration: f64,
) -> Vec<TransportEvent> {
    let mut events = Vec::new();

    // File row
    ui.horizontal(|ui| {
        if let Some(track) = &session.track {
            ui.label("🎵");
            ui.label(&track.file_name);
            ui.label(
                egui::RichText::new(format!("({} KiB)", track.size / 1024))
                    .color(egui::Color32::GRAY),
            );
        }
        if ui.button("✖ Remove").clicked() {
            events.push(TransportEvent::RemoveTrack);
        }
    });
    ui.separator();

    // Transport buttons
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!session.is_audible(), egui::Button::new("▶ Play"))
            .clicked()
        {
            events.push(TransportEvent::PlayPressed);
        }
        if ui
            .add_enabled(session.is_audible(), egui::Button::new("⏸ Pause"))
            .clicked()
        {
            events.push(TransportEvent::PausePressed);
        }
        if ui
            .add_enabled(session.repeat_enabled(), egui::Button::new("🔁 Repeat"))
            .clicked()
        {
            events.push(TransportEvent::RepeatPressed);
        }
    });

    // Progress bar (scrubber) with time labels
    ui.horizontal(|ui| {
        ui.label(display::format_time(position));
        let mut scrub = position;
        let slider = egui::Slider::new(&mut scrub, 0.0..=duration.max(0.001)).show_value(false);
        if ui.add(slider).changed() {
            events.push(TransportEvent::SeekTo(scrub));
        }
        ui.label(display::format_time(duration));
    });
    ui.add(
        egui::ProgressBar::new(display::progress_ratio(position, duration)).desired_height(4.0),
    );

    ui.separator();

    // Speed controls: slider plus presets, both echoing the session rate
    ui.horizontal(|ui| {
        ui.label("Speed");
        let mut rate = session.playback_rate;
        if ui
            .add(egui::Slider::new(&mut rate, 0.25..=3.0).show_value(false))
            .changed()
        {
            events.push(TransportEvent::RateChanged(rate));
        }
        ui.label(format!("{:.2}x", session.playback_rate));
        for &preset in SPEED_PRESETS {
            let selected = session.playback_rate == preset;
            if ui
                .selectable_label(selected, format!("{preset}x"))
                .clicked()
            {
                events.push(TransportEvent::RateChanged(preset));
            }
        }
    });

    if let Some(summary) = display::section_summary(session) {
        ui.separator();
        ui.label(summary);
    }

    events
}

/// Color for the status dot, keyed off the play state like the original's
/// status-indicator classes.
pub fn status_color(session: &Session) -> egui::Color32 {
    match session.play_state {
        PlayState::Playing => egui::Color32::from_rgb(0x4c, 0xaf, 0x50),
        PlayState::Repeating => egui::Color32::from_rgb(0x21, 0x96, 0xf3),
        PlayState::Paused => egui::Color32::from_rgb(0xff, 0x98, 0x00),
        PlayState::Idle => egui::Color32::GRAY,
    }
}
