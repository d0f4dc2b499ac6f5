mod ops;
mod player;
mod types;
mod ui;

use crate::player::audio_player::AudioPlayer;
use crate::types::session::Session;
use crate::ui::app::{AbloopApp, AppState};
use gstreamer as gst;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let _ = gst::init();

    let app_state = AppState {
        session: Session::new(),
        player: AudioPlayer::new(),
    };
    let app = AbloopApp::new(app_state);

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "abloop",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
