pub mod audio_player;
