use std::path::{Path, PathBuf};

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac", "opus"];

#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub mime_type: String,
}

impl TrackInfo {
    /// Describe a file on disk, inferring its type from the extension.
    /// Returns `None` for anything that does not look like audio; non-audio
    /// drops are ignored rather than reported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        Some(TrackInfo {
            file_name,
            path: path.to_path_buf(),
            size,
            mime_type: format!("audio/{ext}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_audio_extension() {
        assert!(TrackInfo::from_path(Path::new("/tmp/movie.mp4")).is_none());
        assert!(TrackInfo::from_path(Path::new("/tmp/notes.txt")).is_none());
        assert!(TrackInfo::from_path(Path::new("/tmp/noext")).is_none());
    }

    #[test]
    fn test_accepts_audio_extension_case_insensitive() {
        let track = TrackInfo::from_path(Path::new("/tmp/song.MP3")).unwrap();
        assert_eq!(track.file_name, "song.MP3");
        assert_eq!(track.mime_type, "audio/mp3");
        // File does not exist, size just reads as 0
        assert_eq!(track.size, 0);
    }
}
