// MediaCat - Chaptered Audiobook Assembly
// Copyright (C) 2025 MediaCat contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Media file extension classification

/// Common audio container/codec extensions
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "m4a", "wma", "aiff", "alac", "opus", "amr",
];

/// Common video container extensions (still valid chapter sources, the
/// transcoder drops everything but the audio stream)
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "3gp", "mpeg", "mpg",
];

/// Check whether a file extension is a common media format (audio or video).
///
/// Accepts extensions with or without a leading dot, case-insensitively:
/// `"mp4"`, `".mp3"`, and `"MKV"` are all recognized.
pub fn is_media_extension(ext: &str) -> bool {
    if ext.is_empty() {
        return false;
    }

    let normalized = ext.trim_start_matches('.').to_lowercase();

    AUDIO_EXTENSIONS.contains(&normalized.as_str()) || VIDEO_EXTENSIONS.contains(&normalized.as_str())
}

/// Check whether a path points at a recognizable media file.
pub fn is_media_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(is_media_extension)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_audio_extensions() {
        assert!(is_media_extension("mp3"));
        assert!(is_media_extension(".m4a"));
        assert!(is_media_extension("FLAC"));
        assert!(is_media_extension("opus"));
    }

    #[test]
    fn test_video_extensions() {
        assert!(is_media_extension("mp4"));
        assert!(is_media_extension(".MKV"));
        assert!(is_media_extension("webm"));
    }

    #[test]
    fn test_rejects_non_media() {
        assert!(!is_media_extension(""));
        assert!(!is_media_extension("txt"));
        assert!(!is_media_extension(".pdf"));
    }

    #[test]
    fn test_media_path() {
        assert!(is_media_path(Path::new("/tmp/01-intro.mp3")));
        assert!(!is_media_path(Path::new("/tmp/notes.txt")));
        assert!(!is_media_path(Path::new("/tmp/no_extension")));
    }
}
