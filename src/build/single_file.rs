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


//! Single-file build variant
//!
//! One media file plus an external `"HH:MM:SS title"` chapter list. The file
//! is transcoded once (memoized); its probed duration bounds the final
//! chapter's end time. No concatenation is needed - the raw audio artifact
//! is the converted track itself.

use crate::audio::chapters::{parse_chapter_definitions, write_ffmetadata};
use crate::audio::{DurationProbe, Transcoder};
use crate::build::workspace::{ScratchWorkspace, CHAPTERS_FILE};
use crate::build::{BuildConfig, ConvertedTrack};
use crate::error::{MediaCatError, Result};
use crate::media;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Builds an audiobook from one media file and a chapter-definition list
#[derive(Debug)]
pub struct SingleFileSource {
    input: PathBuf,
    chapter_text: String,
    transcoder: Transcoder,
    converted: Option<ConvertedTrack>,
}

impl SingleFileSource {
    /// Validate inputs and load the chapter-definition text.
    ///
    /// The text is parsed later, once the converted track's duration is
    /// known; unreadable inputs are rejected here, before any workspace
    /// exists.
    pub fn new(input: &Path, chapter_file: &Path, config: &BuildConfig) -> Result<Self> {
        if !input.is_file() {
            return Err(MediaCatError::input_not_found(input.display()));
        }
        if !chapter_file.exists() {
            return Err(MediaCatError::input_not_found(chapter_file.display()));
        }

        let chapter_text = std::fs::read_to_string(chapter_file)?;
        if chapter_text.lines().all(|line| line.trim().is_empty()) {
            return Err(MediaCatError::empty_input(format!(
                "no chapter definitions found in {}",
                chapter_file.display()
            )));
        }

        if !media::is_media_path(input) {
            warn!(
                "input '{}' does not look like a media file",
                input.display()
            );
        }

        Ok(Self {
            input: input.to_path_buf(),
            chapter_text,
            transcoder: Transcoder::new(config.bitrate.clone(), config.re_encode),
            converted: None,
        })
    }

    /// Parse the chapter list against the converted track's duration and
    /// write the chapter table into the workspace.
    pub async fn chapters(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        let (_, total_duration) = self.converted(workspace).await?;
        let chapters = parse_chapter_definitions(&self.chapter_text, total_duration)?;

        let metadata_path = workspace.join(CHAPTERS_FILE);
        tokio::fs::write(&metadata_path, write_ffmetadata(&chapters)).await?;
        Ok(metadata_path)
    }

    /// The raw audio artifact is the single converted track.
    pub async fn raw_audio(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        let (path, _) = self.converted(workspace).await?;
        Ok(path)
    }

    /// Transcode the input once (memoized) and probe its duration.
    async fn converted(&mut self, workspace: &ScratchWorkspace) -> Result<(PathBuf, f64)> {
        if let Some(track) = &self.converted {
            return Ok((track.path.clone(), track.duration_seconds));
        }

        let output = workspace.track_path(0);
        self.transcoder.convert(&self.input, &output).await?;
        let duration_seconds = DurationProbe::duration_seconds(&output).await?;

        let title = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.converted = Some(ConvertedTrack {
            index: 0,
            title,
            path: output.clone(),
            duration_seconds,
        });

        Ok((output, duration_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_input_rejected() {
        let dir = TempDir::new().unwrap();
        let chapter_file = dir.path().join("chapters.txt");
        std::fs::write(&chapter_file, "00:00:00 Intro\n").unwrap();

        let err = SingleFileSource::new(
            &dir.path().join("missing.mp3"),
            &chapter_file,
            &BuildConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MediaCatError::InputNotFound(_)));
    }

    #[test]
    fn test_missing_chapter_file_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("book.mp3");
        std::fs::write(&input, b"x").unwrap();

        let err = SingleFileSource::new(
            &input,
            &dir.path().join("missing.txt"),
            &BuildConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MediaCatError::InputNotFound(_)));
    }

    #[test]
    fn test_blank_chapter_file_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("book.mp3");
        std::fs::write(&input, b"x").unwrap();
        let chapter_file = dir.path().join("chapters.txt");
        std::fs::write(&chapter_file, "\n  \n").unwrap();

        let err =
            SingleFileSource::new(&input, &chapter_file, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, MediaCatError::EmptyInput(_)));
    }
}
