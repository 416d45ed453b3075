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


//! Directory build variant
//!
//! Chapters come from a directory of media files selected and ordered by a
//! keyword list. Producing the chapter table triggers matching, sequential
//! transcoding, and duration probing; the converted tracks are memoized so
//! the later concatenation reuses them without re-running the transcoder.

use crate::audio::chapters::{cumulative_chapters, write_ffmetadata};
use crate::audio::{Concatenator, DurationProbe, Transcoder};
use crate::build::matcher::FileMatcher;
use crate::build::workspace::{ScratchWorkspace, CHAPTERS_FILE, CONCAT_LIST_FILE, JOINED_FILE};
use crate::build::{BuildConfig, ConvertedTrack};
use crate::error::{MediaCatError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds an audiobook from a directory of keyword-matched media files
#[derive(Debug)]
pub struct DirectorySource {
    directory: PathBuf,
    keywords: Vec<String>,
    matcher: FileMatcher,
    transcoder: Transcoder,
    show_progress: bool,
    converted: Option<Vec<ConvertedTrack>>,
}

impl DirectorySource {
    /// Validate inputs and load the keyword list.
    ///
    /// All validation happens here, before any scratch workspace exists.
    /// Keywords keep their list order; file extensions are stripped so a
    /// plain file listing can be reused as a keyword list.
    pub fn new(directory: &Path, keywords_file: &Path, config: &BuildConfig) -> Result<Self> {
        if !directory.is_dir() {
            return Err(MediaCatError::input_not_found(directory.display()));
        }
        if std::fs::read_dir(directory)?.next().is_none() {
            return Err(MediaCatError::empty_input(format!(
                "directory is empty: {}",
                directory.display()
            )));
        }
        if !keywords_file.exists() {
            return Err(MediaCatError::input_not_found(keywords_file.display()));
        }

        let keywords = load_keywords(keywords_file)?;
        debug!("loaded {} keywords", keywords.len());

        Ok(Self {
            directory: directory.to_path_buf(),
            keywords,
            matcher: FileMatcher::new(config.match_mode),
            transcoder: Transcoder::new(config.bitrate.clone(), config.re_encode),
            show_progress: !config.verbose,
            converted: None,
        })
    }

    /// Write the cumulative-duration chapter table into the workspace.
    pub async fn chapters(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        let tracks = self.converted_tracks(workspace).await?;
        let chapters =
            cumulative_chapters(tracks.iter().map(|t| (t.title.as_str(), t.duration_seconds)));

        let metadata_path = workspace.join(CHAPTERS_FILE);
        tokio::fs::write(&metadata_path, write_ffmetadata(&chapters)).await?;
        Ok(metadata_path)
    }

    /// Concatenate the converted tracks into one raw audio stream.
    pub async fn raw_audio(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        let joined_path = workspace.join(JOINED_FILE);
        let list_path = workspace.join(CONCAT_LIST_FILE);

        let tracks = self.converted_tracks(workspace).await?;
        let paths: Vec<&Path> = tracks.iter().map(|t| t.path.as_path()).collect();
        Concatenator::concat(&paths, &list_path, &joined_path).await?;

        Ok(joined_path)
    }

    /// Matched files, transcoded in chapter order, computed once.
    ///
    /// Both the chapter table and the concatenation consume this list; the
    /// memoization guarantees transcoding never runs twice.
    async fn converted_tracks(
        &mut self,
        workspace: &ScratchWorkspace,
    ) -> Result<&[ConvertedTrack]> {
        if self.converted.is_none() {
            let matched = self.matcher.match_files(&self.directory, &self.keywords)?;
            if matched.is_empty() {
                return Err(MediaCatError::NoMatchingFiles);
            }

            let progress = self.show_progress.then(|| {
                let bar = ProgressBar::new(matched.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar.set_message("Converting files");
                bar
            });

            let mut tracks = Vec::with_capacity(matched.len());
            for (index, file) in matched.iter().enumerate() {
                let output = workspace.track_path(index);
                self.transcoder.convert(&file.path, &output).await?;
                let duration_seconds = DurationProbe::duration_seconds(&output).await?;
                tracks.push(ConvertedTrack {
                    index,
                    title: file.keyword.clone(),
                    path: output,
                    duration_seconds,
                });
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }
            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            self.converted = Some(tracks);
        }

        Ok(self.converted.as_deref().unwrap_or_default())
    }
}

/// Read a keyword file: one keyword per line, blank lines skipped, file
/// extensions stripped.
fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let keywords: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(strip_extension)
        .collect();

    if keywords.is_empty() {
        return Err(MediaCatError::empty_input(format!(
            "no keywords found in {}",
            path.display()
        )));
    }
    Ok(keywords)
}

fn strip_extension(keyword: &str) -> String {
    Path::new(keyword)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| keyword.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_config() -> BuildConfig {
        BuildConfig::default()
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let list = write_file(&dir, "list.txt", "01\n");
        let missing = dir.path().join("nope");

        let err = DirectorySource::new(&missing, &list, &default_config()).unwrap_err();
        assert!(matches!(err, MediaCatError::InputNotFound(_)));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let media = TempDir::new().unwrap();
        let list = write_file(&dir, "list.txt", "01\n");

        let err = DirectorySource::new(media.path(), &list, &default_config()).unwrap_err();
        assert!(matches!(err, MediaCatError::EmptyInput(_)));
    }

    #[test]
    fn test_missing_keyword_file_rejected() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "01-intro.mp3", "x");

        let err = DirectorySource::new(
            dir.path(),
            &dir.path().join("no-list.txt"),
            &default_config(),
        )
        .unwrap_err();
        assert!(matches!(err, MediaCatError::InputNotFound(_)));
    }

    #[test]
    fn test_blank_keyword_file_rejected() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "01-intro.mp3", "x");
        let list = write_file(&dir, "list.txt", "\n\n");

        let err = DirectorySource::new(dir.path(), &list, &default_config()).unwrap_err();
        assert!(matches!(err, MediaCatError::EmptyInput(_)));
    }

    #[test]
    fn test_keyword_extensions_stripped() {
        assert_eq!(strip_extension("01-intro.mp3"), "01-intro");
        assert_eq!(strip_extension("01"), "01");
        assert_eq!(strip_extension("a.b.c"), "a.b");
    }
}
