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


//! Keyword-driven file matching
//!
//! Keywords are matched in list order against the directory's file names, so
//! keyword order, not filesystem order, is the authoritative chapter order.
//! Directory entries are scanned in name order within each keyword, which
//! keeps multi-file keywords deterministic.

use crate::error::{MediaCatError, Result};
use crate::media;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How ambiguous matches are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// A file selected by several keywords yields one chapter per match,
    /// with a data-quality warning
    #[default]
    Permissive,
    /// A file selected by two different keywords aborts the build
    Strict,
}

/// A filesystem path paired with the keyword that selected it
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedFile {
    pub path: PathBuf,
    pub keyword: String,
}

/// Selects and orders the files that become chapters
#[derive(Debug)]
pub struct FileMatcher {
    mode: MatchMode,
}

impl FileMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Match `keywords` (in order) against the plain files in `directory`.
    ///
    /// A keyword with no match is logged and skipped; a keyword matching
    /// several files yields several chapters; entries matching no keyword
    /// are reported and dropped. An empty result is returned as-is - the
    /// caller decides that zero matches is fatal.
    pub fn match_files(&self, directory: &Path, keywords: &[String]) -> Result<Vec<MatchedFile>> {
        let entries = Self::plain_files(directory)?;

        let mut matched: Vec<MatchedFile> = Vec::new();
        let mut first_match: HashMap<PathBuf, String> = HashMap::new();

        for keyword in keywords {
            let mut hit = false;
            for (name, path) in &entries {
                if !name.contains(keyword.as_str()) {
                    continue;
                }
                hit = true;

                match first_match.get(path) {
                    Some(previous) if previous != keyword => {
                        if self.mode == MatchMode::Strict {
                            return Err(MediaCatError::AmbiguousMatch {
                                file: name.clone(),
                                first: previous.clone(),
                                second: keyword.clone(),
                            });
                        }
                        warn!(
                            "file '{}' matched both keyword '{}' and keyword '{}'",
                            name, previous, keyword
                        );
                    }
                    _ => {
                        first_match.insert(path.clone(), keyword.clone());
                    }
                }

                if !media::is_media_path(path) {
                    warn!("file '{}' does not look like a media file", name);
                }

                matched.push(MatchedFile {
                    path: path.clone(),
                    keyword: keyword.clone(),
                });
            }

            if !hit {
                info!("keyword '{}' matched no files", keyword);
            }
        }

        for (name, path) in &entries {
            if !first_match.contains_key(path) {
                warn!("file '{}' doesn't match any keyword", name);
            }
        }

        Ok(matched)
    }

    /// Plain files in `directory`, non-recursive, sorted by name.
    fn plain_files(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push((name, path));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_order_is_chapter_order() {
        let dir = TempDir::new().unwrap();
        // Created in reverse name order; keyword order must still win.
        touch(&dir, "02-body.mp3");
        touch(&dir, "01-intro.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["01", "02"]))
            .unwrap();

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].keyword, "01");
        assert!(matched[0].path.ends_with("01-intro.mp3"));
        assert_eq!(matched[1].keyword, "02");
        assert!(matched[1].path.ends_with("02-body.mp3"));
    }

    #[test]
    fn test_keyword_with_no_match_is_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "01-intro.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["99", "01"]))
            .unwrap();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].keyword, "01");
    }

    #[test]
    fn test_one_keyword_many_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "part-b.mp3");
        touch(&dir, "part-a.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["part"]))
            .unwrap();

        // Both files, in name order within the keyword.
        assert_eq!(matched.len(), 2);
        assert!(matched[0].path.ends_with("part-a.mp3"));
        assert!(matched[1].path.ends_with("part-b.mp3"));
    }

    #[test]
    fn test_file_matching_two_keywords_duplicated_in_permissive() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "01-finale.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["01", "finale"]))
            .unwrap();

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].keyword, "01");
        assert_eq!(matched[1].keyword, "finale");
    }

    #[test]
    fn test_file_matching_two_keywords_fatal_in_strict() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "01-finale.mp3");

        let matcher = FileMatcher::new(MatchMode::Strict);
        let err = matcher
            .match_files(dir.path(), &keywords(&["01", "finale"]))
            .unwrap_err();

        match err {
            MediaCatError::AmbiguousMatch { file, first, second } => {
                assert_eq!(file, "01-finale.mp3");
                assert_eq!(first, "01");
                assert_eq!(second, "finale");
            }
            other => panic!("expected AmbiguousMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_keyword_stays_stable() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "01-intro.mp3");

        // Duplicate keywords produce duplicate chapters, even in strict mode.
        let matcher = FileMatcher::new(MatchMode::Strict);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["01", "01"]))
            .unwrap();

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].keyword, "01");
        assert_eq!(matched[1].keyword, "01");
    }

    #[test]
    fn test_subdirectories_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("01-directory")).unwrap();
        touch(&dir, "01-intro.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["01"]))
            .unwrap();

        assert_eq!(matched.len(), 1);
        assert!(matched[0].path.ends_with("01-intro.mp3"));
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "unrelated.mp3");

        let matcher = FileMatcher::new(MatchMode::Permissive);
        let matched = matcher
            .match_files(dir.path(), &keywords(&["nope"]))
            .unwrap();

        assert!(matched.is_empty());
    }
}
