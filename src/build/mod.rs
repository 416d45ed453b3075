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


//! Build orchestration
//!
//! The orchestrator sequences one build: ask the active variant for the
//! chapter-metadata artifact, then for the raw concatenated audio, then
//! remux the two into the output container. It owns the scratch workspace
//! for the whole build and releases it on every exit path unless the caller
//! asked to keep it.
//!
//! The two variants (directory-of-files, single-file-with-chapter-list) are
//! a tagged enum sharing the `{chapters, raw_audio}` capability set; the
//! orchestrator never looks inside them.

pub mod directory;
pub mod matcher;
pub mod single_file;
pub mod workspace;

pub use directory::DirectorySource;
pub use matcher::{FileMatcher, MatchMode, MatchedFile};
pub use single_file::SingleFileSource;
pub use workspace::ScratchWorkspace;

use crate::audio::MetadataMerger;
use crate::error::{MediaCatError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default re-encode bitrate
pub const DEFAULT_BITRATE: &str = "196k";

/// Immutable configuration for one build
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Encoder bitrate string, e.g. "196k"
    pub bitrate: String,
    /// Re-encode inputs even when they already carry the target container
    pub re_encode: bool,
    /// Verbose mode: engine diagnostics at debug level, no progress bar
    pub verbose: bool,
    /// Delete the scratch workspace when the build finishes
    pub cleanup: bool,
    /// Ambiguous-match handling for the directory variant
    pub match_mode: MatchMode,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            bitrate: DEFAULT_BITRATE.to_string(),
            re_encode: true,
            verbose: false,
            cleanup: true,
            match_mode: MatchMode::default(),
        }
    }
}

/// A normalized track in the scratch workspace, in chapter order
#[derive(Debug, Clone)]
pub struct ConvertedTrack {
    /// Zero-based chapter position
    pub index: usize,
    /// Chapter label (the matching keyword for the directory variant)
    pub title: String,
    /// Location inside the scratch workspace
    pub path: PathBuf,
    /// Probed duration in seconds
    pub duration_seconds: f64,
}

/// Build pipeline states
///
/// `Failed` is absorbing from any non-terminal state; both terminal states
/// release the workspace unless retention was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Created,
    GeneratingChapters,
    ConvertingAudio,
    Concatenating,
    Merging,
    Done,
    Failed,
}

/// The two build variants behind one capability set
#[derive(Debug)]
pub enum BuildSource {
    Directory(DirectorySource),
    SingleFile(SingleFileSource),
}

impl BuildSource {
    /// Pick the variant for `path`: directory builds match keywords against
    /// its entries, a plain file builds from an external chapter list.
    pub fn for_path(path: &Path, list_file: &Path, config: &BuildConfig) -> Result<Self> {
        if !list_file.exists() {
            return Err(MediaCatError::input_not_found(list_file.display()));
        }
        if !config.re_encode {
            warn!("copying files instead of re-encoding may cause issues");
        }

        if path.is_dir() {
            Ok(Self::Directory(DirectorySource::new(path, list_file, config)?))
        } else if path.is_file() {
            Ok(Self::SingleFile(SingleFileSource::new(
                path, list_file, config,
            )?))
        } else {
            Err(MediaCatError::input_not_found(path.display()))
        }
    }

    async fn chapters(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        match self {
            Self::Directory(source) => source.chapters(workspace).await,
            Self::SingleFile(source) => source.chapters(workspace).await,
        }
    }

    async fn raw_audio(&mut self, workspace: &ScratchWorkspace) -> Result<PathBuf> {
        match self {
            Self::Directory(source) => source.raw_audio(workspace).await,
            Self::SingleFile(source) => source.raw_audio(workspace).await,
        }
    }
}

/// What a finished build hands back to the caller
#[derive(Debug)]
pub struct BuildOutcome {
    /// The resolved output container path
    pub output: PathBuf,
    /// The scratch workspace path, when cleanup was suppressed
    pub retained_workspace: Option<PathBuf>,
}

/// Sequences chapters, raw audio, and the final metadata merge for one build
pub struct BuildOrchestrator {
    source: BuildSource,
    workspace: ScratchWorkspace,
    cleanup: bool,
    state: BuildState,
}

impl BuildOrchestrator {
    /// Create the orchestrator and its scratch workspace.
    ///
    /// Input validation belongs to the source constructors, which run before
    /// this; the workspace only exists once the inputs are known good.
    pub fn new(source: BuildSource, cleanup: bool) -> Result<Self> {
        Ok(Self {
            source,
            workspace: ScratchWorkspace::create()?,
            cleanup,
            state: BuildState::Created,
        })
    }

    /// Current pipeline state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Path of the scratch workspace owned by this build.
    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Run the full build, consuming the orchestrator.
    ///
    /// On success the output container exists at `output_file` and nothing
    /// is left behind at the destination on failure; the merge writes to a
    /// sibling staging file that is renamed only after the engine succeeds.
    /// The workspace is released on every path unless cleanup was
    /// suppressed, in which case its location is part of the outcome.
    pub async fn build(mut self, output_file: &Path) -> Result<BuildOutcome> {
        let result = self.run(output_file).await;
        self.transition(match &result {
            Ok(()) => BuildState::Done,
            Err(_) => BuildState::Failed,
        });

        let retained_workspace = if self.cleanup {
            match (result, self.workspace.close()) {
                (Ok(()), Err(close_err)) => return Err(close_err),
                (Err(build_err), _) => return Err(build_err),
                (Ok(()), Ok(())) => {}
            }
            None
        } else {
            let kept = self.workspace.retain();
            info!("temporary files kept in: {}", kept.display());
            result?;
            Some(kept)
        };

        let output = output_file
            .canonicalize()
            .unwrap_or_else(|_| output_file.to_path_buf());
        Ok(BuildOutcome {
            output,
            retained_workspace,
        })
    }

    async fn run(&mut self, output_file: &Path) -> Result<()> {
        // Chapters always come first: their boundaries depend on the final
        // converted-track durations, and concatenation may not start before
        // they exist.
        self.transition(BuildState::GeneratingChapters);
        let chapters_path = self.source.chapters(&self.workspace).await?;

        // The variants fold conversion into chapter generation via the
        // memoized track list; the state still passes through here so the
        // sequence is observable.
        self.transition(BuildState::ConvertingAudio);

        self.transition(BuildState::Concatenating);
        let raw_audio = self.source.raw_audio(&self.workspace).await?;

        self.transition(BuildState::Merging);
        let staging = output_file.with_extension("tmp.m4b");
        match MetadataMerger::merge(&raw_audio, &chapters_path, &staging).await {
            Ok(()) => {
                tokio::fs::rename(&staging, output_file).await?;
                Ok(())
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&staging).await;
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: BuildState) {
        debug!("build state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
