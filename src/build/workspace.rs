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


//! Scratch workspace lifecycle
//!
//! Every build owns exactly one uniquely named scratch directory holding all
//! intermediate artifacts (converted tracks, the chapter table, the concat
//! list, the joined stream). Deletion is tied to the guard's drop so it runs
//! on every exit path; the only way to keep the directory is to explicitly
//! take ownership of it with [`ScratchWorkspace::retain`].

use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Names of the well-known artifacts inside a workspace
pub const CHAPTERS_FILE: &str = "chapters.txt";
pub const CONCAT_LIST_FILE: &str = "inputs.txt";
pub const JOINED_FILE: &str = "joined.m4b";

/// An ephemeral directory exclusively owned by one build
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Create a uniquely named scratch directory.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("mediacat-").tempdir()?;
        debug!("scratch workspace created: {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a named artifact inside the workspace.
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path of the Nth converted track, `NN.m4a`.
    pub fn track_path(&self, index: usize) -> PathBuf {
        self.join(format!("{:02}.{}", index, crate::audio::TARGET_EXTENSION))
    }

    /// Delete the workspace now, surfacing any I/O error.
    pub fn close(self) -> Result<()> {
        debug!("scratch workspace removed: {}", self.dir.path().display());
        self.dir.close()?;
        Ok(())
    }

    /// Give up cleanup and hand the directory to the caller.
    pub fn retain(self) -> PathBuf {
        self.dir.into_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_removed_on_drop() {
        let ws = ScratchWorkspace::create().unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.is_dir());
        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn test_workspace_removed_on_close() {
        let ws = ScratchWorkspace::create().unwrap();
        let path = ws.path().to_path_buf();
        std::fs::write(ws.join("00.m4a"), b"track").unwrap();
        ws.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_retained_workspace_survives() {
        let ws = ScratchWorkspace::create().unwrap();
        let kept = ws.retain();
        assert!(kept.is_dir());
        std::fs::remove_dir_all(&kept).unwrap();
    }

    #[test]
    fn test_track_path_naming() {
        let ws = ScratchWorkspace::create().unwrap();
        let p = ws.track_path(3);
        assert!(p.ends_with("03.m4a"));
    }
}
