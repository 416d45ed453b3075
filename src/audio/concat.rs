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


//! Stream-copy concatenation of converted tracks
//!
//! All inputs share the same codec and container by the time they reach this
//! step (the transcoder guarantees it), so the join uses ffmpeg's concat
//! demuxer with `-c copy`: input order is preserved exactly and sample data
//! is never touched.

use crate::audio::engine;
use crate::error::{MediaCatError, Result};
use std::path::Path;

/// Joins an ordered list of same-codec tracks into one stream
pub struct Concatenator;

impl Concatenator {
    /// Concatenate `tracks` (in order) into `output`, using `list_path` for
    /// the intermediate concat-demuxer list file.
    pub async fn concat(tracks: &[&Path], list_path: &Path, output: &Path) -> Result<()> {
        tokio::fs::write(list_path, Self::concat_list(tracks)).await?;

        let args = Self::concat_args(list_path, output);
        let result = engine::run_tool("ffmpeg", &args).await?;

        if !result.status.success() {
            return Err(MediaCatError::ConcatFailed(engine::engine_diagnostic(
                &result,
            )));
        }

        Ok(())
    }

    /// Render the concat-demuxer list: one `file '<path>'` line per track.
    fn concat_list(tracks: &[&Path]) -> String {
        let mut list = String::new();
        for track in tracks {
            list.push_str(&format!("file '{}'\n", track.display()));
        }
        list
    }

    fn concat_args(list_path: &Path, output: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list_path.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}
