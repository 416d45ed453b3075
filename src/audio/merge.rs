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


//! Chapter-metadata remux
//!
//! Attaches the synthesized chapter table to the joined audio with a pure
//! stream copy (`-map_metadata 1 -c copy`); the audio is never re-encoded.
//! A rejected metadata file is fatal and surfaces the engine's diagnostic.

use crate::audio::engine;
use crate::error::{MediaCatError, Result};
use std::path::Path;

/// Remuxes container-level chapter metadata into a finished stream
pub struct MetadataMerger;

impl MetadataMerger {
    /// Merge the chapter table at `metadata` into `audio`, writing `output`.
    pub async fn merge(audio: &Path, metadata: &Path, output: &Path) -> Result<()> {
        let args = Self::merge_args(audio, metadata, output);
        let result = engine::run_tool("ffmpeg", &args).await?;

        if !result.status.success() {
            return Err(MediaCatError::MergeFailed(engine::engine_diagnostic(
                &result,
            )));
        }

        Ok(())
    }

    fn merge_args(audio: &Path, metadata: &Path, output: &Path) -> Vec<String> {
        vec![
            "-xerror".to_string(),
            "-i".to_string(),
            audio.to_string_lossy().to_string(),
            "-i".to_string(),
            metadata.to_string_lossy().to_string(),
            "-map_metadata".to_string(),
            "1".to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_args_shape() {
        let args = MetadataMerger::merge_args(
            Path::new("joined.m4b"),
            Path::new("chapters.txt"),
            Path::new("out.m4b"),
        );

        let meta_pos = args.iter().position(|a| a == "-map_metadata").unwrap();
        assert_eq!(args[meta_pos + 1], "1");
        let c_pos = args.iter().position(|a| a == "-c").unwrap();
        assert_eq!(args[c_pos + 1], "copy");
        assert_eq!(args.last().map(String::as_str), Some("out.m4b"));
    }
}
