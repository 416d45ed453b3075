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


//! Source-file transcoding
//!
//! Every chapter source is normalized to AAC-in-M4A before concatenation so
//! the join can be a pure stream copy. Inputs that already carry the `.m4a`
//! extension are copied byte-for-byte when re-encoding is not forced; the
//! copy is idempotent and skips the engine entirely.

use crate::audio::{encoder, engine};
use crate::error::{MediaCatError, Result};
use std::path::Path;
use tracing::debug;

/// Target container extension for converted tracks
pub const TARGET_EXTENSION: &str = "m4a";

/// Converts one source file into a normalized AAC/M4A track
#[derive(Debug)]
pub struct Transcoder {
    encoder: String,
    bitrate: String,
    re_encode: bool,
}

impl Transcoder {
    /// Create a transcoder with the platform-selected AAC encoder.
    pub fn new(bitrate: impl Into<String>, re_encode: bool) -> Self {
        Self::with_encoder(encoder::platform_aac_encoder(), bitrate, re_encode)
    }

    /// Create a transcoder with an explicit encoder name.
    pub fn with_encoder(
        encoder: impl Into<String>,
        bitrate: impl Into<String>,
        re_encode: bool,
    ) -> Self {
        Self {
            encoder: encoder.into(),
            bitrate: bitrate.into(),
            re_encode,
        }
    }

    /// Convert `input` into an M4A track at `output`.
    ///
    /// Fast path: when the input is already `.m4a` and re-encoding is not
    /// forced, the file is copied verbatim. Otherwise ffmpeg re-encodes the
    /// audio stream at the configured bitrate; video and other streams are
    /// dropped (`-map 0:a`). Encoder failure propagates with the offending
    /// input path and is never retried.
    pub async fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        if !self.re_encode && Self::is_target_container(input) {
            debug!("copying {} verbatim", input.display());
            tokio::fs::copy(input, output).await?;
            return Ok(());
        }

        let args = self.encode_args(input, output);
        let result = engine::run_tool("ffmpeg", &args).await?;

        if !result.status.success() {
            return Err(MediaCatError::TranscodeFailed {
                input: input.to_path_buf(),
                message: engine::engine_diagnostic(&result),
            });
        }

        Ok(())
    }

    /// Whether the input already carries the target container extension.
    fn is_target_container(input: &Path) -> bool {
        input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(TARGET_EXTENSION))
            .unwrap_or(false)
    }

    fn encode_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-map".to_string(),
            "0:a".to_string(),
            "-c:a".to_string(),
            self.encoder.clone(),
            "-b:a".to_string(),
            self.bitrate.clone(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}
