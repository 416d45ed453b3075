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


//! Duration probing via ffprobe
//!
//! Chapter boundaries are cumulative track durations, so a probe failure is
//! fatal to the build; no default duration is ever substituted.

use crate::audio::engine;
use crate::error::{MediaCatError, Result};
use serde::Deserialize;
use std::path::Path;

/// ffprobe JSON output, `-show_format` subset
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Duration probe backed by ffprobe
pub struct DurationProbe;

impl DurationProbe {
    /// Get the duration of an audio file in seconds.
    ///
    /// Executes: `ffprobe -v quiet -print_format json -show_format {path}`
    pub async fn duration_seconds(path: &Path) -> Result<f64> {
        let args = Self::probe_args(path);
        let output = engine::run_tool("ffprobe", &args).await?;

        if !output.status.success() {
            return Err(MediaCatError::ProbeFailed {
                input: path.to_path_buf(),
                message: engine::engine_diagnostic(&output),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout);
        Self::duration_from_json(&json).map_err(|message| MediaCatError::ProbeFailed {
            input: path.to_path_buf(),
            message,
        })
    }

    /// Parse the duration out of captured ffprobe JSON.
    fn duration_from_json(json: &str) -> std::result::Result<f64, String> {
        let probe: ProbeOutput = serde_json::from_str(json)
            .map_err(|e| format!("unparseable ffprobe output: {e}"))?;

        probe
            .format
            .duration
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| "no duration found in file".to_string())
    }

    fn probe_args(path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "quiet".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-show_format".to_string(),
            path.to_string_lossy().to_string(),
        ]
    }
}
