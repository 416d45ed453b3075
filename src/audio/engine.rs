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


//! External engine invocation
//!
//! Every pipeline phase that talks to ffmpeg/ffprobe goes through this one
//! spawn helper so a missing binary maps to the same error everywhere. Each
//! invocation blocks the build until the child exits; there is no concurrent
//! engine work within one build.

use crate::error::{MediaCatError, Result};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Spawn an external tool, wait for it to exit, and capture its output.
///
/// A missing binary surfaces as `FfmpegNotFound`; a non-zero exit status is
/// NOT an error here, because each call site owns its phase-specific error
/// variant and attaches the engine diagnostic itself.
pub(crate) async fn run_tool(program: &str, args: &[String]) -> Result<Output> {
    debug!("running: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaCatError::FfmpegNotFound
            } else {
                MediaCatError::Io(e)
            }
        })?;

    Ok(output)
}

/// The engine's diagnostic text for a failed invocation.
///
/// ffmpeg writes diagnostics to stderr; keep the tail, which carries the
/// actual failure reason rather than the banner.
pub(crate) fn engine_diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return format!("engine exited with status: {}", output.status);
    }

    const MAX_DIAGNOSTIC_LINES: usize = 8;
    let lines: Vec<&str> = trimmed.lines().collect();
    let tail_start = lines.len().saturating_sub(MAX_DIAGNOSTIC_LINES);
    lines[tail_start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    fn fake_output(stderr: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(256),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_diagnostic_keeps_tail() {
        let lines: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        let diag = engine_diagnostic(&fake_output(&lines.join("\n")));
        assert!(diag.contains("line 19"));
        assert!(!diag.contains("line 0"));
    }

    #[test]
    fn test_diagnostic_empty_stderr_reports_status() {
        let diag = engine_diagnostic(&fake_output(""));
        assert!(diag.contains("exited with status"));
    }
}
