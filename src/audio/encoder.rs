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


//! AAC encoder selection
//!
//! Selection is static per platform, not probed at runtime. The transcoder
//! takes the encoder name as a constructor argument so real capability
//! probing can replace this function later without touching the orchestrator.

use tracing::{debug, info};

/// Select the hardware AAC encoder for the current platform.
///
/// Windows gets the Media Foundation encoder, macOS the AudioToolbox
/// encoder, everything else falls back to ffmpeg's software encoder.
// FIXME: dynamic probing for available encoders
pub fn platform_aac_encoder() -> &'static str {
    if cfg!(target_os = "windows") {
        debug!("using Windows Media Foundation AAC encoder");
        "aac_mf"
    } else if cfg!(target_os = "macos") {
        debug!("using Apple AudioToolbox AAC encoder");
        "aac_at"
    } else {
        debug!("using fall-back software AAC encoder");
        info!("software AAC encoder may be slow");
        "aac"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_a_known_encoder() {
        assert!(matches!(
            platform_aac_encoder(),
            "aac_mf" | "aac_at" | "aac"
        ));
    }

    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    #[test]
    fn test_software_fallback_on_other_platforms() {
        assert_eq!(platform_aac_encoder(), "aac");
    }
}
