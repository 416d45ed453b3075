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


//! Audio processing: transcoding, probing, chapters, concatenation, merging
//!
//! # Module Organization
//!
//! ## encoder
//! Static per-platform AAC encoder selection (injectable into the
//! transcoder so runtime probing can be added later).
//!
//! ## transcode
//! Normalizes each chapter source to AAC-in-M4A, with a verbatim-copy fast
//! path for compliant inputs.
//!
//! ## probe
//! Duration probing via ffprobe's JSON output.
//!
//! ## chapters
//! The `Chapter` model, the cumulative and explicit-timestamp boundary
//! strategies, and the ffmetadata rendering shared by both.
//!
//! ## concat / merge
//! The two stream-copy assembly stages: concat-demuxer join, then the
//! chapter-table remux.
//!
//! # FFmpeg Integration
//!
//! This module requires FFmpeg and FFprobe to be installed and available in
//! PATH. Every invocation is a blocking call into an external process; the
//! build suspends until it returns.

pub mod chapters;
pub mod concat;
pub mod encoder;
mod engine;
pub mod merge;
pub mod probe;
pub mod transcode;

// Re-export commonly used types for convenience
pub use chapters::{cumulative_chapters, parse_chapter_definitions, write_ffmetadata, Chapter};
pub use concat::Concatenator;
pub use merge::MetadataMerger;
pub use probe::DurationProbe;
pub use transcode::{Transcoder, TARGET_EXTENSION};
