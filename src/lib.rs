//! MediaCat assembles individual media files into a single chaptered
//! audiobook container.
//!
//! The build pipeline matches candidate files against an ordered keyword
//! list (or takes one file plus an external timestamp list), transcodes each
//! source into a uniform AAC/M4A stream, synthesizes an ffmetadata chapter
//! table from cumulative durations or explicit timestamps, concatenates the
//! audio with a stream copy, and finally remuxes the chapter table into the
//! joined stream without re-encoding.
//!
//! FFmpeg and FFprobe must be installed and reachable through PATH; all
//! encoding, probing, and muxing is delegated to them.

pub mod archive;
pub mod audio;
pub mod build;
pub mod error;
pub mod listing;
pub mod media;

pub use build::{
    BuildConfig, BuildOrchestrator, BuildOutcome, BuildSource, BuildState, MatchMode,
    DEFAULT_BITRATE,
};
pub use error::{MediaCatError, Result};
