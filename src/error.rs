//! Error types for MediaCat
//!
//! One error enum covers the whole build pipeline, defined with thiserror.
//! The external-engine variants (`TranscodeFailed`, `ProbeFailed`,
//! `ConcatFailed`, `MergeFailed`) carry the engine's own diagnostic text;
//! callers must never replace it with a default.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our MediaCatError type
pub type Result<T> = std::result::Result<T, MediaCatError>;

/// Main error type for MediaCat
#[derive(Error, Debug)]
pub enum MediaCatError {
    // ===== Input validation =====
    // All reported before any scratch workspace is created.

    /// Target directory/file or list file is missing
    #[error("input not found: {0}")]
    InputNotFound(String),

    /// Target directory has no entries, or a keyword/chapter list is empty
    #[error("empty input: {0}")]
    EmptyInput(String),

    // ===== Matching =====

    /// The file matcher produced zero results
    #[error("no files matched any keyword")]
    NoMatchingFiles,

    /// Strict matching only: one file was selected by two different keywords
    #[error("file '{file}' matched both keyword '{first}' and keyword '{second}'")]
    AmbiguousMatch {
        file: String,
        first: String,
        second: String,
    },

    // ===== Chapter list parsing =====

    /// A chapter-definition line failed to parse; names the offending line
    #[error("invalid chapter line '{line}': {reason}")]
    InvalidChapterFormat { line: String, reason: String },

    // ===== External engine invocations =====
    // Fatal; the message field is the engine's own diagnostic output.

    /// Transcoding a source file failed
    #[error("transcoding failed for {}: {}", .input.display(), .message)]
    TranscodeFailed { input: PathBuf, message: String },

    /// Duration probe failed; no default duration is ever substituted
    #[error("duration probe failed for {}: {}", .input.display(), .message)]
    ProbeFailed { input: PathBuf, message: String },

    /// Concatenating converted tracks failed
    #[error("concatenation failed: {0}")]
    ConcatFailed(String),

    /// Merging chapter metadata into the joined stream failed
    #[error("metadata merge failed: {0}")]
    MergeFailed(String),

    /// FFmpeg/FFprobe binary not found in PATH
    #[error("FFmpeg not found. Please install FFmpeg and ensure it's in your PATH.")]
    FfmpegNotFound,

    // ===== Archive listing =====

    /// Archive suffix is not one the extractor handles
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(String),

    /// Extracting an archive entry failed
    #[error("archive extraction failed: {0}")]
    ArchiveFailed(String),

    /// A list-command regex filter failed to compile
    #[error("invalid filter pattern '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    // ===== External library errors =====

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error (ffprobe output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MediaCatError {
    /// Create an InputNotFound error from any displayable path
    pub fn input_not_found(path: impl std::fmt::Display) -> Self {
        MediaCatError::InputNotFound(path.to_string())
    }

    /// Create an EmptyInput error with a message
    pub fn empty_input(message: impl Into<String>) -> Self {
        MediaCatError::EmptyInput(message.into())
    }

    /// Create an InvalidChapterFormat error naming the offending line
    pub fn invalid_chapter(line: impl Into<String>, reason: impl Into<String>) -> Self {
        MediaCatError::InvalidChapterFormat {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error came from an external engine invocation
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            MediaCatError::TranscodeFailed { .. }
                | MediaCatError::ProbeFailed { .. }
                | MediaCatError::ConcatFailed(_)
                | MediaCatError::MergeFailed(_)
                | MediaCatError::FfmpegNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_chapter_names_line() {
        let err = MediaCatError::invalid_chapter("bad line no time", "expected 'HH:MM:SS title'");
        assert!(err.to_string().contains("bad line no time"));
    }

    #[test]
    fn test_engine_error_classification() {
        assert!(MediaCatError::FfmpegNotFound.is_engine_error());
        assert!(MediaCatError::ConcatFailed("boom".into()).is_engine_error());
        assert!(!MediaCatError::NoMatchingFiles.is_engine_error());
    }
}
