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


//! Chapter boundaries and ffmetadata synthesis
//!
//! Two strategies share one output contract:
//!
//! - **Cumulative**: chapter i spans the running sum of prior track
//!   durations, so boundaries are contiguous by construction.
//! - **Explicit timestamps**: an external `"HH:MM:SS title"` list supplies
//!   the starts; each end is the next start, and the final end is the probed
//!   total duration of the source.
//!
//! The output is the ffmetadata chapter table consumed by the merge step.
//! Its shape is fixed for compatibility: a `;FFMETADATA1` header, then one
//! `[CHAPTER]` block per chapter with a 1/1000 timebase and integer
//! millisecond offsets.

use crate::error::{MediaCatError, Result};
use serde::Serialize;
use tracing::warn;

/// A named time interval within the final audio container.
///
/// Invariants across a generated sequence: chapters are contiguous (each
/// start equals the previous end), times are non-negative and never
/// decrease, and the last end equals the total audio duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    /// Zero-based position in chapter order
    pub index: usize,
    /// Display title, `"NN. label"`
    pub title: String,
    /// Start offset in seconds
    pub start_seconds: f64,
    /// End offset in seconds
    pub end_seconds: f64,
}

impl Chapter {
    /// Start offset in integer milliseconds, as written to the metadata table
    pub fn start_ms(&self) -> i64 {
        (self.start_seconds * 1000.0) as i64
    }

    /// End offset in integer milliseconds
    pub fn end_ms(&self) -> i64 {
        (self.end_seconds * 1000.0) as i64
    }
}

/// Format a chapter title: two-digit one-based index, dot, label.
fn chapter_title(index: usize, label: &str) -> String {
    format!("{:02}. {}", index + 1, label)
}

/// Derive chapters from per-track durations, in track order.
///
/// Chapter i starts at the running sum of prior durations and ends at the
/// running sum plus its own duration, so the sequence is contiguous and the
/// last end equals the total duration.
pub fn cumulative_chapters<'a, I>(entries: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut chapters = Vec::new();
    let mut current_time = 0.0f64;

    for (index, (label, duration)) in entries.into_iter().enumerate() {
        chapters.push(Chapter {
            index,
            title: chapter_title(index, label),
            start_seconds: current_time,
            end_seconds: current_time + duration,
        });
        current_time += duration;
    }

    chapters
}

/// Parse an external chapter-definition list against a known total duration.
///
/// Each line is `"HH:MM:SS title"`; the timestamp becomes the chapter start
/// in integer seconds, each end is the following start, and the last end is
/// `total_duration`. A line that does not yield a valid timestamp plus a
/// non-empty title is a fatal error naming that line; malformed lines are
/// never skipped. Blank lines are ignored.
pub fn parse_chapter_definitions(text: &str, total_duration: f64) -> Result<Vec<Chapter>> {
    let mut starts: Vec<(u64, String)> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let (time_part, title_part) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| MediaCatError::invalid_chapter(line, "expected 'HH:MM:SS title'"))?;

        let seconds = parse_hms(time_part)
            .ok_or_else(|| MediaCatError::invalid_chapter(line, "malformed HH:MM:SS timestamp"))?;

        let title = title_part.trim();
        if title.is_empty() {
            return Err(MediaCatError::invalid_chapter(line, "missing chapter title"));
        }

        if let Some((prev, _)) = starts.last() {
            if seconds < *prev {
                return Err(MediaCatError::invalid_chapter(
                    line,
                    "timestamp earlier than the previous chapter",
                ));
            }
        }
        if (seconds as f64) > total_duration {
            return Err(MediaCatError::invalid_chapter(
                line,
                "timestamp beyond the total audio duration",
            ));
        }

        starts.push((seconds, title.to_string()));
    }

    if starts.is_empty() {
        return Err(MediaCatError::empty_input("chapter list has no entries"));
    }

    let mut chapters = Vec::with_capacity(starts.len());
    for (index, (start, label)) in starts.iter().enumerate() {
        let end_seconds = match starts.get(index + 1) {
            Some((next_start, _)) => *next_start as f64,
            None => total_duration,
        };
        let chapter = Chapter {
            index,
            title: chapter_title(index, label),
            start_seconds: *start as f64,
            end_seconds,
        };
        if chapter.end_seconds <= chapter.start_seconds {
            warn!("chapter '{}' has zero duration", chapter.title);
        }
        chapters.push(chapter);
    }

    Ok(chapters)
}

/// Parse `HH:MM:SS` into whole seconds.
fn parse_hms(timestamp: &str) -> Option<u64> {
    let parts: Vec<&str> = timestamp.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = parts[2].parse().ok()?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Render the ffmetadata chapter table.
pub fn write_ffmetadata(chapters: &[Chapter]) -> String {
    let mut content = String::from(";FFMETADATA1\n");

    for chapter in chapters {
        content.push_str("[CHAPTER]\n");
        content.push_str("TIMEBASE=1/1000\n");
        content.push_str(&format!("START={}\n", chapter.start_ms()));
        content.push_str(&format!("END={}\n", chapter.end_ms()));
        content.push_str(&format!("title={}\n", chapter.title));
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(chapters: &[Chapter], total: f64) {
        for pair in chapters.windows(2) {
            assert_eq!(pair[0].end_ms(), pair[1].start_ms());
        }
        let last = chapters.last().unwrap();
        assert_eq!(last.end_ms(), (total * 1000.0) as i64);
    }

    #[test]
    fn test_cumulative_two_tracks() {
        let chapters = cumulative_chapters([("01", 12.0), ("02", 30.5)]);

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "01. 01");
        assert_eq!(chapters[1].title, "02. 02");
        assert_eq!(chapters[0].start_ms(), 0);
        assert_eq!(chapters[0].end_ms(), 12000);
        assert_eq!(chapters[1].start_ms(), 12000);
        assert_eq!(chapters[1].end_ms(), 42500);
        assert_contiguous(&chapters, 42.5);
    }

    #[test]
    fn test_cumulative_fractional_durations_stay_contiguous() {
        let entries: Vec<(&str, f64)> = vec![
            ("a", 1.333),
            ("b", 2.667),
            ("c", 0.125),
            ("d", 59.875),
        ];
        let total: f64 = entries.iter().map(|(_, d)| d).sum();
        let chapters = cumulative_chapters(entries.iter().map(|(l, d)| (*l, *d)));
        assert_contiguous(&chapters, total);
    }

    #[test]
    fn test_explicit_round_trip() {
        let chapters =
            parse_chapter_definitions("00:00:00 Intro\n00:01:30 Chapter One", 200.0).unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "01. Intro");
        assert_eq!(chapters[0].start_seconds, 0.0);
        assert_eq!(chapters[0].end_seconds, 90.0);
        assert_eq!(chapters[1].title, "02. Chapter One");
        assert_eq!(chapters[1].start_seconds, 90.0);
        assert_eq!(chapters[1].end_seconds, 200.0);
    }

    #[test]
    fn test_malformed_line_is_fatal_and_named() {
        let err = parse_chapter_definitions("00:00:00 Intro\nbad line no time", 100.0)
            .unwrap_err();
        match err {
            MediaCatError::InvalidChapterFormat { line, .. } => {
                assert_eq!(line, "bad line no time");
            }
            other => panic!("expected InvalidChapterFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_line_without_title_is_fatal() {
        assert!(matches!(
            parse_chapter_definitions("00:00:00", 100.0),
            Err(MediaCatError::InvalidChapterFormat { .. })
        ));
        assert!(matches!(
            parse_chapter_definitions("00:00:00   ", 100.0),
            Err(MediaCatError::InvalidChapterFormat { .. })
        ));
    }

    #[test]
    fn test_decreasing_timestamp_is_fatal() {
        let err =
            parse_chapter_definitions("00:02:00 Late\n00:01:00 Early", 300.0).unwrap_err();
        assert!(matches!(err, MediaCatError::InvalidChapterFormat { .. }));
    }

    #[test]
    fn test_timestamp_beyond_duration_is_fatal() {
        let err = parse_chapter_definitions("01:00:00 Too far", 100.0).unwrap_err();
        assert!(matches!(err, MediaCatError::InvalidChapterFormat { .. }));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(
            parse_chapter_definitions("\n\n", 100.0),
            Err(MediaCatError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_title_keeps_interior_spaces() {
        let chapters =
            parse_chapter_definitions("00:00:10 The Long  Way Home", 60.0).unwrap();
        assert_eq!(chapters[0].title, "01. The Long  Way Home");
    }

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("00:00:00"), Some(0));
        assert_eq!(parse_hms("00:01:30"), Some(90));
        assert_eq!(parse_hms("01:02:03"), Some(3723));
        assert_eq!(parse_hms("10:00"), None);
        assert_eq!(parse_hms("xx:yy:zz"), None);
    }

    #[test]
    fn test_ffmetadata_exact_format() {
        let chapters = vec![
            Chapter {
                index: 0,
                title: "01. Intro".to_string(),
                start_seconds: 0.0,
                end_seconds: 90.0,
            },
            Chapter {
                index: 1,
                title: "02. Chapter One".to_string(),
                start_seconds: 90.0,
                end_seconds: 200.0,
            },
        ];

        let expected = ";FFMETADATA1\n\
            [CHAPTER]\n\
            TIMEBASE=1/1000\n\
            START=0\n\
            END=90000\n\
            title=01. Intro\n\
            [CHAPTER]\n\
            TIMEBASE=1/1000\n\
            START=90000\n\
            END=200000\n\
            title=02. Chapter One\n";
        assert_eq!(write_ffmetadata(&chapters), expected);
    }
}
