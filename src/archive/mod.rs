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


//! Archive extraction for the list command
//!
//! Given an archive path, produce a scratch directory of extracted entries.
//! The directory is a scoped resource: it lives as long as the extractor and
//! is deleted when the extractor is dropped.
//!
//! Supported: zip, tar (optionally gzip-compressed), single-file gzip.
//! Other compressions are rejected with `UnsupportedArchive`.

use crate::error::{MediaCatError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Extracts an archive into an exclusively owned scratch directory
#[derive(Debug)]
pub struct ArchiveExtractor {
    dir: TempDir,
}

impl ArchiveExtractor {
    /// Extract `archive` into a fresh scratch directory.
    pub fn open(archive: &Path) -> Result<Self> {
        if !archive.is_file() {
            return Err(MediaCatError::input_not_found(archive.display()));
        }

        let dir = tempfile::Builder::new().prefix("mediacat-").tempdir()?;
        debug!("extracting {} into {}", archive.display(), dir.path().display());

        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(".zip") {
            Self::extract_zip(archive, dir.path())?;
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Self::extract_tar(GzDecoder::new(File::open(archive)?), dir.path())?;
        } else if name.ends_with(".tar") {
            Self::extract_tar(File::open(archive)?, dir.path())?;
        } else if name.ends_with(".gz") {
            Self::extract_gzip(archive, dir.path())?;
        } else {
            let suffix = archive
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| name.clone());
            return Err(MediaCatError::UnsupportedArchive(suffix));
        }

        Ok(Self { dir })
    }

    /// Directory holding the extracted entries.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn extract_zip(archive: &Path, target: &Path) -> Result<()> {
        let file = File::open(archive)?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|e| MediaCatError::ArchiveFailed(format!("{}: {e}", archive.display())))?;
        zip.extract(target)
            .map_err(|e| MediaCatError::ArchiveFailed(format!("{}: {e}", archive.display())))
    }

    fn extract_tar<R: std::io::Read>(reader: R, target: &Path) -> Result<()> {
        tar::Archive::new(reader)
            .unpack(target)
            .map_err(|e| MediaCatError::ArchiveFailed(e.to_string()))
    }

    /// Single-file gzip: the entry keeps the archive's name minus `.gz`.
    fn extract_gzip(archive: &Path, target: &Path) -> Result<()> {
        let output_name: PathBuf = archive
            .file_stem()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("extracted"));

        let mut decoder = GzDecoder::new(File::open(archive)?);
        let mut out = File::create(target.join(output_name))?;
        std::io::copy(&mut decoder, &mut out)
            .map_err(|e| MediaCatError::ArchiveFailed(e.to_string()))?;
        Ok(())
    }
}
