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


//! Recursive file listing with regex strip filters
//!
//! Backs the `list` command: every file name under the root is printed with
//! each filter's matches deleted. Useful for turning a messy download
//! listing into a keyword list for `build`.

use crate::error::{MediaCatError, Result};
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// Lists file names under a root, applying strip filters
#[derive(Debug)]
pub struct FileLister {
    filters: Vec<Regex>,
}

impl FileLister {
    /// Compile the filter patterns.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut filters = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| MediaCatError::InvalidFilter {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            filters.push(regex);
        }
        Ok(Self { filters })
    }

    /// File names under `root`, recursively, filtered and sorted.
    pub fn list(&self, root: &Path) -> Result<Vec<String>> {
        if !root.exists() {
            return Err(MediaCatError::input_not_found(root.display()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| MediaCatError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            names.push(self.apply_filters(name));
        }
        names.sort();
        Ok(names)
    }

    fn apply_filters(&self, name: String) -> String {
        let mut result = name;
        for filter in &self.filters {
            result = filter.replace_all(&result, "").into_owned();
        }
        result
    }
}
