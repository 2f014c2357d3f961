// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem. Matches
/// are returned in alphabetical order.
pub(crate) fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    Ok(entries)
}

/// Get all of the regular files in `dir` with the extension `ext`. The
/// directory itself is escaped, so it may contain glob metacharacters.
pub(crate) fn get_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, GlobError> {
    let g = format!(
        "{}/*.{ext}",
        Pattern::escape(dir.display().to_string().as_str())
    );
    let mut files = get_all_matches_from_glob(&g)?;
    files.retain(|f| f.is_file());
    Ok(files)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}
