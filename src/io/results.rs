// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read per-arc reflector-height results.
//!
//! Results files are plain text. Lines starting with `%` are comments. Every
//! other non-empty line is one arc, with whitespace-separated columns:
//!
//! ```text
//! year doy RH sat UTCtime Azim Amp eminO emaxO NumbOf freq rise ...
//! ```
//!
//! Only the RH, satellite, azimuth and frequency columns are needed here;
//! they're pulled out into named fields of [ArcResult]. The other columns
//! aren't looked at, so odd values in them (e.g. "nan") don't matter.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use thiserror::Error;

use super::{get_files_with_extension, GlobError};

const COL_RH: usize = 2;
const COL_SAT: usize = 3;
const COL_AZIMUTH: usize = 5;
const COL_FREQUENCY: usize = 10;
const MIN_NUM_COLUMNS: usize = COL_FREQUENCY + 1;

/// One arc from a reflector-height results file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcResult {
    /// [metres]
    pub reflector_height: f64,

    pub satellite: u32,

    /// e.g. 1 (L1), 20 (L2C), 5 (L5)
    pub frequency: u32,

    /// [degrees]
    pub azimuth: f64,
}

/// Read all of the results files (`*.txt`) in a directory. Files are read in
/// alphabetical order, and arcs keep their file order. If the directory
/// doesn't exist, there are no results.
pub fn read_results_dir(dir: &Path) -> Result<Vec<ArcResult>, ResultsReadError> {
    if !dir.is_dir() {
        debug!("Results directory {} doesn't exist", dir.display());
        return Ok(vec![]);
    }

    let mut results = vec![];
    for file in get_files_with_extension(dir, "txt")? {
        results.extend(read_results_file(&file)?);
    }
    debug!("Read {} arcs from {}", results.len(), dir.display());
    Ok(results)
}

/// Read a single results file.
pub fn read_results_file(file: &Path) -> Result<Vec<ArcResult>, ResultsReadError> {
    trace!("Reading results file {}", file.display());
    let f = BufReader::new(File::open(file)?);
    parse_results(f, &file.display().to_string())
}

pub(super) fn parse_results<R: BufRead>(
    reader: R,
    file: &str,
) -> Result<Vec<ArcResult>, ResultsReadError> {
    let mut results = vec![];
    for (i_line, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_NUM_COLUMNS {
            return Err(ResultsReadError::TooFewColumns {
                file: file.to_string(),
                line: i_line + 1,
                expected: MIN_NUM_COLUMNS,
                got: fields.len(),
            });
        }

        let row = Row {
            fields: &fields,
            file,
            line: i_line + 1,
        };
        results.push(ArcResult {
            reflector_height: row.float(COL_RH, "reflector height")?,
            satellite: row.int(COL_SAT, "satellite")?,
            frequency: row.int(COL_FREQUENCY, "frequency")?,
            azimuth: row.float(COL_AZIMUTH, "azimuth")?,
        });
    }

    Ok(results)
}

/// The columns of one line of a results file.
struct Row<'a> {
    fields: &'a [&'a str],
    file: &'a str,
    line: usize,
}

impl Row<'_> {
    fn bad_value(&self, col: usize, column: &'static str) -> ResultsReadError {
        ResultsReadError::BadValue {
            file: self.file.to_string(),
            line: self.line,
            column,
            value: self.fields[col].to_string(),
        }
    }

    fn float(&self, col: usize, column: &'static str) -> Result<f64, ResultsReadError> {
        self.fields[col]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.bad_value(col, column))
    }

    // Integer columns are often written as floats (e.g. "20.0").
    fn int<T: TryFrom<i64>>(
        &self,
        col: usize,
        column: &'static str,
    ) -> Result<T, ResultsReadError> {
        let v = self.float(col, column)?;
        if v.fract() != 0.0 {
            return Err(self.bad_value(col, column));
        }
        T::try_from(v as i64).map_err(|_| self.bad_value(col, column))
    }
}

#[derive(Error, Debug)]
pub enum ResultsReadError {
    #[error("{file} line {line}: expected at least {expected} columns, but got {got}")]
    TooFewColumns {
        file: String,
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("{file} line {line}: couldn't parse '{value}' as the {column}")]
    BadValue {
        file: String,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
