// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff (input/output, reading/writing, globs), for reflector-height
//! results and others.
//!
//! All files live underneath a single data root, conventionally pointed to by
//! the `REFL_CODE` environment variable. Here, the root is always supplied
//! explicitly with a [ReflCode].

mod glob;
pub(crate) mod results;
#[cfg(test)]
mod tests;

pub(crate) use self::glob::{get_files_with_extension, GlobError};
pub use results::{read_results_dir, read_results_file, ArcResult, ResultsReadError};

use std::path::{Path, PathBuf};

/// The root of a GNSS-IR data tree, and the layout of the files beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflCode {
    root: PathBuf,
}

impl ReflCode {
    pub fn new<P: Into<PathBuf>>(root: P) -> ReflCode {
        ReflCode { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding the per-day reflector-height results of a
    /// station.
    pub fn results_dir(&self, station: &str, year: i32) -> PathBuf {
        self.root
            .join(year.to_string())
            .join("results")
            .join(station)
    }

    /// The apriori reflector-height file of a station. This is consumed by the
    /// phase estimator.
    pub fn apriori_file(&self, station: &str) -> PathBuf {
        self.root
            .join("input")
            .join(format!("{station}_phaseRH.txt"))
    }

    /// The uncompressed SNR file of a station for a day, e.g.
    /// `2020/snr/p041/p0410500.20.snr66`.
    pub fn snr_file(&self, station: &str, year: i32, doy: u16, snr: u8) -> PathBuf {
        let yy = year.rem_euclid(100);
        self.root
            .join(year.to_string())
            .join("snr")
            .join(station)
            .join(format!("{station}{doy:03}0.{yy:02}.snr{snr}"))
    }

    /// The directory receiving per-day phase results of a station.
    pub fn phase_dir(&self, station: &str, year: i32) -> PathBuf {
        self.root
            .join(year.to_string())
            .join("phase")
            .join(station)
    }

    pub fn phase_file(&self, station: &str, year: i32, doy: u16) -> PathBuf {
        self.phase_dir(station, year).join(format!("{doy:03}.txt"))
    }
}
