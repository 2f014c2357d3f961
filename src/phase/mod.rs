// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-day phase estimation.
//!
//! The estimator itself (the Lomb-Scargle periodogram and phase fit over
//! satellite arcs) is not implemented here. Anything implementing
//! [PhaseEstimator] can be driven over a range of days; the CLI uses an
//! [ExternalEstimator], which runs a program once per day.

mod inputs;

pub use inputs::{
    check_apriori, check_inputs, find_snr_file, prepare_phase_dirs, InputCheckError,
};

use std::path::PathBuf;
use std::process::Command;

use itertools::Itertools;
use log::debug;
use thiserror::Error;
use vec1::Vec1;

use crate::{constants::REFL_CODE_ENV, io::ReflCode, schedule::DayUnit};

/// Parameters handed, unchanged, to the estimator for every day of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseParams {
    pub station: String,

    /// The SNR file ending, e.g. 66.
    pub snr: u8,

    /// The frequency codes to estimate, e.g. [1, 20].
    pub frequencies: Vec1<u32>,

    /// Elevation-angle limits for the periodogram [degrees].
    pub e1: f64,
    pub e2: f64,

    /// Elevation-angle limits for the polynomial that removes the direct
    /// signal [degrees].
    pub poly_fit_window: [f64; 2],

    pub plot: bool,
    pub screen_stats: bool,

    /// If false, the estimator is asked for a lighter pass without the
    /// periodogram.
    pub compute_lsp: bool,
}

/// Something that can estimate phase for a single day. Implementations write
/// their own output; nothing is returned.
pub trait PhaseEstimator {
    fn phase_tracks(&mut self, day: DayUnit, params: &PhaseParams)
        -> Result<(), PhaseEstimatorError>;
}

impl<F> PhaseEstimator for F
where
    F: FnMut(DayUnit, &PhaseParams) -> Result<(), PhaseEstimatorError>,
{
    fn phase_tracks(
        &mut self,
        day: DayUnit,
        params: &PhaseParams,
    ) -> Result<(), PhaseEstimatorError> {
        self(day, params)
    }
}

/// Runs a program once per day. The program gets the data root in the
/// `REFL_CODE` environment variable and these arguments:
///
/// ```text
/// <station> <year> <doy> --snr <snr> --fr <f1>[,<f2>] --e1 <e1> --e2 <e2> --pele <lo> <hi>
///     [--plot] [--screenstats] [--no-lsp]
/// ```
///
/// A non-zero exit status is a failure for that day.
#[derive(Debug, Clone)]
pub struct ExternalEstimator {
    pub program: PathBuf,
    pub refl_code: ReflCode,
}

impl ExternalEstimator {
    pub fn new<P: Into<PathBuf>>(program: P, refl_code: ReflCode) -> ExternalEstimator {
        ExternalEstimator {
            program: program.into(),
            refl_code,
        }
    }

    pub(crate) fn args(day: DayUnit, params: &PhaseParams) -> Vec<String> {
        let mut args = vec![
            params.station.clone(),
            day.year.to_string(),
            day.doy.to_string(),
            "--snr".to_string(),
            params.snr.to_string(),
            "--fr".to_string(),
            params.frequencies.iter().join(","),
            "--e1".to_string(),
            params.e1.to_string(),
            "--e2".to_string(),
            params.e2.to_string(),
            "--pele".to_string(),
            params.poly_fit_window[0].to_string(),
            params.poly_fit_window[1].to_string(),
        ];
        if params.plot {
            args.push("--plot".to_string());
        }
        if params.screen_stats {
            args.push("--screenstats".to_string());
        }
        if !params.compute_lsp {
            args.push("--no-lsp".to_string());
        }
        args
    }
}

impl PhaseEstimator for ExternalEstimator {
    fn phase_tracks(
        &mut self,
        day: DayUnit,
        params: &PhaseParams,
    ) -> Result<(), PhaseEstimatorError> {
        let args = Self::args(day, params);
        debug!("Running {} {}", self.program.display(), args.join(" "));
        let status = Command::new(&self.program)
            .args(&args)
            .env(REFL_CODE_ENV, self.refl_code.root())
            .status()
            .map_err(|source| PhaseEstimatorError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PhaseEstimatorError::Failed {
                program: self.program.display().to_string(),
                day,
                status,
            })
        }
    }
}

#[derive(Error, Debug)]
pub enum PhaseEstimatorError {
    #[error("Couldn't run the phase estimator '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("The phase estimator '{program}' failed on {day} ({status})")]
    Failed {
        program: String,
        day: DayUnit,
        status: std::process::ExitStatus,
    },

    #[error("Phase estimation failed on {day}: {message}")]
    Other { day: DayUnit, message: String },
}
