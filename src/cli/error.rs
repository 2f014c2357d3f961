// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all gnssrefl-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{apriori::AprioriArgsError, quick_phase::QuickPhaseArgsError};
use crate::{
    apriori::{AprioriError, AprioriReadError, AprioriWriteError},
    gps::RosterError,
    io::ResultsReadError,
    params::QuickPhaseError,
    phase::{InputCheckError, PhaseEstimatorError},
    schedule::ScheduleError,
};

/// The *only* publicly visible error from gnssrefl. Each error message should
/// include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum GnssreflError {
    /// An error related to making apriori RH files.
    #[error("{0}\n\nApriori RH files are made from the reflector-height results of earlier runs; check the station, years and frequency.")]
    Apriori(String),

    /// An error related to quick-phase.
    #[error("{0}")]
    QuickPhase(String),

    /// A missing or malformed input for quick-phase.
    #[error("{0}\n\nquick-phase needs an SNR file for the first day and an apriori RH file (made with 'gnssrefl apriori').")]
    Inputs(String),

    /// An error related to reading reflector-height results.
    #[error("{0}\n\nResults files have at least 11 whitespace-separated columns; lines starting with '%' are ignored.")]
    Results(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON files with the same names as the command-line arguments.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<AprioriArgsError> for GnssreflError {
    fn from(e: AprioriArgsError) -> Self {
        let s = e.to_string();
        match e {
            AprioriArgsError::NoYear | AprioriArgsError::NoReflCode => Self::Apriori(s),
        }
    }
}

impl From<QuickPhaseArgsError> for GnssreflError {
    fn from(e: QuickPhaseArgsError) -> Self {
        let s = e.to_string();
        match e {
            QuickPhaseArgsError::NoStation
            | QuickPhaseArgsError::NoYear
            | QuickPhaseArgsError::NoDoy
            | QuickPhaseArgsError::NoReflCode
            | QuickPhaseArgsError::BadFrequency(_)
            | QuickPhaseArgsError::BadElevationAngles { .. } => Self::QuickPhase(s),
            QuickPhaseArgsError::Schedule(e) => Self::from(e),
        }
    }
}

impl From<AprioriError> for GnssreflError {
    fn from(e: AprioriError) -> Self {
        let s = e.to_string();
        match e {
            AprioriError::NoStation
            | AprioriError::YearEndBeforeStart { .. }
            | AprioriError::ZeroMinTracks => Self::Apriori(s),
            AprioriError::Results(e) => Self::from(e),
            AprioriError::Roster(e) => Self::from(e),
            AprioriError::Write(e) => Self::from(e),
        }
    }
}

impl From<QuickPhaseError> for GnssreflError {
    fn from(e: QuickPhaseError) -> Self {
        match e {
            QuickPhaseError::Inputs(e) => Self::from(e),
            QuickPhaseError::Estimator(e) => Self::from(e),
            QuickPhaseError::IO(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<ResultsReadError> for GnssreflError {
    fn from(e: ResultsReadError) -> Self {
        let s = e.to_string();
        match e {
            ResultsReadError::TooFewColumns { .. } | ResultsReadError::BadValue { .. } => {
                Self::Results(s)
            }
            ResultsReadError::Glob(_) | ResultsReadError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<RosterError> for GnssreflError {
    fn from(e: RosterError) -> Self {
        Self::Apriori(e.to_string())
    }
}

impl From<AprioriWriteError> for GnssreflError {
    fn from(e: AprioriWriteError) -> Self {
        let s = e.to_string();
        match e {
            AprioriWriteError::Empty => Self::Apriori(s),
            AprioriWriteError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<AprioriReadError> for GnssreflError {
    fn from(e: AprioriReadError) -> Self {
        let s = e.to_string();
        match e {
            AprioriReadError::MissingHeader { .. } | AprioriReadError::BadRow { .. } => {
                Self::Inputs(s)
            }
            AprioriReadError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<InputCheckError> for GnssreflError {
    fn from(e: InputCheckError) -> Self {
        let s = e.to_string();
        match e {
            InputCheckError::BadStation { .. }
            | InputCheckError::BadDoy { .. }
            | InputCheckError::BadSnrType { .. }
            | InputCheckError::MissingSnrFile { .. }
            | InputCheckError::MissingApriori { .. } => Self::Inputs(s),
            InputCheckError::Apriori(e) => Self::from(e),
        }
    }
}

impl From<ScheduleError> for GnssreflError {
    fn from(e: ScheduleError) -> Self {
        Self::QuickPhase(e.to_string())
    }
}

impl From<PhaseEstimatorError> for GnssreflError {
    fn from(e: PhaseEstimatorError) -> Self {
        let s = e.to_string();
        match e {
            PhaseEstimatorError::Failed { .. } | PhaseEstimatorError::Other { .. } => {
                Self::QuickPhase(s)
            }
            PhaseEstimatorError::Spawn { .. } => Self::Generic(s),
        }
    }
}

impl From<std::io::Error> for GnssreflError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
