// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with building, reading or writing apriori tables.

use thiserror::Error;

use crate::{gps::RosterError, io::ResultsReadError};

#[derive(Error, Debug)]
pub enum AprioriError {
    #[error("No station was specified")]
    NoStation,

    #[error("The end year ({year_end}) is before the start year ({year})")]
    YearEndBeforeStart { year: i32, year_end: i32 },

    #[error("The minimum number of tracks must be at least 1")]
    ZeroMinTracks,

    #[error(transparent)]
    Results(#[from] ResultsReadError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Write(#[from] AprioriWriteError),
}

#[derive(Error, Debug)]
pub enum AprioriWriteError {
    #[error("Refusing to write an apriori table without any rows")]
    Empty,

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AprioriReadError {
    #[error("{file} doesn't have a '% year/station' header line")]
    MissingHeader { file: String },

    #[error("{file} line {line}: couldn't parse '{text}' as an apriori row")]
    BadRow {
        file: String,
        line: usize,
        text: String,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
