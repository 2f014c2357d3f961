// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Checks that have to pass before any phase estimation is attempted.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use crate::{
    apriori::{AprioriReadError, AprioriTable},
    constants::{LAST_DOY, VALID_SNR_TYPES},
    io::ReflCode,
};

/// Check the station name, day of year and SNR type, and that there is an SNR
/// file for the first day.
pub fn check_inputs(
    refl_code: &ReflCode,
    station: &str,
    year: i32,
    doy: u16,
    snr: u8,
) -> Result<(), InputCheckError> {
    // 4-character names, or 9-character names with country codes.
    let len = station.chars().count();
    if len != 4 && len != 9 {
        return Err(InputCheckError::BadStation {
            station: station.to_string(),
        });
    }
    if !(1..=LAST_DOY).contains(&doy) {
        return Err(InputCheckError::BadDoy { doy });
    }
    if !VALID_SNR_TYPES.contains(&snr) {
        return Err(InputCheckError::BadSnrType { snr });
    }

    match find_snr_file(refl_code, station, year, doy, snr) {
        Some(file) => {
            debug!("Found SNR file {}", file.display());
            Ok(())
        }
        None => Err(InputCheckError::MissingSnrFile {
            file: refl_code
                .snr_file(station, year, doy, snr)
                .display()
                .to_string(),
        }),
    }
}

/// Find the SNR file for a day; it may be uncompressed, gzipped or xz'd.
pub fn find_snr_file(
    refl_code: &ReflCode,
    station: &str,
    year: i32,
    doy: u16,
    snr: u8,
) -> Option<PathBuf> {
    let plain = refl_code.snr_file(station, year, doy, snr);
    ["", ".gz", ".xz"]
        .iter()
        .map(|ext| {
            let mut s = plain.clone().into_os_string();
            s.push(ext);
            PathBuf::from(s)
        })
        .find(|f| f.is_file())
}

/// Read the station's apriori table. A missing file gets a more helpful error
/// than a plain IO error.
pub fn check_apriori(
    refl_code: &ReflCode,
    station: &str,
) -> Result<AprioriTable, InputCheckError> {
    let file = refl_code.apriori_file(station);
    if !file.is_file() {
        return Err(InputCheckError::MissingApriori {
            file: file.display().to_string(),
        });
    }
    let table = AprioriTable::read(&file)?;
    Ok(table)
}

/// Create the phase output directory of every year in `years`.
pub fn prepare_phase_dirs(
    refl_code: &ReflCode,
    station: &str,
    years: RangeInclusive<i32>,
) -> std::io::Result<()> {
    for year in years {
        let dir = refl_code.phase_dir(station, year);
        debug!("Creating {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum InputCheckError {
    #[error("Station names must be 4 or 9 characters long; got '{station}'")]
    BadStation { station: String },

    #[error("Day of year {doy} is not between 1 and 366")]
    BadDoy { doy: u16 },

    #[error("SNR type {snr} is not one of 50, 66, 88 or 99")]
    BadSnrType { snr: u8 },

    #[error("No SNR file for the first day exists ({file}, optionally compressed)")]
    MissingSnrFile { file: String },

    #[error("No apriori RH file exists ({file}); make one with the 'apriori' subcommand")]
    MissingApriori { file: String },

    #[error(transparent)]
    Apriori(#[from] AprioriReadError),
}
