// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, parse_refl_code, InfoPrinter, Warn, ARG_FILE_HELP, REFL_CODE_HELP,
};
use crate::{
    apriori::AprioriError,
    constants::{DEFAULT_FREQUENCY, DEFAULT_MIN_TRACKS, REFL_CODE_ENV},
    gps::has_own_roster,
    params::AprioriParams,
    GnssreflError,
};

lazy_static::lazy_static! {
    static ref FREQUENCY_HELP: String =
        format!("The frequency code of the results to use (e.g. 1 for L1, 20 for L2C, 5 for L5). Default: {DEFAULT_FREQUENCY}");

    static ref MIN_TRACKS_HELP: String =
        format!("A satellite needs more than this many tracks in an azimuth quadrant to be used. Default: {DEFAULT_MIN_TRACKS}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct AprioriArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The station name, e.g. p041.
    #[clap(short, long)]
    pub(super) station: Option<String>,

    /// The first year of results to use.
    #[clap(short, long)]
    pub(super) year: Option<i32>,

    /// The last year of results to use. The default is to only use the first
    /// year.
    #[clap(long)]
    pub(super) year_end: Option<i32>,

    #[clap(long = "fr", help = FREQUENCY_HELP.as_str())]
    #[serde(alias = "fr")]
    pub(super) frequency: Option<u32>,

    #[clap(long, help = MIN_TRACKS_HELP.as_str())]
    pub(super) min_tracks: Option<usize>,

    #[clap(long, env = "REFL_CODE", help = REFL_CODE_HELP.as_str(), parse(from_os_str))]
    pub(super) refl_code: Option<PathBuf>,
}

impl AprioriArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<AprioriArgs, GnssreflError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let AprioriArgs {
                args_file: _,
                station,
                year,
                year_end,
                frequency,
                min_tracks,
                refl_code,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(AprioriArgs {
                args_file: None,
                station: cli_args.station.or(station),
                year: cli_args.year.or(year),
                year_end: cli_args.year_end.or(year_end),
                frequency: cli_args.frequency.or(frequency),
                min_tracks: cli_args.min_tracks.or(min_tracks),
                refl_code: cli_args.refl_code.or(refl_code),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<AprioriParams, GnssreflError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            station,
            year,
            year_end,
            frequency,
            min_tracks,
            refl_code,
        } = self;

        let station = match station {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => return Err(AprioriError::NoStation.into()),
        };
        let year = year.ok_or(AprioriArgsError::NoYear)?;
        if let Some(year_end) = year_end {
            if year_end < year {
                return Err(AprioriError::YearEndBeforeStart { year, year_end }.into());
            }
        }
        let frequency = frequency.unwrap_or(DEFAULT_FREQUENCY);
        let min_tracks = min_tracks.unwrap_or(DEFAULT_MIN_TRACKS);
        if min_tracks == 0 {
            return Err(AprioriError::ZeroMinTracks.into());
        }
        let refl_code = parse_refl_code(refl_code).ok_or(AprioriArgsError::NoReflCode)?;

        if !has_own_roster(frequency) {
            format!(
                "Frequency {frequency} has no satellite list of its own; the L2C list will be used"
            )
            .warn();
        }

        let mut printer =
            InfoPrinter::new(format!("Making an apriori RH file for {station}").into());
        printer.push_line(
            match year_end {
                Some(year_end) if year_end != year => format!("Years: {year}-{year_end}"),
                _ => format!("Year: {year}"),
            }
            .into(),
        );
        printer.push_line(format!("Frequency: {frequency}").into());
        printer.push_line(format!("Minimum number of tracks: {min_tracks}").into());
        printer.push_line(format!("Output: {}", refl_code.apriori_file(&station).display()).into());
        printer.display();
        display_warnings();

        Ok(AprioriParams {
            refl_code,
            station,
            year,
            year_end,
            frequency,
            min_tracks,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), GnssreflError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum AprioriArgsError {
    #[error("No year was specified")]
    NoYear,

    #[error("No data root was specified; use --refl-code or set {REFL_CODE_ENV}")]
    NoReflCode,
}
