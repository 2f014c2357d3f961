// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use vec1::{vec1, Vec1};

use super::common::{
    display_warnings, parse_refl_code, InfoPrinter, Warn, ARG_FILE_HELP, REFL_CODE_HELP,
};
use crate::{
    constants::{
        ALL_FREQUENCIES_SELECTION, DEFAULT_E1, DEFAULT_E2, DEFAULT_ESTIMATOR_PROGRAM,
        DEFAULT_FREQUENCY, DEFAULT_FREQUENCY_SELECTION, DEFAULT_SNR, L1_FREQUENCY,
        POLY_FIT_WINDOW, REFL_CODE_ENV,
    },
    params::QuickPhaseParams,
    phase::PhaseParams,
    schedule::{DayRange, ScheduleError},
    GnssreflError,
};

lazy_static::lazy_static! {
    static ref SNR_HELP: String =
        format!("The SNR file ending, which says which elevation angles were kept (50, 66, 88 or 99). Default: {DEFAULT_SNR}");

    static ref FREQUENCY_HELP: String =
        format!("The frequency to estimate phase for; '{ALL_FREQUENCIES_SELECTION}' means both L1 and L2C. Default: {DEFAULT_FREQUENCY_SELECTION}");

    static ref E1_HELP: String =
        format!("The lower elevation-angle limit for the periodogram [degrees]. Default: {DEFAULT_E1}");

    static ref E2_HELP: String =
        format!("The upper elevation-angle limit for the periodogram [degrees]. Default: {DEFAULT_E2}");

    static ref ESTIMATOR_HELP: String =
        format!("The program that estimates phase for a single day. It gets the data root in {REFL_CODE_ENV}. Default: {DEFAULT_ESTIMATOR_PROGRAM}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct QuickPhaseArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The station name, e.g. p041.
    #[clap(short, long)]
    pub(super) station: Option<String>,

    /// The (first) year to analyse.
    #[clap(short, long)]
    pub(super) year: Option<i32>,

    /// The (first) day of year to analyse.
    #[clap(short, long)]
    pub(super) doy: Option<u16>,

    /// The last day of year to analyse. With --year-end, this is the last day
    /// in the last year. The default is to only analyse the first day.
    #[clap(long)]
    pub(super) doy_end: Option<u16>,

    /// The last year to analyse. The first year is analysed from the first day
    /// of year onwards, and any years in between are analysed completely.
    #[clap(long)]
    pub(super) year_end: Option<i32>,

    #[clap(long, help = SNR_HELP.as_str())]
    pub(super) snr: Option<u8>,

    #[clap(long = "fr", help = FREQUENCY_HELP.as_str())]
    #[serde(alias = "fr")]
    pub(super) frequency: Option<String>,

    #[clap(long, help = E1_HELP.as_str())]
    pub(super) e1: Option<f64>,

    #[clap(long, help = E2_HELP.as_str())]
    pub(super) e2: Option<f64>,

    /// Ask the estimator to make plots.
    #[clap(long)]
    #[serde(default)]
    pub(super) plot: bool,

    /// Ask the estimator to print statistics to the screen.
    #[clap(long)]
    #[serde(default)]
    pub(super) screenstats: bool,

    /// Ask the estimator not to compute periodograms.
    #[clap(long)]
    #[serde(default)]
    pub(super) no_lsp: bool,

    #[clap(long, help = ESTIMATOR_HELP.as_str(), parse(from_os_str))]
    pub(super) estimator: Option<PathBuf>,

    #[clap(long, env = "REFL_CODE", help = REFL_CODE_HELP.as_str(), parse(from_os_str))]
    pub(super) refl_code: Option<PathBuf>,
}

impl QuickPhaseArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<QuickPhaseArgs, GnssreflError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let QuickPhaseArgs {
                args_file: _,
                station,
                year,
                doy,
                doy_end,
                year_end,
                snr,
                frequency,
                e1,
                e2,
                plot,
                screenstats,
                no_lsp,
                estimator,
                refl_code,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(QuickPhaseArgs {
                args_file: None,
                station: cli_args.station.or(station),
                year: cli_args.year.or(year),
                doy: cli_args.doy.or(doy),
                doy_end: cli_args.doy_end.or(doy_end),
                year_end: cli_args.year_end.or(year_end),
                snr: cli_args.snr.or(snr),
                frequency: cli_args.frequency.or(frequency),
                e1: cli_args.e1.or(e1),
                e2: cli_args.e2.or(e2),
                plot: cli_args.plot || plot,
                screenstats: cli_args.screenstats || screenstats,
                no_lsp: cli_args.no_lsp || no_lsp,
                estimator: cli_args.estimator.or(estimator),
                refl_code: cli_args.refl_code.or(refl_code),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<QuickPhaseParams, GnssreflError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            station,
            year,
            doy,
            doy_end,
            year_end,
            snr,
            frequency,
            e1,
            e2,
            plot,
            screenstats,
            no_lsp,
            estimator,
            refl_code,
        } = self;

        let station = match station {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => return Err(QuickPhaseArgsError::NoStation.into()),
        };
        let year = year.ok_or(QuickPhaseArgsError::NoYear)?;
        let doy = doy.ok_or(QuickPhaseArgsError::NoDoy)?;
        let range = DayRange::new(year, doy, year_end, doy_end)?;
        if let (Some(year_end), Some(doy_end)) = (year_end, doy_end) {
            if year_end == year {
                format!(
                    "The end year is the same as the start year; analysing days {doy} to 366 and ignoring --doy-end {doy_end}"
                )
                .warn();
            }
        }

        let frequencies = parse_frequencies(
            frequency
                .as_deref()
                .unwrap_or(DEFAULT_FREQUENCY_SELECTION),
        )?;
        if frequencies.iter().any(|&f| f != DEFAULT_FREQUENCY) {
            "Only L2C phase estimates are well supported".warn();
        }

        let e1 = e1.unwrap_or(DEFAULT_E1);
        let e2 = e2.unwrap_or(DEFAULT_E2);
        if e1 >= e2 {
            return Err(QuickPhaseArgsError::BadElevationAngles { e1, e2 }.into());
        }

        let refl_code = parse_refl_code(refl_code).ok_or(QuickPhaseArgsError::NoReflCode)?;
        let estimator_program =
            estimator.unwrap_or_else(|| PathBuf::from(DEFAULT_ESTIMATOR_PROGRAM));

        let mut printer = InfoPrinter::new(format!("Estimating phase for {station}").into());
        let first = range.first();
        printer.push_block(vec![
            format!("First day: {first}").into(),
            format!("{} days in total", range.len()).into(),
        ]);
        printer.push_line(format!("SNR type: {}", snr.unwrap_or(DEFAULT_SNR)).into());
        printer.push_line(format!("Frequencies: {}", frequencies.iter().join(", ")).into());
        printer.push_line(format!("Elevation angles: {e1}-{e2}").into());
        printer.push_line(format!("Estimator: {}", estimator_program.display()).into());
        printer.push_line(format!("Data root: {}", refl_code.root().display()).into());
        printer.display();
        display_warnings();

        Ok(QuickPhaseParams {
            refl_code,
            range,
            phase: PhaseParams {
                station,
                snr: snr.unwrap_or(DEFAULT_SNR),
                frequencies,
                e1,
                e2,
                poly_fit_window: POLY_FIT_WINDOW,
                plot,
                screen_stats: screenstats,
                compute_lsp: !no_lsp,
            },
            estimator_program,
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

/// "all" means L1 and L2C; anything else must be a single frequency code.
fn parse_frequencies(s: &str) -> Result<Vec1<u32>, QuickPhaseArgsError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case(ALL_FREQUENCIES_SELECTION) {
        return Ok(vec1![L1_FREQUENCY, DEFAULT_FREQUENCY]);
    }
    s.parse()
        .map(|f| vec1![f])
        .map_err(|_| QuickPhaseArgsError::BadFrequency(s.to_string()))
}

#[derive(thiserror::Error, Debug)]
pub(super) enum QuickPhaseArgsError {
    #[error("No station was specified")]
    NoStation,

    #[error("No year was specified")]
    NoYear,

    #[error("No day of year was specified")]
    NoDoy,

    #[error("No data root was specified; use --refl-code or set {REFL_CODE_ENV}")]
    NoReflCode,

    #[error("Couldn't parse '{0}' as a frequency; use a frequency code (e.g. 20) or '{ALL_FREQUENCIES_SELECTION}'")]
    BadFrequency(String),

    #[error("The lower elevation angle ({e1}) must be less than the upper one ({e2})")]
    BadElevationAngles { e1: f64, e2: f64 },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
