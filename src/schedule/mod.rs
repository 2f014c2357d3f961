// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ranges of days to process, and driving an estimator over them.


use std::fmt::Display;
use std::ops::RangeInclusive;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use thiserror::Error;

use crate::{
    constants::LAST_DOY,
    phase::{PhaseEstimator, PhaseEstimatorError, PhaseParams},
    PROGRESS_BARS,
};

/// A single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayUnit {
    pub year: i32,

    /// Day of year, 1 to 366.
    pub doy: u16,
}

impl DayUnit {
    pub fn new(year: i32, doy: u16) -> DayUnit {
        DayUnit { year, doy }
    }
}

impl Display for DayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.year, self.doy)
    }
}

/// An ordered range of days.
///
/// If the range is within a single year, it's simply `doy_start` to
/// `doy_end`. Otherwise, the first year runs from `doy_start` to day 366, the
/// years in between are complete (days 1 to 366) and the last year runs from
/// day 1 to `doy_end`. Day 366 is always included, leap year or not; the
/// estimator is expected to cope with days that have no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    year_start: i32,
    doy_start: u16,
    year_end: i32,
    doy_end: u16,
    multi_year: bool,
}

impl DayRange {
    /// `doy_end` defaults to `doy_start`. If `year_end` is given, the range is
    /// multi-year, even if `year_end` is the same as `year_start`; in that case
    /// `doy_end` isn't used and the range runs from `doy_start` to 366.
    ///
    /// A single-year range with `doy_end` before `doy_start` is an error
    /// ([ScheduleError::DoyEndBeforeStart]) rather than a run over no days.
    pub fn new(
        year_start: i32,
        doy_start: u16,
        year_end: Option<i32>,
        doy_end: Option<u16>,
    ) -> Result<DayRange, ScheduleError> {
        let doy_end = doy_end.unwrap_or(doy_start);
        for doy in [doy_start, doy_end] {
            if !(1..=LAST_DOY).contains(&doy) {
                return Err(ScheduleError::BadDoy { doy });
            }
        }

        match year_end {
            Some(year_end) => {
                if year_end < year_start {
                    return Err(ScheduleError::YearEndBeforeStart {
                        year_start,
                        year_end,
                    });
                }
                Ok(DayRange {
                    year_start,
                    doy_start,
                    year_end,
                    doy_end,
                    multi_year: true,
                })
            }

            None => {
                if doy_end < doy_start {
                    return Err(ScheduleError::DoyEndBeforeStart {
                        doy_start,
                        doy_end,
                    });
                }
                Ok(DayRange {
                    year_start,
                    doy_start,
                    year_end: year_start,
                    doy_end,
                    multi_year: false,
                })
            }
        }
    }

    pub fn first(&self) -> DayUnit {
        DayUnit::new(self.year_start, self.doy_start)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.year_start..=self.year_end
    }

    fn doys(&self, year: i32) -> RangeInclusive<u16> {
        if !self.multi_year {
            self.doy_start..=self.doy_end
        } else if year == self.year_start {
            self.doy_start..=LAST_DOY
        } else if year == self.year_end {
            1..=self.doy_end
        } else {
            1..=LAST_DOY
        }
    }

    /// All of the days, in order.
    pub fn iter(&self) -> impl Iterator<Item = DayUnit> {
        let range = *self;
        range
            .years()
            .flat_map(move |year| range.doys(year).map(move |doy| DayUnit::new(year, doy)))
    }

    pub fn len(&self) -> usize {
        self.years().map(|year| self.doys(year).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the estimator on every day of the range, in order. The first failure
/// stops everything and is returned; later days aren't attempted.
pub fn run_range<E: PhaseEstimator + ?Sized>(
    range: &DayRange,
    params: &PhaseParams,
    estimator: &mut E,
) -> Result<(), PhaseEstimatorError> {
    let pb = ProgressBar::with_draw_target(
        Some(range.len() as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg}: [{wide_bar:.blue}] {pos:3}/{len:3} days ({elapsed_precise}<{eta_precise})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message(format!("Estimating phase for {}", params.station));

    for day in range.iter() {
        pb.suspend(|| info!("Analyzing year/day of year {}/{}", day.year, day.doy));
        estimator.phase_tracks(day, params)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(())
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Day of year {doy} is not between 1 and 366")]
    BadDoy { doy: u16 },

    #[error("The end day of year ({doy_end}) is before the start day of year ({doy_start})")]
    DoyEndBeforeStart { doy_start: u16, doy_end: u16 },

    #[error("The end year ({year_end}) is before the start year ({year_start})")]
    YearEndBeforeStart { year_start: i32, year_end: i32 },
}
