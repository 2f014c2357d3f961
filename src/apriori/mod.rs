// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Apriori reflector-height tables.
//!
//! Many days (or years) of per-arc reflector-height results are reduced into a
//! small table of expected reflector heights. Arcs are binned by azimuth
//! quadrant and satellite, and every bin with enough arcs contributes one row
//! with the mean reflector height and mean azimuth of its arcs. The phase
//! estimator later uses the table to decide which arcs to look at and what
//! reflector height to expect from them.

mod error;

pub use error::{AprioriError, AprioriReadError, AprioriWriteError};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, trace, warn};

use crate::{
    constants::{
        DEFAULT_TMAX, DEFAULT_TMIN, L5_FREQUENCY, QUADRANTS, QUADRANT_WIDTH, ROSTER_DOY,
    },
    gps::{has_own_roster, SatelliteRoster},
    io::{read_results_dir, ArcResult, ReflCode},
};

/// One (quadrant, satellite) bin of an apriori table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AprioriRow {
    /// 1-based, in the order rows were made.
    pub index: usize,

    /// [metres]
    pub mean_reflector_height: f64,

    pub satellite: u32,

    /// The plain arithmetic mean of the arc azimuths (no wrapping) [degrees].
    pub mean_azimuth: f64,

    /// The number of arcs that went into the means.
    pub num_tracks: usize,

    /// The quadrant bounds [degrees].
    pub azimuth_min: u16,
    pub azimuth_max: u16,
}

/// An ordered collection of [AprioriRow]s, along with a little metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AprioriTable {
    /// The first year of the results used to make this table.
    pub year: i32,
    pub station: String,
    pub tmin: f64,
    pub tmax: f64,
    rows: Vec<AprioriRow>,
}

impl AprioriTable {
    fn new(station: &str, year: i32) -> AprioriTable {
        AprioriTable {
            year,
            station: station.to_string(),
            tmin: DEFAULT_TMIN,
            tmax: DEFAULT_TMAX,
            rows: vec![],
        }
    }

    /// Add a row, giving it the next index.
    fn push(
        &mut self,
        mean_reflector_height: f64,
        satellite: u32,
        mean_azimuth: f64,
        num_tracks: usize,
        quadrant: (u16, u16),
    ) {
        let index = self.rows.len() + 1;
        self.rows.push(AprioriRow {
            index,
            mean_reflector_height,
            satellite,
            mean_azimuth,
            num_tracks,
            azimuth_min: quadrant.0,
            azimuth_max: quadrant.1,
        });
    }

    pub fn rows(&self) -> &[AprioriRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table to a file, replacing anything that's already there. An
    /// empty table is an error; no file is created for it.
    pub fn write(&self, file: &Path) -> Result<(), AprioriWriteError> {
        if self.is_empty() {
            return Err(AprioriWriteError::Empty);
        }
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut f = BufWriter::new(File::create(file)?);
        self.write_to(&mut f)?;
        f.flush()?;
        Ok(())
    }

    /// Write the header and rows. The column layout must stay as it is; the
    /// phase estimator reads these files.
    pub(crate) fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "% apriori RH values used for phase estimation  ")?;
        writeln!(w, "% year/station {} {}  ", self.year, self.station)?;
        writeln!(w, "% tmin {:.2} (default)  ", self.tmin)?;
        writeln!(w, "% tmax {:.2} (default)  ", self.tmax)?;
        writeln!(w, "% Track  RefH SatNu MeanAz  Nval   Azimuths   ")?;
        writeln!(w, "%         m     ")?;
        for row in &self.rows {
            writeln!(
                w,
                "{:3} {:6.3} {:4} {:7.2}   {:4}  {:3}  {:3}",
                row.index,
                row.mean_reflector_height,
                row.satellite,
                row.mean_azimuth,
                row.num_tracks,
                row.azimuth_min,
                row.azimuth_max
            )?;
        }
        Ok(())
    }

    /// Read a table written by [AprioriTable::write].
    pub fn read(file: &Path) -> Result<AprioriTable, AprioriReadError> {
        let f = BufReader::new(File::open(file)?);
        Self::read_from(f, &file.display().to_string())
    }

    pub(crate) fn read_from<R: BufRead>(
        reader: R,
        file: &str,
    ) -> Result<AprioriTable, AprioriReadError> {
        let mut year_station = None;
        let mut tmin = DEFAULT_TMIN;
        let mut tmax = DEFAULT_TMAX;
        let mut rows = vec![];

        for (i_line, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(comment) = line.strip_prefix('%') {
                let mut words = comment.split_whitespace();
                match words.next() {
                    Some("year/station") => {
                        let year = words.next().and_then(|y| y.parse::<i32>().ok());
                        let station = words.next();
                        if let (Some(year), Some(station)) = (year, station) {
                            year_station = Some((year, station.to_string()));
                        }
                    }
                    Some("tmin") => {
                        if let Some(v) = words.next().and_then(|v| v.parse().ok()) {
                            tmin = v;
                        }
                    }
                    Some("tmax") => {
                        if let Some(v) = words.next().and_then(|v| v.parse().ok()) {
                            tmax = v;
                        }
                    }
                    _ => (),
                }
                continue;
            }

            let row = parse_row(line).ok_or_else(|| AprioriReadError::BadRow {
                file: file.to_string(),
                line: i_line + 1,
                text: line.to_string(),
            })?;
            rows.push(row);
        }

        let (year, station) = year_station.ok_or_else(|| AprioriReadError::MissingHeader {
            file: file.to_string(),
        })?;
        Ok(AprioriTable {
            year,
            station,
            tmin,
            tmax,
            rows,
        })
    }
}

fn parse_row(line: &str) -> Option<AprioriRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [index, rh, sat, az, n, az_min, az_max] => Some(AprioriRow {
            index: index.parse().ok()?,
            mean_reflector_height: rh.parse().ok()?,
            satellite: sat.parse().ok()?,
            mean_azimuth: az.parse().ok()?,
            num_tracks: n.parse().ok()?,
            azimuth_min: az_min.parse().ok()?,
            azimuth_max: az_max.parse().ok()?,
        }),
        _ => None,
    }
}

/// Bin arcs into an apriori table.
///
/// Only arcs on `frequency` are used. For each quadrant (0, 90, 180 and 270
/// degrees, in that order) and each satellite in `roster` (in roster order),
/// the arcs strictly inside the quadrant (`min < azimuth < max`; arcs exactly
/// on a quadrant edge belong to no quadrant) from that satellite are
/// collected. If there are strictly more than `min_tracks` of them, a row is
/// added with the mean reflector height and mean azimuth. Other bins are
/// skipped.
///
/// `year` and `station` are only recorded in the table's metadata.
pub fn bin_apriori(
    station: &str,
    year: i32,
    arcs: &[ArcResult],
    roster: &[u32],
    frequency: u32,
    min_tracks: usize,
) -> AprioriTable {
    let arcs: Vec<&ArcResult> = arcs.iter().filter(|a| a.frequency == frequency).collect();
    debug!("{} arcs on frequency {frequency}", arcs.len());

    let mut table = AprioriTable::new(station, year);
    for &azimuth_min in QUADRANTS.iter() {
        let azimuth_max = azimuth_min + QUADRANT_WIDTH;
        let (lo, hi) = (f64::from(azimuth_min), f64::from(azimuth_max));

        for &satellite in roster {
            let (sum_rh, sum_az, num_tracks) = arcs
                .iter()
                .filter(|a| a.satellite == satellite && lo < a.azimuth && a.azimuth < hi)
                .fold((0.0, 0.0, 0), |(rh, az, n), a| {
                    (rh + a.reflector_height, az + a.azimuth, n + 1)
                });

            if num_tracks > min_tracks {
                let n = num_tracks as f64;
                table.push(
                    sum_rh / n,
                    satellite,
                    sum_az / n,
                    num_tracks,
                    (azimuth_min, azimuth_max),
                );
            } else {
                trace!(
                    "Satellite {satellite} in azimuths {azimuth_min}-{azimuth_max} has only {num_tracks} tracks; skipping"
                );
            }
        }
    }

    table
}

/// Make an apriori table for a station from all of the results in the years
/// `year` to `year_end` (inclusive; if `year_end` isn't given, only `year` is
/// used).
///
/// Years without a results directory contribute nothing. The satellites come
/// from `roster` on day 365 of the last year only.
pub fn build_apriori<R: SatelliteRoster + ?Sized>(
    refl_code: &ReflCode,
    station: &str,
    year: i32,
    year_end: Option<i32>,
    frequency: u32,
    min_tracks: usize,
    roster: &R,
) -> Result<AprioriTable, AprioriError> {
    if station.is_empty() {
        return Err(AprioriError::NoStation);
    }
    let year_end = year_end.unwrap_or(year);
    if year_end < year {
        return Err(AprioriError::YearEndBeforeStart { year, year_end });
    }
    if min_tracks == 0 {
        return Err(AprioriError::ZeroMinTracks);
    }

    info!("Minimum number of tracks required {min_tracks}");
    let mut arcs = vec![];
    for y in year..=year_end {
        let dir = refl_code.results_dir(station, y);
        let results = read_results_dir(&dir)?;
        if results.is_empty() {
            debug!("No results for {station} in {y}");
        }
        arcs.extend(results);
    }
    debug!("{} arcs in total for {station} {year}-{year_end}", arcs.len());

    if !has_own_roster(frequency) {
        warn!("Frequency {frequency} has no satellite list of its own; using the L2C list");
    }
    let signal = if frequency == L5_FREQUENCY { "L5" } else { "L2C" };
    info!("Using {signal} satellite list for December 31 on {year_end}");
    let satellites = roster.satellites_for(frequency, year_end, ROSTER_DOY)?;
    debug!("Satellites: {satellites:?}");

    Ok(bin_apriori(
        station,
        year,
        &arcs,
        &satellites,
        frequency,
        min_tracks,
    ))
}
