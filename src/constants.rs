// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Defaults here are shared between the library and the command-line interface;
CLI help texts are generated from them.
 */

/// The GNSS frequency code used for apriori tables when none is given (L2C).
pub const DEFAULT_FREQUENCY: u32 = 20;

/// The frequency code for GPS L1.
pub const L1_FREQUENCY: u32 = 1;

/// The frequency code for GPS L5.
pub const L5_FREQUENCY: u32 = 5;

/// A (quadrant, satellite) bin needs strictly more than this many tracks to
/// make it into an apriori table.
pub const DEFAULT_MIN_TRACKS: usize = 100;

/// The satellite roster for an apriori table is taken on this day of the last
/// year of the span.
pub const ROSTER_DOY: u16 = 365;

/// The lower edges of the azimuth quadrants [degrees]. Each quadrant is
/// [`QUADRANT_WIDTH`] wide.
pub const QUADRANTS: [u16; 4] = [0, 90, 180, 270];

/// [degrees]
pub const QUADRANT_WIDTH: u16 = 90;

/// Annotations written into apriori file headers.
pub const DEFAULT_TMIN: f64 = 0.05;
pub const DEFAULT_TMAX: f64 = 0.50;

/// The default SNR file ending.
pub const DEFAULT_SNR: u8 = 66;

/// SNR file endings the GNSS-IR tool chain produces.
pub const VALID_SNR_TYPES: [u8; 4] = [50, 66, 88, 99];

/// Default lower elevation-angle limit for the periodogram [degrees].
pub const DEFAULT_E1: f64 = 5.0;

/// Default upper elevation-angle limit for the periodogram [degrees].
pub const DEFAULT_E2: f64 = 30.0;

/// Elevation-angle limits of the polynomial fit that removes the direct
/// signal [degrees].
pub const POLY_FIT_WINDOW: [f64; 2] = [5.0, 30.0];

/// The frequency selection used by quick-phase when none is given.
pub const DEFAULT_FREQUENCY_SELECTION: &str = "20";

/// This frequency selection expands to L1 and L2C.
pub const ALL_FREQUENCIES_SELECTION: &str = "all";

/// Doy traversal always runs to this day, regardless of leap years.
pub const LAST_DOY: u16 = 366;

/// The program run once per day when no other estimator is specified.
pub const DEFAULT_ESTIMATOR_PROGRAM: &str = "phase_tracks";

/// The environment variable pointing at the root of the data tree.
pub const REFL_CODE_ENV: &str = "REFL_CODE";
