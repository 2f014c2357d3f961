// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Phase estimation helpers for GNSS interferometric reflectometry (GNSS-IR).
//!
//! Two things live here: making apriori reflector-height tables out of
//! per-arc reflector-height results, and driving a per-day phase estimator
//! over a range of days.

pub mod apriori;
mod cli;
pub mod constants;
pub mod gps;
pub mod io;
mod params;
pub mod phase;
pub mod schedule;

use crossbeam_utils::atomic::AtomicCell;

pub use apriori::{build_apriori, AprioriRow, AprioriTable};
pub use cli::{Gnssrefl, GnssreflError};
pub use gps::{LaunchTable, SatelliteRoster};
pub use io::{ArcResult, ReflCode};
pub use phase::{ExternalEstimator, PhaseEstimator, PhaseParams};
pub use schedule::{run_range, DayRange, DayUnit};

/// Should progress bars be drawn? This is only set by the CLI.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
