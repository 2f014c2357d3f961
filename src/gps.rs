// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Which GPS satellites broadcast which signals.

use thiserror::Error;

use crate::constants::{DEFAULT_FREQUENCY, L5_FREQUENCY, LAST_DOY};

/// Something that knows which GPS satellites transmit L2C and L5 on a given
/// day.
pub trait SatelliteRoster {
    /// Get the PRNs of the satellites transmitting (L2C, L5) on this day.
    fn l2c_l5_list(&self, year: i32, doy: u16) -> Result<(Vec<u32>, Vec<u32>), RosterError>;

    /// Get the satellites that transmit a frequency on this day. Only L2C and
    /// L5 have their own rosters; everything else gets the L2C roster.
    fn satellites_for(
        &self,
        frequency: u32,
        year: i32,
        doy: u16,
    ) -> Result<Vec<u32>, RosterError> {
        let (l2c, l5) = self.l2c_l5_list(year, doy)?;
        Ok(if frequency == L5_FREQUENCY { l5 } else { l2c })
    }
}

/// Does this frequency have a roster of its own?
pub fn has_own_roster(frequency: u32) -> bool {
    frequency == DEFAULT_FREQUENCY || frequency == L5_FREQUENCY
}

/// A satellite and the (year, doy) it was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launch {
    pub prn: u32,
    pub year: i32,
    pub doy: u16,
}

const fn launch(prn: u32, year: i32, doy: u16) -> Launch {
    Launch { prn, year, doy }
}

// Block IIR-M onwards carry L2C; block IIF onwards also carry L5. PRNs that
// were reassigned after a satellite was decommissioned keep their first
// launch.
const L2C_LAUNCHES: [Launch; 25] = [
    launch(17, 2005, 269),
    launch(31, 2006, 268),
    launch(12, 2006, 321),
    launch(15, 2007, 290),
    launch(29, 2007, 354),
    launch(7, 2008, 75),
    launch(5, 2009, 229),
    launch(25, 2010, 148),
    launch(1, 2011, 197),
    launch(24, 2012, 278),
    launch(27, 2013, 135),
    launch(30, 2014, 52),
    launch(6, 2014, 137),
    launch(9, 2014, 214),
    launch(3, 2014, 302),
    launch(26, 2015, 84),
    launch(8, 2015, 196),
    launch(10, 2015, 304),
    launch(32, 2016, 36),
    launch(4, 2018, 357),
    launch(18, 2019, 234),
    launch(23, 2020, 182),
    launch(14, 2020, 310),
    launch(11, 2021, 168),
    launch(28, 2023, 18),
];

const L5_LAUNCHES: [Launch; 18] = [
    launch(25, 2010, 148),
    launch(1, 2011, 197),
    launch(24, 2012, 278),
    launch(27, 2013, 135),
    launch(30, 2014, 52),
    launch(6, 2014, 137),
    launch(9, 2014, 214),
    launch(3, 2014, 302),
    launch(26, 2015, 84),
    launch(8, 2015, 196),
    launch(10, 2015, 304),
    launch(32, 2016, 36),
    launch(4, 2018, 357),
    launch(18, 2019, 234),
    launch(23, 2020, 182),
    launch(14, 2020, 310),
    launch(11, 2021, 168),
    launch(28, 2023, 18),
];

/// The built-in roster: a satellite transmits from its launch day onwards.
/// PRNs are returned in ascending order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchTable;

impl LaunchTable {
    fn active(launches: &[Launch], year: i32, doy: u16) -> Vec<u32> {
        let mut prns: Vec<u32> = launches
            .iter()
            .filter(|l| (l.year, l.doy) <= (year, doy))
            .map(|l| l.prn)
            .collect();
        prns.sort_unstable();
        prns.dedup();
        prns
    }
}

impl SatelliteRoster for LaunchTable {
    fn l2c_l5_list(&self, year: i32, doy: u16) -> Result<(Vec<u32>, Vec<u32>), RosterError> {
        if !(1..=LAST_DOY).contains(&doy) {
            return Err(RosterError::BadDoy { doy });
        }
        Ok((
            Self::active(&L2C_LAUNCHES, year, doy),
            Self::active(&L5_LAUNCHES, year, doy),
        ))
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Can't get a satellite roster for day of year {doy}")]
    BadDoy { doy: u16 },

    #[error("Couldn't get a satellite roster: {0}")]
    Other(String),
}
