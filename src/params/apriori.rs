// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use log::info;

use crate::{
    apriori::{build_apriori, AprioriError},
    gps::LaunchTable,
    io::ReflCode,
};

pub(crate) struct AprioriParams {
    pub(crate) refl_code: ReflCode,
    pub(crate) station: String,
    pub(crate) year: i32,
    pub(crate) year_end: Option<i32>,
    pub(crate) frequency: u32,
    pub(crate) min_tracks: usize,
}

impl AprioriParams {
    /// Make and write the station's apriori file. If there aren't any rows,
    /// nothing is written and `None` is returned.
    pub(crate) fn run(&self) -> Result<Option<PathBuf>, AprioriError> {
        let table = build_apriori(
            &self.refl_code,
            &self.station,
            self.year,
            self.year_end,
            self.frequency,
            self.min_tracks,
            &LaunchTable,
        )?;

        if table.is_empty() {
            info!("Found no results - perhaps wrong year?");
            return Ok(None);
        }

        let file = self.refl_code.apriori_file(&self.station);
        table.write(&file)?;
        info!(
            "Apriori RH file used for phase estimation written to {}",
            file.display()
        );
        Ok(Some(file))
    }
}
