// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

use crate::{
    io::ReflCode,
    phase::{
        check_apriori, check_inputs, prepare_phase_dirs, ExternalEstimator, InputCheckError,
        PhaseEstimator, PhaseEstimatorError, PhaseParams,
    },
    schedule::{run_range, DayRange},
};

pub(crate) struct QuickPhaseParams {
    pub(crate) refl_code: ReflCode,
    pub(crate) range: DayRange,
    pub(crate) phase: PhaseParams,

    /// The program run for each day.
    pub(crate) estimator_program: PathBuf,
}

impl QuickPhaseParams {
    pub(crate) fn run(&self) -> Result<(), QuickPhaseError> {
        let mut estimator =
            ExternalEstimator::new(self.estimator_program.clone(), self.refl_code.clone());
        self.run_with(&mut estimator)
    }

    /// Check the inputs, prepare the output directories, then run the
    /// estimator over every day. If the inputs aren't there, nothing else
    /// happens.
    pub(crate) fn run_with<E: PhaseEstimator + ?Sized>(
        &self,
        estimator: &mut E,
    ) -> Result<(), QuickPhaseError> {
        let station = &self.phase.station;
        let first = self.range.first();
        check_inputs(
            &self.refl_code,
            station,
            first.year,
            first.doy,
            self.phase.snr,
        )?;
        let apriori = check_apriori(&self.refl_code, station)?;
        info!(
            "{} apriori tracks from {} will constrain the estimator",
            apriori.len(),
            self.refl_code.apriori_file(station).display()
        );

        prepare_phase_dirs(&self.refl_code, station, self.range.years())?;
        debug!("{} days to process", self.range.len());
        run_range(&self.range, &self.phase, estimator)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(crate) enum QuickPhaseError {
    #[error(transparent)]
    Inputs(#[from] InputCheckError),

    #[error(transparent)]
    Estimator(#[from] PhaseEstimatorError),

    #[error("Couldn't create the phase output directories: {0}")]
    IO(#[from] std::io::Error),
}
