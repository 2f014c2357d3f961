// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod apriori;
mod quick_phase;

use std::{fs, path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn gnssrefl() -> Command {
    let mut cmd = Command::cargo_bin("gnssrefl").unwrap();
    // Only use the data roots given to each test.
    cmd.env_remove("REFL_CODE");
    cmd
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a results file for `p041` into the data root. Every arc is on L2C and
/// has the given (satellite, reflector height, azimuth).
fn write_results(refl_code: &Path, year: i32, doy: u16, arcs: &[(u32, f64, f64)]) {
    let dir = refl_code
        .join(year.to_string())
        .join("results")
        .join("p041");
    fs::create_dir_all(&dir).unwrap();
    let mut contents = String::from("% year, doy, RH, sat,UTCtime, Azim, Amp,  eminO, emaxO,NumbOf,freq,rise,EdotF, PkNoise  DelT     MJD   refr-appl\n");
    for (sat, rh, az) in arcs {
        contents.push_str(&format!(
            " {year} {doy:3} {rh:6.3} {sat:3} 12.000 {az:6.2} 10.00 5.00 25.00 300 20 1 0.00281 3.34 29.71 58849.72 1\n"
        ));
    }
    fs::write(dir.join(format!("{doy:03}.txt")), contents).unwrap();
}
