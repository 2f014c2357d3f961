// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs, path::Path};

use tempfile::TempDir;

use crate::{get_cmd_output, gnssrefl};

fn write_inputs(root: &Path) {
    let snr = root.join("2020").join("snr").join("p041");
    fs::create_dir_all(&snr).unwrap();
    fs::write(snr.join("p0410100.20.snr66.gz"), "").unwrap();

    let input = root.join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(
        input.join("p041_phaseRH.txt"),
        "% year/station 2020 p041\n  1  2.200    6  115.00      4   90  180\n",
    )
    .unwrap();
}

#[test]
fn test_quick_phase_missing_inputs() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "quick-phase",
            "--station", "p041",
            "--year", "2020",
            "--doy", "10",
            "--doy-end", "12",
            "--refl-code", &root.display().to_string(),
            "--estimator", "true",
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No SNR file"), "{stderr}");
    assert!(!stdout.contains("Analyzing year/day of year"));
    assert!(!root.join("2020").join("phase").exists());
}

#[cfg(unix)]
#[test]
fn test_quick_phase_runs_estimator() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();
    write_inputs(root);

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "quickphase",
            "--station", "p041",
            "--year", "2020",
            "--doy", "10",
            "--doy-end", "12",
            "--refl-code", &root.display().to_string(),
            "--estimator", "true",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    for doy in 10..=12 {
        assert!(stdout.contains(&format!("Analyzing year/day of year 2020/{doy}")));
    }
    assert!(root.join("2020").join("phase").join("p041").is_dir());
}

#[cfg(unix)]
#[test]
fn test_quick_phase_stops_when_estimator_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();
    write_inputs(root);

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "quick-phase",
            "--station", "p041",
            "--year", "2020",
            "--doy", "10",
            "--doy-end", "12",
            "--refl-code", &root.display().to_string(),
            "--estimator", "false",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("Analyzing year/day of year 2020/10"));
    assert!(!stdout.contains("Analyzing year/day of year 2020/11"));
    assert!(stderr.contains("2020/10"), "{stderr}");
}

#[test]
fn test_quick_phase_bad_frequency() {
    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "quick-phase",
            "--station", "p041",
            "--year", "2020",
            "--doy", "10",
            "--fr", "L2C",
            "--refl-code", "/nonexistent",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Couldn't parse 'L2C' as a frequency"), "{stderr}");
}
