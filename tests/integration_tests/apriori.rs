// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;

use tempfile::TempDir;

use crate::{get_cmd_output, gnssrefl, write_results};

#[test]
fn test_apriori_writes_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();
    write_results(
        root,
        2020,
        1,
        &[(6, 2.0, 100.0), (6, 2.2, 110.0), (6, 2.4, 120.0)],
    );
    write_results(root, 2021, 1, &[(6, 2.2, 130.0), (24, 3.0, 10.0)]);

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "apriori",
            "--station", "p041",
            "--year", "2020",
            "--year-end", "2021",
            "--min-tracks", "3",
            "--refl-code", &root.display().to_string(),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Minimum number of tracks required 3"));
    assert!(stdout.contains("Using L2C satellite list for December 31 on 2021"));
    assert!(stdout.contains("Apriori RH file used for phase estimation written to"));

    let file = root.join("input").join("p041_phaseRH.txt");
    let contents = fs::read_to_string(file).unwrap();
    let rows: Vec<&str> = contents.lines().filter(|l| !l.starts_with('%')).collect();
    assert_eq!(rows, ["  1  2.200    6  115.00      4   90  180"]);
    assert!(contents.contains("% year/station 2020 p041"));
}

#[test]
fn test_apriori_without_results() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "apriori",
            "--station", "p041",
            "--year", "2020",
            "--refl-code", &root.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Found no results - perhaps wrong year?"));
    assert!(!root.join("input").join("p041_phaseRH.txt").exists());
}

#[test]
fn test_apriori_dry_run_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();
    write_results(
        root,
        2020,
        1,
        &[(6, 2.0, 100.0), (6, 2.2, 110.0), (6, 2.4, 120.0)],
    );
    let toml = root.join("apriori.toml");

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "apriori",
            "--station", "p041",
            "--year", "2020",
            "--min-tracks", "2",
            "--refl-code", &root.display().to_string(),
            "--dry-run",
            "--save-toml", &toml.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!root.join("input").exists());

    // The saved arguments reproduce the run.
    let cmd = gnssrefl()
        .args(["apriori", &toml.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(root.join("input").join("p041_phaseRH.txt").exists());
}

#[test]
fn test_apriori_without_data_root() {
    let cmd = gnssrefl()
        .args(["apriori", "--station", "p041", "--year", "2020"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No data root was specified"), "{stderr}");
}

#[test]
fn test_apriori_bad_results_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let root = tmp_dir.path();
    let dir = root.join("2020").join("results").join("p041");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("001.txt"), "2020 1 2.0 6\n").unwrap();

    #[rustfmt::skip]
    let cmd = gnssrefl()
        .args([
            "apriori",
            "--station", "p041",
            "--year", "2020",
            "--refl-code", &root.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("001.txt"), "{stderr}");
}
