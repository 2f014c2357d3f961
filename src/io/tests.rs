// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::Write, path::PathBuf};

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::tempdir;

use super::{results::parse_results, *};

const RESULTS: &str = indoc! {"
    % year, doy, RH, sat,UTCtime, Azim, Amp,  eminO, emaxO,NumbOf,freq,rise,EdotF, PkNoise  DelT     MJD   refr-appl
    % (1)  (2)   (3) (4)  (5)     (6)   (7)    (8)    (9)   (10)  (11) (12) (13)    (14)     (15)    (16)   (17)
     2020   1  2.212   1  17.283 130.78  11.97   5.01  14.96   209   1 -1  0.00281   3.34   29.71 58849.720212  1
     2020   1  2.167  24  20.107  49.92  10.09   5.00  14.90   243  20  1  0.00309   3.38   26.33 58849.837954  1

     2020   1  2.301  5.0  3.512 301.10   8.55   5.02  14.99   198  20.0 -1  0.00250   3.12   31.02 58849.146333  1
"};

#[test]
fn test_parse_results() {
    let results = parse_results(RESULTS.as_bytes(), "test").unwrap();
    assert_eq!(results.len(), 3);

    let r = results[0];
    assert_abs_diff_eq!(r.reflector_height, 2.212);
    assert_eq!(r.satellite, 1);
    assert_abs_diff_eq!(r.azimuth, 130.78);
    assert_eq!(r.frequency, 1);

    assert_eq!(results[1].satellite, 24);
    assert_eq!(results[1].frequency, 20);

    // Integers written as floats are fine.
    assert_eq!(results[2].satellite, 5);
    assert_eq!(results[2].frequency, 20);
}

#[test]
fn test_parse_results_too_few_columns() {
    let result = parse_results("2020 1 2.212 1 17.283 130.78\n".as_bytes(), "short.txt");
    match result {
        Err(ResultsReadError::TooFewColumns {
            file,
            line,
            expected,
            got,
        }) => {
            assert_eq!(file, "short.txt");
            assert_eq!(line, 1);
            assert_eq!(expected, 11);
            assert_eq!(got, 6);
        }
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_parse_results_bad_values() {
    // Non-numeric azimuth.
    let line = "2020 1 2.212 1 17.283 north 11.97 5.01 14.96 209 20\n";
    let result = parse_results(line.as_bytes(), "bad.txt");
    assert!(matches!(
        result,
        Err(ResultsReadError::BadValue {
            column: "azimuth",
            line: 1,
            ..
        })
    ));

    // Fractional satellite number.
    let line = "2020 1 2.212 1.5 17.283 130.78 11.97 5.01 14.96 209 20\n";
    let result = parse_results(line.as_bytes(), "bad.txt");
    assert!(matches!(
        result,
        Err(ResultsReadError::BadValue {
            column: "satellite",
            ..
        })
    ));

    // Negative frequency.
    let line = "2020 1 2.212 1 17.283 130.78 11.97 5.01 14.96 209 -20\n";
    let result = parse_results(line.as_bytes(), "bad.txt");
    assert!(matches!(
        result,
        Err(ResultsReadError::BadValue {
            column: "frequency",
            ..
        })
    ));

    // NaNs aren't accepted.
    let line = "2020 1 nan 1 17.283 130.78 11.97 5.01 14.96 209 20\n";
    let result = parse_results(line.as_bytes(), "bad.txt");
    assert!(matches!(
        result,
        Err(ResultsReadError::BadValue {
            column: "reflector height",
            ..
        })
    ));
}

#[test]
fn test_parse_results_ignores_unused_columns() {
    // The amplitude is "nan" and the date columns are garbage, but only the
    // RH, satellite, azimuth and frequency columns are read.
    let line = "2020 100 2.000 5 12.000 45.00 nan 5.00 25.00 300 20 1\n";
    let results = parse_results(line.as_bytes(), "x.txt").unwrap();
    assert_eq!(results.len(), 1);
    assert_abs_diff_eq!(results[0].reflector_height, 2.0);
    assert_eq!(results[0].satellite, 5);
    assert_abs_diff_eq!(results[0].azimuth, 45.0);
    assert_eq!(results[0].frequency, 20);

    let line = "yyyy ddd 2.000 5 hh:mm 45.00 - - - - 20\n";
    let results = parse_results(line.as_bytes(), "x.txt").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].satellite, 5);
}

#[test]
fn test_read_results_dir() {
    let tmp_dir = tempdir().unwrap();
    let dir = tmp_dir.path();
    // Written out of order; reading is alphabetical.
    let mut f = File::create(dir.join("002.txt")).unwrap();
    writeln!(f, "2020 2 3.000 7 1.0 10.0 1.0 5.0 15.0 100 20").unwrap();
    let mut f = File::create(dir.join("001.txt")).unwrap();
    writeln!(f, "2020 1 2.000 3 1.0 20.0 1.0 5.0 15.0 100 20").unwrap();
    writeln!(f, "2020 1 2.500 4 1.0 30.0 1.0 5.0 15.0 100 1").unwrap();
    // Not a results file.
    let mut f = File::create(dir.join("README")).unwrap();
    writeln!(f, "nothing to see here").unwrap();

    let results = read_results_dir(dir).unwrap();
    let sats: Vec<u32> = results.iter().map(|r| r.satellite).collect();
    assert_eq!(sats, [3, 4, 7]);
    let freqs: Vec<u32> = results.iter().map(|r| r.frequency).collect();
    assert_eq!(freqs, [20, 1, 20]);
}

#[test]
fn test_read_results_missing_dir_is_empty() {
    let tmp_dir = tempdir().unwrap();
    let results = read_results_dir(&tmp_dir.path().join("2019/results/p041")).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_read_results_dir_propagates_bad_file() {
    let tmp_dir = tempdir().unwrap();
    let mut f = File::create(tmp_dir.path().join("001.txt")).unwrap();
    writeln!(f, "2020 1 2.000").unwrap();
    assert!(read_results_dir(tmp_dir.path()).is_err());
}

#[test]
fn test_refl_code_layout() {
    let refl_code = ReflCode::new("/data/refl_code");
    assert_eq!(refl_code.root(), PathBuf::from("/data/refl_code"));
    assert_eq!(
        refl_code.results_dir("p041", 2020),
        PathBuf::from("/data/refl_code/2020/results/p041")
    );
    assert_eq!(
        refl_code.apriori_file("p041"),
        PathBuf::from("/data/refl_code/input/p041_phaseRH.txt")
    );
    assert_eq!(
        refl_code.snr_file("p041", 2020, 50, 66),
        PathBuf::from("/data/refl_code/2020/snr/p041/p0410500.20.snr66")
    );
    assert_eq!(
        refl_code.snr_file("mchl", 2009, 5, 99),
        PathBuf::from("/data/refl_code/2009/snr/mchl/mchl0050.09.snr99")
    );
    assert_eq!(
        refl_code.phase_file("p041", 2021, 7),
        PathBuf::from("/data/refl_code/2021/phase/p041/007.txt")
    );
}
