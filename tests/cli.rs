mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("wdi-climate").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wdi-climate"));
}

#[test]
fn config_prints_default_json() {
    let out = Command::cargo_bin("wdi-climate")
        .unwrap()
        .arg("config")
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["line_indicator"], "EG.ELC.PETR.ZS");
    assert_eq!(v["bar_years"].as_array().unwrap().len(), 4);
}

#[test]
fn slice_exports_world_augmented_csv() {
    let dir = tempdir().unwrap();
    let data = common::write(dir.path(), "wdi.csv", &common::climate_csv());
    let out = dir.path().join("forest.csv");
    Command::cargo_bin("wdi-climate")
        .unwrap()
        .args(["slice", "--data"])
        .arg(&data)
        .args(["--indicator", common::FOREST, "--world", "--out"])
        .arg(&out)
        .assert()
        .success();
    let txt = std::fs::read_to_string(&out).unwrap();
    assert!(txt.starts_with("country,1980,"));
    assert_eq!(txt.lines().count(), 1 + 3 + 1);
    assert!(txt.lines().last().unwrap().starts_with("World,"));
}

#[test]
fn corr_prints_matrix_for_country() {
    let dir = tempdir().unwrap();
    let data = common::write(dir.path(), "wdi.csv", &common::climate_csv());
    Command::cargo_bin("wdi-climate")
        .unwrap()
        .args(["corr", "--country", "Brazil", "--indicators", "SP.URB.TOTL.IN.ZS;SH.DYN.MORT", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("-1.000"));
}

#[test]
fn run_writes_charts() {
    let dir = tempdir().unwrap();
    let data = common::write(dir.path(), "wdi.csv", &common::climate_csv());
    let charts = dir.path().join("charts");
    Command::cargo_bin("wdi-climate")
        .unwrap()
        .args(["run", "--stats", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(&charts)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pakistan"));
    assert!(charts.join("heatmap_world.svg").exists());
}

#[test]
fn malformed_source_fails() {
    let dir = tempdir().unwrap();
    let data = common::write(
        dir.path(),
        "bad.csv",
        &format!("{}Country Name,Country Code\nChad,TCD\n", common::PREAMBLE),
    );
    Command::cargo_bin("wdi-climate")
        .unwrap()
        .args(["slice", "--indicator", "X", "--out", "x.csv", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"));
}
