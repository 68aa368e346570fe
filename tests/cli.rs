use assert_cmd::Command;
use predicates::prelude::*;

const TIME: &str = "time:0:0.09:10:s";
const ANGLE: &str = "angle:0:6.283185307179586:9:rad";

fn fieldaxes() -> Command {
    Command::cargo_bin("fieldaxes").unwrap()
}

#[test]
fn axes_lists_plottable_axes() {
    fieldaxes()
        .args(["axes", "--axis", TIME, "--axis", ANGLE])
        .args(["--axis", "phase:0:2:3", "--overlay", "phase"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tag"))
        .stdout(predicate::str::contains("freqs"))
        .stdout(predicate::str::contains("wavenumber"))
        .stdout(predicate::str::contains("°"))
        .stdout(predicate::str::contains("phase").not())
        .stdout(predicate::str::contains("None").not());
}

#[test]
fn secondary_slot_offers_none() {
    fieldaxes()
        .args(["axes", "--axis", TIME, "--slot", "Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("None"));
}

#[test]
fn bad_axis_spec_rejected() {
    fieldaxes()
        .args(["axes", "--axis", "time:0:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name:start:stop:count"));
}

#[test]
fn fft_plot_with_negative_index() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE])
        .args(["--x-action", "fft", "--index", "angle=-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X: freqs{Hz}"))
        .stdout(predicate::str::contains("angle: angle[8]{°} (360.00 °)"))
        .stdout(predicate::str::contains("request: freqs{Hz}, angle[8]{°}"))
        .stdout(predicate::str::contains("shape: [6]"));
}

#[test]
fn reduction_plot() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--reduce", "angle=rms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("request: time{s}, angle=rms{°}"))
        .stdout(predicate::str::contains("shape: [10]"));
}

#[test]
fn slice_at_nearest_value() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--slice", "angle=100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("angle: angle[2]{°}"));
}

#[test]
fn second_slot_plot() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--y", "Angle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Y: angle{°}"))
        .stdout(predicate::str::contains("shape: [10, 9]"));
}

#[test]
fn fourier_slice_by_dual_name() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--x", "angle"])
        .args(["--index", "freqs=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X: angle{°}"))
        .stdout(predicate::str::contains("time: freqs[1]{Hz}"))
        .stdout(predicate::str::contains("shape: [9]"));
}

#[test]
fn fft_without_dual_warns() {
    fieldaxes()
        .args(["plot", "--axis", "z:0:1:3:m", "--x-action", "fft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X: z{m}"))
        .stderr(predicate::str::contains("FFT ignored on slot X (z)"));
}

#[test]
fn extraction_errors_reported() {
    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--index", "mass=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mass is plotted or not an axis"));

    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--reduce", "angle=median"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized extraction operation: median"));

    fieldaxes()
        .args(["plot", "--axis", TIME, "--axis", ANGLE, "--index", "angle=9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn log_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("fieldaxes.log");

    fieldaxes()
        .arg("--log")
        .arg(&log)
        .args(["plot", "--axis", TIME, "--x-action", "fft"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting fieldaxes"));
    assert!(contents.contains("time -> freqs"));
}
