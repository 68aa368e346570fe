#![allow(dead_code)]

use fieldaxes::data::{Axis, Normalization};
use fieldaxes::selection::AxisCatalog;
use fieldaxes::LabelConfig;
use ndarray::array;
use std::f64::consts::TAU;

/// time (10), angle (8), z (3), overlay phase (3), singleton pattern slot (1).
pub fn machine_axes() -> Vec<Axis> {
    vec![
        Axis::periodic("time", "s", 0.0, 0.1, 10)
            .with_normalization("elec_order", Normalization::Ratio(50.0))
            .with_normalization("mech_order", Normalization::Ratio(25.0)),
        Axis::periodic("angle", "rad", 0.0, TAU, 8)
            .with_normalization("tooth_id", Normalization::Indices)
            .with_normalization("angle_elec", Normalization::Ratio(0.5))
            .with_normalization("space_order", Normalization::Ratio(2.0)),
        Axis::new("z", "m", array![0.0, 0.5, 1.0]),
        Axis::new("phase", "", array![0.0, 1.0, 2.0]).overlay(),
        Axis::new("slot", "", array![0.0]).pattern(vec![0, 0, 0]),
    ]
}

pub fn machine_catalog() -> AxisCatalog {
    AxisCatalog::new(machine_axes(), LabelConfig::default())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
