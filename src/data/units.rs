//! Unit conversion between the few physical units axes are expressed in.

use crate::error::{FieldAxesError, Result};
use ndarray::Array1;
use std::f64::consts::PI;

/// `(from, to, factor)`: value in `to` = value in `from` * factor.
const CONVERSIONS: &[(&str, &str, f64)] = &[
    ("rad", "°", 180.0 / PI),
    ("s", "ms", 1e3),
    ("m", "mm", 1e3),
    ("Hz", "kHz", 1e-3),
];

/// Multiplicative factor converting a value from `from` to `to`.
pub fn conversion_factor(from: &str, to: &str) -> Result<f64> {
    if from == to {
        return Ok(1.0);
    }
    for &(a, b, factor) in CONVERSIONS {
        if a == from && b == to {
            return Ok(factor);
        }
        if b == from && a == to {
            return Ok(1.0 / factor);
        }
    }
    Err(FieldAxesError::unit_mismatch(from, to))
}

/// Convert a coordinate sequence between units.
pub fn convert(values: &Array1<f64>, from: &str, to: &str) -> Result<Array1<f64>> {
    let factor = conversion_factor(from, to)?;
    if factor == 1.0 {
        return Ok(values.clone());
    }
    Ok(values.mapv(|v| v * factor))
}
