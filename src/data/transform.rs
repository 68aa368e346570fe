//! Fourier duals: frequency/wavenumber coordinates and amplitude spectra.

use super::axis::Axis;
use super::units;
use crate::error::{FieldAxesError, Result};
use crate::util::TransformPair;
use ndarray::{Array1, ArrayD, Axis as NdAxis, IxDyn};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Relative tolerance on the spacing of evenly spaced coordinates.
const SPACING_TOLERANCE: f64 = 1e-6;

/// Spacing of an evenly spaced axis, expressed in the pair's base unit.
pub fn uniform_step(axis: &Axis, pair: &TransformPair) -> Result<f64> {
    if axis.len() < 2 {
        return Err(FieldAxesError::transform_unavailable(
            &axis.name,
            "needs at least two coordinates",
        ));
    }
    let values = units::convert(&axis.values, &axis.unit, &pair.base_unit)?;
    let step = values[1] - values[0];
    if step <= 0.0 || !step.is_finite() {
        return Err(FieldAxesError::transform_unavailable(
            &axis.name,
            "coordinates must be increasing",
        ));
    }
    let uneven = values
        .windows(2)
        .into_iter()
        .any(|w| ((w[1] - w[0]) - step).abs() > SPACING_TOLERANCE * step);
    if uneven {
        return Err(FieldAxesError::transform_unavailable(
            &axis.name,
            "coordinates are not evenly spaced",
        ));
    }
    Ok(step)
}

/// Number of one-sided spectrum bins for `n` samples.
pub fn bin_count(n: usize) -> usize {
    n / 2 + 1
}

/// Dual coordinates (`scale * k / (n * step)`) of a base-domain axis.
pub fn dual_values(axis: &Axis, pair: &TransformPair) -> Result<Array1<f64>> {
    let step = uniform_step(axis, pair)?;
    let span = axis.len() as f64 * step;
    Ok(Array1::from_iter(
        (0..bin_count(axis.len())).map(|k| pair.scale * k as f64 / span),
    ))
}

/// The dual-domain axis of a base-domain axis.
///
/// Normalizations carry over so that e.g. an electrical-order ratio declared
/// on `time` applies to `freqs`.
pub fn dual_axis(axis: &Axis, pair: &TransformPair) -> Result<Axis> {
    let mut dual = Axis::new(&pair.dual, &pair.dual_unit, dual_values(axis, pair)?);
    dual.normalizations = axis.normalizations.clone();
    Ok(dual)
}

/// One-sided amplitude spectrum of `data` along dimension `dim`.
///
/// A cosine of amplitude `a` on bin `k` yields `a` at bin `k`.
pub fn amplitude_spectrum(data: &ArrayD<f64>, dim: usize) -> ArrayD<f64> {
    let n = data.shape()[dim];
    let bins = bin_count(n);
    let mut shape = data.shape().to_vec();
    shape[dim] = bins;
    let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));
    if n == 0 {
        return out;
    }

    let fft = FftPlanner::<f64>::new().plan_fft_forward(n);
    let mut buffer = vec![Complex::new(0.0, 0.0); n];

    for (lane_in, mut lane_out) in data
        .lanes(NdAxis(dim))
        .into_iter()
        .zip(out.lanes_mut(NdAxis(dim)))
    {
        for (slot, &v) in buffer.iter_mut().zip(lane_in.iter()) {
            *slot = Complex::new(v, 0.0);
        }
        fft.process(&mut buffer);
        for (k, o) in lane_out.iter_mut().enumerate() {
            // DC and Nyquist bins have no mirrored counterpart
            let fold = if k == 0 || (n % 2 == 0 && k == n / 2) {
                1.0
            } else {
                2.0
            };
            *o = buffer[k].norm() * fold / n as f64;
        }
    }
    out
}
