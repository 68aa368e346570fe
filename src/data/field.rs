//! In-memory field and the request-string value accessor.

use super::axis::Axis;
use super::{transform, units};
use crate::error::{FieldAxesError, Result};
use crate::selection::{Extension, Reduction, RequestedAxis};
use crate::util::LabelConfig;
use ndarray::{Array1, ArrayD, Axis as NdAxis, ErrorKind, IxDyn, ShapeError};
use std::f64::consts::PI;

/// A physical quantity sampled over a grid of axes.
#[derive(Debug, Clone)]
pub struct Field {
    /// Quantity name.
    pub name: String,
    /// Quantity unit.
    pub unit: String,
    /// One axis per dimension, in dimension order.
    pub axes: Vec<Axis>,
    /// Values, shaped by the axis lengths.
    pub values: ArrayD<f64>,
}

/// Summary statistics over finite values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStats {
    /// Minimum and maximum values.
    pub min_max: Option<(f64, f64)>,
    /// Mean value.
    pub mean: Option<f64>,
    /// Sample standard deviation.
    pub std: Option<f64>,
    /// Count of valid (finite) values.
    pub valid_count: usize,
}

impl FieldStats {
    /// Compute statistics, skipping NaN and infinite values.
    pub fn compute(values: &ArrayD<f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }

        let mean = sum / count as f64;
        let std = if count > 1 {
            let ssd: f64 = values
                .iter()
                .filter(|v| v.is_finite())
                .map(|&v| (v - mean) * (v - mean))
                .sum();
            Some((ssd / (count - 1) as f64).sqrt())
        } else {
            None
        };

        Self {
            min_max: Some((min, max)),
            mean: Some(mean),
            std,
            valid_count: count,
        }
    }
}

/// Coordinates of an axis kept in an extraction result.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisValues {
    /// Axis tag.
    pub name: String,
    /// Unit, or normalization key when normalized.
    pub unit: String,
    /// Coordinates.
    pub values: Array1<f64>,
}

/// An axis sliced away, with the coordinate it was sliced at.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceInfo {
    /// Axis tag.
    pub name: String,
    /// Bound index.
    pub index: usize,
    /// Coordinate at `index`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: String,
}

/// Result of [`Field::get_along`].
#[derive(Debug, Clone)]
pub struct AlongResult {
    /// Remaining axes, in dimension order.
    pub axes: Vec<AxisValues>,
    /// Axes sliced away.
    pub slices: Vec<SliceInfo>,
    /// Axes reduced away.
    pub reductions: Vec<(String, Reduction)>,
    /// Unit of `values`.
    pub unit: String,
    /// Extracted values, one dimension per entry of `axes`.
    pub values: ArrayD<f64>,
}

impl AlongResult {
    /// Summary statistics of the extracted values.
    pub fn stats(&self) -> FieldStats {
        FieldStats::compute(&self.values)
    }

    /// Look up a remaining axis.
    pub fn axis(&self, name: &str) -> Option<&AxisValues> {
        self.axes.iter().find(|axis| axis.name == name)
    }
}

impl Field {
    /// Create a field; the array shape must match the axis lengths.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        axes: Vec<Axis>,
        values: ArrayD<f64>,
    ) -> Result<Self> {
        let expected: Vec<usize> = axes.iter().map(Axis::len).collect();
        if values.shape() != expected.as_slice() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        Ok(Self {
            name: name.into(),
            unit: unit.into(),
            axes,
            values,
        })
    }

    /// Create a field from values in row-major order.
    pub fn from_vec(
        name: impl Into<String>,
        unit: impl Into<String>,
        axes: Vec<Axis>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let shape: Vec<usize> = axes.iter().map(Axis::len).collect();
        let values = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
        Self::new(name, unit, axes, values)
    }

    /// Create a field of separable cosines, one harmonic per dimension.
    ///
    /// Dimension `d` contributes `cos(2π (d + 1) (x - x0) / span)`, which
    /// gives every dimension a known dominant bin after a Fourier transform.
    pub fn synthetic(name: impl Into<String>, unit: impl Into<String>, axes: Vec<Axis>) -> Self {
        let shape: Vec<usize> = axes.iter().map(Axis::len).collect();
        let spans: Vec<(f64, f64)> = axes
            .iter()
            .map(|axis| {
                let start = axis.values.first().copied().unwrap_or(0.0);
                let n = axis.len();
                let span = if n > 1 {
                    (axis.values[n - 1] - start) * n as f64 / (n - 1) as f64
                } else {
                    1.0
                };
                (start, span)
            })
            .collect();

        let values = ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
            axes.iter()
                .zip(&spans)
                .enumerate()
                .map(|(d, (axis, &(start, span)))| {
                    let x = axis.values[idx[d]];
                    let harmonic = (d + 1) as f64;
                    if span == 0.0 {
                        1.0
                    } else {
                        (2.0 * PI * harmonic * (x - start) / span).cos()
                    }
                })
                .product::<f64>()
        });

        Self {
            name: name.into(),
            unit: unit.into(),
            axes,
            values,
        }
    }

    /// Get the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// Shape of the values.
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Look up an axis by tag.
    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    /// Get value at given multi-dimensional indices.
    pub fn get_value(&self, indices: &[usize]) -> Option<f64> {
        self.values.get(IxDyn(indices)).copied()
    }

    /// Extract values according to request strings.
    ///
    /// Plot requests (`time{s}`, `angle->tooth_id`) keep their dimension,
    /// `axis[i]` slices it away, `axis[i,j]` keeps the listed indices and
    /// `axis=rms` (or `rss`, `sum`, `mean`) reduces it. Requesting the dual of
    /// a base-domain axis takes the amplitude spectrum along it first. Axes
    /// left out are kept whole.
    pub fn get_along(&self, requests: &[&str], labels: &LabelConfig) -> Result<AlongResult> {
        let parsed = requests
            .iter()
            .map(|request| RequestedAxis::parse(request))
            .collect::<Result<Vec<_>>>()?;
        self.get_along_requested(&parsed, labels)
    }

    /// Extract values according to parsed requests.
    pub fn get_along_requested(
        &self,
        requests: &[RequestedAxis],
        labels: &LabelConfig,
    ) -> Result<AlongResult> {
        let mut data = self.values.clone();
        let mut axes = self.axes.clone();
        let mut plan: Vec<(usize, &RequestedAxis)> = Vec::with_capacity(requests.len());

        for request in requests {
            let dim = self.resolve_dimension(request, labels, &mut axes, &mut data)?;
            if plan.iter().any(|&(d, _)| d == dim) {
                return Err(FieldAxesError::invalid_request(
                    request.to_string(),
                    "axis requested twice",
                ));
            }
            plan.push((dim, request));
        }

        // Collapse from the last dimension so earlier dimension indices stay valid
        plan.sort_by(|a, b| b.0.cmp(&a.0));

        let mut kept: Vec<Option<AxisValues>> = axes
            .iter()
            .map(|axis| {
                Some(AxisValues {
                    name: axis.name.clone(),
                    unit: axis.unit.clone(),
                    values: axis.values.clone(),
                })
            })
            .collect();
        let mut slices = Vec::new();
        let mut reductions = Vec::new();

        for (dim, request) in plan {
            let axis = &axes[dim];
            let (unit, coordinates) = Self::coordinates(axis, request)?;
            match request.extension {
                Extension::Whole => {
                    kept[dim] = Some(AxisValues {
                        name: axis.name.clone(),
                        unit,
                        values: coordinates,
                    });
                },
                Extension::Single => {
                    let &first = request.indices.first().ok_or_else(|| {
                        FieldAxesError::invalid_request(request.to_string(), "missing index")
                    })?;
                    let index = axis.wrap_index(first)?;
                    data = data.index_axis(NdAxis(dim), index).to_owned();
                    slices.push(SliceInfo {
                        name: axis.name.clone(),
                        index,
                        value: coordinates[index],
                        unit,
                    });
                    kept[dim] = None;
                },
                Extension::List => {
                    let indices = request
                        .indices
                        .iter()
                        .map(|&i| axis.wrap_index(i))
                        .collect::<Result<Vec<_>>>()?;
                    data = data.select(NdAxis(dim), &indices);
                    kept[dim] = Some(AxisValues {
                        name: axis.name.clone(),
                        unit,
                        values: coordinates.select(NdAxis(0), &indices),
                    });
                },
                Extension::Reduce(reduction) => {
                    data = Self::reduce(&data, dim, reduction)
                        .ok_or_else(|| {
                            FieldAxesError::invalid_request(request.to_string(), "empty axis")
                        })?;
                    reductions.push((axis.name.clone(), reduction));
                    kept[dim] = None;
                },
            }
            tracing::debug!("{}: applied {} on dimension {}", self.name, request, dim);
        }

        slices.reverse();
        reductions.reverse();
        Ok(AlongResult {
            axes: kept.into_iter().flatten().collect(),
            slices,
            reductions,
            unit: self.unit.clone(),
            values: data,
        })
    }

    /// Find the dimension a request refers to, transforming it if needed.
    fn resolve_dimension(
        &self,
        request: &RequestedAxis,
        labels: &LabelConfig,
        axes: &mut [Axis],
        data: &mut ArrayD<f64>,
    ) -> Result<usize> {
        if let Some(dim) = axes.iter().position(|axis| axis.name == request.name) {
            return Ok(dim);
        }

        let Some(pair) = labels.transform_for(&request.name) else {
            return Err(FieldAxesError::unknown_axis(&request.name));
        };
        if pair.base == request.name {
            return if axes.iter().any(|axis| axis.name == pair.dual) {
                Err(FieldAxesError::transform_unavailable(
                    &request.name,
                    format!("field holds the amplitude spectrum over {}", pair.dual),
                ))
            } else {
                Err(FieldAxesError::unknown_axis(&request.name))
            };
        }

        let dim = axes
            .iter()
            .position(|axis| axis.name == pair.base)
            .ok_or_else(|| FieldAxesError::unknown_axis(&request.name))?;
        let dual = transform::dual_axis(&axes[dim], pair)?;
        *data = transform::amplitude_spectrum(data, dim);
        tracing::debug!("{}: {} -> {} ({} bins)", self.name, pair.base, pair.dual, dual.len());
        axes[dim] = dual;
        Ok(dim)
    }

    /// Coordinates of an axis in the requested unit or normalization.
    fn coordinates(axis: &Axis, request: &RequestedAxis) -> Result<(String, Array1<f64>)> {
        if let Some(ref norm) = request.normalization {
            return Ok((norm.clone(), axis.normalized_values(norm)?));
        }
        match request.unit {
            Some(ref unit) => Ok((unit.clone(), units::convert(&axis.values, &axis.unit, unit)?)),
            None => Ok((axis.unit.clone(), axis.values.clone())),
        }
    }

    fn reduce(data: &ArrayD<f64>, dim: usize, reduction: Reduction) -> Option<ArrayD<f64>> {
        let axis = NdAxis(dim);
        if data.len_of(axis) == 0 {
            return None;
        }
        match reduction {
            Reduction::Sum => Some(data.sum_axis(axis)),
            Reduction::Mean => data.mean_axis(axis),
            Reduction::Rss => Some(data.mapv(|v| v * v).sum_axis(axis).mapv(f64::sqrt)),
            Reduction::Rms => data
                .mapv(|v| v * v)
                .mean_axis(axis)
                .map(|mean| mean.mapv(f64::sqrt)),
        }
    }
}
