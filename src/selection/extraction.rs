//! Extraction of a non-plotted axis: slice, Fourier slice, reduction or overlay.

use super::catalog::AxisCatalog;
use super::grammar::{Extension, Reduction, RequestedAxis};
use crate::data::{resolve_index, transform, units, Axis};
use crate::error::{FieldAxesError, Result};
use ndarray::Array1;
use std::fmt;
use std::str::FromStr;

/// How a non-plotted axis is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Keep one index.
    Slice,
    /// Keep one index of the Fourier dual.
    SliceFourier,
    /// Reduce the axis to one value.
    Reduce(Reduction),
    /// Keep several indices as overlaid curves.
    OverlayFilter,
}

impl Operation {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Slice => "slice",
            Operation::SliceFourier => "slice (fft)",
            Operation::Reduce(reduction) => reduction.tag(),
            Operation::OverlayFilter => "overlay/filter",
        }
    }

    /// Check if the operation binds a single index.
    pub fn is_slice(self) -> bool {
        matches!(self, Operation::Slice | Operation::SliceFourier)
    }
}

impl FromStr for Operation {
    type Err = FieldAxesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "slice" => Ok(Operation::Slice),
            "slice (fft)" => Ok(Operation::SliceFourier),
            "overlay/filter" => Ok(Operation::OverlayFilter),
            other => other.parse().map(Operation::Reduce),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How one non-plotted axis is collapsed.
#[derive(Debug, Clone)]
pub struct ExtractionRequest<'a> {
    catalog: &'a AxisCatalog,
    axis: &'a Axis,
    operation: Operation,
    index: usize,
    indices: Vec<usize>,
    unit: String,
    /// Unit of the bound coordinates before display conversion.
    raw_unit: String,
    /// Coordinates `index` refers to, expressed in `unit`.
    coordinates: Array1<f64>,
}

impl<'a> ExtractionRequest<'a> {
    /// Create a slice at index 0 of `axis`.
    pub fn new(catalog: &'a AxisCatalog, axis: &'a Axis) -> Self {
        let (unit, coordinates) = Self::base_coordinates(catalog, axis);
        Self {
            catalog,
            axis,
            operation: Operation::Slice,
            index: 0,
            indices: Vec::new(),
            unit,
            raw_unit: axis.unit.clone(),
            coordinates,
        }
    }

    /// Create from a declarative spec.
    ///
    /// `operation_type` is one of `single`, `list`, `rms`, `rss`, `sum`,
    /// `mean`. Negative indices count from the end.
    pub fn from_spec(
        catalog: &'a AxisCatalog,
        axis: &'a Axis,
        operation_type: &str,
        indices: &[isize],
    ) -> Result<Self> {
        let mut request = Self::new(catalog, axis);
        match operation_type {
            "single" => {
                let &first = indices.first().ok_or_else(|| {
                    FieldAxesError::invalid_request(operation_type, "single needs an index")
                })?;
                request.set_slice_index(first)?;
            },
            "list" => {
                request.operation = Operation::OverlayFilter;
                request.indices = indices
                    .iter()
                    .map(|&i| axis.wrap_index(i))
                    .collect::<Result<Vec<_>>>()?;
            },
            other => request.operation = Operation::Reduce(other.parse()?),
        }
        tracing::debug!(
            "Extraction on {} from spec: {} {:?}",
            axis.name,
            request.operation,
            indices
        );
        Ok(request)
    }

    /// Create from a parsed request string.
    pub fn from_requested(catalog: &'a AxisCatalog, requested: &RequestedAxis) -> Result<Self> {
        let transformed = catalog.is_dual(&requested.name)
            && !catalog.axes().iter().any(|axis| axis.name == requested.name);
        let axis = catalog
            .axis_for(&requested.name)
            .ok_or_else(|| FieldAxesError::unknown_axis(&requested.name))?;

        let mut request = match requested.extension {
            Extension::Whole => {
                return Err(FieldAxesError::invalid_request(
                    requested.to_string(),
                    "whole axis is not an extraction",
                ));
            },
            Extension::Single if transformed => {
                let &first = requested.indices.first().ok_or_else(|| {
                    FieldAxesError::invalid_request(requested.to_string(), "missing index")
                })?;
                let mut request = Self::new(catalog, axis);
                request.set_operation(Operation::SliceFourier)?;
                request.set_slice_index(first)?;
                request
            },
            Extension::Single => Self::from_spec(catalog, axis, "single", &requested.indices)?,
            Extension::List | Extension::Reduce(_) if transformed => {
                return Err(FieldAxesError::transform_unavailable(
                    &requested.name,
                    "only single-bin slices of a spectrum can be extracted",
                ));
            },
            Extension::List => Self::from_spec(catalog, axis, "list", &requested.indices)?,
            Extension::Reduce(reduction) => Self::from_spec(catalog, axis, reduction.tag(), &[])?,
        };

        if let Some(ref unit) = requested.unit {
            if *unit != request.unit {
                request.set_unit(unit)?;
            }
        }
        Ok(request)
    }

    fn base_coordinates(catalog: &AxisCatalog, axis: &Axis) -> (String, Array1<f64>) {
        let unit = catalog.slice_unit(axis);
        match units::convert(&axis.values, &axis.unit, unit) {
            Ok(values) => (unit.to_string(), values),
            Err(e) => {
                tracing::debug!("Slice coordinates of {} kept in {}: {}", axis.name, axis.unit, e);
                (axis.unit.clone(), axis.values.clone())
            },
        }
    }

    /// Bound axis.
    pub fn axis(&self) -> &'a Axis {
        self.axis
    }

    /// Current operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Bound slice index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Overlay/filter indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Unit of the coordinates and of the formatted request.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Coordinates the slice index refers to.
    pub fn coordinates(&self) -> &Array1<f64> {
        &self.coordinates
    }

    /// Coordinate at the bound index.
    pub fn slice_value(&self) -> Option<f64> {
        self.coordinates.get(self.index).copied()
    }

    /// Operations offered for the bound axis.
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations = vec![Operation::Slice];
        if self.catalog.has_dual(&self.axis.name) {
            operations.push(Operation::SliceFourier);
        }
        operations.extend(Reduction::ALL.into_iter().map(Operation::Reduce));
        operations.push(Operation::OverlayFilter);
        operations
    }

    /// Change the operation.
    ///
    /// Moving between `Slice` and `SliceFourier` swaps the coordinate set and
    /// resets the index to 0.
    pub fn set_operation(&mut self, operation: Operation) -> Result<()> {
        let was_fourier = self.operation == Operation::SliceFourier;
        match operation {
            Operation::SliceFourier if !was_fourier => {
                let pair = self
                    .catalog
                    .labels()
                    .transforms
                    .iter()
                    .find(|pair| pair.base == self.axis.name)
                    .ok_or_else(|| FieldAxesError::no_dual(&self.axis.name))?;
                self.coordinates = transform::dual_values(self.axis, pair)?;
                self.unit = pair.dual_unit.clone();
                self.raw_unit = pair.dual_unit.clone();
                self.index = 0;
            },
            Operation::SliceFourier => {},
            _ if was_fourier => {
                let (unit, coordinates) = Self::base_coordinates(self.catalog, self.axis);
                self.unit = unit;
                self.raw_unit = self.axis.unit.clone();
                self.coordinates = coordinates;
                self.index = 0;
            },
            _ => {},
        }
        tracing::debug!("Extraction on {}: {} -> {}", self.axis.name, self.operation, operation);
        self.operation = operation;
        Ok(())
    }

    /// Express the coordinates in another unit.
    pub fn set_unit(&mut self, unit: &str) -> Result<()> {
        self.coordinates = units::convert(&self.coordinates, &self.unit, unit)?;
        self.unit = unit.to_string();
        Ok(())
    }

    /// Bind a slice index; negative indices count from the end.
    pub fn set_slice_index(&mut self, index: isize) -> Result<usize> {
        let bound = resolve_index(&self.axis.name, index, self.coordinates.len())?;
        if !self.operation.is_slice() {
            self.operation = Operation::Slice;
        }
        self.index = bound;
        Ok(bound)
    }

    /// Bind the index whose coordinate is nearest to `value`.
    ///
    /// `value` is in the bound axis's own unit (the dual unit for a Fourier
    /// slice), whatever unit the coordinates are displayed in. Ties go to the
    /// lowest index.
    pub fn set_slice_value(&mut self, value: f64) -> Result<usize> {
        if !value.is_finite() {
            return Err(FieldAxesError::NonFiniteValue(value));
        }
        let factor = units::conversion_factor(&self.raw_unit, &self.unit)?;
        self.bind_nearest(value * factor)
    }

    /// Bind the index whose displayed coordinate is nearest to `value`.
    ///
    /// `value` is in [`unit`](Self::unit), e.g. degrees for an angle slice.
    pub fn set_slice_display_value(&mut self, value: f64) -> Result<usize> {
        if !value.is_finite() {
            return Err(FieldAxesError::NonFiniteValue(value));
        }
        self.bind_nearest(value)
    }

    fn bind_nearest(&mut self, target: f64) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &coordinate) in self.coordinates.iter().enumerate() {
            if !coordinate.is_finite() {
                continue;
            }
            let distance = (coordinate - target).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        let (index, _) = best.ok_or_else(|| {
            FieldAxesError::invalid_request(&self.axis.name, "no finite coordinates")
        })?;

        if !self.operation.is_slice() {
            self.operation = Operation::Slice;
        }
        self.index = index;
        tracing::debug!("Extraction on {}: {} {} -> index {}", self.axis.name, target, self.unit, index);
        Ok(index)
    }

    /// Parsed form of the request; `None` for overlay/filter.
    pub fn requested(&self) -> Option<RequestedAxis> {
        let (name, extension, indices) = match self.operation {
            Operation::Slice => (self.axis.name.clone(), Extension::Single, vec![self.index as isize]),
            Operation::SliceFourier => (
                self.catalog.dual_of(&self.axis.name).ok()?.to_string(),
                Extension::Single,
                vec![self.index as isize],
            ),
            Operation::Reduce(reduction) => {
                (self.axis.name.clone(), Extension::Reduce(reduction), Vec::new())
            },
            Operation::OverlayFilter => return None,
        };
        Some(RequestedAxis {
            name,
            extension,
            indices,
            unit: Some(self.unit.clone()),
            normalization: None,
        })
    }

    /// Request string: `angle[3]{°}`, `freqs[2]{Hz}`, `time=rms{s}`.
    ///
    /// Overlay/filter has no inline form.
    pub fn format(&self) -> Option<String> {
        self.requested().map(|requested| requested.to_string())
    }
}
