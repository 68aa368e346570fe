//! Axis types: coordinates, units and normalizations of one field dimension.

use crate::error::{FieldAxesError, Result};
use ndarray::Array1;

/// Alternate scaling applied to an axis's raw coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization {
    /// Coordinates divided by a reference value.
    Ratio(f64),
    /// Raw index `0..len` in place of the coordinates.
    Indices,
    /// Explicit replacement coordinates, one per index.
    Vector(Vec<f64>),
}

impl Normalization {
    /// Apply the normalization to a coordinate sequence.
    pub fn apply(&self, values: &Array1<f64>) -> Option<Array1<f64>> {
        match self {
            Normalization::Ratio(r) if *r != 0.0 => Some(values.mapv(|v| v / r)),
            Normalization::Ratio(_) => None,
            Normalization::Indices => Some(Array1::from_iter((0..values.len()).map(|i| i as f64))),
            Normalization::Vector(v) if v.len() == values.len() => Some(Array1::from(v.clone())),
            Normalization::Vector(_) => None,
        }
    }
}

/// Structural kind of an axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AxisKind {
    /// Plain coordinate axis.
    #[default]
    Linear,
    /// Repeating structural pattern (e.g. slot or tooth index).
    Pattern {
        /// Indices of the distinct values the pattern is built from.
        unique_indices: Vec<usize>,
    },
}

/// One coordinate dimension of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Domain tag (`time`, `angle`, `freqs`, `wavenumber`, ...).
    pub name: String,
    /// Base physical unit of `values`.
    pub unit: String,
    /// Available normalizations, in declaration order.
    pub normalizations: Vec<(String, Normalization)>,
    /// Overlay axes are reserved for multi-curve overlays.
    pub is_overlay: bool,
    /// Coordinates.
    pub values: Array1<f64>,
    /// Structural kind.
    pub kind: AxisKind,
}

impl Axis {
    /// Create an axis from explicit coordinates.
    pub fn new(name: impl Into<String>, unit: impl Into<String>, values: Array1<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            normalizations: Vec::new(),
            is_overlay: false,
            values,
            kind: AxisKind::Linear,
        }
    }

    /// Create an axis of `count` evenly spaced coordinates, endpoints included.
    pub fn linspace(
        name: impl Into<String>,
        unit: impl Into<String>,
        start: f64,
        stop: f64,
        count: usize,
    ) -> Self {
        Self::new(name, unit, Array1::linspace(start, stop, count))
    }

    /// Create an axis of `count` coordinates covering one period, endpoint excluded.
    pub fn periodic(
        name: impl Into<String>,
        unit: impl Into<String>,
        start: f64,
        period: f64,
        count: usize,
    ) -> Self {
        let step = if count == 0 { 0.0 } else { period / count as f64 };
        let values = Array1::from_iter((0..count).map(|i| start + step * i as f64));
        Self::new(name, unit, values)
    }

    /// Add a normalization.
    pub fn with_normalization(mut self, key: impl Into<String>, norm: Normalization) -> Self {
        self.normalizations.push((key.into(), norm));
        self
    }

    /// Flag the axis as an overlay axis.
    pub fn overlay(mut self) -> Self {
        self.is_overlay = true;
        self
    }

    /// Turn the axis into a pattern axis.
    pub fn pattern(mut self, unique_indices: Vec<usize>) -> Self {
        self.kind = AxisKind::Pattern { unique_indices };
        self
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pattern axis collapsing to a single distinct value.
    pub fn is_singleton_pattern(&self) -> bool {
        match &self.kind {
            AxisKind::Pattern { unique_indices } => {
                let mut distinct = unique_indices.clone();
                distinct.sort_unstable();
                distinct.dedup();
                distinct.len() == 1
            },
            AxisKind::Linear => false,
        }
    }

    /// Normalization keys in declaration order.
    pub fn normalization_keys(&self) -> impl Iterator<Item = &str> {
        self.normalizations.iter().map(|(key, _)| key.as_str())
    }

    /// Look up a normalization by key.
    pub fn normalization(&self, key: &str) -> Option<&Normalization> {
        self.normalizations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, norm)| norm)
    }

    /// Coordinates after applying the normalization `key`.
    pub fn normalized_values(&self, key: &str) -> Result<Array1<f64>> {
        let unknown = || FieldAxesError::UnknownNormalization {
            axis: self.name.clone(),
            norm: key.to_string(),
        };
        self.normalization(key)
            .ok_or_else(unknown)?
            .apply(&self.values)
            .ok_or_else(unknown)
    }

    /// Resolve a possibly negative index against the axis length.
    pub fn wrap_index(&self, index: isize) -> Result<usize> {
        resolve_index(&self.name, index, self.len())
    }
}

/// Resolve a possibly negative index against a sequence of length `len`.
pub(crate) fn resolve_index(axis: &str, index: isize, len: usize) -> Result<usize> {
    let wrapped = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if wrapped < 0 || wrapped >= len as isize {
        return Err(FieldAxesError::IndexOutOfRange {
            axis: axis.to_string(),
            index,
            len,
        });
    }
    Ok(wrapped as usize)
}
