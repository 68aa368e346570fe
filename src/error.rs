//! Error types for fieldaxes.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for fieldaxes operations.
pub type Result<T> = std::result::Result<T, FieldAxesError>;

/// Errors that can occur while resolving axis and extraction requests.
#[derive(Debug, Error)]
pub enum FieldAxesError {
    /// Axis choice is not part of the catalog's selectable set.
    #[error("Axis not selectable: {tag}")]
    InvalidAxis {
        /// Requested tag or label.
        tag: String,
    },

    /// No Fourier dual is registered for the axis.
    #[error("No dual registered for axis: {tag}")]
    NoDual {
        /// Axis tag without a dual.
        tag: String,
    },

    /// Extraction operation outside the recognized set.
    #[error("Unrecognized extraction operation: {operation}")]
    UnrecognizedOperation {
        /// Operation type as given.
        operation: String,
    },

    /// Index outside `[-len, len - 1]`.
    #[error("Index {index} out of range for axis {axis} (length {len})")]
    IndexOutOfRange {
        /// Axis name.
        axis: String,
        /// Index as given, before wraparound.
        index: isize,
        /// Axis length.
        len: usize,
    },

    /// Axis name unknown to the field or catalog.
    #[error("Unknown axis: {name}")]
    UnknownAxis {
        /// Axis name.
        name: String,
    },

    /// Normalization key not declared on the axis.
    #[error("Unknown normalization {norm} on axis {axis}")]
    UnknownNormalization {
        /// Axis name.
        axis: String,
        /// Normalization key.
        norm: String,
    },

    /// Request string does not follow the request grammar.
    #[error("Invalid request '{request}': {reason}")]
    InvalidRequest {
        /// The offending request string.
        request: String,
        /// What went wrong.
        reason: String,
    },

    /// No conversion between two units.
    #[error("Cannot convert unit '{from}' to '{to}'")]
    UnitMismatch {
        /// Source unit.
        from: String,
        /// Target unit.
        to: String,
    },

    /// Domain transform cannot be applied to the axis.
    #[error("Transform unavailable for axis {axis}: {reason}")]
    TransformUnavailable {
        /// Axis name.
        axis: String,
        /// Why the transform was refused.
        reason: String,
    },

    /// NaN or infinite input where a coordinate was expected.
    #[error("Non-finite value: {0}")]
    NonFiniteValue(f64),

    /// Array shape error.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl FieldAxesError {
    /// Create an InvalidAxis error.
    pub fn invalid_axis(tag: impl Into<String>) -> Self {
        Self::InvalidAxis { tag: tag.into() }
    }

    /// Create a NoDual error.
    pub fn no_dual(tag: impl Into<String>) -> Self {
        Self::NoDual { tag: tag.into() }
    }

    /// Create an UnknownAxis error.
    pub fn unknown_axis(name: impl Into<String>) -> Self {
        Self::UnknownAxis { name: name.into() }
    }

    /// Create an InvalidRequest error.
    pub fn invalid_request(request: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            request: request.into(),
            reason: reason.into(),
        }
    }

    /// Create a UnitMismatch error.
    pub fn unit_mismatch(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnitMismatch {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a TransformUnavailable error.
    pub fn transform_unavailable(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TransformUnavailable {
            axis: axis.into(),
            reason: reason.into(),
        }
    }
}
