//! Axis selection and extraction requests.
//!
//! This module turns a user's symbolic choices (axis, Fourier action, unit or
//! normalization, slice or reduction) into request strings a [`Field`]
//! understands.
//!
//! [`Field`]: crate::data::Field

mod axis_request;
mod catalog;
mod extraction;
mod grammar;

pub use axis_request::{
    Action, AxisSelectionRequest, ResolvedAxis, SelectionState, UnitChoice, UnitOption,
};
pub use catalog::{AxisCatalog, AxisChoice, NONE_LABEL};
pub use extraction::{ExtractionRequest, Operation};
pub use grammar::{Extension, Reduction, RequestedAxis};
