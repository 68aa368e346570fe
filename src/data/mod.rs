//! Field data: axes, units, Fourier duals and the value accessor.
//!
//! This module holds the numeric side of the crate: axis coordinates and
//! normalizations, an in-memory field over `ndarray`, and the accessor that
//! consumes request strings.

mod axis;
mod field;
pub mod transform;
pub mod units;

pub use axis::{Axis, AxisKind, Normalization};
pub(crate) use axis::resolve_index;
pub use field::{AlongResult, AxisValues, Field, FieldStats, SliceInfo};
