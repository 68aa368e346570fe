//! Fieldaxes - axis selection and extraction requests over physical fields.
//!
//! Fieldaxes resolves a user's symbolic request (an axis, an optional Fourier
//! transform to its frequency or wavenumber dual, a unit or normalization, and
//! how every other axis is collapsed) into request strings, and evaluates
//! those strings against an n-dimensional field.
//!
//! # Features
//!
//! - Axis catalog with overlay and pattern filtering
//! - time/freqs and angle/wavenumber dual mapping
//! - Slot selection state machine with unit and normalization menus
//! - Slice, Fourier slice, rms/rss/sum/mean and overlay extraction
//! - `ndarray`-backed accessor consuming the request grammar
//!
//! # Example
//!
//! ```ignore
//! use fieldaxes::data::{Axis, Field};
//! use fieldaxes::selection::{Action, AxisCatalog, AxisSelectionRequest, ExtractionRequest};
//! use fieldaxes::LabelConfig;
//!
//! let field = Field::synthetic("B", "T", vec![
//!     Axis::linspace("time", "s", 0.0, 0.1, 64),
//!     Axis::periodic("angle", "rad", 0.0, std::f64::consts::TAU, 32),
//! ]);
//! let catalog = AxisCatalog::from_field(&field, LabelConfig::default());
//!
//! let mut x = AxisSelectionRequest::new(&catalog, "X");
//! x.select_action(Action::Fft);
//! let cut = ExtractionRequest::from_spec(&catalog, &field.axes[1], "single", &[3])?;
//!
//! let requests = [x.to_request(), cut.format().unwrap_or_default()];
//! let refs: Vec<&str> = requests.iter().map(String::as_str).collect();
//! let result = field.get_along(&refs, catalog.labels())?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod selection;
pub mod util;

pub use error::{FieldAxesError, Result};
pub use util::LabelConfig;
