//! Utility functions.
//!
//! This module provides label configuration, value formatting
//! and clipboard helpers.

mod clipboard;
pub mod formatters;
mod label_config;

pub use clipboard::{copy_requests, REQUEST_SEPARATOR};
pub use label_config::{LabelConfig, TransformPair};
