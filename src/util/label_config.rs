//! Label and transform tables injected into the axis catalog.

use std::collections::HashMap;
use std::f64::consts::PI;

/// A Fourier pair between a base-domain axis and its dual.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformPair {
    /// Base-domain tag (e.g. `time`).
    pub base: String,
    /// Dual-domain tag (e.g. `freqs`).
    pub dual: String,
    /// Unit the base coordinates are converted to before transforming.
    pub base_unit: String,
    /// Unit of the dual coordinates.
    pub dual_unit: String,
    /// Factor applied to `k / (n * step)` to get dual coordinates.
    pub scale: f64,
}

impl TransformPair {
    /// Create a transform pair.
    pub fn new(
        base: impl Into<String>,
        dual: impl Into<String>,
        base_unit: impl Into<String>,
        dual_unit: impl Into<String>,
        scale: f64,
    ) -> Self {
        Self {
            base: base.into(),
            dual: dual.into(),
            base_unit: base_unit.into(),
            dual_unit: dual_unit.into(),
            scale,
        }
    }
}

/// Display names, units and normalizations known to the catalog.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Human-readable axis labels, keyed by tag.
    pub axis_labels: HashMap<String, String>,
    /// Display unit per tag.
    pub units: HashMap<String, String>,
    /// Human-readable normalization labels, keyed by normalization key.
    pub norm_labels: HashMap<String, String>,
    /// Normalization keys allowed per tag.
    pub axis_norms: HashMap<String, Vec<String>>,
    /// Fourier pairs.
    pub transforms: Vec<TransformPair>,
    /// Substring marking an index normalization (exclusive unit choice).
    pub index_marker: String,
    /// Unit used for slice coordinates, per tag.
    pub slice_units: HashMap<String, String>,
    /// Slot that must always have an axis selected.
    pub primary_slot: String,
}

fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for LabelConfig {
    fn default() -> Self {
        let axis_norms = [
            ("time", vec!["angle_rotor"]),
            ("angle", vec!["angle_elec", "tooth_id"]),
            ("freqs", vec!["elec_order", "mech_order"]),
            ("wavenumber", vec!["space_order"]),
        ]
        .into_iter()
        .map(|(tag, norms)| {
            (
                tag.to_string(),
                norms.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        Self {
            axis_labels: table(&[
                ("time", "Time"),
                ("angle", "Angle"),
                ("freqs", "Frequency"),
                ("wavenumber", "Wavenumber"),
                ("z", "Axial direction"),
                ("phase", "Phase"),
            ]),
            units: table(&[("time", "s"), ("angle", "°"), ("z", "m")]),
            norm_labels: table(&[
                ("angle_rotor", "Rotor angle [°]"),
                ("angle_elec", "Electrical angle [rad]"),
                ("tooth_id", "Tooth index []"),
                ("elec_order", "Electrical order []"),
                ("mech_order", "Mechanical order []"),
                ("space_order", "Spatial order []"),
            ]),
            axis_norms,
            transforms: vec![
                TransformPair::new("time", "freqs", "s", "Hz", 1.0),
                TransformPair::new("angle", "wavenumber", "rad", "", 2.0 * PI),
            ],
            index_marker: "_id".to_string(),
            slice_units: table(&[("angle", "°")]),
            primary_slot: "X".to_string(),
        }
    }
}

impl LabelConfig {
    /// Find the transform pair a tag belongs to, on either side.
    pub fn transform_for(&self, tag: &str) -> Option<&TransformPair> {
        self.transforms
            .iter()
            .find(|pair| pair.base == tag || pair.dual == tag)
    }

    /// Check whether a normalization key is an index normalization.
    pub fn is_index_norm(&self, key: &str) -> bool {
        !self.index_marker.is_empty() && key.contains(&self.index_marker)
    }
}
