//! Catalog of the axes a field offers for plotting.

use crate::data::{Axis, Field};
use crate::error::{FieldAxesError, Result};
use crate::util::LabelConfig;
use std::fmt;

/// Label of the "no axis selected" entry.
pub const NONE_LABEL: &str = "None";

/// One entry of a slot's axis menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisChoice {
    /// No axis selected for this slot.
    NoneSelected,
    /// A base-domain axis tag.
    Axis(String),
}

impl AxisChoice {
    /// The axis tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            AxisChoice::NoneSelected => None,
            AxisChoice::Axis(tag) => Some(tag),
        }
    }
}

impl fmt::Display for AxisChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or(NONE_LABEL))
    }
}

/// Axes of one field snapshot together with their label tables.
#[derive(Debug, Clone)]
pub struct AxisCatalog {
    axes: Vec<Axis>,
    labels: LabelConfig,
}

impl AxisCatalog {
    /// Create a catalog from an axis list.
    pub fn new(axes: Vec<Axis>, labels: LabelConfig) -> Self {
        tracing::debug!("Catalog built from {} axes", axes.len());
        Self { axes, labels }
    }

    /// Create a catalog from the axes of a field.
    pub fn from_field(field: &Field, labels: LabelConfig) -> Self {
        Self::new(field.axes.clone(), labels)
    }

    /// All axes, including overlay and pattern axes.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Injected label tables.
    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    /// Menu entries for a plot slot.
    ///
    /// Overlay axes and single-valued pattern axes are left out, dual-domain
    /// tags are listed under their base tag, and every slot but the primary
    /// one starts with [`AxisChoice::NoneSelected`].
    pub fn build(&self, slot: &str) -> Vec<AxisChoice> {
        let mut choices: Vec<AxisChoice> = self
            .axes
            .iter()
            .filter(|axis| !axis.is_overlay && !axis.is_singleton_pattern())
            .map(|axis| AxisChoice::Axis(self.to_base(&axis.name).to_string()))
            .collect();

        if !slot.eq_ignore_ascii_case(&self.labels.primary_slot) {
            choices.insert(0, AxisChoice::NoneSelected);
        }
        choices
    }

    /// The Fourier counterpart of a tag, in either direction.
    pub fn dual_of(&self, tag: &str) -> Result<&str> {
        match self.labels.transform_for(tag) {
            Some(pair) if pair.base == tag => Ok(pair.dual.as_str()),
            Some(pair) => Ok(pair.base.as_str()),
            None => Err(FieldAxesError::no_dual(tag)),
        }
    }

    /// Check if a tag is a dual-domain tag (`freqs`, `wavenumber`).
    pub fn is_dual(&self, tag: &str) -> bool {
        self.labels.transforms.iter().any(|pair| pair.dual == tag)
    }

    /// Check if a tag is a base-domain tag with a registered dual.
    pub fn has_dual(&self, tag: &str) -> bool {
        self.labels.transforms.iter().any(|pair| pair.base == tag)
    }

    /// Map a dual-domain tag to its base; other tags pass through.
    pub fn to_base<'s>(&'s self, tag: &'s str) -> &'s str {
        self.labels
            .transforms
            .iter()
            .find(|pair| pair.dual == tag)
            .map(|pair| pair.base.as_str())
            .unwrap_or(tag)
    }

    /// Human-readable label of a tag, or the tag itself.
    pub fn display_name<'s>(&'s self, tag: &'s str) -> &'s str {
        self.labels
            .axis_labels
            .get(tag)
            .map(String::as_str)
            .unwrap_or(tag)
    }

    /// Tag registered under a human-readable label.
    pub fn tag_for_label(&self, label: &str) -> Option<&str> {
        self.labels
            .axis_labels
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(tag, _)| tag.as_str())
    }

    /// Human-readable label of a normalization key, or the key itself.
    pub fn norm_label<'s>(&'s self, key: &'s str) -> &'s str {
        self.labels
            .norm_labels
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Axis bound to a tag, by name or through the dual mapping.
    ///
    /// The first axis with a matching name wins.
    pub fn axis_for(&self, tag: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.name == tag).or_else(|| {
            let dual = self.dual_of(tag).ok()?;
            self.axes.iter().find(|axis| axis.name == dual)
        })
    }

    /// Normalization keys valid for a tag, in the axis's declaration order.
    pub fn normalizations_for(&self, tag: &str) -> Vec<&str> {
        let (Some(axis), Some(allowed)) = (self.axis_for(tag), self.labels.axis_norms.get(tag))
        else {
            return Vec::new();
        };
        axis.normalization_keys()
            .filter(|key| allowed.iter().any(|a| a == *key))
            .collect()
    }

    /// Display unit of a tag.
    pub fn unit_for(&self, tag: &str) -> Option<&str> {
        if let Some(unit) = self.labels.units.get(tag) {
            return Some(unit.as_str());
        }
        if let Some(pair) = self.labels.transforms.iter().find(|pair| pair.dual == tag) {
            return Some(pair.dual_unit.as_str());
        }
        self.axes
            .iter()
            .find(|axis| axis.name == tag)
            .map(|axis| axis.unit.as_str())
    }

    /// Unit slice coordinates of an axis are shown in.
    pub fn slice_unit<'s>(&'s self, axis: &'s Axis) -> &'s str {
        self.labels
            .slice_units
            .get(&axis.name)
            .map(String::as_str)
            .unwrap_or(axis.unit.as_str())
    }
}
