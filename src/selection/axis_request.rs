//! Plot-axis selection for one slot (X, Y, Z, ...).

use super::catalog::{AxisCatalog, AxisChoice, NONE_LABEL};
use super::grammar::RequestedAxis;
use crate::data::Axis;
use crate::error::{FieldAxesError, Result};
use std::fmt;
use std::str::FromStr;

/// Transform applied to the selected axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Plot the axis as is.
    #[default]
    None,
    /// Plot the Fourier dual of the axis.
    Fft,
    /// Plot a filtered subset of the axis.
    Filter,
}

impl Action {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Action::None => "None",
            Action::Fft => "FFT",
            Action::Filter => "Filter",
        }
    }
}

impl FromStr for Action {
    type Err = FieldAxesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Action::None),
            "fft" => Ok(Action::Fft),
            "filter" => Ok(Action::Filter),
            _ => Err(FieldAxesError::UnrecognizedOperation {
                operation: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No axis selected.
    AxisNone,
    /// A base-domain axis is selected.
    AxisBase,
    /// The dual of the selected axis is active.
    AxisTransformed,
}

/// Raw unit or normalization of the selected axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitChoice {
    /// Physical unit.
    Unit(String),
    /// Normalization key.
    Normalization(String),
}

/// One entry of the unit menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOption {
    /// Text shown to the user.
    pub label: String,
    /// What choosing the entry selects.
    pub choice: UnitChoice,
}

/// Outcome of a selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAxis {
    /// Tag with any Fourier transform applied.
    pub tag: String,
    /// Unit or normalization, if the tag has one.
    pub unit: Option<UnitChoice>,
}

/// The axis, action and unit chosen for one plot slot.
#[derive(Debug, Clone)]
pub struct AxisSelectionRequest<'a> {
    catalog: &'a AxisCatalog,
    slot: String,
    options: Vec<AxisChoice>,
    selected: AxisChoice,
    action: Action,
    actions: Vec<Action>,
    unit_options: Vec<UnitOption>,
    unit: Option<UnitChoice>,
}

impl<'a> AxisSelectionRequest<'a> {
    /// Create the request for a slot, with its first menu entry selected.
    pub fn new(catalog: &'a AxisCatalog, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let options = catalog.build(&slot);
        let selected = options.first().cloned().unwrap_or(AxisChoice::NoneSelected);
        let mut request = Self {
            catalog,
            slot,
            options,
            selected,
            action: Action::None,
            actions: Vec::new(),
            unit_options: Vec::new(),
            unit: None,
        };
        request.refresh_axis();
        request
    }

    /// Slot name.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Axis menu entries.
    pub fn options(&self) -> &[AxisChoice] {
        &self.options
    }

    /// Currently active tag, with any transform applied.
    pub fn tag(&self) -> Option<&str> {
        self.selected.tag()
    }

    /// Current action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Actions offered for the current axis.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Unit menu entries.
    pub fn unit_options(&self) -> &[UnitOption] {
        &self.unit_options
    }

    /// Current unit or normalization.
    pub fn unit(&self) -> Option<&UnitChoice> {
        self.unit.as_ref()
    }

    /// Axis the current tag is bound to.
    pub fn bound_axis(&self) -> Option<&'a Axis> {
        let catalog: &'a AxisCatalog = self.catalog;
        catalog.axis_for(self.selected.tag()?)
    }

    /// Lifecycle state.
    pub fn state(&self) -> SelectionState {
        match self.selected.tag() {
            None => SelectionState::AxisNone,
            Some(tag) if self.catalog.is_dual(tag) => SelectionState::AxisTransformed,
            Some(_) => SelectionState::AxisBase,
        }
    }

    /// Select an axis by tag, display label, or the `"None"` entry.
    pub fn select_axis(&mut self, choice: &str) -> Result<()> {
        let target = if choice == NONE_LABEL {
            AxisChoice::NoneSelected
        } else {
            let tag = self.catalog.tag_for_label(choice).unwrap_or(choice);
            AxisChoice::Axis(tag.to_string())
        };
        if !self.options.contains(&target) {
            return Err(FieldAxesError::invalid_axis(choice));
        }

        tracing::debug!("Slot {}: axis {}", self.slot, target);
        self.selected = target;
        self.refresh_axis();
        Ok(())
    }

    /// Apply an action; returns whether it took effect.
    ///
    /// FFT on an axis without a dual is ignored and leaves the request as it was.
    pub fn select_action(&mut self, action: Action) -> bool {
        let Some(tag) = self.selected.tag().map(str::to_string) else {
            tracing::warn!("Slot {}: action {} ignored, no axis selected", self.slot, action);
            return false;
        };

        match action {
            Action::Fft => {
                if self.catalog.has_dual(&tag) {
                    if let Ok(dual) = self.catalog.dual_of(&tag) {
                        self.selected = AxisChoice::Axis(dual.to_string());
                    }
                } else if !self.catalog.is_dual(&tag) {
                    tracing::warn!("Slot {}: no dual for {}, FFT ignored", self.slot, tag);
                    return false;
                }
            },
            Action::None => {
                if self.catalog.is_dual(&tag) {
                    self.selected = AxisChoice::Axis(self.catalog.to_base(&tag).to_string());
                }
            },
            Action::Filter => {},
        }

        self.action = action;
        tracing::debug!("Slot {}: action {} -> {}", self.slot, action, self.selected);
        self.recompute_units();
        true
    }

    /// Choose a unit or normalization.
    ///
    /// A normalization label (or key) among the offered entries selects that
    /// normalization; anything else falls back to the raw unit.
    pub fn select_unit(&mut self, choice: &str) {
        let matched = self.unit_options.iter().find(|option| {
            option.label == choice
                || matches!(&option.choice, UnitChoice::Normalization(key) if key == choice)
        });

        self.unit = match matched {
            Some(option) => Some(option.choice.clone()),
            None => self.raw_unit(),
        };
        tracing::debug!("Slot {}: unit {:?}", self.slot, self.unit);
    }

    /// Tag and unit to request from the field.
    pub fn resolve(&self) -> Option<ResolvedAxis> {
        let tag = self.selected.tag()?;
        Some(ResolvedAxis {
            tag: tag.to_string(),
            unit: self.unit.clone(),
        })
    }

    /// Parsed form of the request; `None` when no axis is selected.
    pub fn requested(&self) -> Option<RequestedAxis> {
        let resolved = self.resolve()?;
        let mut requested = RequestedAxis::whole(resolved.tag);
        match resolved.unit {
            Some(UnitChoice::Unit(unit)) => requested.unit = Some(unit),
            Some(UnitChoice::Normalization(key)) => requested.normalization = Some(key),
            None => {},
        }
        Some(requested)
    }

    /// Request string: `time{s}`, `angle->tooth_id`, or `None`.
    pub fn to_request(&self) -> String {
        self.requested()
            .map(|requested| requested.to_string())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    /// Drop an axis taken by another slot from the menu.
    ///
    /// Dual tags remove their base. The first remaining entry becomes the selection.
    pub fn remove_axis(&mut self, tag: &str) {
        let removed = AxisChoice::Axis(self.catalog.to_base(tag).to_string());
        let all = self.catalog.build(&self.slot);
        if !all.contains(&removed) {
            return;
        }

        self.options = all.into_iter().filter(|choice| *choice != removed).collect();
        self.selected = self
            .options
            .first()
            .cloned()
            .unwrap_or(AxisChoice::NoneSelected);
        tracing::debug!("Slot {}: removed {}, now {}", self.slot, removed, self.selected);
        self.refresh_axis();
    }

    /// Set the request up from a parsed request (auto-plot).
    pub fn apply_requested(&mut self, requested: &RequestedAxis) -> Result<()> {
        if self.catalog.is_dual(&requested.name) {
            let base = self.catalog.to_base(&requested.name).to_string();
            self.select_axis(&base)?;
            self.select_action(Action::Fft);
        } else {
            self.select_axis(&requested.name)?;
        }

        if let Some(ref norm) = requested.normalization {
            self.select_unit(norm);
        } else if let Some(ref unit) = requested.unit {
            if self.unit_options.iter().any(|option| option.label == *unit) {
                self.select_unit(unit);
            }
        }
        Ok(())
    }

    fn raw_unit(&self) -> Option<UnitChoice> {
        let tag = self.selected.tag()?;
        self.catalog
            .unit_for(tag)
            .map(|unit| UnitChoice::Unit(unit.to_string()))
    }

    fn refresh_axis(&mut self) {
        self.action = Action::None;
        self.actions = match self.selected.tag() {
            None => Vec::new(),
            Some(tag) if self.catalog.has_dual(tag) => {
                vec![Action::None, Action::Fft, Action::Filter]
            },
            Some(_) => vec![Action::None, Action::Filter],
        };
        self.recompute_units();
    }

    fn recompute_units(&mut self) {
        self.unit_options.clear();
        let Some(tag) = self.selected.tag() else {
            self.unit = None;
            return;
        };

        let labels = self.catalog.labels();
        let norms = self.catalog.normalizations_for(tag);
        let norm_option = |key: &str| UnitOption {
            label: self.catalog.norm_label(key).to_string(),
            choice: UnitChoice::Normalization(key.to_string()),
        };

        // An index normalization replaces every other entry
        if let Some(index_norm) = norms.iter().find(|key| labels.is_index_norm(key)) {
            self.unit_options.push(norm_option(*index_norm));
        } else {
            if let Some(unit) = self.catalog.unit_for(tag) {
                self.unit_options.push(UnitOption {
                    label: unit.to_string(),
                    choice: UnitChoice::Unit(unit.to_string()),
                });
            }
            let entries: Vec<UnitOption> = norms.iter().map(|&key| norm_option(key)).collect();
            self.unit_options.extend(entries);
        }

        self.unit = self.unit_options.first().map(|option| option.choice.clone());
    }
}
