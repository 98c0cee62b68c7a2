//! Variant selection state machine.
//!
//! The resolver owns a product's variant table and the shopper's in-progress
//! selection. Every mutation re-resolves the current variant before returning,
//! and option availability is derived from the table on each call.

use serde::Serialize;
use std::collections::BTreeSet;
use swatch_common::protocol::{OptionAxis, Variant, VariantTable};
use swatch_common::PayloadError;

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    NoVariantSelected,
    VariantSelected,
}

/// Outcome of resolving the selection. A variant that exists but cannot be
/// bought is not the same thing as no variant at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    NoVariant,
    Unavailable(&'a Variant),
    Available(&'a Variant),
}

impl<'a> Resolution<'a> {
    pub fn variant(&self) -> Option<&'a Variant> {
        match *self {
            Resolution::NoVariant => None,
            Resolution::Unavailable(v) | Resolution::Available(v) => Some(v),
        }
    }
}

/// Enabled values for one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "values", rename_all = "snake_case")]
pub enum AxisAvailability {
    /// An earlier axis has no selection yet, so this axis is not evaluated and
    /// its controls keep whatever state they have.
    Pending,
    Ready(BTreeSet<String>),
}

impl AxisAvailability {
    pub fn is_pending(&self) -> bool {
        matches!(self, AxisAvailability::Pending)
    }

    /// Whether a control carrying `value` should be interactive.
    /// Pending axes are left alone.
    pub fn is_enabled(&self, value: &str) -> bool {
        match self {
            AxisAvailability::Pending => true,
            AxisAvailability::Ready(values) => values.contains(value),
        }
    }

    pub fn values(&self) -> Option<&BTreeSet<String>> {
        match self {
            AxisAvailability::Pending => None,
            AxisAvailability::Ready(values) => Some(values),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub selected: Vec<Option<String>>,
    /// Index into the variant table.
    pub current: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct VariantResolver {
    table: VariantTable,
    selection: SelectionState,
}

impl VariantResolver {
    pub fn new(table: VariantTable) -> Self {
        let selection = SelectionState {
            selected: vec![None; table.axis_count()],
            current: None,
        };
        Self { table, selection }
    }

    /// Build a resolver straight from the page-embedded JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, PayloadError> {
        Ok(Self::new(VariantTable::from_json(payload)?))
    }

    pub fn table(&self) -> &VariantTable {
        &self.table
    }

    pub fn axes(&self) -> &[OptionAxis] {
        self.table.axes()
    }

    pub fn axis_count(&self) -> usize {
        self.table.axis_count()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> &[Option<String>] {
        &self.selection.selected
    }

    /// Replace the whole selection.
    ///
    /// The input is normalized to the product's axis count: missing entries
    /// are unset, extra entries are dropped and empty strings count as unset.
    pub fn set_selection<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let axis_count = self.axis_count();
        let mut selected: Vec<Option<String>> = values
            .into_iter()
            .take(axis_count)
            .map(|value| value.map(Into::into).filter(|v: &String| !v.is_empty()))
            .collect();
        selected.resize(axis_count, None);

        self.selection.selected = selected;
        self.refresh();
    }

    /// Set a single axis. Returns false when the axis does not exist.
    pub fn select(&mut self, axis: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        let Some(slot) = self.selection.selected.get_mut(axis) else {
            tracing::debug!(axis, "ignoring selection for unknown axis");
            return false;
        };
        *slot = if value.is_empty() { None } else { Some(value) };
        self.refresh();
        true
    }

    /// Unset a single axis. Returns false when the axis does not exist.
    pub fn clear(&mut self, axis: usize) -> bool {
        let Some(slot) = self.selection.selected.get_mut(axis) else {
            return false;
        };
        *slot = None;
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        self.selection.current = self.table.find_exact(&self.selection.selected);
        tracing::trace!(
            selected = ?self.selection.selected,
            current = ?self.selection.current,
            "selection resolved"
        );
    }

    /// The variant whose options equal the selection entry by entry, if any.
    pub fn resolve_current_variant(&self) -> Option<&Variant> {
        self.selection.current.and_then(|index| self.table.get(index))
    }

    pub fn resolution(&self) -> Resolution<'_> {
        match self.resolve_current_variant() {
            None => Resolution::NoVariant,
            Some(variant) if variant.available => Resolution::Available(variant),
            Some(variant) => Resolution::Unavailable(variant),
        }
    }

    pub fn status(&self) -> SelectionStatus {
        if self.selection.current.is_some() {
            SelectionStatus::VariantSelected
        } else {
            SelectionStatus::NoVariantSelected
        }
    }

    /// Values of `axis` that can be chosen without landing on a missing or
    /// unpurchasable combination, given the selections on every earlier axis.
    ///
    /// Later axes never constrain earlier ones. An axis whose earlier axes are
    /// not all selected is [`AxisAvailability::Pending`]. Unknown axes yield an
    /// empty set.
    pub fn compute_axis_availability(&self, axis: usize) -> AxisAvailability {
        let Some(declared) = self.table.axes().get(axis) else {
            return AxisAvailability::Ready(BTreeSet::new());
        };

        let mut prefix = Vec::with_capacity(axis);
        for chosen in &self.selection.selected[..axis] {
            match chosen {
                Some(value) => prefix.push(value.as_str()),
                None => return AxisAvailability::Pending,
            }
        }

        let existing = self.table.existing_values(axis);
        let values = self
            .table
            .variants()
            .iter()
            .filter(|variant| variant.available && variant.matches_prefix(&prefix))
            .map(|variant| variant.options[axis].as_str())
            .filter(|value| existing.contains(value) && declared.declares(value))
            .map(str::to_string)
            .collect();

        AxisAvailability::Ready(values)
    }

    /// Availability for every axis, in axis order.
    pub fn availability(&self) -> Vec<AxisAvailability> {
        (0..self.axis_count())
            .map(|axis| self.compute_axis_availability(axis))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> VariantResolver {
        VariantResolver::from_json(
            r#"[
                {"id": 1, "options": ["Red", "S"], "available": true},
                {"id": 2, "options": ["Red", "M"], "available": false},
                {"id": 3, "options": ["Blue", "S"], "available": true}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state_is_unselected() {
        let resolver = shirt();
        assert_eq!(resolver.status(), SelectionStatus::NoVariantSelected);
        assert_eq!(resolver.selected(), vec![None::<String>, None].as_slice());
        assert!(resolver.resolve_current_variant().is_none());
        assert!(resolver.resolution().variant().is_none());
    }

    #[test]
    fn test_set_selection_pads_and_truncates() {
        let mut resolver = shirt();
        resolver.set_selection([Some("Red")]);
        assert_eq!(resolver.selected(), &[Some("Red".to_string()), None]);

        resolver.set_selection([Some("Blue"), Some("S"), Some("Extra")]);
        assert_eq!(resolver.selected().len(), 2);
        assert_eq!(
            resolver.resolve_current_variant().unwrap().id,
            swatch_common::ResourceId::Number(3)
        );
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let mut resolver = shirt();
        resolver.set_selection([Some("Red"), Some("")]);
        assert_eq!(resolver.selected()[1], None);

        resolver.select(1, "S");
        assert_eq!(resolver.status(), SelectionStatus::VariantSelected);
        resolver.select(1, "");
        assert_eq!(resolver.status(), SelectionStatus::NoVariantSelected);
    }

    #[test]
    fn test_select_unknown_axis_is_ignored() {
        let mut resolver = shirt();
        assert!(!resolver.select(5, "Red"));
        assert!(!resolver.clear(2));
        assert_eq!(resolver.selected(), vec![None::<String>, None].as_slice());
    }

    #[test]
    fn test_pending_axis_enables_everything() {
        let resolver = shirt();
        let sizes = resolver.compute_axis_availability(1);
        assert!(sizes.is_pending());
        assert!(sizes.is_enabled("M"));
        assert!(sizes.values().is_none());
    }

    #[test]
    fn test_unknown_axis_availability_is_empty() {
        let resolver = shirt();
        assert_eq!(
            resolver.compute_axis_availability(9),
            AxisAvailability::Ready(BTreeSet::new())
        );
    }
}
