//! Min/max range tracking for the active field
//!
//! A fresh range starts at the sentinel pair (+inf, -inf) and folds in every
//! valid unit value for the active selection. Units with missing or
//! non-numeric values are excluded here and styled invisible later.

use crate::data::DataStore;
use crate::error::{Result, StatmapError};
use crate::state::SelectionState;

/// Observed value range over the currently visible units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Sentinel "unset" pair; `is_set` is false until a value is observed.
    pub fn unset() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Fold one value into the bounds.
    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True once at least one value has been observed.
    pub fn is_set(&self) -> bool {
        self.min <= self.max
    }

    /// Width of the range; zero for a degenerate (single-value) range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Normalized position of `value` in [0, 1].
    ///
    /// A degenerate range maps everything to 0 rather than dividing by zero.
    pub fn delta(&self, value: f64) -> f64 {
        if self.span() == 0.0 {
            0.0
        } else {
            (value - self.min) / self.span()
        }
    }
}

/// Scan all given units and compute the (min, max) of the active field.
///
/// Fails with `EmptyRange` when no unit has a valid value; callers render an
/// empty legend and skip bin/color computation.
pub fn compute_range(
    store: &DataStore,
    selection: &SelectionState,
    unit_ids: &[String],
) -> Result<ValueRange> {
    profiling::scope!("compute_range");

    let mut range = ValueRange::unset();
    for id in unit_ids {
        let value = store.unit_value(
            selection.year,
            selection.geounit_type.key(),
            id,
            &selection.active_field,
        );
        match value {
            Some(v) => range.observe(v),
            None => log::debug!(
                "unit {} missing '{}' for {}",
                id,
                selection.active_field,
                selection.year
            ),
        }
    }

    if range.is_set() {
        Ok(range)
    } else {
        Err(StatmapError::EmptyRange {
            field: selection.active_field.clone(),
            year: selection.year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Manifest, store::CategoryDefinition};
    use serde_json::json;

    fn store() -> DataStore {
        let dataset = serde_json::from_value(json!({
            "2015": {
                "bg": {
                    "1001": { "age_65": 50 },
                    "1002": { "age_65": 150 },
                    "1003": { "age_65": "" }
                }
            }
        }))
        .unwrap();
        let categories: CategoryDefinition = serde_json::from_value(json!({
            "Age": {
                "Census": { "fields": ["age_65"], "labels": { "age_65": "65+" } }
            }
        }))
        .unwrap();
        let manifest = Manifest {
            census_years: vec![2015],
            ..Manifest::default()
        };
        DataStore::from_parts(dataset, categories, manifest).unwrap()
    }

    fn selection(store: &DataStore) -> SelectionState {
        SelectionState::new(store, "Age", "Census").unwrap()
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_range_over_valid_units() {
        let store = store();
        let selection = selection(&store);
        let range =
            compute_range(&store, &selection, &ids(&["1001", "1002", "1003"])).unwrap();
        assert_eq!(range.min, 50.0);
        assert_eq!(range.max, 150.0);
        assert!(range.min <= range.max);
    }

    #[test]
    fn test_invalid_units_are_excluded() {
        let store = store();
        let selection = selection(&store);
        // "1003" has an empty-string value and must not widen the range
        let range = compute_range(&store, &selection, &ids(&["1001", "1003"])).unwrap();
        assert_eq!(range.min, 50.0);
        assert_eq!(range.max, 50.0);
        assert_eq!(range.span(), 0.0);
    }

    #[test]
    fn test_empty_range() {
        let store = store();
        let selection = selection(&store);
        let err = compute_range(&store, &selection, &ids(&["1003"])).unwrap_err();
        assert!(matches!(err, StatmapError::EmptyRange { .. }));

        let err = compute_range(&store, &selection, &[]).unwrap_err();
        assert!(matches!(err, StatmapError::EmptyRange { .. }));
    }

    #[test]
    fn test_delta_normalization() {
        let mut range = ValueRange::unset();
        assert!(!range.is_set());
        range.observe(50.0);
        range.observe(150.0);
        assert_eq!(range.delta(50.0), 0.0);
        assert_eq!(range.delta(150.0), 1.0);
        assert_eq!(range.delta(100.0), 0.5);

        let mut flat = ValueRange::unset();
        flat.observe(42.0);
        assert_eq!(flat.delta(42.0), 0.0);
    }
}
