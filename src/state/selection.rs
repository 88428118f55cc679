//! Active selection state

use crate::constants::categories::{CENSUS, INCOME, MEDIAN_INCOME};
use crate::data::{DataStore, Manifest};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic sub-division granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeounitType {
    BlockGroup,
    Tract,
    Precinct,
}

impl GeounitType {
    /// Dataset/manifest key for this granularity
    pub fn key(&self) -> &'static str {
        match self {
            GeounitType::BlockGroup => "bg",
            GeounitType::Tract => "tract",
            GeounitType::Precinct => "precinct",
        }
    }

    /// Geometry property holding the unit identifier
    pub fn unit_key(&self) -> UnitKey {
        match self {
            GeounitType::Precinct => UnitKey::Precinct,
            _ => UnitKey::Geoid,
        }
    }
}

impl Default for GeounitType {
    fn default() -> Self {
        GeounitType::BlockGroup
    }
}

/// Geometry property name identifying a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKey {
    Geoid,
    Precinct,
}

impl UnitKey {
    pub fn property_name(&self) -> &'static str {
        match self {
            UnitKey::Geoid => "GEOID",
            UnitKey::Precinct => "PRECINCT",
        }
    }
}

/// Which year list drives the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearContext {
    Census,
    Election,
}

impl Default for YearContext {
    fn default() -> Self {
        YearContext::Census
    }
}

/// The active selection: what variable, for which units, for which year.
///
/// Exactly one selection is active at a time. Components receive it by
/// reference for a single recompute pass and must not retain it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Statistical topic ("Age", "Income", ...)
    pub category: String,

    /// Data-source variant of the topic ("Census", "Voting Results")
    pub category_type: String,

    /// Active granularity
    pub geounit_type: GeounitType,

    /// Current display year
    pub year: u16,

    /// Which year list `year` was drawn from
    pub year_context: YearContext,

    /// Fields of the active category, display order, after exclusion rules
    pub fields: Vec<String>,

    /// Field -> display label for the active category
    pub labels: BTreeMap<String, String>,

    /// Last-selected variable; drives map coloring, binning, the top-units
    /// table, and the voting-results subset substitution
    pub active_field: String,
}

impl SelectionState {
    /// Build the initial selection for a loaded store.
    pub fn new(store: &DataStore, category: &str, category_type: &str) -> Result<Self> {
        let mut selection = Self {
            year: *store.manifest().census_years.last().unwrap_or(&0),
            ..Self::default()
        };
        selection.set_category(store, category, category_type)?;
        Ok(selection)
    }

    /// Replace the active category, rebuilding the field and label lists.
    ///
    /// Fails with `UnknownCategory` when the pair is absent; the previous
    /// selection stays intact in that case.
    pub fn set_category(
        &mut self,
        store: &DataStore,
        category: &str,
        category_type: &str,
    ) -> Result<()> {
        let field_set = store.field_set(category, category_type)?;

        self.category = category.to_string();
        self.category_type = category_type.to_string();
        self.fields = field_set.fields.clone();
        self.labels = field_set.labels.clone();
        self.apply_field_rules();

        if !self.fields.iter().any(|f| *f == self.active_field) {
            self.active_field = self.fields.first().cloned().unwrap_or_default();
        }
        Ok(())
    }

    /// Switch granularity and re-derive the field list for it.
    ///
    /// Everything unit-dependent (range, styles, bins) is stale after this.
    pub fn set_geounit_type(&mut self, store: &DataStore, geounit_type: GeounitType) -> Result<()> {
        self.geounit_type = geounit_type;
        let (category, category_type) = (self.category.clone(), self.category_type.clone());
        self.set_category(store, &category, &category_type)
    }

    /// Switch between the census and election year lists.
    ///
    /// The display year jumps to the most recent year of the new list.
    pub fn set_year_context(&mut self, manifest: &Manifest, context: YearContext) {
        self.year_context = context;
        if let Some(latest) = self.years(manifest).last() {
            self.year = *latest;
        }
    }

    /// Record the last-selected variable. Returns false (and changes nothing)
    /// when the field is not in the active list.
    pub fn set_field(&mut self, field: &str) -> bool {
        if self.fields.iter().any(|f| f == field) {
            self.active_field = field.to_string();
            true
        } else {
            log::debug!("ignoring selection of inactive field '{}'", field);
            false
        }
    }

    /// The year list for the active context.
    pub fn years<'a>(&self, manifest: &'a Manifest) -> &'a [u16] {
        match self.year_context {
            YearContext::Census => &manifest.census_years,
            YearContext::Election => &manifest.election_years,
        }
    }

    /// Geometry property identifying units at the active granularity.
    pub fn unit_key(&self) -> UnitKey {
        self.geounit_type.unit_key()
    }

    // median_income is not published at precinct granularity
    fn apply_field_rules(&mut self) {
        if self.unit_key() == UnitKey::Precinct
            && self.category == INCOME
            && self.category_type == CENSUS
        {
            self.fields.retain(|f| f != MEDIAN_INCOME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::CategoryDefinition;
    use crate::error::StatmapError;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn store() -> DataStore {
        let categories: CategoryDefinition = serde_json::from_value(json!({
            "Age": {
                "Census": {
                    "fields": ["age_18_to_29", "age_65"],
                    "labels": { "age_18_to_29": "18-29", "age_65": "65+" }
                }
            },
            "Income": {
                "Census": {
                    "fields": ["inc_under_100k", "median_income"],
                    "labels": {
                        "inc_under_100k": "<$100,000",
                        "median_income": "Median income"
                    }
                }
            }
        }))
        .unwrap();
        let manifest = Manifest {
            census_years: vec![2012, 2015, 2016],
            election_years: vec![2012, 2014, 2016, 2018],
            ..Manifest::default()
        };
        DataStore::from_parts(BTreeMap::new(), categories, manifest).unwrap()
    }

    #[test]
    fn test_initial_selection() {
        let store = store();
        let selection = SelectionState::new(&store, "Age", "Census").unwrap();
        assert_eq!(selection.year, 2016);
        assert_eq!(selection.fields, vec!["age_18_to_29", "age_65"]);
        assert_eq!(selection.active_field, "age_18_to_29");
    }

    #[test]
    fn test_unknown_category_leaves_selection_intact() {
        let store = store();
        let mut selection = SelectionState::new(&store, "Age", "Census").unwrap();
        let err = selection
            .set_category(&store, "Weather", "Census")
            .unwrap_err();
        assert!(matches!(err, StatmapError::UnknownCategory { .. }));
        assert_eq!(selection.category, "Age");
        assert_eq!(selection.fields, vec!["age_18_to_29", "age_65"]);
    }

    #[test]
    fn test_median_income_excluded_at_precinct_granularity() {
        let store = store();
        let mut selection = SelectionState::new(&store, "Income", "Census").unwrap();
        assert!(selection.fields.iter().any(|f| f == "median_income"));

        selection
            .set_geounit_type(&store, GeounitType::Precinct)
            .unwrap();
        assert_eq!(selection.unit_key().property_name(), "PRECINCT");
        assert_eq!(selection.fields, vec!["inc_under_100k"]);
        // the dropped field cannot stay active
        assert_eq!(selection.active_field, "inc_under_100k");

        selection
            .set_geounit_type(&store, GeounitType::BlockGroup)
            .unwrap();
        assert!(selection.fields.iter().any(|f| f == "median_income"));
    }

    #[test]
    fn test_category_round_trip_is_idempotent() {
        let store = store();
        let mut selection = SelectionState::new(&store, "Age", "Census").unwrap();
        let before = (selection.fields.clone(), selection.labels.clone());

        selection.set_category(&store, "Income", "Census").unwrap();
        selection.set_category(&store, "Age", "Census").unwrap();
        assert_eq!(before, (selection.fields.clone(), selection.labels.clone()));
    }

    #[test]
    fn test_year_context_switch() {
        let store = store();
        let mut selection = SelectionState::new(&store, "Age", "Census").unwrap();
        selection.set_year_context(store.manifest(), YearContext::Election);
        assert_eq!(selection.year, 2018);
        assert_eq!(selection.years(store.manifest()), &[2012, 2014, 2016, 2018]);

        selection.set_year_context(store.manifest(), YearContext::Census);
        assert_eq!(selection.year, 2016);
    }

    #[test]
    fn test_set_field_guards_inactive_fields() {
        let store = store();
        let mut selection = SelectionState::new(&store, "Age", "Census").unwrap();
        assert!(selection.set_field("age_65"));
        assert_eq!(selection.active_field, "age_65");
        assert!(!selection.set_field("median_income"));
        assert_eq!(selection.active_field, "age_65");
    }
}
