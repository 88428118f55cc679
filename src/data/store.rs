//! Owning store for the dataset, category definitions, and manifest
//!
//! Everything here is loaded once through a [`DataProvider`] and read-only for
//! the rest of the session; recompute passes borrow it freely.

use crate::constants::overrides;
use crate::data::provider::DataProvider;
use crate::error::{Result, StatmapError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider-relative resource names, matching the original static layout.
pub const CATEGORIES_RESOURCE: &str = "categories.json";
pub const MANIFEST_RESOURCE: &str = "manifest.json";
pub const DATASET_RESOURCE: &str = "dataset.json";

/// Raw per-field values for one record. Values stay as JSON: numbers and
/// numeric strings are both accepted, anything else counts as missing.
pub type FieldValues = BTreeMap<String, Value>;

/// One year of data: district aggregates plus per-geounit-type unit records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearSlice {
    /// District-wide aggregates, field -> value
    #[serde(default)]
    pub district: FieldValues,

    /// geounit-type key ("bg", "tract", "precinct") -> unit id -> fields
    #[serde(flatten)]
    pub geounits: BTreeMap<String, BTreeMap<String, FieldValues>>,
}

/// Ordered field list plus display labels for one (category, category-type).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSet {
    /// Field names in display order
    pub fields: Vec<String>,

    /// Field name -> display label; must cover every field
    pub labels: BTreeMap<String, String>,
}

impl FieldSet {
    fn validate(&self, category: &str) -> Result<()> {
        for field in &self.fields {
            if !self.labels.contains_key(field) {
                return Err(StatmapError::Validation(format!(
                    "category '{}' field '{}' has no label",
                    category, field
                )));
            }
        }
        Ok(())
    }
}

/// Census-source override: fields that are not produced by every election
/// cycle read from a designated census year instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceOverride {
    /// Election year that lacks its own census-derived figures
    pub year: u16,

    /// Census year substituted for it
    pub census_year: u16,

    /// Fields the substitution applies to
    pub fields: Vec<String>,
}

impl Default for SourceOverride {
    fn default() -> Self {
        Self {
            year: overrides::ALTERNATE_SOURCE_YEAR,
            census_year: overrides::CENSUS_SOURCE_YEAR,
            fields: overrides::CENSUS_SOURCED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SourceOverride {
    /// Resolve the dataset year a (year, field) lookup should actually hit.
    pub fn effective_year(&self, year: u16, field: &str) -> u16 {
        if year == self.year && self.fields.iter().any(|f| f == field) {
            self.census_year
        } else {
            year
        }
    }
}

/// Map center coordinates for the rendering collaborator.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Year lists, geometry resource paths, and display metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// District display title
    pub title: String,

    /// Years with census data, ascending
    pub census_years: Vec<u16>,

    /// Years with election data, ascending
    pub election_years: Vec<u16>,

    /// Map center for the rendering collaborator
    #[serde(default)]
    pub map_center: MapCenter,

    /// District boundary geometry resource path
    #[serde(default)]
    pub district_geojson: String,

    /// geounit-type key -> geometry resource path
    #[serde(default)]
    pub geounit_geojson: BTreeMap<String, String>,

    /// Census-source substitution rule
    #[serde(default)]
    pub source_override: SourceOverride,
}

/// category -> category-type -> field set
pub type CategoryDefinition = BTreeMap<String, BTreeMap<String, FieldSet>>;

/// year -> one year of district and per-unit values
pub type Dataset = BTreeMap<u16, YearSlice>;

/// Read-only session data: dataset, category definitions, manifest.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    dataset: Dataset,
    categories: CategoryDefinition,
    manifest: Manifest,
}

// Schema mismatches count as load failures, same as transport errors.
fn parse_resource<T: serde::de::DeserializeOwned>(
    path: &str,
    provider: &dyn DataProvider,
) -> Result<T> {
    serde_json::from_value(provider.fetch_json(path)?).map_err(|e| StatmapError::DataLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Parse one raw dataset value. Numbers pass through; numeric strings are
/// parsed; everything else (null, empty string, text) is a missing value.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

impl DataStore {
    /// Load all session resources through the injected provider.
    pub fn load(provider: &dyn DataProvider) -> Result<Self> {
        profiling::scope!("DataStore::load");

        let manifest: Manifest = parse_resource(MANIFEST_RESOURCE, provider)?;
        let categories: CategoryDefinition = parse_resource(CATEGORIES_RESOURCE, provider)?;
        let dataset: Dataset = parse_resource(DATASET_RESOURCE, provider)?;

        let store = Self {
            dataset,
            categories,
            manifest,
        };
        store.validate()?;
        Ok(store)
    }

    /// Build a store from already-parsed pieces (tests, embedded fixtures).
    pub fn from_parts(
        dataset: Dataset,
        categories: CategoryDefinition,
        manifest: Manifest,
    ) -> Result<Self> {
        let store = Self {
            dataset,
            categories,
            manifest,
        };
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> Result<()> {
        for (category, types) in &self.categories {
            for field_set in types.values() {
                field_set.validate(category)?;
            }
        }
        if self.manifest.census_years.is_empty() {
            return Err(StatmapError::Validation(
                "manifest lists no census years".to_string(),
            ));
        }
        Ok(())
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Field set for a (category, category-type) pair.
    pub fn field_set(&self, category: &str, category_type: &str) -> Result<&FieldSet> {
        self.categories
            .get(category)
            .and_then(|types| types.get(category_type))
            .ok_or_else(|| StatmapError::UnknownCategory {
                category: category.to_string(),
                category_type: category_type.to_string(),
            })
    }

    /// Category names in definition order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// One unit's value, after the census-source year override.
    ///
    /// `None` means the unit is missing a value for this field/year; callers
    /// exclude it from the range and style it invisible.
    pub fn unit_value(&self, year: u16, geounit_key: &str, id: &str, field: &str) -> Option<f64> {
        let year = self.manifest.source_override.effective_year(year, field);
        self.dataset
            .get(&year)?
            .geounits
            .get(geounit_key)?
            .get(id)?
            .get(field)
            .and_then(numeric)
    }

    /// District-wide aggregate, after the census-source year override.
    pub fn district_value(&self, year: u16, field: &str) -> Option<f64> {
        let year = self.manifest.source_override.effective_year(year, field);
        self.dataset.get(&year)?.district.get(field).and_then(numeric)
    }

    /// Unit identifiers present for a year and geounit-type, in id order.
    ///
    /// The geometry collaborator normally supplies the visible-unit list;
    /// this is the fallback used by the demo binary and tests.
    pub fn unit_ids(&self, year: u16, geounit_key: &str) -> Vec<String> {
        self.dataset
            .get(&year)
            .and_then(|slice| slice.geounits.get(geounit_key))
            .map(|units| units.keys().cloned().collect())
            .unwrap_or_default()
    }
}
