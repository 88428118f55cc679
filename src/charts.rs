//! Trend chart datasets and the top-contributors table
//!
//! One polymorphic builder covers the district-aggregate and single-unit
//! trend charts; the voting-results field substitution is a declarative table
//! resolved once per recompute pass, not inline branching per chart.

use crate::constants::categories::{
    COUNT_FIELDS, PERCENT_FIELDS, PERCENT_TRIGGERS, VOTING_RESULTS,
};
use crate::constants::palette;
use crate::data::DataStore;
use crate::state::SelectionState;
use serde::Serialize;

/// Whose values a trend chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesScope<'a> {
    /// District-wide aggregates
    District,
    /// One geographic unit
    Unit(&'a str),
}

/// One year's values across the chart fields.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    /// Year rendered as the series label
    pub label: String,

    /// Values aligned to the chart's field list; `None` where data is missing
    pub values: Vec<Option<f64>>,

    /// Stable round-robin palette color
    pub color: &'static str,
}

/// A full multi-year trend chart dataset.
#[derive(Debug, Clone, Serialize)]
pub struct TrendChart {
    /// Fields plotted, display order
    pub fields: Vec<String>,

    /// Display label per field
    pub field_labels: Vec<String>,

    /// One series per year of the active context
    pub series: Vec<ChartSeries>,
}

/// Resolve the field list trend charts should plot for this selection.
///
/// Voting-results selections swap in one of two fixed subsets depending on
/// which variable was last selected: percentage variables chart the
/// percentage subset, everything else charts the raw counts. All other
/// categories chart their nominal field list.
pub fn resolve_chart_fields(selection: &SelectionState) -> Vec<String> {
    if selection.category_type == VOTING_RESULTS {
        let subset: &[&str] = if PERCENT_TRIGGERS.contains(&selection.active_field.as_str()) {
            &PERCENT_FIELDS
        } else {
            &COUNT_FIELDS
        };
        subset.iter().map(|f| f.to_string()).collect()
    } else {
        selection.fields.clone()
    }
}

/// Build the multi-year trend dataset for one scope.
///
/// Iterates the active year list; each year becomes one series with a
/// deterministic palette color. Census-sourced fields are redirected to the
/// census source year by the store when the series iterates the
/// alternate-source election year.
pub fn build_series(
    store: &DataStore,
    selection: &SelectionState,
    chart_fields: &[String],
    scope: SeriesScope<'_>,
) -> TrendChart {
    profiling::scope!("build_series");

    let field_labels = chart_fields
        .iter()
        .map(|f| {
            selection
                .labels
                .get(f)
                .cloned()
                .unwrap_or_else(|| f.clone())
        })
        .collect();

    let series = selection
        .years(store.manifest())
        .iter()
        .enumerate()
        .map(|(index, &year)| {
            let values = chart_fields
                .iter()
                .map(|field| match scope {
                    SeriesScope::District => store.district_value(year, field),
                    SeriesScope::Unit(id) => {
                        store.unit_value(year, selection.geounit_type.key(), id, field)
                    }
                })
                .collect();
            ChartSeries {
                label: year.to_string(),
                values,
                color: palette::color_for_index(index),
            }
        })
        .collect();

    TrendChart {
        fields: chart_fields.to_vec(),
        field_labels,
        series,
    }
}

/// One row of the top-contributors table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopUnitRow {
    pub unit_id: String,
    pub value: f64,
}

/// Units covering the first third of the districtwide total, largest first.
#[derive(Debug, Clone, Serialize)]
pub struct TopUnitsTable {
    pub rows: Vec<TopUnitRow>,
    pub total: f64,
}

/// Rank units by value and keep the shortest prefix whose running total
/// reaches one-third of the grand total.
///
/// The one-third cutoff is deliberate: this is a "top contributors covering
/// the first third" report, not a fixed-count top-N.
pub fn build_top_units_table(
    store: &DataStore,
    selection: &SelectionState,
    unit_ids: &[String],
    field: &str,
) -> TopUnitsTable {
    profiling::scope!("build_top_units_table");

    let mut ranked: Vec<TopUnitRow> = unit_ids
        .iter()
        .filter_map(|id| {
            store
                .unit_value(selection.year, selection.geounit_type.key(), id, field)
                .map(|value| TopUnitRow {
                    unit_id: id.clone(),
                    value,
                })
        })
        .collect();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.unit_id.cmp(&b.unit_id)));

    let total: f64 = ranked.iter().map(|r| r.value).sum();
    let threshold = total / 3.0;

    let mut rows = Vec::new();
    let mut running = 0.0;
    for row in ranked {
        running += row.value;
        rows.push(row);
        if running >= threshold {
            break;
        }
    }

    TopUnitsTable { rows, total }
}
