//! Recompute orchestration
//!
//! A selection change triggers one synchronous pass: range -> styles -> bins
//! -> trend series -> top table. The pass builds a complete [`Snapshot`] and
//! swaps it in atomically; consumers never observe a partially rebuilt one.
//! Passes are tagged with a generation so a selection change arriving while a
//! pass is buffered (e.g. behind an async fetch) discards the stale result
//! instead of interleaving writes.

use crate::charts::{
    SeriesScope, TopUnitsTable, TrendChart, build_series, build_top_units_table,
    resolve_chart_fields,
};
use crate::data::DataStore;
use crate::error::Result;
use crate::histogram::{Histogram, build_default_bins};
use crate::range::{ValueRange, compute_range};
use crate::state::{GeounitType, HoverEvent, HoverState, SelectionState, YearContext};
use crate::style::{UnitStyle, color_for};
use std::collections::BTreeMap;

/// All derived structures for one selection, replaced wholesale per pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Value range of the active field; `None` when no unit had a valid value
    pub range: Option<ValueRange>,

    /// Style descriptor per unit id
    pub styles: BTreeMap<String, UnitStyle>,

    /// Districtwide distribution; `None` when the range is empty
    pub histogram: Option<Histogram>,

    /// Multi-year district trend
    pub district_trend: Option<TrendChart>,

    /// Multi-year trend for the focused unit, when one is focused
    pub unit_trend: Option<TrendChart>,

    /// Top contributors covering the first third of the total
    pub top_units: Option<TopUnitsTable>,
}

impl Snapshot {
    /// Legend min/max display strings; blank when the range is empty.
    pub fn legend(&self) -> (String, String) {
        match &self.range {
            Some(r) => (format!("{}", r.min), format!("{}", r.max)),
            None => (String::new(), String::new()),
        }
    }
}

/// Token identifying one recompute pass; stale tokens fail to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassToken(u64);

/// The engine: owns the read-only store, the live selection/hover state, and
/// the current derived snapshot.
pub struct Engine {
    store: DataStore,
    selection: SelectionState,
    hover: HoverState,
    snapshot: Snapshot,
    focus_unit: Option<String>,
    generation: u64,
}

impl Engine {
    /// Create an engine over a loaded store with an initial selection.
    pub fn new(store: DataStore, category: &str, category_type: &str) -> Result<Self> {
        let selection = SelectionState::new(&store, category, category_type)?;
        Ok(Self {
            store,
            selection,
            hover: HoverState::new(),
            snapshot: Snapshot::default(),
            focus_unit: None,
            generation: 0,
        })
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The last committed snapshot (the Idle state).
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Change the active category. The previous selection and snapshot stay
    /// intact when the pair is unknown.
    pub fn select_category(&mut self, category: &str, category_type: &str) -> Result<()> {
        self.selection.set_category(&self.store, category, category_type)?;
        self.invalidate();
        Ok(())
    }

    /// Change granularity; all unit-dependent state becomes stale.
    pub fn select_geounit_type(&mut self, geounit_type: GeounitType) -> Result<()> {
        self.selection.set_geounit_type(&self.store, geounit_type)?;
        self.focus_unit = None;
        self.invalidate();
        Ok(())
    }

    /// Switch between census and election year lists.
    pub fn select_year_context(&mut self, context: YearContext) {
        self.selection.set_year_context(self.store.manifest(), context);
        self.invalidate();
    }

    /// Record the last-selected variable.
    pub fn select_field(&mut self, field: &str) -> bool {
        let changed = self.selection.set_field(field);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Focus one unit for the single-unit trend chart (or clear the focus).
    pub fn select_unit(&mut self, unit_id: Option<String>) {
        self.focus_unit = unit_id;
        self.invalidate();
    }

    /// Run one full pass over the visible units and commit the result.
    pub fn recompute(&mut self, unit_ids: &[String]) {
        profiling::scope!("Engine::recompute");
        let token = self.begin_pass();
        let snapshot = compute_snapshot(
            &self.store,
            &self.selection,
            &self.hover,
            self.focus_unit.as_deref(),
            unit_ids,
        );
        self.commit(token, snapshot);
    }

    /// Start a pass; the token must be presented at commit time.
    pub fn begin_pass(&self) -> PassToken {
        PassToken(self.generation)
    }

    /// Commit a fully built snapshot. Returns false (and changes nothing)
    /// when the selection moved on since the pass began.
    pub fn commit(&mut self, token: PassToken, snapshot: Snapshot) -> bool {
        if token.0 == self.generation {
            self.snapshot = snapshot;
            true
        } else {
            log::debug!("discarding superseded recompute pass");
            false
        }
    }

    /// Apply one hover transition and restyle synchronously. Bins, series,
    /// and range are untouched; only styles are replaced.
    pub fn dispatch_hover(&mut self, event: HoverEvent, unit_ids: &[String]) {
        self.hover.apply(event);
        self.restyle(unit_ids);
    }

    /// Chart hover over a histogram bin highlights every member unit;
    /// `None` clears the chart channel.
    pub fn hover_bin(&mut self, bin: Option<usize>, unit_ids: &[String]) {
        let members: Vec<String> = match (bin, &self.snapshot.histogram) {
            (Some(i), Some(hist)) => hist.units_in_bin(i).to_vec(),
            _ => Vec::new(),
        };
        self.hover.set_chart_units(members);
        self.restyle(unit_ids);
    }

    fn restyle(&mut self, unit_ids: &[String]) {
        profiling::scope!("Engine::restyle");
        self.snapshot.styles = compute_styles(
            &self.store,
            &self.selection,
            &self.hover,
            self.snapshot.range.as_ref(),
            unit_ids,
        );
    }

    // any selection change supersedes an in-flight pass
    fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// Build all derived structures for one pass. Pure with respect to the
/// engine: callers may run it behind an async fetch and commit later.
pub fn compute_snapshot(
    store: &DataStore,
    selection: &SelectionState,
    hover: &HoverState,
    focus_unit: Option<&str>,
    unit_ids: &[String],
) -> Snapshot {
    profiling::scope!("compute_snapshot");

    let range = match compute_range(store, selection, unit_ids) {
        Ok(r) => Some(r),
        Err(e) => {
            log::warn!("{}", e.user_message());
            None
        }
    };

    let styles = compute_styles(store, selection, hover, range.as_ref(), unit_ids);

    let histogram: Option<Histogram> = range
        .as_ref()
        .map(|r| build_default_bins(store, selection, unit_ids, r));

    let chart_fields = resolve_chart_fields(selection);
    let district_trend = Some(build_series(
        store,
        selection,
        &chart_fields,
        SeriesScope::District,
    ));
    let unit_trend = focus_unit
        .map(|id| build_series(store, selection, &chart_fields, SeriesScope::Unit(id)));

    let top_units = range.as_ref().map(|_| {
        build_top_units_table(store, selection, unit_ids, &selection.active_field)
    });

    Snapshot {
        range,
        styles,
        histogram,
        district_trend,
        unit_trend,
        top_units,
    }
}

fn compute_styles(
    store: &DataStore,
    selection: &SelectionState,
    hover: &HoverState,
    range: Option<&ValueRange>,
    unit_ids: &[String],
) -> BTreeMap<String, UnitStyle> {
    profiling::scope!("compute_styles");

    unit_ids
        .iter()
        .map(|id| {
            let style = match range {
                Some(r) => {
                    let value = store.unit_value(
                        selection.year,
                        selection.geounit_type.key(),
                        id,
                        &selection.active_field,
                    );
                    color_for(value, r, hover.flags_for(id))
                }
                None => UnitStyle::hidden(),
            };
            (id.clone(), style)
        })
        .collect()
}
