//! statmap: data-binding, binning, and normalization engine for a district
//! choropleth map
//!
//! Given a selected variable/year/geounit-type combination, the engine
//! computes per-unit values, the min/max range, a color scale, a histogram
//! with a bin -> unit reverse index, and multi-year trend chart datasets,
//! keeping everything consistent as selections change. Map tiles, chart
//! drawing, and the network live outside, behind [`data::DataProvider`].

pub mod charts;
pub mod constants;
pub mod data;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod range;
pub mod state;
pub mod style;

pub use charts::{ChartSeries, SeriesScope, TopUnitsTable, TrendChart};
pub use data::{DataProvider, DataStore, FileProvider, Manifest};
pub use engine::{Engine, Snapshot};
pub use error::{Result, StatmapError};
pub use histogram::Histogram;
pub use range::ValueRange;
pub use state::{GeounitType, HoverEvent, HoverKind, SelectionState, YearContext};
pub use style::UnitStyle;
