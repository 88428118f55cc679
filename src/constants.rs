//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and fixed tables used throughout
//! the engine, making them easier to maintain and configure.

/// Histogram defaults
pub mod bins {
    /// Default number of histogram bins per recompute pass.
    ///
    /// The effective count is local to a single pass: a narrowed-range build
    /// never leaks a reduced count into the next one.
    pub const DEFAULT_BIN_COUNT: usize = 100;
}

/// Choropleth fill ramp and stroke styling
pub mod color {
    /// Low end of the fill ramp, HSL channels (hue, saturation %, lightness %)
    pub const RAMP_LOW: [f64; 3] = [5.0, 69.0, 54.0];

    /// High end of the fill ramp, HSL channels
    pub const RAMP_HIGH: [f64; 3] = [151.0, 83.0, 34.0];

    /// Fill opacity for visible units
    pub const FILL_OPACITY: f64 = 0.75;

    /// Stroke color for unhovered and map-hovered units
    pub const STROKE_COLOR: &str = "#fff";

    /// Darkened stroke for chart-hover highlighting
    pub const STROKE_COLOR_CHART_HOVER: &str = "#444";

    /// Stroke weight for unhovered units
    pub const STROKE_WEIGHT: f64 = 0.5;

    /// Stroke weight while hovered (map or chart)
    pub const STROKE_WEIGHT_HOVER: f64 = 3.0;

    /// z-index for unhovered units
    pub const Z_INDEX: i32 = 1;

    /// z-index while map-hovered
    pub const Z_INDEX_MAP_HOVER: i32 = 2;

    /// z-index while chart-hovered (above map hover)
    pub const Z_INDEX_CHART_HOVER: i32 = 3;
}

/// Fixed named palette for trend chart series.
///
/// Years are assigned colors round-robin so repeated rebuilds are
/// deterministic and consistent across chart types.
pub mod palette {
    pub const SERIES_COLORS: [&str; 7] = [
        "rgb(255, 99, 132)",  // red
        "rgb(255, 159, 64)",  // orange
        "rgb(255, 205, 86)",  // yellow
        "rgb(75, 192, 192)",  // green
        "rgb(54, 162, 235)",  // blue
        "rgb(153, 102, 255)", // purple
        "rgb(201, 203, 207)", // grey
    ];

    /// Color for the year at position `index` in the active year list
    pub fn color_for_index(index: usize) -> &'static str {
        SERIES_COLORS[index % SERIES_COLORS.len()]
    }
}

/// Category names and field-set substitution tables
pub mod categories {
    /// Category-type for census-sourced variables
    pub const CENSUS: &str = "Census";

    /// Category-type for election-sourced variables
    pub const VOTING_RESULTS: &str = "Voting Results";

    /// Category whose field list carries `median_income`
    pub const INCOME: &str = "Income";

    /// Household median income, unavailable at precinct granularity
    pub const MEDIAN_INCOME: &str = "median_income";

    /// Fields that trigger the percentage subset for voting-results charts
    pub const PERCENT_TRIGGERS: [&str; 3] = ["turnout_pct", "dem_pct", "rep_pct"];

    /// Percentage subset substituted into voting-results trend charts
    pub const PERCENT_FIELDS: [&str; 3] = ["turnout_pct", "dem_pct", "rep_pct"];

    /// Raw-count subset substituted into voting-results trend charts
    pub const COUNT_FIELDS: [&str; 5] = [
        "over_18",
        "registered_voters",
        "ballots_cast",
        "votes_dem",
        "votes_rep",
    ];
}

/// Source-override defaults (manifest `source_override` block)
pub mod overrides {
    /// Election year whose census-sourced fields come from another dataset year
    pub const ALTERNATE_SOURCE_YEAR: u16 = 2018;

    /// Census year substituted for the alternate-source year
    pub const CENSUS_SOURCE_YEAR: u16 = 2016;

    /// Fields sourced from the census year even in election-year series
    pub const CENSUS_SOURCED_FIELDS: [&str; 1] = ["over_18"];
}
