//! Per-unit choropleth styling
//!
//! Maps a unit's value to a fill/stroke/visibility descriptor. The fill
//! interpolates three HSL channels between a fixed low and high triple; hover
//! state contributes stroke-weight and z-order overrides on top.

use crate::constants::color;
use crate::range::ValueRange;
use crate::state::HoverFlags;
use serde::Serialize;

/// HSL fill color, channels as (hue, saturation %, lightness %).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    /// CSS color string, e.g. `hsl(78, 76%, 44%)`.
    pub fn css(&self) -> String {
        format!("hsl({:.0}, {:.0}%, {:.0}%)", self.h, self.s, self.l)
    }
}

/// Style descriptor for one geographic unit, consumed by the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitStyle {
    /// False for units with a missing value; nothing else applies then
    pub visible: bool,
    pub fill: Option<HslColor>,
    pub fill_opacity: f64,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub z_index: i32,
}

impl UnitStyle {
    /// Style for a unit excluded from the display.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            fill: None,
            fill_opacity: 0.0,
            stroke_color: color::STROKE_COLOR,
            stroke_weight: color::STROKE_WEIGHT,
            z_index: color::Z_INDEX,
        }
    }
}

/// Compute the style for one unit.
///
/// Missing/NaN values yield an invisible style. Otherwise each HSL channel is
/// interpolated by the unit's normalized position in the range; a degenerate
/// range pins every unit to the low end. Map and chart hover each elevate
/// stroke weight and z-order; chart hover also darkens the stroke.
pub fn color_for(value: Option<f64>, range: &ValueRange, hover: HoverFlags) -> UnitStyle {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return UnitStyle::hidden(),
    };

    let delta = range.delta(value);
    let mut channels = [0.0; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = (color::RAMP_HIGH[i] - color::RAMP_LOW[i]) * delta + color::RAMP_LOW[i];
    }

    let (stroke_color, stroke_weight, z_index) = if hover.chart {
        (
            color::STROKE_COLOR_CHART_HOVER,
            color::STROKE_WEIGHT_HOVER,
            color::Z_INDEX_CHART_HOVER,
        )
    } else if hover.map {
        (
            color::STROKE_COLOR,
            color::STROKE_WEIGHT_HOVER,
            color::Z_INDEX_MAP_HOVER,
        )
    } else {
        (color::STROKE_COLOR, color::STROKE_WEIGHT, color::Z_INDEX)
    };

    UnitStyle {
        visible: true,
        fill: Some(HslColor {
            h: channels[0],
            s: channels[1],
            l: channels[2],
        }),
        fill_opacity: color::FILL_OPACITY,
        stroke_color,
        stroke_weight,
        z_index,
    }
}
