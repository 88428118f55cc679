//! Hover tracking for cross-highlighting
//!
//! Two independent channels: the unit under the cursor on the map, and the
//! units highlighted because a histogram bin containing them is hovered on the
//! chart. Both elevate stroke weight and z-order; chart hover additionally
//! darkens the stroke. Keeping them separate lets a user see both at once.

use std::collections::BTreeSet;

/// Which surface produced a hover event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    Map,
    Chart,
}

/// A single hover transition. `target: None` means the cursor left that
/// surface and its channel clears; the other channel is untouched.
#[derive(Debug, Clone)]
pub struct HoverEvent {
    pub kind: HoverKind,
    pub target: Option<String>,
}

/// Per-unit hover flags handed to the color mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverFlags {
    pub map: bool,
    pub chart: bool,
}

/// Current hover state across both surfaces.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    map_unit: Option<String>,
    chart_units: BTreeSet<String>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one hover transition.
    ///
    /// A chart event replaces the chart set with its single target; use
    /// [`HoverState::set_chart_units`] for bin hovers covering many units.
    pub fn apply(&mut self, event: HoverEvent) {
        match event.kind {
            HoverKind::Map => self.map_unit = event.target,
            HoverKind::Chart => {
                self.chart_units.clear();
                if let Some(id) = event.target {
                    self.chart_units.insert(id);
                }
            }
        }
    }

    /// Replace the chart-hover set wholesale (bin hover highlights every
    /// member unit of the bin).
    pub fn set_chart_units<I>(&mut self, units: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.chart_units = units.into_iter().collect();
    }

    /// Clear both channels.
    pub fn clear(&mut self) {
        self.map_unit = None;
        self.chart_units.clear();
    }

    /// Flags for one unit, consumed by the color mapper.
    pub fn flags_for(&self, unit_id: &str) -> HoverFlags {
        HoverFlags {
            map: self.map_unit.as_deref() == Some(unit_id),
            chart: self.chart_units.contains(unit_id),
        }
    }

    /// True when nothing is hovered on either surface.
    pub fn is_idle(&self) -> bool {
        self.map_unit.is_none() && self.chart_units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_independent() {
        let mut hover = HoverState::new();
        hover.apply(HoverEvent {
            kind: HoverKind::Map,
            target: Some("1001".to_string()),
        });
        hover.set_chart_units(["1001".to_string(), "1002".to_string()]);

        assert_eq!(hover.flags_for("1001"), HoverFlags { map: true, chart: true });
        assert_eq!(hover.flags_for("1002"), HoverFlags { map: false, chart: true });

        // leaving the map clears only the map channel
        hover.apply(HoverEvent {
            kind: HoverKind::Map,
            target: None,
        });
        assert_eq!(hover.flags_for("1001"), HoverFlags { map: false, chart: true });
    }

    #[test]
    fn test_chart_event_replaces_set() {
        let mut hover = HoverState::new();
        hover.set_chart_units(["1001".to_string(), "1002".to_string()]);
        hover.apply(HoverEvent {
            kind: HoverKind::Chart,
            target: Some("1003".to_string()),
        });
        assert!(!hover.flags_for("1001").chart);
        assert!(hover.flags_for("1003").chart);

        hover.apply(HoverEvent {
            kind: HoverKind::Chart,
            target: None,
        });
        assert!(hover.is_idle());
    }
}
