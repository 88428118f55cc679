//! Selection and interaction state
//!
//! This module holds the single source of truth for "what is displayed now":
//! the active category/year/geounit selection and the two independent hover
//! channels. Derived structures (range, styles, bins, series) live in the
//! engine snapshot, never here.

mod hover;
mod selection;

pub use hover::{HoverEvent, HoverFlags, HoverKind, HoverState};
pub use selection::{GeounitType, SelectionState, UnitKey, YearContext};
