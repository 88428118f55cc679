//! Histogram binning with a bin -> unit reverse index
//!
//! Partitions the active value range into equal-width bins, counts units per
//! bin, and keeps each bin's member unit ids so chart hover can highlight the
//! matching map units.

use crate::constants::bins::DEFAULT_BIN_COUNT;
use crate::data::DataStore;
use crate::range::ValueRange;
use crate::state::SelectionState;
use serde::Serialize;

/// Districtwide value distribution for the active field.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// Effective bin count for this build (may be below the default when the
    /// value span is narrower than the requested resolution)
    pub bin_count: usize,

    /// Upper-boundary display label per bin
    pub labels: Vec<i64>,

    /// Units per bin; sums to the number of units with a valid value
    pub counts: Vec<u32>,

    /// Bin -> member unit ids, in scan order
    members: Vec<Vec<String>>,
}

impl Histogram {
    /// Member unit ids of one bin, for hover cross-highlighting.
    pub fn units_in_bin(&self, bin: usize) -> &[String] {
        self.members.get(bin).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Which bin a value falls into.
    ///
    /// Intervals are half-open except the last bin, which is closed; a
    /// degenerate range assigns everything to bin 0. Values outside the
    /// range clamp to the end bins, so a range carried over from a previous
    /// pass never indexes past the table.
    pub fn bin_for(&self, value: f64, range: &ValueRange) -> usize {
        let bin = ((self.bin_count - 1) as f64 * range.delta(value)).floor() as usize;
        bin.min(self.bin_count - 1)
    }

    /// Total units counted across all bins.
    pub fn total_count(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Build the histogram for the active selection.
///
/// `requested` bins degrade to the integer width of the range when the span
/// is narrower than the requested count, so a narrow domain does not produce
/// a sea of empty bins. The degraded count applies to this build only; the
/// next invocation starts from the default again.
pub fn build_bins(
    store: &DataStore,
    selection: &SelectionState,
    unit_ids: &[String],
    range: &ValueRange,
    requested: usize,
) -> Histogram {
    profiling::scope!("build_bins");

    let span = range.span();
    let bin_count = effective_bin_count(span, requested);

    let mut labels = Vec::with_capacity(bin_count);
    for i in 0..bin_count {
        labels.push(((i + 1) as f64 * span / bin_count as f64 + range.min).floor() as i64);
    }

    let mut counts = vec![0u32; bin_count];
    let mut members = vec![Vec::new(); bin_count];
    let mut histogram = Histogram {
        bin_count,
        labels,
        counts: Vec::new(),
        members: Vec::new(),
    };

    for id in unit_ids {
        let value = store.unit_value(
            selection.year,
            selection.geounit_type.key(),
            id,
            &selection.active_field,
        );
        if let Some(v) = value {
            let bin = histogram.bin_for(v, range);
            counts[bin] += 1;
            members[bin].push(id.clone());
        }
    }

    histogram.counts = counts;
    histogram.members = members;
    histogram
}

fn effective_bin_count(span: f64, requested: usize) -> usize {
    if span < requested as f64 {
        let degraded = (span.floor() as usize).max(1);
        if degraded < requested {
            log::debug!(
                "histogram degraded to {} bins for span {}",
                degraded,
                span
            );
        }
        degraded
    } else {
        requested
    }
}

/// Build with the default bin count.
pub fn build_default_bins(
    store: &DataStore,
    selection: &SelectionState,
    unit_ids: &[String],
    range: &ValueRange,
) -> Histogram {
    build_bins(store, selection, unit_ids, range, DEFAULT_BIN_COUNT)
}
