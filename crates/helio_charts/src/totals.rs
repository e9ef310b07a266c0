//! Energy totals over the displayed period.

use serde::{Deserialize, Serialize};

use helio_core::{abs_finite, finite_or_zero, non_negative};

use crate::format::{format_kwh, format_percent};
use crate::rows::normalize_battery_units;
use crate::sample::PowerSample;

const HOUR_MS: f64 = 3_600_000.0;
const MAX_GAP_MS: f64 = 12.0 * HOUR_MS;
const DEFAULT_GAP_MS: f64 = 15.0 * 60_000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub pv_kwh: f64,
    pub load_kwh: f64,
    pub feed_in_kwh: f64,
    /// Battery throughput in either direction.
    pub battery_kwh: f64,
    /// State of charge of the last sample, 0 if it has none.
    pub soc_end: f64,
}

/// Display strings for [`PeriodTotals`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsText {
    pub pv: String,
    pub load: String,
    pub feed_in: String,
    pub battery: String,
    pub soc_end: String,
}

impl PeriodTotals {
    pub fn text(&self) -> TotalsText {
        TotalsText {
            pv: format_kwh(self.pv_kwh),
            load: format_kwh(self.load_kwh),
            feed_in: format_kwh(self.feed_in_kwh),
            battery: format_kwh(self.battery_kwh),
            soc_end: format_percent(self.soc_end),
        }
    }
}

/// Integrate power over time, holding each sample until the next one.
///
/// Gaps are clamped to 12 h. The last sample is held for the median of the
/// shorter gaps, or 15 minutes when there are none.
pub fn integrate_energy(samples: &[PowerSample]) -> PeriodTotals {
    if samples.is_empty() {
        return PeriodTotals::default();
    }
    let mut sorted: Vec<&PowerSample> = samples.iter().collect();
    sorted.sort_by_key(|s| s.timestamp.ms);

    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|w| ((w[1].timestamp.ms - w[0].timestamp.ms) as f64).clamp(0.0, MAX_GAP_MS))
        .collect();
    let tail_ms = median_gap(&gaps).unwrap_or(DEFAULT_GAP_MS);

    let mut totals = PeriodTotals::default();
    for (i, s) in sorted.iter().enumerate() {
        let hours = gaps.get(i).copied().unwrap_or(tail_ms) / HOUR_MS;
        let grid = finite_or_zero(s.grid_power);
        totals.pv_kwh += non_negative(s.pv_power) * hours / 1000.0;
        totals.load_kwh += abs_finite(s.load_power) * hours / 1000.0;
        if grid < 0.0 {
            totals.feed_in_kwh += -grid * hours / 1000.0;
        }
        totals.battery_kwh += normalize_battery_units(s.battery_power).abs() * hours / 1000.0;
    }
    totals.soc_end = sorted
        .last()
        .and_then(|s| s.soc)
        .map(|v| non_negative(v).min(100.0))
        .unwrap_or(0.0);
    totals
}

fn median_gap(gaps: &[f64]) -> Option<f64> {
    let mut usable: Vec<f64> = gaps
        .iter()
        .copied()
        .filter(|g| *g > 0.0 && *g < MAX_GAP_MS)
        .collect();
    if usable.is_empty() {
        return None;
    }
    usable.sort_by(f64::total_cmp);
    Some(usable[usable.len() / 2])
}
