//! Row preparation: raw samples to non-negative per-series magnitudes.

use serde::{Deserialize, Serialize};

use helio_core::{abs_finite, finite_or_zero, non_negative};

use crate::date_selection::Granularity;
use crate::format::{axis_label, tooltip_label, Locale};
use crate::sample::PowerSample;

/// Smallest data maximum considered when sizing the value axis.
pub const Y_MAX_FLOOR: f64 = 100.0;
/// The value axis always ends on a multiple of this.
pub const Y_MAX_STEP: f64 = 500.0;

/// Battery magnitudes below this are assumed to be kW reported in place of W.
const KW_MISREPORT_LIMIT: f64 = 50.0;

/// Rescale battery readings the device reports in kW by mistake.
///
/// `0 < |v| < 50` is multiplied by 1000, everything else passes through.
/// Non-finite input yields 0.
pub fn normalize_battery_units(v: f64) -> f64 {
    let v = finite_or_zero(v);
    let mag = v.abs();
    if mag > 0.0 && mag < KW_MISREPORT_LIMIT {
        v * 1000.0
    } else {
        v
    }
}

/// One drawable sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub index: usize,
    pub axis_label: String,
    pub tooltip_label: String,
    pub pv: f64,
    pub load: f64,
    pub feed_in: f64,
    pub battery: f64,
    /// State of charge in percent, 0 when the sample has none.
    pub soc_pct: f64,
    /// `soc_pct` projected onto the power axis.
    pub soc_scaled: f64,
    pub timestamp_ms: i64,
}

impl ChartRow {
    /// Height the hit test aims for: the tallest shown series.
    pub fn target(&self, show_battery: bool) -> f64 {
        let battery = if show_battery { self.battery } else { 0.0 };
        self.load.max(self.pv).max(self.feed_in).max(battery)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowOptions {
    pub locale: Locale,
    pub show_battery: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreparedChart {
    pub rows: Vec<ChartRow>,
    pub y_max: f64,
}

impl PreparedChart {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derive rows and the value-axis maximum for `samples`.
pub fn prepare(
    samples: &[PowerSample],
    granularity: Granularity,
    options: RowOptions,
) -> PreparedChart {
    let mut rows: Vec<ChartRow> = samples
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let grid = finite_or_zero(s.grid_power);
            ChartRow {
                index,
                axis_label: axis_label(&s.timestamp, granularity, options.locale),
                tooltip_label: tooltip_label(&s.timestamp, granularity, options.locale),
                pv: non_negative(s.pv_power),
                load: abs_finite(s.load_power),
                feed_in: if grid < 0.0 { -grid } else { 0.0 },
                battery: normalize_battery_units(s.battery_power).abs(),
                soc_pct: s.soc.map(|v| non_negative(v).min(100.0)).unwrap_or(0.0),
                soc_scaled: 0.0,
                timestamp_ms: s.timestamp.ms,
            }
        })
        .collect();

    let y_max = compute_y_max(&rows, options.show_battery);
    for row in &mut rows {
        row.soc_scaled = row.soc_pct / 100.0 * y_max;
    }
    PreparedChart { rows, y_max }
}

/// `ceil(max(100, series maxima) / 500) * 500`.
pub fn compute_y_max(rows: &[ChartRow], show_battery: bool) -> f64 {
    let peak = rows
        .iter()
        .map(|r| r.target(show_battery))
        .fold(Y_MAX_FLOOR, f64::max);
    (peak / Y_MAX_STEP).ceil() * Y_MAX_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleTime;

    fn sample(ts: &str, pv: f64, load: f64, grid: f64, battery: f64) -> PowerSample {
        PowerSample {
            timestamp: SampleTime::parse(ts).unwrap(),
            pv_power: pv,
            load_power: load,
            grid_power: grid,
            battery_power: battery,
            soc: None,
        }
    }

    #[test]
    fn battery_unit_normalization() {
        assert_eq!(normalize_battery_units(30.0), 30_000.0);
        assert_eq!(normalize_battery_units(-1.5), -1_500.0);
        assert_eq!(normalize_battery_units(60.0), 60.0);
        assert_eq!(normalize_battery_units(50.0), 50.0);
        assert_eq!(normalize_battery_units(0.0), 0.0);
        assert_eq!(normalize_battery_units(f64::NAN), 0.0);
    }

    #[test]
    fn rows_use_display_magnitudes() {
        let samples = [sample("2024-06-01T12:00:00Z", -5.0, -900.0, -1200.0, -2.0)];
        let chart = prepare(&samples, Granularity::Day, RowOptions::default());
        let r = &chart.rows[0];
        assert_eq!(r.pv, 0.0);
        assert_eq!(r.load, 900.0);
        assert_eq!(r.feed_in, 1200.0);
        assert_eq!(r.battery, 2000.0);
        assert_eq!(r.axis_label, "12:00");
    }

    #[test]
    fn battery_counts_towards_y_max_only_when_shown() {
        let samples = [sample("2024-06-01T12:00:00Z", 800.0, -300.0, 0.0, 3.2)];
        let hidden = prepare(&samples, Granularity::Day, RowOptions::default());
        assert_eq!(hidden.y_max, 1000.0);

        let shown = prepare(
            &samples,
            Granularity::Day,
            RowOptions {
                show_battery: true,
                ..RowOptions::default()
            },
        );
        assert_eq!(shown.y_max, 3500.0);
    }

    #[test]
    fn empty_input_keeps_the_floor() {
        let chart = prepare(&[], Granularity::Year, RowOptions::default());
        assert!(chart.is_empty());
        assert_eq!(chart.y_max, 500.0);
    }

    #[test]
    fn soc_is_projected_but_ignored_for_y_max() {
        let mut s = sample("2024-06-01T12:00:00Z", 1200.0, 0.0, 0.0, 0.0);
        s.soc = Some(150.0);
        let chart = prepare(&[s], Granularity::Day, RowOptions::default());
        assert_eq!(chart.y_max, 1500.0);
        assert_eq!(chart.rows[0].soc_pct, 100.0);
        assert_eq!(chart.rows[0].soc_scaled, 1500.0);
    }
}
