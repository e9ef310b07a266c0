//! Opt-in resolution reduction for long month and year series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use helio_core::{abs_finite, finite_or_zero, non_negative};

use crate::rows::normalize_battery_units;
use crate::sample::{PowerSample, SampleTime};

const MONTH_FALLBACK_STRIDE: usize = 4;

/// Keep samples on the full hour; without any, keep every fourth sample.
pub fn downsample_month(samples: &[PowerSample]) -> Vec<PowerSample> {
    let hourly: Vec<PowerSample> = samples
        .iter()
        .filter(|s| s.timestamp.minute == 0)
        .cloned()
        .collect();
    if !hourly.is_empty() {
        return hourly;
    }
    samples
        .iter()
        .step_by(MONTH_FALLBACK_STRIDE)
        .cloned()
        .collect()
}

struct DayPeak {
    pv: f64,
    load: f64,
    feed_in: f64,
    battery: f64,
    soc: Option<(i64, f64)>,
}

/// Collapse a year of samples into one peak sample per calendar day, stamped at noon UTC.
///
/// Signs are re-applied so the result reads like feed data: load and feed-in
/// come back negative.
pub fn aggregate_year_by_day(samples: &[PowerSample]) -> Vec<PowerSample> {
    let mut days: BTreeMap<NaiveDate, DayPeak> = BTreeMap::new();
    for s in samples {
        let Some(date) = s.timestamp.date() else {
            continue;
        };
        let grid = finite_or_zero(s.grid_power);
        let peak = days.entry(date).or_insert(DayPeak {
            pv: 0.0,
            load: 0.0,
            feed_in: 0.0,
            battery: 0.0,
            soc: None,
        });
        peak.pv = peak.pv.max(non_negative(s.pv_power));
        peak.load = peak.load.max(abs_finite(s.load_power));
        peak.feed_in = peak.feed_in.max(if grid < 0.0 { -grid } else { 0.0 });
        peak.battery = peak.battery.max(normalize_battery_units(s.battery_power).abs());
        if let Some(soc) = s.soc {
            let ms = s.timestamp.ms;
            if peak.soc.map_or(true, |(at, _)| ms >= at) {
                peak.soc = Some((ms, soc));
            }
        }
    }

    days.into_iter()
        .filter_map(|(date, peak)| {
            Some(PowerSample {
                timestamp: SampleTime::noon_utc(date)?,
                pv_power: peak.pv,
                load_power: -peak.load,
                grid_power: -peak.feed_in,
                battery_power: peak.battery,
                soc: peak.soc.map(|(_, v)| v),
            })
        })
        .collect()
}
