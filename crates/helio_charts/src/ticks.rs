//! X-axis tick selection per granularity.
//!
//! Ticks are sample indices. Day views use a snapped regular step, month views
//! mark selected midnights and year views mark the first sample of each month.
//! Month and year fall back to evenly spaced indices when the data has no
//! matching samples, so non-empty data always yields at least one tick.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::date_selection::{DateSelection, Granularity};
use crate::rows::ChartRow;
use crate::sample::SampleTime;
use crate::scale::LinearScale;

/// Every day-view step is one of these.
pub const DAY_STEP_CANDIDATES: [usize; 13] = [1, 2, 3, 4, 6, 8, 12, 16, 24, 32, 48, 64, 96];

const DAY_TARGET_LABELS: f64 = 12.0;
const MONTH_FALLBACK_LABELS: f64 = 10.0;
const YEAR_FALLBACK_LABELS: f64 = 12.0;

/// Nearest candidate to `raw`; the smaller one on a tie.
pub fn snap_day_step(raw: usize) -> usize {
    let mut best = DAY_STEP_CANDIDATES[0];
    for &candidate in &DAY_STEP_CANDIDATES[1..] {
        if candidate.abs_diff(raw) < best.abs_diff(raw) {
            best = candidate;
        }
    }
    best
}

pub fn day_tick_step(n: usize) -> usize {
    snap_day_step((n as f64 / DAY_TARGET_LABELS).round() as usize)
}

pub fn day_ticks(n: usize) -> Vec<usize> {
    (0..n).step_by(day_tick_step(n)).collect()
}

/// Spacing in days between month-view labels.
pub fn month_tick_step(days_in_month: u32) -> u32 {
    match days_in_month.div_ceil(10) {
        0..=2 => 2,
        3 => 3,
        4 => 4,
        c => c.min(7),
    }
}

pub fn month_ticks(times: &[SampleTime], days_in_month: u32) -> Vec<usize> {
    let step = month_tick_step(days_in_month);
    let mut seen = FxHashSet::default();
    let ticks: Vec<usize> = times
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_midnight() && (t.day - 1) % step == 0 && seen.insert(t.day))
        .map(|(i, _)| i)
        .collect();

    if ticks.is_empty() && !times.is_empty() {
        tracing::debug!(
            samples = times.len(),
            "no midnight samples, spacing month ticks evenly"
        );
        return evenly_spaced(times.len(), MONTH_FALLBACK_LABELS);
    }
    ticks
}

pub fn year_ticks(times: &[SampleTime]) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    let ticks: Vec<usize> = times
        .iter()
        .enumerate()
        .filter(|(_, t)| t.day == 1 && t.hour == 0 && seen.insert((t.year, t.month)))
        .map(|(i, _)| i)
        .collect();

    if ticks.is_empty() && !times.is_empty() {
        tracing::debug!(
            samples = times.len(),
            "no month starts, spacing year ticks evenly"
        );
        return evenly_spaced(times.len(), YEAR_FALLBACK_LABELS);
    }
    ticks
}

/// `0, step, 2·step, …` with `step = max(1, round(n / target))`.
pub fn evenly_spaced(n: usize, target: f64) -> Vec<usize> {
    let step = ((n as f64 / target).round() as usize).max(1);
    (0..n).step_by(step).collect()
}

/// Tick indices for the samples of `selection`.
pub fn tick_indices(times: &[SampleTime], selection: &DateSelection) -> Vec<usize> {
    match selection.granularity() {
        Granularity::Day => day_ticks(times.len()),
        Granularity::Month => month_ticks(times, selection.days_in_month().unwrap_or(31)),
        Granularity::Year => year_ticks(times),
    }
}

/// A labelled tick placed on the plot's x axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub index: usize,
    pub px: f64,
    pub label: String,
}

/// Place tick `indices` along a plot of `plot_width`. An empty plot gets no ticks.
pub fn axis_ticks(indices: &[usize], rows: &[ChartRow], plot_width: f64) -> Vec<AxisTick> {
    if !(plot_width.is_finite() && plot_width > 0.0) {
        return Vec::new();
    }
    let s = LinearScale::index(rows.len(), plot_width);
    indices
        .iter()
        .filter_map(|&i| rows.get(i))
        .map(|row| AxisTick {
            index: row.index,
            px: s.map(row.index as f64),
            label: row.axis_label.clone(),
        })
        .collect()
}
