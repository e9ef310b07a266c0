//! Label and value formatting for axes, tooltips and the inspector.

use serde::{Deserialize, Serialize};

use helio_core::{finite_or_zero, non_negative};

use crate::date_selection::Granularity;
use crate::sample::SampleTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// Short month name for a 1-based month; empty for anything else.
    pub fn month_short(self, month: u32) -> &'static str {
        let names = match self {
            Locale::De => &MONTHS_DE,
            Locale::En => &MONTHS_EN,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize))
            .copied()
            .unwrap_or("")
    }
}

pub fn axis_label(t: &SampleTime, granularity: Granularity, locale: Locale) -> String {
    match granularity {
        Granularity::Day => format!("{:02}:{:02}", t.hour, t.minute),
        Granularity::Month => format!("{:02}.{:02}", t.day, t.month),
        Granularity::Year => locale.month_short(t.month).to_string(),
    }
}

pub fn tooltip_label(t: &SampleTime, granularity: Granularity, locale: Locale) -> String {
    let stamp = format!(
        "{:02}.{:02}.{:04} {:02}:{:02}",
        t.day, t.month, t.year, t.hour, t.minute
    );
    match granularity {
        Granularity::Year => format!("{} {stamp}", locale.month_short(t.month)),
        Granularity::Day | Granularity::Month => stamp,
    }
}

pub fn format_watts(v: f64) -> String {
    // `+ 0.0` folds negative zero so small negatives print as "0 W".
    format!("{:.0} W", finite_or_zero(v).round() + 0.0)
}

pub fn format_percent(v: f64) -> String {
    format!("{:.0} %", non_negative(v).min(100.0).round())
}

pub fn format_kwh(v: f64) -> String {
    format!("{:.2} kWh", finite_or_zero(v) + 0.0)
}
