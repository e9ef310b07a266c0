//! Date range selection and the chart granularity it implies.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Time resolution of a chart view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of days in `month` (1-based) of `year`.
///
/// `0` for an invalid month or a year outside chrono's calendar range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1), 1)
    } else {
        (Some(year), month + 1)
    };
    next_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// `{ year, month?, day? }`.
///
/// A day is only ever set together with a month and always lies inside it.
/// Moving to another year or month clamps the day to the new month's last day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateSelection")]
pub struct DateSelection {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

#[derive(Deserialize)]
struct RawDateSelection {
    year: i32,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    day: Option<u32>,
}

impl TryFrom<RawDateSelection> for DateSelection {
    type Error = ChartError;

    fn try_from(raw: RawDateSelection) -> Result<Self> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl DateSelection {
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self> {
        match (month, day) {
            (None, None) => Ok(Self::year(year)),
            (None, Some(_)) => Err(ChartError::DayWithoutMonth),
            (Some(m), None) => Self::month(year, m),
            (Some(m), Some(d)) => Self::day(year, m, d),
        }
    }

    /// A whole year.
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    /// A whole month.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        check_month(month)?;
        Ok(Self {
            year,
            month: Some(month),
            day: None,
        })
    }

    /// A single day.
    pub fn day(year: i32, month: u32, day: u32) -> Result<Self> {
        check_month(month)?;
        let days = days_in_month(year, month);
        if day == 0 || day > days {
            return Err(ChartError::InvalidDay {
                year,
                month,
                day,
                days_in_month: days,
            });
        }
        Ok(Self {
            year,
            month: Some(month),
            day: Some(day),
        })
    }

    pub fn year_value(&self) -> i32 {
        self.year
    }

    pub fn month_value(&self) -> Option<u32> {
        self.month
    }

    pub fn day_value(&self) -> Option<u32> {
        self.day
    }

    pub fn granularity(&self) -> Granularity {
        match (self.month, self.day) {
            (Some(_), Some(_)) => Granularity::Day,
            (Some(_), None) => Granularity::Month,
            _ => Granularity::Year,
        }
    }

    /// Day count of the selected month, if a month is selected.
    pub fn days_in_month(&self) -> Option<u32> {
        self.month.map(|m| days_in_month(self.year, m))
    }

    /// Same month and day in another year, clamping 29 Feb.
    pub fn with_year(self, year: i32) -> Self {
        let mut next = Self { year, ..self };
        next.clamp_day();
        next
    }

    /// Switch month, keeping the granularity and clamping the day.
    pub fn with_month(self, month: u32) -> Result<Self> {
        check_month(month)?;
        let mut next = Self {
            month: Some(month),
            ..self
        };
        next.clamp_day();
        Ok(next)
    }

    /// Select a day of the current month, or drop to month granularity with `None`.
    pub fn with_day(self, day: Option<u32>) -> Result<Self> {
        Self::new(self.year, self.month, day)
    }

    /// Widen to the whole year.
    pub fn without_month(self) -> Self {
        Self::year(self.year)
    }

    fn clamp_day(&mut self) {
        if let (Some(month), Some(day)) = (self.month, self.day) {
            self.day = Some(day.min(days_in_month(self.year, month)).max(1));
        }
    }
}

impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (Some(m), Some(d)) => write!(f, "{:04}-{m:02}-{d:02}", self.year),
            (Some(m), None) => write!(f, "{:04}-{m:02}", self.year),
            _ => write!(f, "{:04}", self.year),
        }
    }
}

fn check_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ChartError::InvalidMonth(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_follows_set_fields() {
        assert_eq!(DateSelection::year(2024).granularity(), Granularity::Year);
        assert_eq!(
            DateSelection::month(2024, 3).unwrap().granularity(),
            Granularity::Month
        );
        assert_eq!(
            DateSelection::day(2024, 3, 9).unwrap().granularity(),
            Granularity::Day
        );
    }

    #[test]
    fn switching_to_february_clamps_the_day() {
        let jan31 = DateSelection::day(2023, 1, 31).unwrap();
        assert_eq!(jan31.with_month(2).unwrap().day_value(), Some(28));

        let leap = DateSelection::day(2024, 1, 31).unwrap();
        assert_eq!(leap.with_month(2).unwrap().day_value(), Some(29));

        let feb29 = DateSelection::day(2024, 2, 29).unwrap();
        assert_eq!(feb29.with_year(2025).day_value(), Some(28));
    }

    #[test]
    fn rejects_invalid_combinations() {
        assert!(matches!(
            DateSelection::new(2024, None, Some(3)),
            Err(ChartError::DayWithoutMonth)
        ));
        assert!(matches!(
            DateSelection::month(2024, 13),
            Err(ChartError::InvalidMonth(13))
        ));
        assert!(DateSelection::day(2023, 2, 29).is_err());
        assert!(DateSelection::year(2024).with_month(0).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: DateSelection = serde_json::from_str(r#"{"year":2024,"month":4}"#).unwrap();
        assert_eq!(ok.granularity(), Granularity::Month);
        assert!(serde_json::from_str::<DateSelection>(r#"{"year":2024,"month":4,"day":31}"#)
            .is_err());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 13), 0);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(i32::MAX, 6), 0);
    }

    #[test]
    fn year_outside_the_calendar_keeps_a_valid_day() {
        let sel = DateSelection::day(2024, 2, 29).unwrap().with_year(i32::MAX);
        assert_eq!(sel.day_value(), Some(1));
        assert_eq!(sel.with_year(2023).day_value(), Some(1));
    }
}
