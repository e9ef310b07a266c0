//! Power samples and feed ingestion.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use helio_core::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, Result};

/// Naive forms accepted when a timestamp carries no offset. They are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A sample instant: epoch milliseconds plus the wall-clock calendar parts
/// of the offset it was reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleTime {
    pub ms: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    offset_secs: i32,
}

impl SampleTime {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_fixed(&dt));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| Self::from_naive_utc(&naive))
            .ok_or_else(|| ChartError::Timestamp(s.to_string()))
    }

    pub fn from_fixed(dt: &DateTime<FixedOffset>) -> Self {
        let wall = dt.naive_local();
        Self {
            ms: dt.timestamp_millis(),
            offset_secs: dt.offset().local_minus_utc(),
            ..Self::wall_parts(&wall)
        }
    }

    pub fn from_naive_utc(naive: &NaiveDateTime) -> Self {
        Self {
            ms: naive.and_utc().timestamp_millis(),
            offset_secs: 0,
            ..Self::wall_parts(naive)
        }
    }

    /// `date` at 12:00 UTC.
    pub fn noon_utc(date: NaiveDate) -> Option<Self> {
        date.and_hms_opt(12, 0, 0)
            .map(|naive| Self::from_naive_utc(&naive))
    }

    fn wall_parts(wall: &NaiveDateTime) -> Self {
        Self {
            ms: 0,
            year: wall.year(),
            month: wall.month(),
            day: wall.day(),
            hour: wall.hour(),
            minute: wall.minute(),
            offset_secs: 0,
        }
    }

    /// Wall-clock calendar date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Starts a calendar day on the wall clock.
    pub fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }

    /// RFC 3339 form in the original offset.
    pub fn to_rfc3339(&self) -> String {
        let offset = FixedOffset::east_opt(self.offset_secs).unwrap_or(Utc.fix());
        DateTime::from_timestamp_millis(self.ms)
            .map(|utc| utc.with_timezone(&offset).to_rfc3339())
            .unwrap_or_default()
    }
}

impl FromStr for SampleTime {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SampleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for SampleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for SampleTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// One reading of the installation, all powers in watts.
///
/// Sign conventions are those of the feed: `grid_power < 0` is export,
/// `battery_power < 0` is charging, `load_power` is negative consumption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSample {
    pub timestamp: SampleTime,
    pub pv_power: f64,
    pub load_power: f64,
    pub grid_power: f64,
    pub battery_power: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soc: Option<f64>,
}

/// Feed record as the backend emits it.
#[derive(Deserialize)]
struct RawPowerSample {
    #[serde(default, alias = "_time", alias = "time")]
    timestamp: Option<String>,
    #[serde(default, alias = "pvPower", deserialize_with = "lenient::f64_or_zero")]
    pv_power: f64,
    #[serde(default, alias = "loadPower", deserialize_with = "lenient::f64_or_zero")]
    load_power: f64,
    #[serde(default, alias = "gridPower", deserialize_with = "lenient::f64_or_zero")]
    grid_power: f64,
    #[serde(
        default,
        alias = "batteryPower",
        deserialize_with = "lenient::f64_or_zero"
    )]
    battery_power: f64,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    soc: Option<f64>,
}

impl RawPowerSample {
    fn into_sample(self) -> Result<PowerSample> {
        let raw_time = self.timestamp.unwrap_or_default();
        Ok(PowerSample {
            timestamp: SampleTime::parse(&raw_time)?,
            pv_power: self.pv_power,
            load_power: self.load_power,
            grid_power: self.grid_power,
            battery_power: self.battery_power,
            soc: self.soc,
        })
    }
}

/// Parse a JSON feed document.
///
/// Fails only if the document is not an array. Records that are not objects
/// or carry an unusable timestamp are skipped with a warning.
pub fn parse_feed(json: &str) -> Result<Vec<PowerSample>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(samples_from_values(records))
}

/// Same as [`parse_feed`] for an already decoded document.
pub fn samples_from_values(records: Vec<serde_json::Value>) -> Vec<PowerSample> {
    let total = records.len();
    let samples: Vec<PowerSample> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let parsed = RawPowerSample::deserialize(value)
                .map_err(ChartError::from)
                .and_then(RawPowerSample::into_sample);
            match parsed {
                Ok(sample) => Some(sample),
                Err(err) => {
                    tracing::warn!(record = i, %err, "skipping feed record");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(total, kept = samples.len(), "feed parsed");
    samples
}
