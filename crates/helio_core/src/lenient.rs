//! Lenient numeric deserializers for feed fields.
//!
//! The backend emits numbers, numeric strings, `null` or nothing at all for
//! the same field depending on device state. Use with
//! `#[serde(default, deserialize_with = "...")]`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::numeric::finite_or_zero;

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LenientNumber {
    fn into_option(self) -> Option<f64> {
        match self {
            LenientNumber::Number(v) => Some(v),
            LenientNumber::Text(s) => s.trim().parse::<f64>().ok(),
            LenientNumber::Other(_) => None,
        }
        .filter(|v| v.is_finite())
    }
}

/// Any JSON value to a finite `f64`; unusable values become `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = LenientNumber::deserialize(deserializer)?;
    Ok(finite_or_zero(raw.into_option().unwrap_or(0.0)))
}

/// Any JSON value to `Some(finite f64)`; unusable values become `None`.
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LenientNumber::deserialize(deserializer)?.into_option())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "super::f64_or_zero")]
        power: f64,
        #[serde(default, deserialize_with = "super::option_f64")]
        soc: Option<f64>,
    }

    fn parse(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let r = parse(r#"{"power": 1200, "soc": "55.5"}"#);
        assert_eq!(r.power, 1200.0);
        assert_eq!(r.soc, Some(55.5));
    }

    #[test]
    fn null_missing_and_garbage_degrade() {
        let r = parse(r#"{"power": null}"#);
        assert_eq!(r.power, 0.0);
        assert_eq!(r.soc, None);

        let r = parse(r#"{"power": "n/a", "soc": [1, 2]}"#);
        assert_eq!(r.power, 0.0);
        assert_eq!(r.soc, None);

        let r = parse(r#"{"power": true, "soc": {"v": 3}}"#);
        assert_eq!(r.power, 0.0);
        assert_eq!(r.soc, None);
    }
}
