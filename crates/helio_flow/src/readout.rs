//! Node value readouts shown next to the diagram markers.

use helio_core::{abs_finite, finite_or_zero, non_negative};
use serde::{Deserialize, Serialize};

use crate::readings::FlowReadings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryState {
    Charging,
    Discharging,
    Idle,
}

impl BatteryState {
    pub fn from_power(battery_power: f64) -> Self {
        let p = finite_or_zero(battery_power);
        if p < 0.0 {
            BatteryState::Charging
        } else if p > 0.0 {
            BatteryState::Discharging
        } else {
            BatteryState::Idle
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridState {
    Importing,
    Exporting,
    Idle,
}

impl GridState {
    pub fn from_power(grid_power: f64) -> Self {
        let p = finite_or_zero(grid_power);
        if p > 0.0 {
            GridState::Importing
        } else if p < 0.0 {
            GridState::Exporting
        } else {
            GridState::Idle
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeReadouts {
    pub pv_w: f64,
    pub house_w: f64,
    pub battery_w: f64,
    pub battery_state: BatteryState,
    pub grid_w: f64,
    pub grid_state: GridState,
    pub text: ReadoutText,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadoutText {
    pub pv: String,
    pub house: String,
    pub battery: String,
    pub grid: String,
}

impl NodeReadouts {
    pub fn from_readings(r: &FlowReadings) -> Self {
        let pv_w = non_negative(r.pv_total);
        let house_w = non_negative(r.house_actual);
        let battery_w = abs_finite(r.battery_power);
        let grid_w = abs_finite(r.grid_power);
        Self {
            pv_w,
            house_w,
            battery_w,
            battery_state: BatteryState::from_power(r.battery_power),
            grid_w,
            grid_state: GridState::from_power(r.grid_power),
            text: ReadoutText {
                pv: format_watts_1dp(pv_w),
                house: format_watts_1dp(house_w),
                battery: format_watts_1dp(battery_w),
                grid: format_watts_1dp(grid_w),
            },
        }
    }
}

/// Round to one decimal and drop a trailing `.0`: `1234.56 → "1234.6 W"`, `1500 → "1500 W"`.
pub fn format_watts_1dp(v: f64) -> String {
    // `+ 0.0` folds negative zero.
    let rounded = (finite_or_zero(v) * 10.0).round() / 10.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} W")
    } else {
        format!("{rounded:.1} W")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_follow_sign_conventions() {
        assert_eq!(BatteryState::from_power(-10.0), BatteryState::Charging);
        assert_eq!(BatteryState::from_power(10.0), BatteryState::Discharging);
        assert_eq!(BatteryState::from_power(f64::NAN), BatteryState::Idle);
        assert_eq!(GridState::from_power(10.0), GridState::Importing);
        assert_eq!(GridState::from_power(-10.0), GridState::Exporting);
    }

    #[test]
    fn watts_keep_one_decimal_only_when_needed() {
        assert_eq!(format_watts_1dp(1234.56), "1234.6 W");
        assert_eq!(format_watts_1dp(1500.0), "1500 W");
        assert_eq!(format_watts_1dp(f64::NAN), "0 W");
        assert_eq!(format_watts_1dp(-0.04), "0 W");
        assert_eq!(format_watts_1dp(-12.34), "-12.3 W");
    }

    #[test]
    fn readouts_use_magnitudes() {
        let r = FlowReadings {
            pv_total: 3000.0,
            house_actual: 800.0,
            battery_power: -1200.0,
            grid_power: -1000.0,
            ..Default::default()
        };
        let out = NodeReadouts::from_readings(&r);
        assert_eq!(out.battery_w, 1200.0);
        assert_eq!(out.battery_state, BatteryState::Charging);
        assert_eq!(out.grid_state, GridState::Exporting);
        assert_eq!(out.text.grid, "1000 W");
    }
}
