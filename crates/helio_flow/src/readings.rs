//! Readings snapshot fed to the flow animator.

use helio_core::lenient::f64_or_zero;
use helio_core::{finite_or_zero, non_negative};
use serde::{Deserialize, Serialize};

/// Instantaneous power readings for the flow diagram, in watts.
///
/// Flow magnitudes are expected non-negative. `battery_power` is signed
/// (negative = charging) and so is `grid_power` (negative = export).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReadings {
    #[serde(default, alias = "total", deserialize_with = "f64_or_zero")]
    pub pv_total: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub pv_to_house: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub pv_to_battery: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub pv_to_grid: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub grid_to_house: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub battery_to_house: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub house_actual: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub battery_power: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub grid_power: f64,
}

impl FlowReadings {
    /// Clamp magnitudes to `>= 0` and zero every non-finite field.
    pub fn sanitized(&self) -> Self {
        Self {
            pv_total: non_negative(self.pv_total),
            pv_to_house: non_negative(self.pv_to_house),
            pv_to_battery: non_negative(self.pv_to_battery),
            pv_to_grid: non_negative(self.pv_to_grid),
            grid_to_house: non_negative(self.grid_to_house),
            battery_to_house: non_negative(self.battery_to_house),
            house_actual: non_negative(self.house_actual),
            battery_power: finite_or_zero(self.battery_power),
            grid_power: finite_or_zero(self.grid_power),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_magnitudes_but_keeps_signs() {
        let r = FlowReadings {
            pv_total: -5.0,
            pv_to_house: f64::NAN,
            battery_power: -300.0,
            grid_power: f64::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(r.pv_total, 0.0);
        assert_eq!(r.pv_to_house, 0.0);
        assert_eq!(r.battery_power, -300.0);
        assert_eq!(r.grid_power, 0.0);
    }

    #[test]
    fn deserializes_dashboard_payload() {
        let r: FlowReadings = serde_json::from_str(
            r#"{"total": 3200, "pvToHouse": 800, "pvToBattery": "1200", "gridPower": -1200, "batteryPower": null}"#,
        )
        .unwrap();
        assert_eq!(r.pv_total, 3200.0);
        assert_eq!(r.pv_to_house, 800.0);
        assert_eq!(r.pv_to_battery, 1200.0);
        assert_eq!(r.grid_power, -1200.0);
        assert_eq!(r.battery_power, 0.0);
        assert_eq!(r.battery_to_house, 0.0);
    }
}
