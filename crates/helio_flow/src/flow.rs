//! The five power flows and their activity predicates.
//!
//! Nothing is active while the data source is unavailable.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::layout::NodeKind;
use crate::readings::FlowReadings;

/// One directed power transfer between two diagram nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    PvToHouse,
    PvToBattery,
    PvToGrid,
    GridToHouse,
    BatteryToHouse,
}

impl FlowKind {
    pub const ALL: [FlowKind; 5] = [
        FlowKind::PvToHouse,
        FlowKind::PvToBattery,
        FlowKind::PvToGrid,
        FlowKind::GridToHouse,
        FlowKind::BatteryToHouse,
    ];

    pub fn source(self) -> NodeKind {
        match self {
            FlowKind::PvToHouse | FlowKind::PvToBattery | FlowKind::PvToGrid => NodeKind::Sun,
            FlowKind::GridToHouse => NodeKind::Grid,
            FlowKind::BatteryToHouse => NodeKind::Battery,
        }
    }

    pub fn target(self) -> NodeKind {
        match self {
            FlowKind::PvToHouse | FlowKind::GridToHouse | FlowKind::BatteryToHouse => {
                NodeKind::House
            }
            FlowKind::PvToBattery => NodeKind::Battery,
            FlowKind::PvToGrid => NodeKind::Grid,
        }
    }

    /// Flows leaving the sun are drawn straight; the others bow around it.
    pub fn is_curved(self) -> bool {
        matches!(self, FlowKind::GridToHouse | FlowKind::BatteryToHouse)
    }

    /// Particles spawned while the flow is active.
    pub fn particle_count(self) -> usize {
        match self {
            FlowKind::PvToHouse => 7,
            FlowKind::PvToBattery => 9,
            FlowKind::PvToGrid => 6,
            FlowKind::GridToHouse => 6,
            FlowKind::BatteryToHouse => 7,
        }
    }

    /// Loop duration of the first particle; later ones run slower.
    pub fn base_duration_ms(self) -> f32 {
        match self {
            FlowKind::PvToHouse => 2600.0,
            FlowKind::PvToBattery => 2400.0,
            FlowKind::PvToGrid => 2800.0,
            FlowKind::GridToHouse => 2400.0,
            FlowKind::BatteryToHouse => 2400.0,
        }
    }

    /// Loop duration for particle `i`: `base + (base / count) * i`.
    pub fn particle_duration_ms(self, i: usize) -> f32 {
        let base = self.base_duration_ms();
        let count = self.particle_count().max(1) as f32;
        base + (base / count) * i as f32
    }

    /// Activity predicate on sanitized readings.
    pub fn is_active(self, r: &FlowReadings, available: bool) -> bool {
        if !available {
            return false;
        }
        let pv_on = r.pv_total > 0.0;
        match self {
            FlowKind::PvToHouse => pv_on && r.pv_to_house > 0.0,
            FlowKind::PvToBattery => pv_on && r.pv_to_battery > 0.0,
            // Exporting implies PV feeds the grid even when the split is missing.
            FlowKind::PvToGrid => pv_on && (r.pv_to_grid > 0.0 || r.grid_power < 0.0),
            // Importing implies grid feeds the house even when the split is missing.
            FlowKind::GridToHouse => r.grid_power > 0.0 || r.grid_to_house > 0.0,
            FlowKind::BatteryToHouse => r.battery_to_house > 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowKind::PvToHouse => "pv->house",
            FlowKind::PvToBattery => "pv->battery",
            FlowKind::PvToGrid => "pv->grid",
            FlowKind::GridToHouse => "grid->house",
            FlowKind::BatteryToHouse => "battery->house",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every flow whose predicate holds, in `FlowKind::ALL` order.
///
/// Readings are sanitized here, so callers may pass raw values.
pub fn active_flows(readings: &FlowReadings, available: bool) -> SmallVec<[FlowKind; 5]> {
    let r = readings.sanitized();
    FlowKind::ALL
        .into_iter()
        .filter(|k| k.is_active(&r, available))
        .collect()
}
