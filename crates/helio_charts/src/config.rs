//! Chart engine configuration

use serde::{Deserialize, Serialize};

use crate::format::Locale;
use crate::hit_test::HitTestParams;

/// Chart settings (`[chart]` in `helio.toml`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Draw the battery series and let it raise the value axis.
    pub show_battery: bool,
    /// Draw the state-of-charge line and include it in the inspector.
    pub show_soc: bool,
    pub locale: Locale,
    /// Reduce month views to hourly samples.
    pub month_downsample: bool,
    /// Reduce year views to one peak sample per day.
    pub year_daily_aggregate: bool,
    /// Outer height of the chart box in pixels.
    pub plot_height: f64,
    pub hit_test: HitTestParams,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_battery: false,
            show_soc: true,
            locale: Locale::De,
            month_downsample: false,
            year_daily_aggregate: false,
            plot_height: 260.0,
            hit_test: HitTestParams::default(),
        }
    }
}
