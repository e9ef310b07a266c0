//! helio_charts
//!
//! Power-over-time chart engine for the Helio dashboard. Turns a feed of
//! timestamped samples and a [`DateSelection`] into drawable rows, axis ticks
//! suited to the selected granularity and a tap resolver for the inspector.
//!
//! ```
//! use helio_charts::{parse_feed, ChartConfig, ChartEngine, DateSelection};
//!
//! let feed = r#"[
//!     {"_time": "2024-06-01T10:00:00+02:00", "pv_power": 2600, "load_power": -700, "grid_power": -1500, "battery_power": -0.4},
//!     {"_time": "2024-06-01T10:15:00+02:00", "pv_power": 2900, "load_power": -650, "grid_power": -1800, "battery_power": -0.45}
//! ]"#;
//!
//! let mut chart = ChartEngine::new(ChartConfig::default(), DateSelection::day(2024, 6, 1)?);
//! chart.set_samples(parse_feed(feed)?);
//!
//! assert_eq!(chart.rows()[1].feed_in, 1800.0);
//! assert_eq!(chart.y_max(), 3000.0);
//! assert_eq!(chart.ticks(), &[0, 1]);
//! # Ok::<(), helio_charts::ChartError>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod date_selection;
pub mod error;
pub mod format;
pub mod layout;
pub mod rows;
pub mod sample;
pub mod scale;
pub mod selection;
pub mod ticks;
pub mod totals;

mod engine;

pub use aggregate::{aggregate_year_by_day, downsample_month};
pub use config::ChartConfig;
pub use date_selection::{days_in_month, DateSelection, Granularity};
pub use engine::ChartEngine;
pub use error::{ChartError, Result};
pub use format::Locale;
pub use hit_test::{resolve, HitTestParams};
pub use layout::{content_width, PlotArea};
pub use rows::{normalize_battery_units, prepare, ChartRow, PreparedChart, RowOptions};
pub use sample::{parse_feed, PowerSample, SampleTime};
pub use selection::{SelectedSample, SelectedText, SelectionEvent, SelectionState};
pub use ticks::{month_tick_step, tick_indices, AxisTick};
pub use totals::{integrate_energy, PeriodTotals, TotalsText};
