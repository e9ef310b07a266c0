//! helio_flow
//!
//! Animated energy-flow diagram between four nodes: the sun (PV), the house,
//! the battery and the grid.
//!
//! The host feeds a [`FlowReadings`] snapshot and the container width into a
//! [`FlowAnimator`], advances it once per frame with `tick(dt_ms)` and paints
//! the returned [`ParticleFrame`]s. Colors, icons and labels stay with the host.
//!
//! ```
//! use helio_flow::{FlowAnimator, FlowKind, FlowReadings};
//!
//! let mut animator = FlowAnimator::default();
//! animator.set_width(390.0);
//! animator.update(
//!     FlowReadings {
//!         pv_total: 2400.0,
//!         pv_to_house: 2400.0,
//!         ..Default::default()
//!     },
//!     true,
//! );
//! animator.tick(16.0);
//!
//! assert!(animator.is_active(FlowKind::PvToHouse));
//! assert_eq!(animator.frames().len(), 7);
//! ```

mod animator;
mod flow;
mod particle;
mod readings;

pub mod layout;
pub mod path;
pub mod readout;

pub use animator::{FlowAnimator, FlowConfig};
pub use flow::{active_flows, FlowKind};
pub use layout::{NodeAnchors, NodeKind};
pub use particle::{ParticleFrame, ParticleParams};
pub use path::{cubic_curve, path_for, CurveProfile, FlowPath};
pub use readings::FlowReadings;
pub use readout::{BatteryState, GridState, NodeReadouts};
