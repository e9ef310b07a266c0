//! Helio Animation System
//!
//! Continuous, frame-driven animation primitives. Nothing here owns a timer:
//! the host advances everything with an explicit `dt` so the math is testable
//! by stepping synthetic time.
//!
//! # Features
//!
//! - **Loop clocks**: phase accumulators repeating `0 → 1` over a duration
//! - **Keyframe loops**: eased keyframe tracks sampled from a loop clock
//! - **Scheduler**: slotmap registry that ticks every live clock and track at once

pub mod clock;
pub mod easing;
pub mod keyframe;
pub mod scheduler;

pub use clock::LoopClock;
pub use easing::Easing;
pub use keyframe::{Keyframe, KeyframeLoop};
pub use scheduler::{AnimationScheduler, ClockId, TrackId};
