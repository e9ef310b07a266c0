//! Helio Core
//!
//! Shared primitives for the Helio energy dashboard engines:
//!
//! - **Geometry**: the `Point` value type in layout pixels
//! - **Numeric**: sanitation helpers that turn untrusted readings into safe arithmetic inputs
//! - **Lenient**: serde helpers for feed numbers that may be strings, `null` or missing
//! - **Jitter**: a seeded `Xorshift32` source for reproducible per-particle variation

pub mod geometry;
pub mod lenient;
pub mod numeric;
pub mod rng;

pub use geometry::Point;
pub use numeric::{abs_finite, finite_or_zero, non_negative};
pub use rng::Xorshift32;
