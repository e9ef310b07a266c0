//! Particle parameters and per-frame particle state.

use helio_animation::{ClockId, TrackId};
use helio_core::{Point, Xorshift32};
use serde::{Deserialize, Serialize};

use crate::flow::FlowKind;

/// Per-particle variation, drawn once when the particle is spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleParams {
    pub motion_duration_ms: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Time for one leg of the pulse (min → max); the full pulse takes twice this.
    pub pulse_half_period_ms: f32,
}

impl ParticleParams {
    pub const MIN_SCALE: (f32, f32) = (0.6, 0.9);
    pub const MAX_SCALE: (f32, f32) = (1.0, 1.5);
    pub const PULSE_HALF_PERIOD_MS: (f32, f32) = (800.0, 1500.0);

    pub fn draw(kind: FlowKind, index: usize, rng: &mut Xorshift32) -> Self {
        Self {
            motion_duration_ms: kind.particle_duration_ms(index),
            min_scale: rng.range(Self::MIN_SCALE.0, Self::MIN_SCALE.1),
            max_scale: rng.range(Self::MAX_SCALE.0, Self::MAX_SCALE.1),
            pulse_half_period_ms: rng.range(
                Self::PULSE_HALF_PERIOD_MS.0,
                Self::PULSE_HALF_PERIOD_MS.1,
            ),
        }
    }
}

/// Handles of a live particle's clocks inside the animator's scheduler.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Particle {
    pub(crate) motion: ClockId,
    pub(crate) pulse: TrackId,
    pub(crate) params: ParticleParams,
}

/// Draw-ready state of one particle for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub flow: FlowKind,
    pub index: usize,
    pub phase: f32,
    pub position: Point,
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_params_stay_in_ranges() {
        let mut rng = Xorshift32::new(99);
        for i in 0..9 {
            let p = ParticleParams::draw(FlowKind::PvToBattery, i, &mut rng);
            assert!((0.6..=0.9).contains(&p.min_scale));
            assert!((1.0..=1.5).contains(&p.max_scale));
            assert!((800.0..=1500.0).contains(&p.pulse_half_period_ms));
            assert!(p.max_scale > p.min_scale);
        }
    }
}
