//! Looping keyframe tracks
//!
//! A track maps a loop clock's phase onto a value through a list of keyframes.
//! Particle pulsing is the main user: `min → max → min` with an in-out curve
//! on both legs.

use smallvec::SmallVec;

use crate::clock::LoopClock;
use crate::easing::Easing;

/// A single keyframe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Phase position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing used when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time,
            value,
            easing,
        }
    }
}

/// A keyframe track driven by its own loop clock.
#[derive(Clone, Debug)]
pub struct KeyframeLoop {
    clock: LoopClock,
    keyframes: SmallVec<[Keyframe; 4]>,
}

impl KeyframeLoop {
    /// Keyframes are sorted by time; times outside `[0, 1]` are clamped.
    pub fn new(period_ms: f32, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keyframes: SmallVec<[Keyframe; 4]> = keyframes
            .into_iter()
            .map(|mut kf| {
                kf.time = if kf.time.is_finite() {
                    kf.time.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                kf
            })
            .collect();
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            clock: LoopClock::new(period_ms),
            keyframes,
        }
    }

    /// Rise `from → to` over `half_period_ms`, then fall back over the same time.
    pub fn ping_pong(from: f32, to: f32, half_period_ms: f32, easing: Easing) -> Self {
        Self::new(
            half_period_ms * 2.0,
            [
                Keyframe::new(0.0, from, Easing::Linear),
                Keyframe::new(0.5, to, easing),
                Keyframe::new(1.0, from, easing),
            ],
        )
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.clock.advance(dt_ms);
    }

    pub fn period_ms(&self) -> f32 {
        self.clock.duration_ms()
    }

    /// Value at the current phase.
    pub fn value(&self) -> f32 {
        self.value_at(self.clock.phase())
    }

    /// Value at an arbitrary phase in `[0, 1]`.
    pub fn value_at(&self, phase: f32) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };
        let progress = if phase.is_finite() {
            phase.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut prev = first;
        let mut next = first;
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev = kf;
            }
            if kf.time >= progress {
                next = kf;
                break;
            }
        }

        let span = next.time - prev.time;
        if span.abs() < f32::EPSILON {
            return prev.value;
        }

        let local = (progress - prev.time) / span;
        prev.value + (next.value - prev.value) * next.easing.apply(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_pong_hits_extremes() {
        let track = KeyframeLoop::ping_pong(0.6, 1.4, 1000.0, Easing::EaseInOut);
        assert!((track.value_at(0.0) - 0.6).abs() < 1e-6);
        assert!((track.value_at(0.5) - 1.4).abs() < 1e-6);
        assert!((track.value_at(1.0) - 0.6).abs() < 1e-6);
        assert_eq!(track.period_ms(), 2000.0);
    }

    #[test]
    fn ping_pong_is_mirrored() {
        let track = KeyframeLoop::ping_pong(0.0, 1.0, 500.0, Easing::EaseInOut);
        for p in [0.1_f32, 0.2, 0.35] {
            assert!((track.value_at(p) - track.value_at(1.0 - p)).abs() < 1e-4);
        }
    }

    #[test]
    fn value_follows_the_clock() {
        let mut track = KeyframeLoop::ping_pong(0.0, 1.0, 500.0, Easing::Linear);
        track.advance(250.0);
        assert!((track.value() - 0.5).abs() < 1e-5);
        track.advance(250.0);
        assert!((track.value() - 1.0).abs() < 1e-5);
        track.advance(500.0);
        assert!(track.value().abs() < 1e-5);
    }

    #[test]
    fn empty_track_is_zero() {
        let track = KeyframeLoop::new(100.0, []);
        assert_eq!(track.value(), 0.0);
    }
}
