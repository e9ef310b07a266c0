//! Animation scheduler
//!
//! Owns every live clock and keyframe track and advances them together each
//! frame. Removing an id discards its state; re-adding starts fresh.

use slotmap::{new_key_type, SlotMap};

use crate::clock::LoopClock;
use crate::keyframe::KeyframeLoop;

new_key_type! {
    pub struct ClockId;
    pub struct TrackId;
}

/// The animation scheduler that ticks all live clocks and tracks
#[derive(Default)]
pub struct AnimationScheduler {
    clocks: SlotMap<ClockId, LoopClock>,
    tracks: SlotMap<TrackId, KeyframeLoop>,
    elapsed_ms: f64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clock(&mut self, clock: LoopClock) -> ClockId {
        self.clocks.insert(clock)
    }

    pub fn add_track(&mut self, track: KeyframeLoop) -> TrackId {
        self.tracks.insert(track)
    }

    pub fn remove_clock(&mut self, id: ClockId) -> Option<LoopClock> {
        self.clocks.remove(id)
    }

    pub fn remove_track(&mut self, id: TrackId) -> Option<KeyframeLoop> {
        self.tracks.remove(id)
    }

    /// Phase of a clock, `None` once removed.
    pub fn phase(&self, id: ClockId) -> Option<f32> {
        self.clocks.get(id).map(LoopClock::phase)
    }

    /// Current value of a track, `None` once removed.
    pub fn value(&self, id: TrackId) -> Option<f32> {
        self.tracks.get(id).map(KeyframeLoop::value)
    }

    /// Advance everything by `dt_ms`. Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            tracing::trace!(dt_ms, "ignoring non-advancing frame delta");
            return;
        }
        self.elapsed_ms += dt_ms as f64;
        for (_, clock) in self.clocks.iter_mut() {
            clock.advance(dt_ms);
        }
        for (_, track) in self.tracks.iter_mut() {
            track.advance(dt_ms);
        }
    }

    /// Total time advanced since creation.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}
