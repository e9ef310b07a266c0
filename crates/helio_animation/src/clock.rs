//! Looping phase clock

/// A phase accumulator that repeats `0 → 1` every `duration_ms`.
///
/// Advancing is `phase = (phase + dt / duration) mod 1`; the clock never
/// terminates on its own. A non-positive or non-finite duration freezes the
/// phase at its current value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopClock {
    duration_ms: f32,
    phase: f32,
    loops: u64,
}

impl LoopClock {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            phase: 0.0,
            loops: 0,
        }
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Completed loops since creation.
    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Advance by `dt_ms`. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return;
        }

        let next = self.phase + dt_ms / self.duration_ms;
        let wraps = next.floor();
        self.loops = self.loops.saturating_add(wraps as u64);
        self.phase = next - wraps;
        // `next - floor(next)` can round up to exactly 1.0 in f32.
        if self.phase >= 1.0 {
            self.phase = 0.0;
            self.loops = self.loops.saturating_add(1);
        }
    }
}
