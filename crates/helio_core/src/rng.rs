/// Deterministic pseudo-random source for visual jitter.
///
/// Not suitable for anything but cosmetics; the point is that a given seed
/// always reproduces the same particle sizes and pulse periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

// xorshift has a fixed point at zero.
const ZERO_SEED_REPLACEMENT: u32 = 0x7F4A_7C15;

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Derive an independent stream, e.g. one per flow.
    pub fn fork(&mut self, salt: u32) -> Self {
        let mixed = self
            .next_u32()
            .wrapping_mul(0x9E37_79B9)
            .wrapping_add(salt);
        Self::new(mixed)
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits keep the result strictly below 1.0 in f32.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[lo, hi)`, up to f32 rounding at the top end.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift32::new(42);
        let mut b = Xorshift32::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stall() {
        let mut r = Xorshift32::new(0);
        assert_ne!(r.next_u32(), 0);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut r = Xorshift32::new(7);
        for _ in 0..10_000 {
            let v = r.range(0.6, 0.9);
            assert!((0.6..=0.9).contains(&v));
        }
    }
}
