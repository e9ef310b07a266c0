/// Affine mapping between a data domain and a pixel range.
///
/// A degenerate domain maps everything to `range_min`; a degenerate range
/// inverts everything to `domain_min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    /// Sample index `0..n` across `0..=width`.
    pub fn index(n: usize, width: f64) -> Self {
        Self::new(0.0, n.saturating_sub(1) as f64, 0.0, width)
    }

    /// Value `0..=y_max` onto a plot of `height`, larger values higher up.
    pub fn value(y_max: f64, height: f64) -> Self {
        Self::new(0.0, y_max, height, 0.0)
    }

    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let r = self.range_max - self.range_min;
        if r.abs() < 1e-12 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}
