//! Easing curves applied to a loop phase

/// Control points of the ease-in curve that `EaseInOut` mirrors.
const EASE_IN: (f32, f32, f32, f32) = (0.42, 0.0, 1.0, 1.0);

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// The ease-in curve `(0.42, 0, 1, 1)` applied to the first half and
    /// mirrored on the second, so the motion is symmetric around `t = 0.5`.
    EaseInOut,
    /// CSS-style cubic bezier with implicit endpoints `(0,0)` and `(1,1)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value, clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match *self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                let (x1, y1, x2, y2) = EASE_IN;
                if t < 0.5 {
                    bezier_ease(t * 2.0, x1, y1, x2, y2) / 2.0
                } else {
                    1.0 - bezier_ease((1.0 - t) * 2.0, x1, y1, x2, y2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

/// Solve `x(p) = t` for the curve parameter, then return `y(p)`.
///
/// `x(p)` is monotonic for control x-values in `[0, 1]`, so bisection always
/// converges; a few Newton steps first make the common case cheap.
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = target;
    for _ in 0..6 {
        let err = component(p, x1, x2) - target;
        if err.abs() < 1e-7 {
            return component(p, y1, y2) as f32;
        }
        let d = derivative(p, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        p = (p - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = target;
    for _ in 0..32 {
        let x = component(p, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = 0.5 * (lo + hi);
    }

    component(p, y1, y2) as f32
}

/// One coordinate of a cubic bezier with endpoints 0 and 1.
#[inline]
fn component(p: f64, c1: f64, c2: f64) -> f64 {
    let q = 1.0 - p;
    3.0 * q * q * p * c1 + 3.0 * q * p * p * c2 + p * p * p
}

#[inline]
fn derivative(p: f64, c1: f64, c2: f64) -> f64 {
    let q = 1.0 - p;
    3.0 * q * q * c1 + 6.0 * q * p * (c2 - c1) + 3.0 * p * p * (1.0 - c2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [Easing::Linear, Easing::EaseInOut, Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-5);
        for t in [0.1_f32, 0.2, 0.3, 0.4] {
            let a = e.apply(t);
            let b = e.apply(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-4, "t={t} a={a} b={b}");
        }
    }

    #[test]
    fn ease_in_out_starts_slow() {
        assert!(Easing::EaseInOut.apply(0.1) < 0.1);
    }

    #[test]
    fn linear_bezier_is_identity() {
        let e = Easing::CubicBezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for t in [0.1_f32, 0.37, 0.8] {
            assert!((e.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }
}
