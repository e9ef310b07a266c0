//! Chart geometry: scrollable content width, plot area and point placement.

use serde::{Deserialize, Serialize};

use crate::date_selection::Granularity;
use crate::scale::LinearScale;

/// Space reserved around the plot for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

pub const CHART_PADDING: Padding = Padding {
    top: 20.0,
    bottom: 40.0,
    left: 55.0,
    right: 20.0,
};

/// Horizontal pixels per sample. Long year series get denser.
pub fn px_per_point(granularity: Granularity, n: usize) -> f64 {
    match granularity {
        Granularity::Day => 9.0,
        Granularity::Month => 3.2,
        Granularity::Year => match n {
            0..=600 => 3.0,
            601..=1500 => 2.8,
            1501..=3000 => 2.6,
            _ => 2.4,
        },
    }
}

/// Width of the scrollable chart content, never narrower than the viewport.
pub fn content_width(viewport_width: f64, n: usize, granularity: Granularity) -> f64 {
    let viewport = if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    };
    let needed =
        n as f64 * px_per_point(granularity, n) + CHART_PADDING.left + CHART_PADDING.right;
    viewport.max(needed)
}

/// The drawable area inside the padding, in plot-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Plot area of a chart whose outer box is `content_width × chart_height`.
    pub fn inside(content_width: f64, chart_height: f64) -> Self {
        let shrink = |outer: f64, pad: f64| {
            if outer.is_finite() {
                (outer - pad).max(0.0)
            } else {
                0.0
            }
        };
        Self {
            width: shrink(content_width, CHART_PADDING.left + CHART_PADDING.right),
            height: shrink(chart_height, CHART_PADDING.top + CHART_PADDING.bottom),
        }
    }

    /// A plot with no extent cannot place ticks or resolve taps.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Plot-local pixel position of `value` at row `index` of `n`.
    pub fn point(&self, index: usize, n: usize, value: f64, y_max: f64) -> (f64, f64) {
        let x = LinearScale::index(n, self.width).map(index as f64);
        let y = LinearScale::value(y_max, self.height).map(value);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_grows_past_viewport_for_long_series() {
        assert_eq!(content_width(390.0, 10, Granularity::Day), 390.0);
        assert_eq!(content_width(390.0, 96, Granularity::Day), 96.0 * 9.0 + 75.0);
        assert_eq!(content_width(f64::NAN, 0, Granularity::Month), 75.0);
    }

    #[test]
    fn year_density_steps_down() {
        assert_eq!(px_per_point(Granularity::Year, 365), 3.0);
        assert_eq!(px_per_point(Granularity::Year, 1500), 2.8);
        assert_eq!(px_per_point(Granularity::Year, 2000), 2.6);
        assert_eq!(px_per_point(Granularity::Year, 8760), 2.4);
    }

    #[test]
    fn plot_area_never_goes_negative() {
        let p = PlotArea::inside(60.0, 30.0);
        assert_eq!(p, PlotArea::new(0.0, 0.0));
        assert!(!p.is_usable());
        assert!(PlotArea::inside(390.0, 260.0).is_usable());
    }

    #[test]
    fn points_span_the_plot() {
        let p = PlotArea::new(300.0, 200.0);
        assert_eq!(p.point(0, 4, 0.0, 1000.0), (0.0, 200.0));
        assert_eq!(p.point(3, 4, 1000.0, 1000.0), (300.0, 0.0));
    }
}
