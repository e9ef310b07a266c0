//! Particle paths between node anchors.
//!
//! Flows out of the sun run straight. Flows into the house from the grid or
//! the battery would cut across the sun marker, so they follow a sampled
//! cubic bezier lifted towards (but never above) a margin below the sun.

use helio_core::Point;
use serde::{Deserialize, Serialize};

use crate::flow::FlowKind;
use crate::layout::NodeAnchors;

/// Geometry a particle travels along, parameterised by phase `0..=1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowPath {
    Straight { start: Point, end: Point },
    /// Sampled curve; the points are treated as evenly spaced in phase.
    Curve { points: Vec<Point> },
}

impl FlowPath {
    pub fn start(&self) -> Point {
        match self {
            FlowPath::Straight { start, .. } => *start,
            FlowPath::Curve { points } => points.first().copied().unwrap_or_default(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            FlowPath::Straight { end, .. } => *end,
            FlowPath::Curve { points } => points.last().copied().unwrap_or_default(),
        }
    }

    /// Position at `phase`, clamped to `[0, 1]`.
    pub fn point_at(&self, phase: f32) -> Point {
        let t = if phase.is_finite() {
            phase.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            FlowPath::Straight { start, end } => start.lerp(*end, t),
            FlowPath::Curve { points } => match points.len() {
                0 => Point::ZERO,
                1 => points[0],
                n => {
                    let scaled = t * (n - 1) as f32;
                    let i = (scaled.floor() as usize).min(n - 2);
                    points[i].lerp(points[i + 1], scaled - i as f32)
                }
            },
        }
    }
}

/// Shape parameters for a curved flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveProfile {
    /// Minimum clearance below the sun anchor for the control points.
    pub sun_margin: f32,
    pub min_lift: f32,
    pub max_lift: f32,
    /// Lift per pixel of horizontal anchor distance.
    pub lift_factor: f32,
    /// Horizontal position of the control points as a fraction of `dx`.
    pub c1_fraction: f32,
    pub c2_fraction: f32,
    /// Extra y on the second control point, for an asymmetric bow.
    pub c2_dy: f32,
    pub steps: usize,
}

impl CurveProfile {
    pub const GRID_TO_HOUSE: CurveProfile = CurveProfile {
        sun_margin: 30.0,
        min_lift: 110.0,
        max_lift: 190.0,
        lift_factor: 0.55,
        c1_fraction: 0.25,
        c2_fraction: 0.75,
        c2_dy: 0.0,
        steps: 22,
    };

    pub const BATTERY_TO_HOUSE: CurveProfile = CurveProfile {
        sun_margin: 70.0,
        min_lift: 80.0,
        max_lift: 150.0,
        lift_factor: 0.45,
        c1_fraction: 0.35,
        c2_fraction: 0.7,
        c2_dy: 10.0,
        steps: 20,
    };

    /// Sampled curve from `start` to `end`, kept clear of a sun at `sun_y`.
    pub fn sample(&self, start: Point, end: Point, sun_y: f32) -> Vec<Point> {
        let dx = end.x - start.x;
        let dist = dx.abs().max(1.0);
        let lift = (dist * self.lift_factor).clamp(self.min_lift, self.max_lift);
        let top_y = (sun_y + self.sun_margin).max(start.y.min(end.y) - lift);

        let c1 = Point::new(start.x + dx * self.c1_fraction, top_y);
        let c2 = Point::new(start.x + dx * self.c2_fraction, top_y + self.c2_dy);
        cubic_curve(start, end, c1, c2, self.steps)
    }
}

/// Sample a cubic bezier at `steps + 1` evenly spaced parameters.
pub fn cubic_curve(start: Point, end: Point, c1: Point, c2: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let one = 1.0 - t;
            let a = one * one * one;
            let b = 3.0 * one * one * t;
            let c = 3.0 * one * t * t;
            let d = t * t * t;
            Point::new(
                a * start.x + b * c1.x + c * c2.x + d * end.x,
                a * start.y + b * c1.y + c * c2.y + d * end.y,
            )
        })
        .collect()
}

/// Path for `kind` between its anchors.
pub fn path_for(kind: FlowKind, anchors: &NodeAnchors) -> FlowPath {
    let start = anchors.get(kind.source());
    let end = anchors.get(kind.target());
    match kind {
        FlowKind::GridToHouse => FlowPath::Curve {
            points: CurveProfile::GRID_TO_HOUSE.sample(start, end, anchors.sun.y),
        },
        FlowKind::BatteryToHouse => FlowPath::Curve {
            points: CurveProfile::BATTERY_TO_HOUSE.sample(start, end, anchors.sun.y),
        },
        FlowKind::PvToHouse | FlowKind::PvToBattery | FlowKind::PvToGrid => {
            FlowPath::Straight { start, end }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_curve_bows_upward() {
        let start = Point::new(0.0, 200.0);
        let end = Point::new(300.0, 200.0);
        let pts = CurveProfile::GRID_TO_HOUSE.sample(start, end, 120.0);
        assert_eq!(pts.len(), 23);
        assert_eq!(pts[0], start);
        assert!((pts[22].x - end.x).abs() < 1e-3 && (pts[22].y - end.y).abs() < 1e-3);
        assert!(pts.iter().all(|p| p.y <= 200.0 + 1e-4));
        assert!(pts.iter().any(|p| p.y < 200.0));
    }

    #[test]
    fn lift_is_clamped_to_profile_range() {
        // Narrow span: lift floors at 110, so control points sit at 200 - 110.
        let pts = CurveProfile::GRID_TO_HOUSE.sample(
            Point::new(0.0, 200.0),
            Point::new(10.0, 200.0),
            -1000.0,
        );
        let min_y = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        // Bezier peak with both controls at top_y reaches 3/4 of the lift.
        assert!((min_y - (200.0 - 0.75 * 110.0)).abs() < 0.5);
    }

    #[test]
    fn control_points_respect_sun_margin() {
        // Sun close to the anchors: top_y is pinned at sun_y + margin.
        let pts = CurveProfile::BATTERY_TO_HOUSE.sample(
            Point::new(200.0, 360.0),
            Point::new(92.0, 320.0),
            300.0,
        );
        assert!(pts.iter().all(|p| p.y >= 300.0));
    }

    #[test]
    fn straight_path_interpolates_linearly() {
        let p = FlowPath::Straight {
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 50.0),
        };
        assert_eq!(p.point_at(0.5), Point::new(50.0, 25.0));
        assert_eq!(p.point_at(2.0), Point::new(100.0, 50.0));
    }

    #[test]
    fn curve_path_walks_sampled_points() {
        let p = FlowPath::Curve {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        };
        assert_eq!(p.point_at(0.0), Point::new(0.0, 0.0));
        assert_eq!(p.point_at(0.25), Point::new(5.0, 0.0));
        assert_eq!(p.point_at(0.5), Point::new(10.0, 0.0));
        assert_eq!(p.point_at(0.75), Point::new(10.0, 5.0));
        assert_eq!(p.point_at(1.0), Point::new(10.0, 10.0));
    }

    #[test]
    fn pv_flows_are_straight_and_others_curved() {
        let anchors = NodeAnchors::for_width(400.0).unwrap();
        for kind in FlowKind::ALL {
            let path = path_for(kind, &anchors);
            assert_eq!(matches!(path, FlowPath::Curve { .. }), kind.is_curved());
            assert_eq!(path.start(), anchors.get(kind.source()));
        }
    }
}
