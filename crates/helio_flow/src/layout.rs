//! Node anchor placement for the flow diagram.

use helio_core::Point;
use serde::{Deserialize, Serialize};

pub const SUN_Y: f32 = 120.0;
pub const BOTTOM_CENTER_Y: f32 = 360.0;
pub const SIDE_Y: f32 = BOTTOM_CENTER_Y - 40.0;

const HOUSE_X_FRACTION: f32 = 0.23;
const GRID_X_FRACTION: f32 = 0.77;

/// The four diagram nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Sun,
    House,
    Battery,
    Grid,
}

/// Fixed node positions for a given container width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAnchors {
    pub sun: Point,
    pub house: Point,
    pub battery: Point,
    pub grid: Point,
}

impl NodeAnchors {
    /// `None` for a zero, negative or non-finite width: nothing can be placed.
    pub fn for_width(width: f32) -> Option<Self> {
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        Some(Self {
            sun: Point::new(width / 2.0, SUN_Y),
            battery: Point::new(width / 2.0, BOTTOM_CENTER_Y),
            house: Point::new(width * HOUSE_X_FRACTION, SIDE_Y),
            grid: Point::new(width * GRID_X_FRACTION, SIDE_Y),
        })
    }

    pub fn get(&self, node: NodeKind) -> Point {
        match node {
            NodeKind::Sun => self.sun,
            NodeKind::House => self.house,
            NodeKind::Battery => self.battery,
            NodeKind::Grid => self.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_scale_with_width() {
        let a = NodeAnchors::for_width(400.0).unwrap();
        assert_eq!(a.sun, Point::new(200.0, 120.0));
        assert_eq!(a.battery, Point::new(200.0, 360.0));
        assert!((a.house.x - 92.0).abs() < 1e-4);
        assert!((a.grid.x - 308.0).abs() < 1e-4);
        assert_eq!(a.house.y, 320.0);
    }

    #[test]
    fn degenerate_width_has_no_anchors() {
        assert!(NodeAnchors::for_width(0.0).is_none());
        assert!(NodeAnchors::for_width(-3.0).is_none());
        assert!(NodeAnchors::for_width(f32::NAN).is_none());
    }
}
