use crate::math::polygon_2d::{clockwise_normal, midpoint, segment_direction};
use crate::math::{Point3, Vector2};

/// A straight panel carrying a uniform vortex strength.
///
/// The normal is the unit panel direction rotated 90° clockwise. A
/// zero-length panel has no direction; its normal is the zero vector so
/// that it contributes nothing to normal-velocity sums.
#[derive(Debug, Clone)]
pub struct Panel {
    start: Point3,
    end: Point3,
    control_point: Point3,
    normal: Vector2,
}

impl Panel {
    /// Creates a panel running from `start` to `end`.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        let normal = segment_direction(&start, &end).map_or_else(Vector2::zeros, clockwise_normal);
        Self {
            start,
            end,
            control_point: midpoint(&start, &end),
            normal,
        }
    }

    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Panel midpoint, where the no-flow-through condition is enforced.
    #[must_use]
    pub fn control_point(&self) -> &Point3 {
        &self.control_point
    }

    #[must_use]
    pub fn normal(&self) -> &Vector2 {
        &self.normal
    }

    /// XY offset from start to end.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.end.xy() - self.start.xy()
    }
}
