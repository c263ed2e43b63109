use super::{Point3, Vector2, TOLERANCE};

/// Shoelace area of the closed loop through `points`, in the XY plane.
///
/// Positive when the loop runs counter-clockwise. Fewer than three points
/// enclose nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let next = points.iter().cycle().skip(1);
    points
        .iter()
        .zip(next)
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum::<f64>()
        * 0.5
}

/// Computes the normalized XY direction from point `a` to point `b`.
///
/// Returns `None` for a zero-length segment; the z component is ignored.
#[must_use]
pub fn segment_direction(a: &Point3, b: &Point3) -> Option<Vector2> {
    let d = Vector2::new(b.x - a.x, b.y - a.y);
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(d / len)
}

/// Returns the direction rotated 90° clockwise: `(x, y) -> (y, -x)`.
#[must_use]
pub fn clockwise_normal(dir: Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}

/// Returns the midpoint of the segment `a`–`b`.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3::from((a.coords + b.coords) * 0.5)
}
