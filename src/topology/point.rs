use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a point in the topology store.
    pub struct PointId;
}

/// Data associated with a sketched point.
///
/// Points are never moved after creation; identity is the [`PointId`],
/// not the position.
#[derive(Debug, Clone)]
pub struct PointData {
    /// Model-space position of the point.
    pub position: Point3,
}

impl PointData {
    /// Creates a new point at the given position.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self { position }
    }
}
