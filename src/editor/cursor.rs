use crate::math::Point3;
use crate::topology::PointId;

/// Where the next click continues from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cursor {
    /// No chain in progress; the next click starts one.
    #[default]
    Empty,
    /// First point of a new chain, not yet committed to the store.
    Pending(Point3),
    /// The chain continues from a stored point.
    Attached(PointId),
}

impl Cursor {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Position of the uncommitted point, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Point3> {
        match self {
            Self::Pending(position) => Some(*position),
            _ => None,
        }
    }

    /// Stored point the chain is attached to, if any.
    #[must_use]
    pub fn attached(&self) -> Option<PointId> {
        match self {
            Self::Attached(id) => Some(*id),
            _ => None,
        }
    }
}
