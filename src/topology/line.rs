use super::point::PointId;

slotmap::new_key_type! {
    /// Unique identifier for a line (panel) in the topology store.
    pub struct LineId;
}

/// A straight segment between two stored points.
///
/// Lines are directed: a panel runs from `a` to `b`, which fixes the
/// orientation of its normal.
#[derive(Debug, Clone, Copy)]
pub struct LineData {
    /// First endpoint.
    pub a: PointId,
    /// Second endpoint.
    pub b: PointId,
}

impl LineData {
    /// Creates a new line from `a` to `b`.
    #[must_use]
    pub fn new(a: PointId, b: PointId) -> Self {
        Self { a, b }
    }
}
