pub mod line;
pub mod point;

pub use line::{LineData, LineId};
pub use point::{PointData, PointId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all sketched points and lines.
///
/// Entities reference each other via typed IDs (generational indices), so a
/// line never holds a dangling reference to its endpoints. Insertion order is
/// tracked separately because it is significant: the n-th line is the n-th
/// panel of the flow solve.
#[derive(Debug, Default)]
pub struct TopologyStore {
    points: SlotMap<PointId, PointData>,
    lines: SlotMap<LineId, LineData>,
    point_order: Vec<PointId>,
    line_order: Vec<LineId>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for the given number of points and lines.
    ///
    /// The capacities are allocation hints, not limits.
    #[must_use]
    pub fn with_capacity(points: usize, lines: usize) -> Self {
        Self {
            points: SlotMap::with_capacity_and_key(points),
            lines: SlotMap::with_capacity_and_key(lines),
            point_order: Vec::with_capacity(points),
            line_order: Vec::with_capacity(lines),
        }
    }

    // --- Point operations ---

    /// Appends a point at `position` and returns its ID.
    pub fn add_point(&mut self, position: Point3) -> PointId {
        let id = self.points.insert(PointData::new(position));
        self.point_order.push(id);
        id
    }

    /// Returns a reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: PointId) -> Result<&PointData, TopologyError> {
        self.points
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("point".into()))
    }

    /// Returns the position of a point.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn position(&self, id: PointId) -> Result<Point3, TopologyError> {
        Ok(self.point(id)?.position)
    }

    /// Returns `true` if the point lives in this store.
    #[must_use]
    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains_key(id)
    }

    /// Number of stored points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_order.len()
    }

    /// Iterates over the points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &PointData)> + '_ {
        self.point_order
            .iter()
            .filter_map(|&id| self.points.get(id).map(|data| (id, data)))
    }

    // --- Line operations ---

    /// Appends a line from `a` to `b` and returns its ID.
    ///
    /// Duplicate and zero-length lines are accepted; only the endpoints'
    /// existence is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not found in the store.
    pub fn add_line(&mut self, a: PointId, b: PointId) -> Result<LineId, TopologyError> {
        if !self.contains_point(a) || !self.contains_point(b) {
            return Err(TopologyError::EntityNotFound("line endpoint".into()));
        }
        let id = self.lines.insert(LineData::new(a, b));
        self.line_order.push(id);
        Ok(id)
    }

    /// Returns a reference to the line data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn line(&self, id: LineId) -> Result<&LineData, TopologyError> {
        self.lines
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("line".into()))
    }

    /// Returns the endpoint positions of a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line or one of its endpoints is not found.
    pub fn line_endpoints(&self, id: LineId) -> Result<(Point3, Point3), TopologyError> {
        let line = self.line(id)?;
        Ok((self.position(line.a)?, self.position(line.b)?))
    }

    /// Number of stored lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_order.len()
    }

    /// Iterates over the lines in insertion (panel) order.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &LineData)> + '_ {
        self.line_order
            .iter()
            .filter_map(|&id| self.lines.get(id).map(|data| (id, data)))
    }

    /// Collects the endpoint positions of every line in panel order.
    ///
    /// # Errors
    ///
    /// Returns an error if a line references a missing point.
    pub fn segments(&self) -> Result<Vec<(Point3, Point3)>, TopologyError> {
        self.line_order
            .iter()
            .map(|&id| self.line_endpoints(id))
            .collect()
    }
}
