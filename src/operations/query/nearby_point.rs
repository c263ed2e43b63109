use crate::math::{Point3, Projection};
use crate::topology::{PointId, TopologyStore};

/// A point that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// A point already committed to the store.
    Stored(PointId),
    /// The provisional first point of a chain that has not been committed yet.
    Pending,
}

/// Result of a nearby point query.
#[derive(Debug, Clone, Copy)]
pub struct NearbyPoint {
    /// Which candidate was hit.
    pub candidate: Candidate,
    /// Model-space position of the hit.
    pub position: Point3,
    /// Window-space distance to the query target, in pixels.
    pub distance: f64,
}

/// Finds the closest snappable point to a target, measured on screen.
///
/// Candidates are every stored point plus an optional pending point. The
/// threshold is a pixel distance, so both the target and each candidate are
/// projected to window space before comparing. Scans all candidates linearly.
pub struct FindNearbyPoint {
    target: Point3,
    threshold: f64,
    pending: Option<Point3>,
}

impl FindNearbyPoint {
    /// Creates a new `FindNearbyPoint` query around a model-space target.
    #[must_use]
    pub fn new(target: Point3, threshold: f64) -> Self {
        Self {
            target,
            threshold,
            pending: None,
        }
    }

    /// Includes a not-yet-committed point among the candidates.
    #[must_use]
    pub fn with_pending(mut self, pending: Option<Point3>) -> Self {
        self.pending = pending;
        self
    }

    /// Executes the query.
    ///
    /// Returns the candidate with the smallest screen distance if that
    /// distance is strictly below the threshold. On exact ties the first
    /// candidate wins: stored points in insertion order, then the pending one.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore, projection: &Projection) -> Option<NearbyPoint> {
        let window = projection.project(&self.target).xy();

        let stored = store
            .points()
            .map(|(id, data)| (Candidate::Stored(id), data.position));
        let pending = self.pending.map(|p| (Candidate::Pending, p));

        let mut best: Option<NearbyPoint> = None;
        for (candidate, position) in stored.chain(pending) {
            let distance = projection.screen_distance(&position, &window);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(NearbyPoint {
                    candidate,
                    position,
                    distance,
                });
            }
        }

        best.filter(|hit| hit.distance < self.threshold)
    }
}
