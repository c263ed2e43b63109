//! Click-driven polygon editor.
//!
//! Turns a stream of pointer events into points and lines in a
//! [`TopologyStore`], snapping clicks onto nearby points. Clicking an existing
//! point from an open chain closes the polygon and triggers a vortex panel
//! solve over every stored line.

mod cursor;
mod input;
mod render;

pub use cursor::Cursor;
pub use input::PointerButton;
pub use render::{NullSink, RenderSink};

use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::math::{Point3, Projection, Viewport};
use crate::operations::query::{Candidate, FindNearbyPoint};
use crate::operations::vortex::{FlowSolution, SolvePanelMethod, SolverParams};
use crate::topology::{PointId, TopologyStore};

/// Editor configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorParams {
    /// Snapping distance, in pixels.
    pub snap_threshold: f64,
    /// Minimum pointer travel, in pixels, before the guide line is redrawn.
    pub redraw_threshold: f64,
    /// Initial point capacity of the store.
    pub point_capacity: usize,
    /// Initial line capacity of the store.
    pub line_capacity: usize,
    /// Panel solve settings used on polygon closure.
    pub solver: SolverParams,
}

impl Default for EditorParams {
    fn default() -> Self {
        Self {
            snap_threshold: 10.0,
            redraw_threshold: 2.0,
            point_capacity: 256,
            line_capacity: 128,
            solver: SolverParams::default(),
        }
    }
}

/// Interactive polygon editor.
///
/// All state is mutated synchronously inside the pointer handlers, so a
/// renderer observing the sink never sees a half-applied click.
pub struct Editor<S: RenderSink = NullSink> {
    params: EditorParams,
    store: TopologyStore,
    cursor: Cursor,
    projection: Projection,
    mouse: Point3,
    uploaded_points: usize,
    flow: Option<FlowSolution>,
    has_polygon: bool,
    sink: S,
}

impl Editor<NullSink> {
    /// Creates an editor with a unit orthographic view and no renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport has no area.
    pub fn new(params: EditorParams, viewport: Viewport) -> Result<Self> {
        Ok(Self::with_sink(
            params,
            Projection::unit_ortho(viewport)?,
            NullSink,
        ))
    }
}

impl<S: RenderSink> Editor<S> {
    /// Creates an editor that reports buffer updates to `sink`.
    #[must_use]
    pub fn with_sink(params: EditorParams, projection: Projection, sink: S) -> Self {
        Self {
            store: TopologyStore::with_capacity(params.point_capacity, params.line_capacity),
            params,
            cursor: Cursor::Empty,
            projection,
            mouse: Point3::origin(),
            uploaded_points: 0,
            flow: None,
            has_polygon: false,
            sink,
        }
    }

    // --- Input ---

    /// Handles a button press at pointer coordinates (top-left origin).
    ///
    /// The primary button places, snaps or closes; the secondary button
    /// drops the chain in progress but keeps everything already committed.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, button: PointerButton) {
        self.mouse = self.projection.viewport().window_point(x, y);

        match button {
            PointerButton::Primary => {
                if let Err(err) = self.click() {
                    warn!(%err, "click could not be applied");
                }
            }
            PointerButton::Secondary => {
                debug!(from = ?self.cursor, "chain cancelled");
                self.cursor = Cursor::Empty;
            }
        }

        self.sink.request_redraw();
    }

    /// Handles pointer motion. Returns `true` if a redraw was requested.
    ///
    /// Only tracked while a chain is in progress, and only once the pointer
    /// has moved more than the redraw threshold since the last recorded
    /// position.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.cursor.is_empty() {
            return false;
        }

        let position = self.projection.viewport().window_point(x, y);
        if (self.mouse - position).norm() > self.params.redraw_threshold {
            self.mouse = position;
            self.sink.request_redraw();
            true
        } else {
            trace!(x, y, "pointer move below redraw threshold");
            false
        }
    }

    /// Updates the viewport after a window resize.
    ///
    /// # Errors
    ///
    /// Returns an error if the new size has no area.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.projection.set_viewport(Viewport::new(width, height))?;
        self.sink.request_redraw();
        Ok(())
    }

    // --- State ---

    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether a polygon has been closed and solved at least once.
    #[must_use]
    pub fn has_polygon(&self) -> bool {
        self.has_polygon
    }

    /// The most recent flow solution.
    #[must_use]
    pub fn flow(&self) -> Option<&FlowSolution> {
        self.flow.as_ref()
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.projection.viewport()
    }

    #[must_use]
    pub fn params(&self) -> &EditorParams {
        &self.params
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Points to draw: committed points in insertion order, then the pending point.
    #[must_use]
    pub fn point_buffer(&self) -> Vec<Point3> {
        self.store
            .points()
            .map(|(_, data)| data.position)
            .chain(self.cursor.pending())
            .collect()
    }

    /// Lines to draw, in insertion order.
    #[must_use]
    pub fn line_buffer(&self) -> Vec<(Point3, Point3)> {
        self.store
            .lines()
            .filter_map(|(id, _)| self.store.line_endpoints(id).ok())
            .collect()
    }

    /// Preview segment from the chain's last point to the pointer.
    #[must_use]
    pub fn guide_line(&self) -> Option<(Point3, Point3)> {
        let anchor = match self.cursor {
            Cursor::Empty => return None,
            Cursor::Pending(position) => position,
            Cursor::Attached(id) => self.store.position(id).ok()?,
        };
        Some((anchor, self.projection.unproject(&self.mouse)))
    }

    // --- Transitions ---

    fn click(&mut self) -> Result<()> {
        let target = self.projection.unproject(&self.mouse);
        let nearby = FindNearbyPoint::new(target, self.params.snap_threshold)
            .with_pending(self.cursor.pending())
            .execute(&self.store, &self.projection)
            .map(|hit| hit.candidate);

        let point_added = match (self.cursor, nearby) {
            (Cursor::Empty, Some(Candidate::Stored(found))) => {
                debug!("chain attached to existing point");
                self.cursor = Cursor::Attached(found);
                false
            }
            (Cursor::Empty, _) => {
                debug!(x = target.x, y = target.y, "chain started");
                self.cursor = Cursor::Pending(target);
                true
            }
            (Cursor::Attached(prev), Some(Candidate::Stored(found))) if found != prev => {
                self.add_line(prev, found)?;
                self.cursor = Cursor::Empty;
                self.close_polygon(found);
                false
            }
            (Cursor::Attached(prev), None) => {
                let b = self.store.add_point(target);
                self.add_line(prev, b)?;
                self.cursor = Cursor::Attached(b);
                true
            }
            (Cursor::Pending(pending), Some(Candidate::Stored(found))) => {
                let a = self.store.add_point(pending);
                self.add_line(a, found)?;
                self.cursor = Cursor::Empty;
                self.close_polygon(found);
                true
            }
            (Cursor::Pending(pending), None) => {
                let a = self.store.add_point(pending);
                let b = self.store.add_point(target);
                self.add_line(a, b)?;
                self.cursor = Cursor::Attached(b);
                true
            }
            (Cursor::Attached(_) | Cursor::Pending(_), Some(_)) => {
                trace!("click on the chain's own point ignored");
                false
            }
        };

        if point_added {
            self.refresh_points();
        }
        Ok(())
    }

    fn add_line(&mut self, a: PointId, b: PointId) -> Result<()> {
        let index = self.store.line_count();
        self.store.add_line(a, b)?;
        let pa = self.store.position(a)?;
        let pb = self.store.position(b)?;
        debug!(index, "line added");
        self.sink.upload_line(index, &pa, &pb);
        Ok(())
    }

    /// Uploads committed points not yet seen by the sink, then the pending point.
    fn refresh_points(&mut self) {
        let count = self.store.point_count();
        for (index, (_, data)) in self.store.points().enumerate().skip(self.uploaded_points) {
            self.sink.upload_point(index, &data.position);
        }
        self.uploaded_points = count;

        if let Some(pending) = self.cursor.pending() {
            self.sink.upload_point(count, &pending);
        }
    }

    /// Solves the panel system over every stored line.
    ///
    /// A failed or skipped solve leaves the previous solution in place.
    fn close_polygon(&mut self, closing: PointId) {
        let lines = self.store.line_count();
        if lines < 2 {
            warn!(lines, "polygon closure with fewer than 2 lines, skipping solve");
            return;
        }

        debug!(closing = ?closing, lines, "polygon closed");

        match SolvePanelMethod::new(self.params.solver).execute(&self.store) {
            Ok(flow) => {
                info!(
                    panels = flow.panel_count(),
                    outward_normals = flow.normals_point_outward(),
                    "flow solution ready"
                );
                self.sink.upload_flow(&flow);
                self.flow = Some(flow);
                self.has_polygon = true;
            }
            Err(err) => warn!(%err, "panel solve failed"),
        }
    }
}
