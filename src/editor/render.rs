use crate::math::Point3;
use crate::operations::vortex::FlowSolution;

/// Receiver of the editor's renderer-facing buffers.
///
/// The editor never draws anything itself. It reports which buffer slots
/// changed and when a redraw is due; the implementor owns all GPU-resident
/// state. Every method defaults to a no-op.
pub trait RenderSink {
    /// Point buffer slot `index` now holds `position`.
    ///
    /// The buffer is append-only: committed points in insertion order,
    /// followed by the pending point, if any.
    fn upload_point(&mut self, _index: usize, _position: &Point3) {}

    /// Line buffer slot `index` now holds the segment `a`–`b`.
    fn upload_line(&mut self, _index: usize, _a: &Point3, _b: &Point3) {}

    /// A new flow solution is ready to be drawn.
    fn upload_flow(&mut self, _flow: &FlowSolution) {}

    /// Something visible changed.
    fn request_redraw(&mut self) {}
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
