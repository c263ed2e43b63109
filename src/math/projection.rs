use super::{Matrix4, Point2, Point3, Vector4};
use crate::error::{GeometryError, Result};

/// Window-space rectangle the model is rendered into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport anchored at the origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Converts a pointer position with a top-left origin into window
    /// coordinates with a bottom-left origin.
    #[must_use]
    pub fn window_point(&self, pointer_x: f64, pointer_y: f64) -> Point3 {
        Point3::new(pointer_x, self.height - pointer_y, 0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Model-to-window mapping: a projection matrix, a model-view matrix and a viewport.
///
/// Mirrors the fixed-function `project`/`unproject` pair: model coordinates go
/// through the MVP matrix into normalized device coordinates, which are then
/// scaled into the viewport. Window depth lies in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Projection {
    projection: Matrix4,
    model_view: Matrix4,
    mvp: Matrix4,
    inverse_mvp: Matrix4,
    viewport: Viewport,
}

impl Projection {
    /// Creates a projection from explicit matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined matrix is singular or the viewport
    /// has no area.
    pub fn new(projection: Matrix4, model_view: Matrix4, viewport: Viewport) -> Result<Self> {
        check_viewport(&viewport)?;
        let mvp = projection * model_view;
        let inverse_mvp = mvp
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)?;
        Ok(Self {
            projection,
            model_view,
            mvp,
            inverse_mvp,
            viewport,
        })
    }

    /// Orthographic `[-1, 1]` cube with an identity model-view.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport has no area.
    pub fn unit_ortho(viewport: Viewport) -> Result<Self> {
        Self::new(
            Matrix4::new_orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0),
            Matrix4::identity(),
            viewport,
        )
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    /// Returns the model-view matrix.
    #[must_use]
    pub fn model_view(&self) -> &Matrix4 {
        &self.model_view
    }

    /// Returns `projection * model_view`.
    #[must_use]
    pub fn mvp(&self) -> &Matrix4 {
        &self.mvp
    }

    /// Returns the current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replaces the viewport, e.g. after a window resize.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport has no area; the old viewport is kept.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        check_viewport(&viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Maps a model-space point to window coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        let clip = self.mvp * point.to_homogeneous();
        let ndc = clip / clip.w;
        let vp = &self.viewport;
        Point3::new(
            (ndc.x * 0.5 + 0.5) * vp.width + vp.x,
            (ndc.y * 0.5 + 0.5) * vp.height + vp.y,
            ndc.z * 0.5 + 0.5,
        )
    }

    /// Maps window coordinates back to model space.
    #[must_use]
    pub fn unproject(&self, window: &Point3) -> Point3 {
        let vp = &self.viewport;
        let ndc = Vector4::new(
            (window.x - vp.x) / vp.width * 2.0 - 1.0,
            (window.y - vp.y) / vp.height * 2.0 - 1.0,
            window.z * 2.0 - 1.0,
            1.0,
        );
        let obj = self.inverse_mvp * ndc;
        Point3::new(obj.x / obj.w, obj.y / obj.w, obj.z / obj.w)
    }

    /// Window-space XY distance between a model-space point and a window position.
    #[must_use]
    pub fn screen_distance(&self, point: &Point3, window: &Point2) -> f64 {
        let projected = self.project(point);
        (projected.xy() - *window).norm()
    }
}

fn check_viewport(viewport: &Viewport) -> Result<()> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Err(GeometryError::DegenerateViewport {
            width: viewport.width,
            height: viewport.height,
        }
        .into());
    }
    Ok(())
}
