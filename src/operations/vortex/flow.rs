use std::f64::consts::TAU;

use nalgebra::DVector;

use super::panel::Panel;
use super::quadrature::Quadrature;
use crate::math::{Point3, Vector2};

/// Solved vortex strengths together with the panels they belong to.
///
/// This is everything an external flow-field renderer needs: a flat panel
/// endpoint buffer, one strength per panel, the panel count and the
/// freestream velocity.
#[derive(Debug, Clone)]
pub struct FlowSolution {
    panels: Vec<Panel>,
    strengths: DVector<f64>,
    signed_area: f64,
    freestream: Vector2,
    quadrature: Quadrature,
}

impl FlowSolution {
    pub(crate) fn new(
        panels: Vec<Panel>,
        strengths: DVector<f64>,
        signed_area: f64,
        freestream: Vector2,
        quadrature: Quadrature,
    ) -> Self {
        Self {
            panels,
            strengths,
            signed_area,
            freestream,
            quadrature,
        }
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Vortex strength `γ` of each panel, in panel order.
    #[must_use]
    pub fn strengths(&self) -> &[f64] {
        self.strengths.as_slice()
    }

    #[must_use]
    pub fn freestream(&self) -> &Vector2 {
        &self.freestream
    }

    /// Shoelace area of the loop traced by the panel start points.
    ///
    /// Positive for a counter-clockwise loop.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// Whether the clockwise panel normals face away from the enclosed area.
    ///
    /// Only counter-clockwise loops qualify; a clockwise loop puts every
    /// normal inside the body and flips the sign of the circulation.
    #[must_use]
    pub fn normals_point_outward(&self) -> bool {
        self.signed_area > 0.0
    }

    /// `γ_0 + γ_{n-1}`; zero when the Kutta condition holds exactly.
    #[must_use]
    pub fn kutta_residual(&self) -> f64 {
        match (self.strengths().first(), self.strengths().last()) {
            (Some(first), Some(last)) => first + last,
            _ => 0.0,
        }
    }

    /// Panel endpoints flattened as `p1.x, p1.y, p2.x, p2.y` per panel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn line_buffer(&self) -> Vec<f32> {
        self.panels
            .iter()
            .flat_map(|p| [p.start().x, p.start().y, p.end().x, p.end().y])
            .map(|v| v as f32)
            .collect()
    }

    /// One vortex strength per panel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn strength_buffer(&self) -> Vec<f32> {
        self.strengths.iter().map(|&g| g as f32).collect()
    }

    /// Flow velocity at `point`: freestream plus the velocity induced by
    /// every panel, sampled with the same quadrature as the solve.
    #[must_use]
    pub fn velocity_at(&self, point: &Point3) -> Vector2 {
        self.panels
            .iter()
            .zip(self.strengths.iter())
            .fold(self.freestream, |v, (panel, &gamma)| {
                v + self.quadrature.induced_velocity(panel, point) * (gamma / TAU)
            })
    }
}
