//! Vortex panel method.
//!
//! Every line of a closed polygon is a panel carrying a uniform vortex
//! strength `γ`. Requiring zero normal velocity at each panel midpoint, with
//! the last equation swapped for the Kutta condition, yields a dense linear
//! system whose least-squares solution is the circulation distribution.

mod flow;
mod influence;
mod panel;
mod quadrature;
mod solve;

pub use flow::FlowSolution;
pub use influence::InfluenceSystem;
pub use panel::Panel;
pub use quadrature::{Quadrature, QuadratureRule};
pub use solve::SolvePanelMethod;

use crate::math::Vector2;

/// Parameters of the panel solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Uniform velocity far from the body.
    pub freestream: Vector2,
    /// Line integration used for influence coefficients and flow evaluation.
    pub quadrature: Quadrature,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            freestream: Vector2::new(1.0, 0.0),
            quadrature: Quadrature::default(),
        }
    }
}
