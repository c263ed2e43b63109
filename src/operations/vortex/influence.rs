use std::f64::consts::TAU;

use nalgebra::{DMatrix, DVector};

use super::panel::Panel;
use super::SolverParams;
use crate::math::TOLERANCE;

/// The dense linear system `A·γ = b` of a vortex panel solve.
///
/// Row `i` belongs to panel `i`: `b_i` is the freestream component along
/// the panel normal and `A[i][j]` integrates panel `i` against the control
/// point of panel `j`. The diagonal (self-induction) is left at zero.
#[derive(Debug, Clone)]
pub struct InfluenceSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
}

impl InfluenceSystem {
    /// Assembles the influence matrix and right-hand side for `panels`.
    ///
    /// The matrix is scaled by `1/2π`. No boundary-condition rows are
    /// replaced yet; see [`Self::apply_kutta_condition`].
    #[must_use]
    pub fn assemble(panels: &[Panel], params: &SolverParams) -> Self {
        let n = panels.len();
        let mut matrix = DMatrix::zeros(n, n);
        let mut rhs = DVector::zeros(n);

        for (i, panel) in panels.iter().enumerate() {
            rhs[i] = panel.normal().dot(&params.freestream);
            for (j, other) in panels.iter().enumerate() {
                if i != j {
                    matrix[(i, j)] = params
                        .quadrature
                        .normal_influence(panel, other.control_point());
                }
            }
        }
        matrix /= TAU;

        Self { matrix, rhs }
    }

    /// Overwrites the last row with the Kutta condition `γ_0 + γ_{n-1} = 0`.
    ///
    /// The trailing edge is assumed to sit between the first and last panel.
    /// For a single panel the row degenerates to `2·γ_0 = 0`.
    pub fn apply_kutta_condition(&mut self) {
        let n = self.len();
        if n == 0 {
            return;
        }
        let last = n - 1;
        self.matrix.row_mut(last).fill(0.0);
        self.matrix[(last, 0)] += 1.0;
        self.matrix[(last, last)] += 1.0;
        self.rhs[last] = 0.0;
    }

    /// Eliminates the last unknown through the last row.
    ///
    /// Each of the first `n - 1` rows has `γ_{n-1}` substituted out using
    /// the last row. After [`Self::apply_kutta_condition`] that row is the
    /// Kutta condition, so any solution of the reduced system, exact or
    /// least-squares, satisfies it exactly once expanded with
    /// [`Self::back_substitute`]. Returns `None` if the last row has no
    /// usable pivot.
    #[must_use]
    pub fn eliminate_last(&self) -> Option<(DMatrix<f64>, DVector<f64>)> {
        let m = self.len().checked_sub(1)?;
        let pivot = self.matrix[(m, m)];
        if pivot.abs() < TOLERANCE {
            return None;
        }

        let a = &self.matrix;
        let matrix = DMatrix::from_fn(m, m, |i, j| a[(i, j)] - a[(i, m)] * a[(m, j)] / pivot);
        let rhs = DVector::from_fn(m, |i, _| self.rhs[i] - a[(i, m)] * self.rhs[m] / pivot);
        Some((matrix, rhs))
    }

    /// Recovers the full strength vector from a solution of the system
    /// returned by [`Self::eliminate_last`].
    #[must_use]
    pub fn back_substitute(&self, reduced: &DVector<f64>) -> DVector<f64> {
        let m = reduced.len();
        let known: f64 = (0..m).map(|j| self.matrix[(m, j)] * reduced[j]).sum();
        let last = (self.rhs[m] - known) / self.matrix[(m, m)];
        DVector::from_fn(m + 1, |i, _| if i < m { reduced[i] } else { last })
    }

    /// Number of panels (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    /// Returns `true` if the system has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    #[must_use]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }
}
