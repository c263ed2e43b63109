use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::flow::FlowSolution;
use super::influence::InfluenceSystem;
use super::panel::Panel;
use super::SolverParams;
use crate::error::{Result, SolverError};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point3, TOLERANCE};
use crate::topology::TopologyStore;

const MAX_SVD_ITERATIONS: usize = 10_000;

/// Solves the vortex panel system for the lines of a closed polygon.
///
/// Lines are taken in insertion order and assumed to form one closed loop;
/// this is not verified beyond the panel count. The Kutta condition ties the
/// first and last panel together, so click order decides which edge acts as
/// the trailing edge.
pub struct SolvePanelMethod {
    params: SolverParams,
}

impl SolvePanelMethod {
    /// Creates a new `SolvePanelMethod` operation.
    #[must_use]
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }

    /// Builds one panel per stored line and solves for the vortex strengths.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 lines exist, a line references a
    /// missing point, or the least-squares solve cannot run.
    pub fn execute(&self, store: &TopologyStore) -> Result<FlowSolution> {
        let panels = store
            .segments()?
            .into_iter()
            .map(|(a, b)| Panel::new(a, b))
            .collect();
        self.solve(panels)
    }

    /// Solves for the vortex strengths of an explicit panel sequence.
    ///
    /// The Kutta row is eliminated first, so `γ_{n-1} = -γ_0` holds exactly
    /// and only the remaining `n - 1` physical rows go through the
    /// least-squares solve. Rank-deficient systems (degenerate or symmetric
    /// geometry) yield the minimum-norm solution instead of an error.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 panels are given or the
    /// decomposition fails to converge.
    pub fn solve(&self, panels: Vec<Panel>) -> Result<FlowSolution> {
        if panels.len() < 2 {
            return Err(SolverError::TooFewPanels {
                count: panels.len(),
            }
            .into());
        }

        let mut system = InfluenceSystem::assemble(&panels, &self.params);
        system.apply_kutta_condition();
        let (reduced, rhs) = system
            .eliminate_last()
            .ok_or_else(|| SolverError::Decomposition("Kutta row has no pivot".into()))?;
        let strengths = system.back_substitute(&least_squares(reduced, rhs)?);

        let outline: Vec<Point3> = panels.iter().map(|p| *p.start()).collect();
        let signed_area = signed_area_2d(&outline);
        if signed_area < 0.0 {
            debug!(signed_area, "clockwise loop, panel normals point into the body");
        }

        debug!(
            panels = panels.len(),
            gamma_first = strengths[0],
            "solved vortex panel system"
        );

        Ok(FlowSolution::new(
            panels,
            strengths,
            signed_area,
            self.params.freestream,
            self.params.quadrature,
        ))
    }
}

/// Pseudo-inverse solve via SVD.
///
/// Singular values below `σ_max · n · ε`, or below [`TOLERANCE`] outright,
/// are treated as zero.
fn least_squares(
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
) -> std::result::Result<DVector<f64>, SolverError> {
    let n = rhs.len();

    if !matrix.iter().chain(rhs.iter()).all(|v| v.is_finite()) {
        return Err(SolverError::Decomposition(
            "non-finite influence coefficient".into(),
        ));
    }

    let svd = matrix
        .try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
        .ok_or_else(|| SolverError::Decomposition("SVD did not converge".into()))?;

    #[allow(clippy::cast_precision_loss)]
    let cutoff = (svd.singular_values.max() * n as f64 * f64::EPSILON).max(TOLERANCE);
    let rank = svd.rank(cutoff);
    if rank < n {
        debug!(rank, n, "rank-deficient influence system");
    }

    svd.solve(&rhs, cutoff)
        .map_err(|e| SolverError::Decomposition(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PanelflowError;
    use crate::operations::vortex::{Quadrature, QuadratureRule};
    use approx::assert_relative_eq;

    fn closed(points: &[(f64, f64)]) -> Vec<Panel> {
        let pts: Vec<Point3> = points.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect();
        (0..pts.len())
            .map(|i| Panel::new(pts[i], pts[(i + 1) % pts.len()]))
            .collect()
    }

    fn solver() -> SolvePanelMethod {
        SolvePanelMethod::new(SolverParams::default())
    }

    #[test]
    fn triangle_strengths() {
        let flow = solver()
            .solve(closed(&[(-0.5, 0.5), (0.0, 0.5), (0.0, 0.0)]))
            .unwrap();
        let g = flow.strengths();
        assert_eq!(g.len(), 3);
        assert_relative_eq!(g[0], -3.902_955_879_938_781, max_relative = 1e-9);
        assert_relative_eq!(g[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(g[2], 3.902_955_879_938_781, max_relative = 1e-9);
        assert_relative_eq!(flow.kutta_residual(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn physical_rows_are_satisfied() {
        let panels = closed(&[(-0.6, 0.1), (0.3, 0.5), (0.4, -0.2), (-0.2, -0.4)]);
        let params = SolverParams::default();
        let mut system = InfluenceSystem::assemble(&panels, &params);
        system.apply_kutta_condition();

        let flow = SolvePanelMethod::new(params).solve(panels).unwrap();
        let gamma = DVector::from_column_slice(flow.strengths());
        let residual = system.matrix() * &gamma - system.rhs();
        assert!(residual.norm() < 1e-6, "residual={}", residual.norm());
    }

    #[test]
    fn kutta_holds_for_symmetric_square() {
        // The square's influence system is rank-deficient but consistent.
        let flow = solver()
            .solve(closed(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]))
            .unwrap();
        assert!(flow.strengths().iter().all(|g| g.is_finite()));
        assert_relative_eq!(flow.kutta_residual(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn kutta_holds_for_airfoil_like_quad() {
        let flow = solver()
            .solve(closed(&[(0.8, 0.0), (0.0, 0.12), (-0.6, 0.0), (0.0, -0.08)]))
            .unwrap();
        assert_relative_eq!(flow.kutta_residual(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(flow.strengths()[0], 1.653_271_311_861_781, max_relative = 1e-6);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let shape = [(0.8, 0.0), (0.0, 0.12), (-0.6, 0.0), (0.0, -0.08)];
        let first = solver().solve(closed(&shape)).unwrap();
        let second = solver().solve(closed(&shape)).unwrap();
        assert_eq!(first.strengths(), second.strengths());
    }

    #[test]
    fn too_few_panels_is_rejected() {
        let result = solver().solve(closed(&[(0.0, 0.0)]));
        assert!(matches!(
            result,
            Err(PanelflowError::Solver(SolverError::TooFewPanels { count: 1 }))
        ));
    }

    #[test]
    fn coincident_points_give_finite_answer() {
        let flow = solver()
            .solve(closed(&[(0.2, 0.2), (0.2, 0.2), (0.2, 0.2)]))
            .unwrap();
        assert!(flow.strengths().iter().all(|g| g.is_finite()));
    }

    #[test]
    fn out_and_back_segment_keeps_kutta() {
        // Both control points coincide, so the one physical row is
        // numerically zero while its right-hand side is not.
        let flow = solver()
            .solve(closed(&[(-0.78, -0.47), (0.77, 0.67)]))
            .unwrap();
        assert_eq!(flow.panel_count(), 2);
        assert_relative_eq!(flow.kutta_residual(), 0.0, epsilon = 1e-12);
        for g in flow.strengths() {
            assert!(g.abs() < 1e-6, "gamma={g}");
        }
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn kutta_holds_for_random_star_polygons() {
        // Deterministic LCG so the shapes are reproducible.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };

        for n in 2..=11_u32 {
            for _ in 0..20 {
                let shape: Vec<(f64, f64)> = (0..n)
                    .map(|k| {
                        let angle = std::f64::consts::TAU * (f64::from(k) + 0.8 * next())
                            / f64::from(n);
                        let radius = 0.2 + 0.7 * next();
                        (radius * angle.cos(), radius * angle.sin())
                    })
                    .collect();
                let flow = solver().solve(closed(&shape)).unwrap();
                let scale = flow.strengths().iter().fold(1.0_f64, |m, g| m.max(g.abs()));
                assert!(
                    flow.kutta_residual().abs() <= 1e-12 * scale,
                    "n={n} shape={shape:?} gamma={:?}",
                    flow.strengths()
                );
                assert!(flow.strengths().iter().all(|g| g.is_finite()));
            }
        }
    }

    #[test]
    fn loop_orientation_is_reported() {
        let clockwise = solver()
            .solve(closed(&[(-0.5, 0.5), (0.0, 0.5), (0.0, 0.0)]))
            .unwrap();
        assert_relative_eq!(clockwise.signed_area(), -0.125, epsilon = 1e-12);
        assert!(!clockwise.normals_point_outward());

        let counter_clockwise = solver()
            .solve(closed(&[(0.0, 0.0), (0.0, 0.5), (-0.5, 0.5)]))
            .unwrap();
        assert_relative_eq!(counter_clockwise.signed_area(), 0.125, epsilon = 1e-12);
        assert!(counter_clockwise.normals_point_outward());
    }

    #[test]
    fn quadrature_rule_changes_coefficients() {
        let shape = [(-0.5, 0.5), (0.0, 0.5), (0.0, 0.0)];
        let left = SolvePanelMethod::new(SolverParams {
            quadrature: Quadrature {
                steps: 30,
                rule: QuadratureRule::LeftEndpoint,
            },
            ..SolverParams::default()
        })
        .solve(closed(&shape))
        .unwrap();
        let mid = solver().solve(closed(&shape)).unwrap();
        assert!((left.strengths()[0] - mid.strengths()[0]).abs() > 1e-6);
        assert_relative_eq!(left.kutta_residual(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn execute_reads_lines_from_store() {
        let mut store = TopologyStore::new();
        let a = store.add_point(Point3::new(-0.5, 0.5, 0.0));
        let b = store.add_point(Point3::new(0.0, 0.5, 0.0));
        let c = store.add_point(Point3::new(0.0, 0.0, 0.0));
        store.add_line(a, b).unwrap();
        store.add_line(b, c).unwrap();
        store.add_line(c, a).unwrap();

        let flow = solver().execute(&store).unwrap();
        assert_eq!(flow.panel_count(), 3);
        assert_relative_eq!(flow.strengths()[2], 3.902_955_879_938_781, max_relative = 1e-9);
    }
}
