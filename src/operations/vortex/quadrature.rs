use super::panel::Panel;
use crate::math::{Point2, Point3, Vector2, TOLERANCE};

/// Where each sub-interval of a panel is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadratureRule {
    /// Sample at the centre of each sub-interval.
    #[default]
    Midpoint,
    /// Sample at the start of each sub-interval.
    LeftEndpoint,
}

/// Fixed-resolution line quadrature along a panel.
///
/// No adaptive refinement and no convergence check: every integral costs
/// exactly `steps` kernel evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    /// Number of equal sub-intervals per panel.
    pub steps: usize,
    /// Sample placement within each sub-interval.
    pub rule: QuadratureRule,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self {
            steps: 30,
            rule: QuadratureRule::Midpoint,
        }
    }
}

impl Quadrature {
    /// Sample positions along the panel.
    pub fn samples<'a>(&self, panel: &'a Panel) -> impl Iterator<Item = Point2> + 'a {
        let steps = self.steps;
        let offset = match self.rule {
            QuadratureRule::Midpoint => 0.5,
            QuadratureRule::LeftEndpoint => 0.0,
        };
        let start = panel.start().xy();
        let delta = panel.delta();
        (0..steps).map(move |k| {
            #[allow(clippy::cast_precision_loss)]
            let t = (k as f64 + offset) / steps as f64;
            start + delta * t
        })
    }

    /// Mean normal velocity a unit-strength panel induces at `point`,
    /// projected on the panel's own normal (before the `1/2π` factor).
    #[must_use]
    pub fn normal_influence(&self, panel: &Panel, point: &Point3) -> f64 {
        let normal = panel.normal();
        let sum: f64 = self
            .samples(panel)
            .filter_map(|s| kernel(&s, &point.xy()))
            .map(|grad| grad.dot(normal))
            .sum();
        self.mean(sum)
    }

    /// Mean velocity kernel of a unit-strength panel at `point`
    /// (before the `1/2π` factor).
    #[must_use]
    pub fn induced_velocity(&self, panel: &Panel, point: &Point3) -> Vector2 {
        let sum = self
            .samples(panel)
            .filter_map(|s| kernel(&s, &point.xy()))
            .fold(Vector2::zeros(), |acc, grad| acc + grad);
        sum * self.mean(1.0)
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let steps = self.steps as f64;
        sum / steps
    }
}

/// Point-vortex velocity kernel: `(s.y - p.y, p.x - s.x) / |p - s|²`.
///
/// Samples closer than `TOLERANCE` to the evaluation point are skipped.
fn kernel(sample: &Point2, point: &Point2) -> Option<Vector2> {
    let r = point - sample;
    let r2 = r.norm_squared();
    if r2 < TOLERANCE {
        return None;
    }
    Some(Vector2::new(-r.y, r.x) / r2)
}
