//! Scalar linear advection.
//!
//! ∂u/∂t + a ∂u/∂x = 0
//!
//! where a is the constant advection velocity. Every variable is advected
//! independently with the same velocity.

use super::{Kernel, SelmView};

/// Linear advection kernel with flux f(u) = a u.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScalar {
    /// Advection velocity (positive = rightward)
    pub velocity: f64,
}

impl LinearScalar {
    /// Create a linear advection kernel with given velocity.
    pub fn new(velocity: f64) -> Self {
        Self { velocity }
    }

    /// Temporal flux with the time displacement `tsign * qdt`.
    fn tflux(&self, se: &SelmView<'_>, iv: usize, tsign: f64) -> f64 {
        let a = self.velocity;
        let displacement = se.x() - se.xctr();
        let mut ret = a * (se.so0(iv) + displacement * se.so1(iv));
        ret += tsign * se.qdt() * a * a * se.so1(iv);
        se.hdt() * ret
    }
}

impl Default for LinearScalar {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for LinearScalar {
    fn name(&self) -> &'static str {
        "linear_scalar"
    }

    fn wave_speed(&self, _u: f64) -> f64 {
        self.velocity
    }

    fn tn(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        self.tflux(se, iv, 1.0)
    }

    fn tp(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        self.tflux(se, iv, -1.0)
    }

    fn so0p(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        let ux = se.so1(iv);
        se.so0(iv) + (se.x() - se.xctr()) * ux - se.hdt() * self.velocity * ux
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::TimeIncrement;

    fn view<'a>(coords: [f64; 3], so0: &'a [f64], so1: &'a [f64], dt: f64) -> SelmView<'a> {
        SelmView::new(coords, so0, so1, TimeIncrement::new(dt))
    }

    #[test]
    fn test_constant_state_fluxes() {
        let kernel = LinearScalar::default();
        let (so0, so1) = ([3.0], [0.0]);
        let se = view([-0.5, 0.0, 0.5], &so0, &so1, 1.0);

        // Half of the bottom on each side carries u * dx / 2
        assert!((kernel.xn(&se, 0) - 1.5).abs() < 1e-14);
        assert!((kernel.xp(&se, 0) - 1.5).abs() < 1e-14);
        // a * u * hdt
        assert!((kernel.tp(&se, 0) - 1.5).abs() < 1e-14);
        assert!((kernel.tn(&se, 0) - 1.5).abs() < 1e-14);
        assert!((kernel.so0p(&se, 0) - 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_slope_contributions() {
        let kernel = LinearScalar::new(2.0);
        let (so0, so1) = ([1.0], [0.5]);
        let se = view([0.0, 1.0, 2.0], &so0, &so1, 0.4);

        // hdt = 0.2, qdt = 0.1, a² ux qdt = 0.2
        assert!((kernel.tp(&se, 0) - 0.2 * (2.0 - 0.2)).abs() < 1e-14);
        assert!((kernel.tn(&se, 0) - 0.2 * (2.0 + 0.2)).abs() < 1e-14);
        // u - hdt a ux
        assert!((kernel.so0p(&se, 0) - 0.8).abs() < 1e-14);
        // xn integrates over [0, 1] around the centroid 1
        assert!((kernel.xn(&se, 0) - 0.75).abs() < 1e-14);
        assert!((kernel.xp(&se, 0) - 1.25).abs() < 1e-14);
    }

    #[test]
    fn test_cfl_uses_narrower_half_cell() {
        let kernel = LinearScalar::new(-1.0);
        let (so0, so1) = ([0.0], [0.0]);
        let se = view([0.0, 1.0, 3.0], &so0, &so1, 1.0);

        assert!((kernel.cfl(&se) - 0.5).abs() < 1e-14);
    }
}
