//! Inviscid Burgers equation.
//!
//! ∂u/∂t + ∂(u²/2)/∂x = 0
//!
//! The characteristic speed equals the local solution value, so smooth data
//! steepen into shocks in finite time.

use super::{Kernel, SelmView};

/// Inviscid Burgers kernel with flux f(u) = u²/2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InviscidBurgers;

impl InviscidBurgers {
    /// Temporal flux with the time displacement `tsign * qdt`.
    ///
    /// Uses ∂f/∂t = u ∂u/∂t = -u² ∂u/∂x.
    fn tflux(&self, se: &SelmView<'_>, iv: usize, tsign: f64) -> f64 {
        let u = se.so0(iv);
        let ux = se.so1(iv);
        let displacement = se.x() - se.xctr();
        let mut ret = 0.5 * u * u;
        ret += displacement * u * ux;
        ret += tsign * se.qdt() * u * u * ux;
        se.hdt() * ret
    }
}

impl Kernel for InviscidBurgers {
    fn name(&self) -> &'static str {
        "inviscid_burgers"
    }

    fn wave_speed(&self, u: f64) -> f64 {
        u
    }

    fn tn(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        self.tflux(se, iv, 1.0)
    }

    fn tp(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        self.tflux(se, iv, -1.0)
    }

    fn so0p(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        let u = se.so0(iv);
        let ux = se.so1(iv);
        u + (se.x() - se.xctr()) * ux - se.hdt() * u * ux
    }
}
