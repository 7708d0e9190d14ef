//! Flux plug-in contract.
//!
//! The marching engine is physics-agnostic: everything it knows about the
//! conservation law
//!
//! ∂u/∂t + ∂f(u)/∂x = 0
//!
//! comes through a [`Kernel`], which evaluates flux integrals over the four
//! faces of one solution element and predicts the value at its top tip.
//! Kernels see a solution element through a [`SelmView`]: its geometry, its
//! stored value and slope, and the current time increment.

mod inviscid_burgers;
mod linear_scalar;

pub use inviscid_burgers::InviscidBurgers;
pub use linear_scalar::LinearScalar;

/// Time increment of a march and its cached fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeIncrement {
    /// Full time step
    pub dt: f64,
    /// Half time step (one half-step march)
    pub hdt: f64,
    /// Quarter time step (temporal centroid of a half step)
    pub qdt: f64,
}

impl TimeIncrement {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            hdt: dt / 2.0,
            qdt: dt / 4.0,
        }
    }
}

/// Read-only view of one solution element as seen by a kernel.
///
/// Unlike a [`Selm`](crate::mesh::Selm), a view may describe one of the two
/// ghost elements beyond the domain ends; their outer bound is extrapolated
/// from the mirrored ghost coordinate.
#[derive(Clone, Copy, Debug)]
pub struct SelmView<'a> {
    xneg: f64,
    x: f64,
    xpos: f64,
    so0: &'a [f64],
    so1: &'a [f64],
    time: TimeIncrement,
}

impl<'a> SelmView<'a> {
    pub(crate) fn new(
        coords: [f64; 3],
        so0: &'a [f64],
        so1: &'a [f64],
        time: TimeIncrement,
    ) -> Self {
        debug_assert_eq!(so0.len(), so1.len());
        let [xneg, x, xpos] = coords;
        Self {
            xneg,
            x,
            xpos,
            so0,
            so1,
            time,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn xneg(&self) -> f64 {
        self.xneg
    }

    #[inline]
    pub fn xpos(&self) -> f64 {
        self.xpos
    }

    /// Centroid of the spatial extent.
    #[inline]
    pub fn xctr(&self) -> f64 {
        (self.xneg + self.xpos) / 2.0
    }

    #[inline]
    pub fn dxneg(&self) -> f64 {
        self.x - self.xneg
    }

    #[inline]
    pub fn dxpos(&self) -> f64 {
        self.xpos - self.x
    }

    /// Number of solution variables.
    #[inline]
    pub fn nvar(&self) -> usize {
        self.so0.len()
    }

    /// Value of variable `iv` at the centroid.
    #[inline]
    pub fn so0(&self, iv: usize) -> f64 {
        self.so0[iv]
    }

    /// Spatial derivative of variable `iv`.
    #[inline]
    pub fn so1(&self, iv: usize) -> f64 {
        self.so1[iv]
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.time.dt
    }

    #[inline]
    pub fn hdt(&self) -> f64 {
        self.time.hdt
    }

    #[inline]
    pub fn qdt(&self) -> f64 {
        self.time.qdt
    }

    /// Linear reconstruction of variable `iv` at coordinate `x`.
    #[inline]
    pub fn value_at(&self, iv: usize, x: f64) -> f64 {
        self.so0[iv] + (x - self.xctr()) * self.so1[iv]
    }
}

/// Physics of a 1D conservation law, evaluated on solution elements.
///
/// The spatial faces `xn`/`xp` integrate the solution over the lower half
/// of the element on either side of its nominal coordinate, so they do not
/// depend on the flux function and have default implementations. The
/// temporal faces `tn`/`tp` integrate the flux over a half step across the
/// vertical face through `x`, going backward and forward in time.
///
/// # Example
///
/// ```
/// use cese_rs::equations::{Kernel, LinearScalar};
///
/// let kernel = LinearScalar::new(2.0);
/// assert_eq!(kernel.name(), "linear_scalar");
/// assert_eq!(kernel.wave_speed(1.5), 2.0);
/// ```
pub trait Kernel: Clone + Send + Sync {
    /// Short identifier for diagnostics.
    fn name(&self) -> &'static str;

    /// Characteristic speed of the flux at value `u`.
    fn wave_speed(&self, u: f64) -> f64;

    /// Spatial flux through the negative half of the element bottom.
    fn xn(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        let displacement = 0.5 * (se.x() + se.xneg()) - se.xctr();
        se.dxneg() * (se.so0(iv) + displacement * se.so1(iv))
    }

    /// Spatial flux through the positive half of the element bottom.
    fn xp(&self, se: &SelmView<'_>, iv: usize) -> f64 {
        let displacement = 0.5 * (se.x() + se.xpos()) - se.xctr();
        se.dxpos() * (se.so0(iv) + displacement * se.so1(iv))
    }

    /// Temporal flux over the half step behind the element.
    fn tn(&self, se: &SelmView<'_>, iv: usize) -> f64;

    /// Temporal flux over the half step ahead of the element.
    fn tp(&self, se: &SelmView<'_>, iv: usize) -> f64;

    /// Predicted value at the forward time tip of the element.
    fn so0p(&self, se: &SelmView<'_>, iv: usize) -> f64;

    /// Local stability number of the element.
    ///
    /// The fastest characteristic over all variables, scaled by the half
    /// step and the narrower half-cell.
    fn cfl(&self, se: &SelmView<'_>) -> f64 {
        let speed = (0..se.nvar())
            .map(|iv| self.wave_speed(se.so0(iv)).abs())
            .fold(0.0, f64::max);
        se.hdt() * speed / se.dxneg().min(se.dxpos())
    }
}
