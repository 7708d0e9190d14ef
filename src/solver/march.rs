//! Alternating half-step marching engine.
//!
//! One full time step of the CESE method is two half steps. The first
//! marches the even plane to the odd plane through the conservation
//! elements centred between nodes; the second marches back through the
//! elements centred on nodes:
//!
//! ```text
//! march_half_so0(even) -> march_half_so1(even) -> treat_boundary
//!     -> march_half_so0(odd) -> march_half_so1(odd)
//! ```
//!
//! Each half step reads the current plane and writes only the opposite one.

use std::iter::StepBy;
use std::ops::Range;

use crate::equations::{Kernel, SelmView};
use crate::error::{CeseError, Result};
use crate::mesh::Celm;
use crate::solver::{SlopeScheme, Solution, SolverConfig};
use crate::types::Plane;

/// Guards the weighted slope against a zero denominator.
const TINY: f64 = 1.0e-60;

/// Stability summary of one or more full-step marches.
///
/// Instability is reported rather than raised: the caller checks the status
/// after each march and decides whether to continue.
#[must_use = "check the march status for instability"]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarchStatus {
    /// Number of full steps taken
    pub steps: usize,
    /// Largest local stability number seen on either plane
    pub cfl_max: f64,
    /// Whether a NaN or infinite value or slope appeared
    pub non_finite: bool,
}

impl MarchStatus {
    /// True when every local stability number stayed below `cfl_limit` and
    /// the solution is finite.
    pub fn is_admissible(&self, cfl_limit: f64) -> bool {
        !self.non_finite && self.cfl_max < cfl_limit
    }

    fn merge(&mut self, other: MarchStatus) {
        self.steps += other.steps;
        self.cfl_max = self.cfl_max.max(other.cfl_max);
        self.non_finite |= other.non_finite;
    }
}

/// Marching engine for one flux kernel.
///
/// The solver owns its [`Solution`]; initialize it through
/// [`solution_mut`](Solver::solution_mut) and read it back through
/// [`solution`](Solver::solution).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cese_rs::equations::LinearScalar;
/// use cese_rs::mesh::Grid;
/// use cese_rs::solver::{Solution, Solver, SolverConfig};
/// use cese_rs::types::Plane;
///
/// let grid = Arc::new(Grid::new(0.0, 4.0, 8).unwrap());
/// let mut solution = Solution::new(grid, 1, 0.25).unwrap();
/// solution.set_so0_from(Plane::Even, 0, |_| 1.0).unwrap();
///
/// let mut solver = Solver::new(solution, LinearScalar::default(), SolverConfig::default()).unwrap();
/// solver.setup_march();
/// let status = solver.march_full_steps(4);
/// assert!(status.is_admissible(1.0));
/// ```
#[derive(Clone, Debug)]
pub struct Solver<K: Kernel> {
    solution: Solution,
    kernel: K,
    config: SolverConfig,
}

impl<K: Kernel> Solver<K> {
    /// Bind a kernel and configuration to a solution.
    pub fn new(solution: Solution, kernel: K, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Solver<{}> on {} with nvar={}, dt={}, {}",
            kernel.name(),
            solution.grid(),
            solution.nvar(),
            solution.dt(),
            config
        );
        Ok(Self {
            solution,
            kernel,
            config,
        })
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn solution_mut(&mut self) -> &mut Solution {
        &mut self.solution
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace the configuration for subsequent marches.
    pub fn set_config(&mut self, config: SolverConfig) -> Result<()> {
        config.validate()?;
        log::debug!("Solver<{}> reconfigured: {}", self.kernel.name(), config);
        self.config = config;
        Ok(())
    }

    // Half steps

    /// Update values on the plane opposite `plane` from the values and
    /// slopes on `plane`.
    ///
    /// Marching from the odd plane also covers the two boundary conservation
    /// elements that reach into the ghosts, so the ghosts must be filled
    /// before.
    pub fn march_half_so0(&mut self, plane: Plane) {
        log::trace!("march_half_so0(plane={})", plane);
        for h in self.stencil_xindices(plane) {
            for iv in 0..self.solution.nvar() {
                let value = self.calc_so0_at(h, iv);
                self.solution.write_so0(h, iv, value);
            }
        }
    }

    /// Update slopes on the plane opposite `plane` with the configured scheme.
    ///
    /// Must follow [`march_half_so0`](Self::march_half_so0) for the same
    /// plane, since the weighted scheme reads the new values.
    pub fn march_half_so1(&mut self, plane: Plane) {
        self.march_half_so1_with(plane, self.config.slope);
    }

    /// Update slopes on the plane opposite `plane` with the weighted scheme.
    pub fn march_half_so1_alpha(&mut self, plane: Plane, alpha: f64) {
        self.march_half_so1_with(plane, SlopeScheme::Weighted { alpha });
    }

    fn march_half_so1_with(&mut self, plane: Plane, slope: SlopeScheme) {
        log::trace!("march_half_so1(plane={}, slope={})", plane, slope);
        for h in self.stencil_xindices(plane) {
            for iv in 0..self.solution.nvar() {
                let u_top = self.solution.so0_at(h, iv);
                let value = self.calc_so1_at(h, iv, u_top, slope);
                self.solution.write_so1(h, iv, value);
            }
        }
    }

    /// Fill the values of the odd-plane ghost elements.
    pub fn treat_boundary_so0(&mut self) {
        let (left, right) = self.ghost_sources();
        let ghost = self.solution.grid().xsize() - 1;
        self.solution.copy_so0_slot(left, 0);
        self.solution.copy_so0_slot(right, ghost);
    }

    /// Fill the slopes of the odd-plane ghost elements.
    pub fn treat_boundary_so1(&mut self) {
        let (left, right) = self.ghost_sources();
        let ghost = self.solution.grid().xsize() - 1;
        self.solution.copy_so1_slot(left, 0);
        self.solution.copy_so1_slot(right, ghost);
    }

    /// Recompute the local stability numbers on a plane and return the largest.
    pub fn update_cfl(&mut self, plane: Plane) -> f64 {
        let mut cfl_max: f64 = 0.0;
        for h in self.solution.plane_xindices(plane) {
            let cfl = self.kernel.cfl(&self.solution.view(h));
            cfl_max = cfl_max.max(cfl);
            self.solution.write_cfl(h, cfl);
        }
        cfl_max
    }

    /// Prepare the stability numbers of the initial even plane.
    pub fn setup_march(&mut self) -> f64 {
        self.update_cfl(Plane::Even)
    }

    // Full steps

    /// Advance one full time step with the configured slope scheme.
    pub fn march_full(&mut self) -> MarchStatus {
        let status = self.march_full_with(self.config.slope);
        self.report(&status);
        status
    }

    /// Advance `steps` full time steps with the configured slope scheme.
    pub fn march_full_steps(&mut self, steps: usize) -> MarchStatus {
        self.march_steps(steps, self.config.slope)
    }

    /// Advance `steps` full time steps with the weighted slope scheme.
    pub fn march_alpha(&mut self, alpha: f64, steps: usize) -> MarchStatus {
        self.march_steps(steps, SlopeScheme::Weighted { alpha })
    }

    /// Advance `steps` full time steps with squared weights.
    pub fn march_alpha2(&mut self, steps: usize) -> MarchStatus {
        self.march_alpha(2.0, steps)
    }

    fn march_steps(&mut self, steps: usize, slope: SlopeScheme) -> MarchStatus {
        let mut status = MarchStatus::default();
        for _ in 0..steps {
            status.merge(self.march_full_with(slope));
        }
        if steps > 0 {
            self.report(&status);
        }
        status
    }

    fn march_full_with(&mut self, slope: SlopeScheme) -> MarchStatus {
        self.march_half_so0(Plane::Even);
        self.march_half_so1_with(Plane::Even, slope);
        self.treat_boundary_so0();
        self.treat_boundary_so1();
        let cfl_odd = self.update_cfl(Plane::Odd);
        self.march_half_so0(Plane::Odd);
        self.march_half_so1_with(Plane::Odd, slope);
        let cfl_even = self.update_cfl(Plane::Even);

        MarchStatus {
            steps: 1,
            cfl_max: cfl_odd.max(cfl_even),
            non_finite: self.solution.has_non_finite(Plane::Even),
        }
    }

    fn report(&self, status: &MarchStatus) {
        if status.non_finite {
            log::warn!(
                "Solver<{}>: non-finite solution after {} steps",
                self.kernel.name(),
                status.steps
            );
        } else if status.cfl_max >= self.config.cfl_limit {
            log::warn!(
                "Solver<{}>: CFL {:.4} reached limit {} within {} steps",
                self.kernel.name(),
                status.cfl_max,
                self.config.cfl_limit,
                status.steps
            );
        } else {
            log::trace!(
                "Solver<{}>: {} steps, CFL max {:.4}",
                self.kernel.name(),
                status.steps,
                status.cfl_max
            );
        }
    }

    // Single conservation elements

    /// Value the next half step would assign to the top of a conservation
    /// element, without writing it.
    pub fn calc_so0(&self, ce: &Celm<'_>, iv: usize) -> Result<f64> {
        self.check_celm(ce, iv, "Solver::calc_so0")?;
        Ok(self.calc_so0_at(ce.xindex(), iv))
    }

    /// Slope the next half step would assign to the top of a conservation
    /// element, without writing it.
    pub fn calc_so1(&self, ce: &Celm<'_>, iv: usize) -> Result<f64> {
        self.check_celm(ce, iv, "Solver::calc_so1")?;
        let h = ce.xindex();
        let u_top = self.calc_so0_at(h, iv);
        Ok(self.calc_so1_at(h, iv, u_top, self.config.slope))
    }

    fn check_celm(&self, ce: &Celm<'_>, iv: usize, operation: &str) -> Result<()> {
        if !self.solution.grid().ptr_eq(ce.grid()) {
            return Err(CeseError::ForeignElement {
                operation: format!("{}({})", operation, ce),
            });
        }
        if iv >= self.solution.nvar() {
            return Err(CeseError::variable_out_of_range(
                format!("{}({}, iv={})", operation, ce, iv),
                iv,
                self.solution.nvar(),
            ));
        }
        Ok(())
    }

    /// Space-time flux balance over the conservation element at `h`.
    fn calc_so0_at(&self, h: usize, iv: usize) -> f64 {
        let k = &self.kernel;
        let xn = self.solution.view(h - 1);
        let xp = self.solution.view(h + 1);
        let mut value = k.xp(&xn, iv) + k.xn(&xp, iv);
        value += k.tp(&xn, iv) - k.tp(&xp, iv);
        value / (xp.x() - xn.x())
    }

    fn calc_so1_at(&self, h: usize, iv: usize, u_top: f64, slope: SlopeScheme) -> f64 {
        let k = &self.kernel;
        let xn = self.solution.view(h - 1);
        let xp = self.solution.view(h + 1);
        let un = k.so0p(&xn, iv);
        let up = k.so0p(&xp, iv);
        match slope {
            SlopeScheme::Central => (up - un) / (xp.x() - xn.x()),
            SlopeScheme::Weighted { alpha } => {
                let top: SelmView<'_> = self.solution.view(h);
                weighted_slope(
                    (u_top - un) / (top.xctr() - xn.x()),
                    (up - u_top) / (xp.x() - top.xctr()),
                    alpha,
                )
            }
        }
    }

    fn ghost_sources(&self) -> (usize, usize) {
        self.config
            .boundary
            .ghost_sources(self.solution.grid().xsize())
    }

    /// Top solution element indices of the conservation elements marched
    /// from `plane`.
    fn stencil_xindices(&self, plane: Plane) -> StepBy<Range<usize>> {
        let xsize = self.solution.grid().xsize();
        let range = match plane {
            // Interior elements between nodes: 2, 4, ..., 2 * ncelm
            Plane::Even => 2..xsize - 2,
            // Elements on nodes, boundary ones included: 1, 3, ..., 2 * ncelm + 1
            Plane::Odd => 1..xsize - 1,
        };
        range.step_by(2)
    }
}

/// Crosswise weighted average of two one-sided differences.
fn weighted_slope(duxn: f64, duxp: f64, alpha: f64) -> f64 {
    let wn = duxn.abs().powf(alpha);
    let wp = duxp.abs().powf(alpha);
    (wp * duxn + wn * duxp) / (wn + wp + TINY)
}
