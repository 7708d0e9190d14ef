//! Solver configuration.

use std::fmt;

use crate::error::{CeseError, Result};
use crate::solver::BoundaryCondition;

/// Reconstruction of the slope at the top of a conservation element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SlopeScheme {
    /// Centred difference of the predicted values at the two lower solution
    /// elements. Non-dissipative.
    #[default]
    Central,
    /// Weighted average of the two one-sided differences through the new
    /// value, weights `|d|^alpha` taken crosswise. Larger `alpha` damps
    /// oscillations near discontinuities; `alpha = 0` is the plain average.
    Weighted { alpha: f64 },
}

impl fmt::Display for SlopeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlopeScheme::Central => write!(f, "central"),
            SlopeScheme::Weighted { alpha } => write!(f, "weighted(alpha={})", alpha),
        }
    }
}

/// Configuration of the marching engine.
///
/// # Example
///
/// ```
/// use cese_rs::solver::{BoundaryCondition, SlopeScheme, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_boundary(BoundaryCondition::Extrapolate)
///     .with_slope(SlopeScheme::Weighted { alpha: 2.0 })
///     .with_cfl_limit(0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Ghost element treatment
    pub boundary: BoundaryCondition,
    /// Slope reconstruction used by `march_half_so1`
    pub slope: SlopeScheme,
    /// Admissible bound on the local stability number
    pub cfl_limit: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryCondition::Periodic,
            slope: SlopeScheme::Central,
            cfl_limit: 1.0,
        }
    }
}

impl SolverConfig {
    /// Set the boundary condition.
    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the slope scheme.
    pub fn with_slope(mut self, slope: SlopeScheme) -> Self {
        self.slope = slope;
        self
    }

    /// Set the admissible CFL bound.
    pub fn with_cfl_limit(mut self, cfl_limit: f64) -> Self {
        self.cfl_limit = cfl_limit;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        let operation = format!("SolverConfig::validate({})", self);
        if !(self.cfl_limit.is_finite() && self.cfl_limit > 0.0) {
            return Err(CeseError::invalid_argument(
                operation,
                format!("cfl_limit = {} must be positive and finite", self.cfl_limit),
            ));
        }
        if let SlopeScheme::Weighted { alpha } = self.slope {
            if !(alpha.is_finite() && alpha >= 0.0) {
                return Err(CeseError::invalid_argument(
                    operation,
                    format!("alpha = {} must be non-negative and finite", alpha),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "boundary={}, slope={}, cfl_limit={}",
            self.boundary, self.slope, self.cfl_limit
        )
    }
}
