//! # cese-rs
//!
//! The space-time conservation element and solution element (CESE) method
//! for 1D hyperbolic conservation laws.
//!
//! This crate provides the core building blocks of the method:
//! - Staggered space-time grid with even and odd time planes
//! - Conservation and solution element addressing with checked movement
//! - Value and slope storage on both planes
//! - Alternating half-step marching with periodic or extrapolated boundaries
//! - Flux kernels (linear advection, inviscid Burgers)
//! - Error norms and stability monitoring
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cese_rs::{Grid, LinearScalar, Plane, Solution, Solver, SolverConfig};
//!
//! let grid = Arc::new(Grid::new(0.0, 2.0 * std::f64::consts::PI, 32).unwrap());
//! let dt = grid.length() / grid.ncelm() as f64;
//! let mut solution = Solution::new(grid, 1, dt).unwrap();
//! solution.set_so0_from(Plane::Even, 0, f64::sin).unwrap();
//! solution.set_so1_from(Plane::Even, 0, f64::cos).unwrap();
//!
//! let mut solver = Solver::new(solution, LinearScalar::default(), SolverConfig::default()).unwrap();
//! solver.setup_march();
//! let status = solver.march_full_steps(32);
//! assert!(!status.non_finite);
//! ```

pub mod analysis;
pub mod equations;
pub mod error;
pub mod mesh;
pub mod solver;
pub mod types;

// Re-export main types for convenience
pub use analysis::{
    StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning, l1_error,
    linf_error,
};
pub use equations::{InviscidBurgers, Kernel, LinearScalar, SelmView, TimeIncrement};
pub use error::{CeseError, Result};
pub use mesh::{Celm, CelmIter, Grid, Selm, SelmIter};
pub use solver::{BoundaryCondition, MarchStatus, SlopeScheme, Solution, Solver, SolverConfig};
pub use types::Plane;
