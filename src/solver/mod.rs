//! CESE solver components.
//!
//! # Submodules
//!
//! - `solution`: value, slope and CFL storage on both time planes
//! - `boundary`: ghost element treatment
//! - `config`: slope scheme and solver configuration
//! - `march`: the half-step and full-step marching engine

mod boundary;
mod config;
mod march;
mod solution;

pub use boundary::BoundaryCondition;
pub use config::{SlopeScheme, SolverConfig};
pub use march::{MarchStatus, Solver};
pub use solution::Solution;
