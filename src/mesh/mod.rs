//! Space-time mesh.
//!
//! Provides the staggered 1D grid used by the CESE method:
//! - [`Grid`]: node coordinates and the half-step coordinate table
//! - [`Celm`]: compound conservation elements
//! - [`Selm`]: solution elements
//! - Per-plane iterators over both element kinds

mod element;
mod grid;

pub use element::{Celm, CelmIter, Selm, SelmIter};
pub use grid::Grid;
