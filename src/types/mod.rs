//! Strongly-typed domain types.

mod plane;

pub use plane::Plane;
