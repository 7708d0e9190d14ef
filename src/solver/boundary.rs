//! Boundary treatment of the odd-plane ghost elements.
//!
//! After the even-to-odd half step the interior stencil has filled every
//! odd-plane solution element but the two ghosts just beyond the domain
//! ends. The odd-to-even half step needs both ghosts, so a boundary
//! condition fills them in between.

use std::fmt;

/// Rule for filling the ghost solution elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryCondition {
    /// Wrap around: each ghost takes the innermost element of the opposite end.
    #[default]
    Periodic,
    /// Zero gradient: each ghost copies its innermost neighbour.
    Extrapolate,
}

impl BoundaryCondition {
    /// Source slots for the left and right ghosts.
    ///
    /// `xsize` is the length of the half-step coordinate table; the ghosts
    /// live at `0` and `xsize - 1`.
    pub(crate) fn ghost_sources(self, xsize: usize) -> (usize, usize) {
        let first = 2;
        let last = xsize - 3;
        match self {
            BoundaryCondition::Periodic => (last, first),
            BoundaryCondition::Extrapolate => (first, last),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryCondition::Periodic => write!(f, "periodic"),
            BoundaryCondition::Extrapolate => write!(f, "extrapolate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_sources() {
        // ncelm = 10: odd-plane interior elements at 2, 4, ..., 20
        assert_eq!(BoundaryCondition::Periodic.ghost_sources(23), (20, 2));
        assert_eq!(BoundaryCondition::Extrapolate.ghost_sources(23), (2, 20));

        // A single element is its own neighbour at both ends
        assert_eq!(BoundaryCondition::Periodic.ghost_sources(5), (2, 2));
    }
}
