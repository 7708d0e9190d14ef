//! Time-plane parity of the staggered space-time mesh.

use std::fmt;

/// One of the two interleaved time planes.
///
/// Solution elements on the even plane sit at grid nodes; on the odd plane
/// they sit at the midpoints between nodes, half a time step later.
///
/// # Example
///
/// ```
/// use cese_rs::types::Plane;
///
/// assert_eq!(Plane::Even.opposite(), Plane::Odd);
/// assert_eq!(Plane::from_odd(true), Plane::Odd);
/// assert_eq!(Plane::Odd.to_string(), "odd");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Plane holding the nodal solution elements.
    #[default]
    Even,
    /// Plane holding the midpoint solution elements.
    Odd,
}

impl Plane {
    /// Build from an odd-plane flag.
    #[inline]
    pub const fn from_odd(odd_plane: bool) -> Self {
        if odd_plane { Plane::Odd } else { Plane::Even }
    }

    /// True for the odd plane.
    #[inline]
    pub const fn is_odd(self) -> bool {
        matches!(self, Plane::Odd)
    }

    /// True for the even plane.
    #[inline]
    pub const fn is_even(self) -> bool {
        matches!(self, Plane::Even)
    }

    /// The other plane.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Plane::Even => Plane::Odd,
            Plane::Odd => Plane::Even,
        }
    }

    /// Parity bit added to a half-step coordinate (0 even, 1 odd).
    #[inline]
    pub(crate) const fn parity(self) -> usize {
        match self {
            Plane::Even => 0,
            Plane::Odd => 1,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Even => write!(f, "even"),
            Plane::Odd => write!(f, "odd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for plane in [Plane::Even, Plane::Odd] {
            assert_eq!(plane.opposite().opposite(), plane);
            assert_ne!(plane.opposite(), plane);
        }
    }

    #[test]
    fn test_parity() {
        assert_eq!(Plane::Even.parity(), 0);
        assert_eq!(Plane::Odd.parity(), 1);
        assert!(Plane::default().is_even());
    }
}
