//! Conservation and solution elements addressed on a [`Grid`].
//!
//! An element is a light handle: a grid reference plus one half-step
//! coordinate index `xindex` into the grid's coordinate table. The index
//! encodes both the logical element index and the time-plane parity, so
//! moving by an odd offset hops to the other plane and moving by an even
//! offset stays on the same one.
//!
//! | Kind   | Even-plane xindex | Valid xindex        |
//! |--------|-------------------|---------------------|
//! | `Celm` | `2 + 2 * ielm`    | `[2, 2 * ncelm + 1)` |
//! | `Selm` | `1 + 2 * ielm`    | `[1, 2 * ncelm + 2)` |
//!
//! Elements are `Copy`; [`duplicate`](Celm::duplicate) yields an independent
//! handle whose index can move without affecting the source.

use std::fmt;

use crate::error::{CeseError, Result};
use crate::mesh::Grid;
use crate::types::Plane;

/// Generate an element handle type and its per-plane iterator.
///
/// `$first` is the xindex of logical element 0 on the even plane and
/// `$margin` the number of trailing table slots outside the valid domain.
macro_rules! define_element {
    (
        $(#[$meta:meta])*
        $name:ident, $iter:ident, $kind:literal, first = $first:literal, margin = $margin:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'g> {
            grid: &'g Grid,
            xindex: usize,
        }

        impl<'g> $name<'g> {
            /// Kind name used in diagnostics.
            pub const KIND: &'static str = $kind;

            /// Build from a logical index, rejecting negative and out-of-domain requests.
            pub(crate) fn new_checked(
                grid: &'g Grid,
                ielm: isize,
                plane: Plane,
                caller: &str,
            ) -> Result<Self> {
                let operation = format!("{}(ielm={}, plane={})", caller, ielm, plane);
                if ielm < 0 {
                    return Err(CeseError::invalid_argument(
                        operation,
                        "negative element index",
                    ));
                }
                // Saturates so huge indices report as out of domain.
                let xindex = (ielm as usize)
                    .checked_mul(2)
                    .and_then(|v| v.checked_add($first + plane.parity()))
                    .and_then(|v| isize::try_from(v).ok())
                    .unwrap_or(isize::MAX);
                let (lower, upper) = Self::domain(grid);
                if xindex < lower as isize || xindex >= upper as isize {
                    return Err(CeseError::OutOfDomain {
                        operation,
                        xindex,
                        lower,
                        upper,
                    });
                }
                Ok(Self {
                    grid,
                    xindex: xindex as usize,
                })
            }

            /// Build from a raw half-step index known to be in the domain.
            #[inline]
            pub(crate) fn from_xindex(grid: &'g Grid, xindex: usize) -> Self {
                debug_assert!({
                    let (lower, upper) = Self::domain(grid);
                    xindex >= lower && xindex < upper
                });
                Self { grid, xindex }
            }

            /// Valid half-open xindex interval on a grid.
            #[inline]
            pub fn domain(grid: &Grid) -> (usize, usize) {
                ($first, grid.xsize() - $margin)
            }

            /// The owning grid.
            #[inline]
            pub fn grid(&self) -> &'g Grid {
                self.grid
            }

            /// Raw half-step coordinate index.
            #[inline]
            pub fn xindex(&self) -> usize {
                self.xindex
            }

            /// Logical element index (parity stripped).
            #[inline]
            pub fn index(&self) -> usize {
                (self.xindex - $first) >> 1
            }

            /// Time plane the element currently sits on.
            #[inline]
            pub fn plane(&self) -> Plane {
                Plane::from_odd((self.xindex - $first) & 1 == 1)
            }

            #[inline]
            pub fn on_even_plane(&self) -> bool {
                self.plane().is_even()
            }

            #[inline]
            pub fn on_odd_plane(&self) -> bool {
                self.plane().is_odd()
            }

            /// Nominal coordinate.
            #[inline]
            pub fn x(&self) -> f64 {
                self.grid.xcoord()[self.xindex]
            }

            /// Coordinate of the negative (left) bound.
            #[inline]
            pub fn xneg(&self) -> f64 {
                self.grid.xcoord()[self.xindex - 1]
            }

            /// Coordinate of the positive (right) bound.
            #[inline]
            pub fn xpos(&self) -> f64 {
                self.grid.xcoord()[self.xindex + 1]
            }

            /// Distance from the nominal coordinate to the left bound.
            #[inline]
            pub fn dxneg(&self) -> f64 {
                self.x() - self.xneg()
            }

            /// Distance from the nominal coordinate to the right bound.
            #[inline]
            pub fn dxpos(&self) -> f64 {
                self.xpos() - self.x()
            }

            /// Independent copy of this handle.
            #[inline]
            pub fn duplicate(&self) -> Self {
                *self
            }

            /// Move the element by `offset` half steps in place.
            ///
            /// Fails without touching the element when the target falls
            /// outside the valid domain.
            pub fn move_by(&mut self, offset: isize) -> Result<&mut Self> {
                let target = (self.xindex as isize).saturating_add(offset);
                let (lower, upper) = Self::domain(self.grid);
                if target < lower as isize || target >= upper as isize {
                    return Err(CeseError::MoveOutOfDomain {
                        kind: $kind,
                        xindex: self.xindex,
                        offset,
                        target,
                        lower,
                        upper,
                    });
                }
                self.xindex = target as usize;
                Ok(self)
            }

            /// Move one full element left, staying on the plane.
            pub fn move_left(&mut self) -> Result<&mut Self> {
                self.move_by(-2)
            }

            /// Move one full element right, staying on the plane.
            pub fn move_right(&mut self) -> Result<&mut Self> {
                self.move_by(2)
            }

            /// Move half an element left, switching plane.
            pub fn move_neg(&mut self) -> Result<&mut Self> {
                self.move_by(-1)
            }

            /// Move half an element right, switching plane.
            pub fn move_pos(&mut self) -> Result<&mut Self> {
                self.move_by(1)
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.grid.ptr_eq(other.grid) && self.xindex == other.xindex
            }
        }

        impl Eq for $name<'_> {}

        impl fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct($kind)
                    .field("xindex", &self.xindex)
                    .field("plane", &self.plane())
                    .field("index", &self.index())
                    .finish()
            }
        }

        impl fmt::Display for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}, index={}, x={}, xneg={}, xpos={})",
                    $kind,
                    self.plane(),
                    self.index(),
                    self.x(),
                    self.xneg(),
                    self.xpos()
                )
            }
        }

        /// Lazy iterator over the elements of one plane.
        ///
        /// Cloning restarts from the current position; calling the grid
        /// accessor again restarts from the first element.
        #[derive(Clone, Debug)]
        pub struct $iter<'g> {
            grid: &'g Grid,
            next: usize,
            end: usize,
        }

        impl<'g> $iter<'g> {
            pub(crate) fn new(grid: &'g Grid, plane: Plane) -> Self {
                let (lower, upper) = $name::domain(grid);
                Self {
                    grid,
                    next: lower + plane.parity(),
                    end: upper,
                }
            }
        }

        impl<'g> Iterator for $iter<'g> {
            type Item = $name<'g>;

            fn next(&mut self) -> Option<Self::Item> {
                if self.next >= self.end {
                    return None;
                }
                let elm = $name::from_xindex(self.grid, self.next);
                self.next += 2;
                Some(elm)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                let n = if self.next >= self.end {
                    0
                } else {
                    (self.end - self.next).div_ceil(2)
                };
                (n, Some(n))
            }
        }

        impl ExactSizeIterator for $iter<'_> {}

        impl std::iter::FusedIterator for $iter<'_> {}
    };
}

define_element!(
    /// Compound conservation element.
    ///
    /// Spans two basic conservation elements; its lower corners touch the two
    /// solution elements it is marched from and its top touches the solution
    /// element it updates.
    ///
    /// # Example
    ///
    /// ```
    /// use cese_rs::mesh::Grid;
    /// use cese_rs::types::Plane;
    ///
    /// let grid = Grid::new(0.0, 10.0, 10).unwrap();
    /// let ce = grid.celm(0, Plane::Even).unwrap();
    /// assert_eq!(ce.to_string(), "Celm(even, index=0, x=0.5, xneg=0, xpos=1)");
    /// ```
    Celm, CelmIter, "Celm", first = 2, margin = 2
);

define_element!(
    /// Solution element.
    ///
    /// Carries the value and slope of the solution on its plane; its spatial
    /// extent runs from `xneg` to `xpos`.
    ///
    /// # Example
    ///
    /// ```
    /// use cese_rs::mesh::Grid;
    /// use cese_rs::types::Plane;
    ///
    /// let grid = Grid::new(0.0, 10.0, 10).unwrap();
    /// let se = grid.selm(10, Plane::Even).unwrap();
    /// assert_eq!(se.to_string(), "Selm(even, index=10, x=10, xneg=9.5, xpos=10.5)");
    /// ```
    Selm, SelmIter, "Selm", first = 1, margin = 1
);

impl<'g> Celm<'g> {
    /// Centroid; a conservation element is centred on its nominal coordinate.
    #[inline]
    pub fn xctr(&self) -> f64 {
        self.x()
    }

    /// Lower-left solution element the element is marched from.
    #[inline]
    pub fn selm_xn(&self) -> Selm<'g> {
        Selm::from_xindex(self.grid, self.xindex - 1)
    }

    /// Lower-right solution element the element is marched from.
    #[inline]
    pub fn selm_xp(&self) -> Selm<'g> {
        Selm::from_xindex(self.grid, self.xindex + 1)
    }

    /// Solution element on top, on the opposite plane.
    #[inline]
    pub fn selm_tp(&self) -> Selm<'g> {
        Selm::from_xindex(self.grid, self.xindex)
    }
}

impl Selm<'_> {
    /// Centroid of the spatial extent `[xneg, xpos]`.
    ///
    /// Equals `x` on a uniform grid and on every midpoint element; at an
    /// interior node of a non-uniform grid it is shifted toward the wider side.
    #[inline]
    pub fn xctr(&self) -> f64 {
        (self.xneg() + self.xpos()) / 2.0
    }
}
