//! Staggered 1D grid.
//!
//! A grid partitions [xmin, xmax] into `ncelm` conservation elements and
//! expands the node coordinates into a table of half-step coordinates:
//!
//! ```text
//! xindex:   0    1    2    3    4   ...  2n   2n+1  2n+2
//! coord:  ghost  x0   m0   x1   m1  ...  m(n-1) xn  ghost
//! ```
//!
//! Odd slots hold nodes, even slots hold midpoints, and the two ends hold
//! ghost coordinates mirrored about the first and last node.

use std::fmt;

use crate::error::{CeseError, Result};
use crate::mesh::element::{Celm, CelmIter, Selm, SelmIter};
use crate::types::Plane;

/// Immutable 1D mesh geometry shared by elements and solutions.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    xmin: f64,
    xmax: f64,
    ncelm: usize,
    /// Half-step coordinate table of length 2 * ncelm + 3.
    xcoord: Vec<f64>,
}

impl Grid {
    /// Create a uniform grid of [xmin, xmax] with `ncelm` conservation elements.
    pub fn new(xmin: f64, xmax: f64, ncelm: usize) -> Result<Self> {
        let operation = format!("Grid::new(xmin={}, xmax={}, ncelm={})", xmin, xmax, ncelm);
        if ncelm < 1 {
            return Err(CeseError::invalid_argument(
                operation,
                "ncelm smaller than 1",
            ));
        }
        if !xmin.is_finite() || !xmax.is_finite() {
            return Err(CeseError::invalid_argument(operation, "non-finite bound"));
        }
        if !(xmin < xmax) {
            return Err(CeseError::invalid_argument(operation, "xmin >= xmax"));
        }

        let xspace = (xmax - xmin) / ncelm as f64;
        let mut xloc: Vec<f64> = (0..=ncelm).map(|i| xmin + i as f64 * xspace).collect();
        xloc[ncelm] = xmax;

        let grid = Self::from_nodes(&xloc).ok_or_else(|| {
            CeseError::invalid_argument(operation, "coordinate table overflows")
        })?;
        log::debug!("{} built uniform (dx={})", grid, xspace);
        Ok(grid)
    }

    /// Create a grid from explicit node coordinates.
    ///
    /// The coordinates must contain at least two entries and be strictly
    /// increasing; adjacent nodes bound one conservation element.
    pub fn from_coordinates(xloc: &[f64]) -> Result<Self> {
        const OPERATION: &str = "Grid::from_coordinates(xloc)";
        if xloc.len() < 2 {
            return Err(CeseError::invalid_argument(
                OPERATION,
                format!("xloc.len()={} smaller than 2", xloc.len()),
            ));
        }
        if let Some(it) = xloc.iter().position(|x| !x.is_finite()) {
            return Err(CeseError::invalid_argument(
                OPERATION,
                format!("xloc[{}]={} is not finite", it, xloc[it]),
            ));
        }
        for (it, pair) in xloc.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(CeseError::invalid_argument(
                    OPERATION,
                    format!(
                        "xloc[{}]={} >= xloc[{}]={}",
                        it,
                        pair[0],
                        it + 1,
                        pair[1]
                    ),
                ));
            }
        }

        let grid = Self::from_nodes(xloc).ok_or_else(|| {
            CeseError::invalid_argument(OPERATION, "coordinate table overflows")
        })?;
        log::debug!("{} built from {} nodes", grid, xloc.len());
        Ok(grid)
    }

    /// Fill the half-step coordinate table from validated nodes.
    ///
    /// `None` when midpoints or mirrored ghosts overflow to infinity.
    fn from_nodes(xloc: &[f64]) -> Option<Self> {
        let ncelm = xloc.len() - 1;
        let nx = ncelm * 2 + 3;
        let mut xcoord = vec![0.0; nx];

        for (it, &x) in xloc.iter().enumerate() {
            xcoord[it * 2 + 1] = x;
        }
        for it in 0..ncelm {
            xcoord[it * 2 + 2] = (xcoord[it * 2 + 1] + xcoord[it * 2 + 3]) / 2.0;
        }
        xcoord[0] = xcoord[1] + xcoord[1] - xcoord[2];
        xcoord[nx - 1] = xcoord[nx - 2] + xcoord[nx - 2] - xcoord[nx - 3];
        if !xcoord.iter().all(|x| x.is_finite()) {
            return None;
        }

        Some(Self {
            xmin: xloc[0],
            xmax: xloc[ncelm],
            ncelm,
            xcoord,
        })
    }

    /// Left end of the domain.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Right end of the domain.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Number of conservation elements.
    pub fn ncelm(&self) -> usize {
        self.ncelm
    }

    /// Number of solution elements on the even plane.
    pub fn nselm(&self) -> usize {
        self.ncelm + 1
    }

    /// Length of the half-step coordinate table.
    pub fn xsize(&self) -> usize {
        self.xcoord.len()
    }

    /// Domain length.
    pub fn length(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// The half-step coordinate table.
    pub fn xcoord(&self) -> &[f64] {
        &self.xcoord
    }

    /// Mutable access to the coordinate table.
    ///
    /// Meant for low-level tests that need a hand-crafted geometry; nothing
    /// re-validates the table afterwards.
    pub fn xcoord_mut(&mut self) -> &mut [f64] {
        &mut self.xcoord
    }

    /// Smallest conservation element width.
    pub fn dx_min(&self) -> f64 {
        self.xcoord[1..self.xsize() - 1]
            .windows(3)
            .step_by(2)
            .map(|w| w[2] - w[0])
            .fold(f64::INFINITY, f64::min)
    }

    /// True when both references point at the same grid instance.
    pub fn ptr_eq(&self, other: &Grid) -> bool {
        std::ptr::eq(self, other)
    }

    /// Coordinate at a half-step index, extrapolated linearly past the table.
    ///
    /// Ghost solution elements one slot outside the table still need a
    /// geometry; extrapolation keeps it consistent with the mirrored ghosts.
    pub(crate) fn coord(&self, xindex: isize) -> f64 {
        let last = self.xcoord.len() as isize - 1;
        if xindex < 0 {
            let step = self.xcoord[1] - self.xcoord[0];
            self.xcoord[0] + step * xindex as f64
        } else if xindex > last {
            let step = self.xcoord[last as usize] - self.xcoord[last as usize - 1];
            self.xcoord[last as usize] + step * (xindex - last) as f64
        } else {
            self.xcoord[xindex as usize]
        }
    }

    /// Conservation element at a logical index on a plane.
    pub fn celm(&self, ielm: isize, plane: Plane) -> Result<Celm<'_>> {
        Celm::new_checked(self, ielm, plane, "Grid::celm")
    }

    /// Solution element at a logical index on a plane.
    pub fn selm(&self, ielm: isize, plane: Plane) -> Result<Selm<'_>> {
        Selm::new_checked(self, ielm, plane, "Grid::selm")
    }

    /// Lazily iterate the conservation elements of a plane.
    pub fn celms(&self, plane: Plane) -> CelmIter<'_> {
        CelmIter::new(self, plane)
    }

    /// Lazily iterate the solution elements of a plane.
    pub fn selms(&self, plane: Plane) -> SelmIter<'_> {
        SelmIter::new(self, plane)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid(xmin={}, xmax={}, ncelm={})",
            self.xmin, self.xmax, self.ncelm
        )
    }
}
