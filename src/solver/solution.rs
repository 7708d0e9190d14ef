//! Value and slope storage on both time planes.

use std::sync::Arc;

use crate::equations::{SelmView, TimeIncrement};
use crate::error::{CeseError, Result};
use crate::mesh::{Grid, Selm};
use crate::types::Plane;

/// Solution state bound to one [`Grid`].
///
/// Values (`so0`), slopes (`so1`) and local stability numbers (`cfl`) are
/// stored per half-step coordinate index, so both planes interleave in the
/// same arrays: `so0[xindex * nvar + iv]`. The two slots at the table ends
/// hold the odd-plane ghost elements filled by boundary treatment.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cese_rs::mesh::Grid;
/// use cese_rs::solver::Solution;
/// use cese_rs::types::Plane;
///
/// let grid = Arc::new(Grid::new(0.0, 10.0, 10).unwrap());
/// let mut sol = Solution::new(Arc::clone(&grid), 1, 0.5).unwrap();
/// sol.set_so0_from(Plane::Even, 0, |x| 2.0 * x).unwrap();
///
/// let se = grid.selm(3, Plane::Even).unwrap();
/// assert_eq!(sol.so0(&se, 0).unwrap(), 6.0);
/// assert_eq!(sol.so0_plane(Plane::Even, 0).unwrap().len(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct Solution {
    grid: Arc<Grid>,
    nvar: usize,
    time: TimeIncrement,
    so0: Vec<f64>,
    so1: Vec<f64>,
    cfl: Vec<f64>,
}

impl Solution {
    /// Create a zero-initialized solution with `nvar` variables.
    pub fn new(grid: Arc<Grid>, nvar: usize, time_increment: f64) -> Result<Self> {
        let operation = format!(
            "Solution::new(grid={}, nvar={}, time_increment={})",
            grid, nvar, time_increment
        );
        if nvar < 1 {
            return Err(CeseError::invalid_argument(operation, "nvar smaller than 1"));
        }
        check_time_increment(&operation, time_increment)?;

        let xsize = grid.xsize();
        log::debug!("{} allocated for {} half-step slots", operation, xsize);
        Ok(Self {
            grid,
            nvar,
            time: TimeIncrement::new(time_increment),
            so0: vec![0.0; xsize * nvar],
            so1: vec![0.0; xsize * nvar],
            cfl: vec![0.0; xsize],
        })
    }

    /// The grid the solution is bound to.
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Number of solution variables.
    pub fn nvar(&self) -> usize {
        self.nvar
    }

    pub fn time_increment(&self) -> TimeIncrement {
        self.time
    }

    pub fn dt(&self) -> f64 {
        self.time.dt
    }

    pub fn hdt(&self) -> f64 {
        self.time.hdt
    }

    pub fn qdt(&self) -> f64 {
        self.time.qdt
    }

    /// Change the time increment used by subsequent marches.
    pub fn set_time_increment(&mut self, time_increment: f64) -> Result<()> {
        let operation = format!("Solution::set_time_increment({})", time_increment);
        check_time_increment(&operation, time_increment)?;
        log::debug!("time increment {} -> {}", self.time.dt, time_increment);
        self.time = TimeIncrement::new(time_increment);
        Ok(())
    }

    // Element accessors

    /// Value of variable `iv` at a solution element.
    pub fn so0(&self, se: &Selm<'_>, iv: usize) -> Result<f64> {
        let offset = self.offset(se, iv, "Solution::so0")?;
        Ok(self.so0[offset])
    }

    /// Slope of variable `iv` at a solution element.
    pub fn so1(&self, se: &Selm<'_>, iv: usize) -> Result<f64> {
        let offset = self.offset(se, iv, "Solution::so1")?;
        Ok(self.so1[offset])
    }

    pub fn set_so0(&mut self, se: &Selm<'_>, iv: usize, value: f64) -> Result<()> {
        let offset = self.offset(se, iv, "Solution::set_so0")?;
        self.so0[offset] = value;
        Ok(())
    }

    pub fn set_so1(&mut self, se: &Selm<'_>, iv: usize, value: f64) -> Result<()> {
        let offset = self.offset(se, iv, "Solution::set_so1")?;
        self.so1[offset] = value;
        Ok(())
    }

    /// Local stability number recorded by the last CFL update of the element's plane.
    pub fn cfl(&self, se: &Selm<'_>) -> Result<f64> {
        self.check_owner(se, "Solution::cfl")?;
        Ok(self.cfl[se.xindex()])
    }

    /// Kernel view of a solution element.
    pub fn selm_view(&self, se: &Selm<'_>) -> Result<SelmView<'_>> {
        self.check_owner(se, "Solution::selm_view")?;
        Ok(self.view(se.xindex()))
    }

    // Bulk accessors

    /// Values of variable `iv` on a plane, one per solution element.
    pub fn so0_plane(&self, plane: Plane, iv: usize) -> Result<Vec<f64>> {
        self.check_iv(iv, || format!("Solution::so0_plane(iv={}, plane={})", iv, plane))?;
        Ok(self.plane_xindices(plane).map(|h| self.so0[h * self.nvar + iv]).collect())
    }

    /// Slopes of variable `iv` on a plane, one per solution element.
    pub fn so1_plane(&self, plane: Plane, iv: usize) -> Result<Vec<f64>> {
        self.check_iv(iv, || format!("Solution::so1_plane(iv={}, plane={})", iv, plane))?;
        Ok(self.plane_xindices(plane).map(|h| self.so1[h * self.nvar + iv]).collect())
    }

    pub fn set_so0_plane(&mut self, plane: Plane, iv: usize, values: &[f64]) -> Result<()> {
        let operation = || format!("Solution::set_so0_plane(iv={}, plane={})", iv, plane);
        self.check_iv(iv, operation)?;
        self.check_len(plane, values.len(), operation)?;
        let nvar = self.nvar;
        for (h, &v) in self.plane_xindices(plane).zip(values) {
            self.so0[h * nvar + iv] = v;
        }
        Ok(())
    }

    pub fn set_so1_plane(&mut self, plane: Plane, iv: usize, values: &[f64]) -> Result<()> {
        let operation = || format!("Solution::set_so1_plane(iv={}, plane={})", iv, plane);
        self.check_iv(iv, operation)?;
        self.check_len(plane, values.len(), operation)?;
        let nvar = self.nvar;
        for (h, &v) in self.plane_xindices(plane).zip(values) {
            self.so1[h * nvar + iv] = v;
        }
        Ok(())
    }

    /// Local stability numbers on a plane.
    pub fn cfl_plane(&self, plane: Plane) -> Vec<f64> {
        self.plane_xindices(plane).map(|h| self.cfl[h]).collect()
    }

    /// Solution element centroids on a plane.
    pub fn xctr_plane(&self, plane: Plane) -> Vec<f64> {
        self.grid.selms(plane).map(|se| se.xctr()).collect()
    }

    /// Fill the values of variable `iv` on a plane from a function of the centroid.
    pub fn set_so0_from<F>(&mut self, plane: Plane, iv: usize, f: F) -> Result<()>
    where
        F: Fn(f64) -> f64,
    {
        self.check_iv(iv, || format!("Solution::set_so0_from(iv={}, plane={})", iv, plane))?;
        let grid = Arc::clone(&self.grid);
        for se in grid.selms(plane) {
            self.so0[se.xindex() * self.nvar + iv] = f(se.xctr());
        }
        Ok(())
    }

    /// Fill the slopes of variable `iv` on a plane from a function of the centroid.
    pub fn set_so1_from<F>(&mut self, plane: Plane, iv: usize, f: F) -> Result<()>
    where
        F: Fn(f64) -> f64,
    {
        self.check_iv(iv, || format!("Solution::set_so1_from(iv={}, plane={})", iv, plane))?;
        let grid = Arc::clone(&self.grid);
        for se in grid.selms(plane) {
            self.so1[se.xindex() * self.nvar + iv] = f(se.xctr());
        }
        Ok(())
    }

    /// True when any value or slope on the plane is NaN or infinite.
    pub fn has_non_finite(&self, plane: Plane) -> bool {
        self.plane_xindices(plane).any(|h| {
            let range = h * self.nvar..(h + 1) * self.nvar;
            self.so0[range.clone()]
                .iter()
                .chain(&self.so1[range])
                .any(|v| !v.is_finite())
        })
    }

    // Raw half-step access for the marching engine

    /// Kernel view at any half-step index, ghosts included.
    pub(crate) fn view(&self, xindex: usize) -> SelmView<'_> {
        let h = xindex as isize;
        let range = xindex * self.nvar..(xindex + 1) * self.nvar;
        SelmView::new(
            [self.grid.coord(h - 1), self.grid.coord(h), self.grid.coord(h + 1)],
            &self.so0[range.clone()],
            &self.so1[range],
            self.time,
        )
    }

    #[inline]
    pub(crate) fn so0_at(&self, xindex: usize, iv: usize) -> f64 {
        self.so0[xindex * self.nvar + iv]
    }

    #[inline]
    pub(crate) fn write_so0(&mut self, xindex: usize, iv: usize, value: f64) {
        self.so0[xindex * self.nvar + iv] = value;
    }

    #[inline]
    pub(crate) fn write_so1(&mut self, xindex: usize, iv: usize, value: f64) {
        self.so1[xindex * self.nvar + iv] = value;
    }

    #[inline]
    pub(crate) fn write_cfl(&mut self, xindex: usize, value: f64) {
        self.cfl[xindex] = value;
    }

    /// Copy only the values of every variable between slots.
    pub(crate) fn copy_so0_slot(&mut self, from: usize, to: usize) {
        let nvar = self.nvar;
        self.so0
            .copy_within(from * nvar..(from + 1) * nvar, to * nvar);
    }

    /// Copy only the slopes of every variable between slots.
    pub(crate) fn copy_so1_slot(&mut self, from: usize, to: usize) {
        let nvar = self.nvar;
        self.so1
            .copy_within(from * nvar..(from + 1) * nvar, to * nvar);
    }

    /// Half-step indices of the solution elements on a plane.
    pub(crate) fn plane_xindices(&self, plane: Plane) -> impl Iterator<Item = usize> + use<> {
        let (lower, upper) = Selm::domain(&self.grid);
        (lower + plane.parity()..upper).step_by(2)
    }

    fn plane_len(&self, plane: Plane) -> usize {
        match plane {
            Plane::Even => self.grid.nselm(),
            Plane::Odd => self.grid.ncelm(),
        }
    }

    fn check_owner(&self, se: &Selm<'_>, operation: &str) -> Result<()> {
        if self.grid.ptr_eq(se.grid()) {
            Ok(())
        } else {
            Err(CeseError::ForeignElement {
                operation: format!("{}({})", operation, se),
            })
        }
    }

    fn check_iv<F>(&self, iv: usize, operation: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if iv < self.nvar {
            Ok(())
        } else {
            Err(CeseError::variable_out_of_range(operation(), iv, self.nvar))
        }
    }

    fn check_len<F>(&self, plane: Plane, actual: usize, operation: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        let expected = self.plane_len(plane);
        if actual == expected {
            Ok(())
        } else {
            Err(CeseError::LengthMismatch {
                operation: operation(),
                expected,
                actual,
            })
        }
    }

    fn offset(&self, se: &Selm<'_>, iv: usize, operation: &str) -> Result<usize> {
        self.check_owner(se, operation)?;
        self.check_iv(iv, || format!("{}({}, iv={})", operation, se, iv))?;
        Ok(se.xindex() * self.nvar + iv)
    }
}

fn check_time_increment(operation: &str, time_increment: f64) -> Result<()> {
    if time_increment.is_finite() && time_increment > 0.0 {
        Ok(())
    } else {
        Err(CeseError::invalid_argument(
            operation,
            "time increment must be positive and finite",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(nvar: usize) -> Solution {
        let grid = Arc::new(Grid::new(0.0, 10.0, 10).unwrap());
        Solution::new(grid, nvar, 0.2).unwrap()
    }

    #[test]
    fn test_new_validates_arguments() {
        let grid = Arc::new(Grid::new(0.0, 1.0, 4).unwrap());

        let err = Solution::new(Arc::clone(&grid), 0, 0.1).unwrap_err();
        assert!(err.to_string().contains("nvar smaller than 1"));
        assert!(Solution::new(Arc::clone(&grid), 1, 0.0).is_err());
        assert!(Solution::new(Arc::clone(&grid), 1, f64::NAN).is_err());
        assert!(Solution::new(grid, 1, -0.1).is_err());
    }

    #[test]
    fn test_time_increment_cache() {
        let mut sol = solution(1);
        assert!((sol.hdt() - 0.1).abs() < 1e-15);
        assert!((sol.qdt() - 0.05).abs() < 1e-15);

        sol.set_time_increment(0.4).unwrap();
        assert!((sol.dt() - 0.4).abs() < 1e-15);
        assert!((sol.hdt() - 0.2).abs() < 1e-15);
        assert!(sol.set_time_increment(-1.0).is_err());
        assert!((sol.dt() - 0.4).abs() < 1e-15);
    }

    #[test]
    fn test_element_accessors() {
        let mut sol = solution(2);
        let grid = Arc::clone(sol.grid());
        let se = grid.selm(4, Plane::Odd).unwrap();

        sol.set_so0(&se, 1, 3.5).unwrap();
        sol.set_so1(&se, 0, -1.0).unwrap();
        assert_eq!(sol.so0(&se, 1).unwrap(), 3.5);
        assert_eq!(sol.so0(&se, 0).unwrap(), 0.0);
        assert_eq!(sol.so1(&se, 0).unwrap(), -1.0);

        let err = sol.so0(&se, 2).unwrap_err();
        assert!(matches!(
            err,
            CeseError::VariableOutOfRange { iv: 2, nvar: 2, .. }
        ));
        assert!(err.to_string().contains("iv = 2 out of nvar range (nvar = 2)"));
    }

    #[test]
    fn test_foreign_element_rejected() {
        let mut sol = solution(1);
        let other = Grid::new(0.0, 10.0, 10).unwrap();
        let se = other.selm(0, Plane::Even).unwrap();

        assert!(matches!(
            sol.set_so0(&se, 0, 1.0),
            Err(CeseError::ForeignElement { .. })
        ));
        assert!(sol.cfl(&se).is_err());
    }

    #[test]
    fn test_bulk_plane_sizes() {
        let mut sol = solution(1);

        assert_eq!(sol.so0_plane(Plane::Even, 0).unwrap().len(), 11);
        assert_eq!(sol.so1_plane(Plane::Odd, 0).unwrap().len(), 10);
        assert_eq!(sol.cfl_plane(Plane::Odd).len(), 10);
        assert_eq!(sol.xctr_plane(Plane::Even).len(), 11);

        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        sol.set_so0_plane(Plane::Odd, 0, &values).unwrap();
        assert_eq!(sol.so0_plane(Plane::Odd, 0).unwrap(), values);
        // The even plane is untouched
        assert!(sol.so0_plane(Plane::Even, 0).unwrap().iter().all(|&v| v == 0.0));

        let err = sol.set_so0_plane(Plane::Even, 0, &values).unwrap_err();
        assert_eq!(
            err,
            CeseError::LengthMismatch {
                operation: "Solution::set_so0_plane(iv=0, plane=even)".to_string(),
                expected: 11,
                actual: 10,
            }
        );
        assert!(sol.set_so1_plane(Plane::Odd, 1, &values).is_err());
    }

    #[test]
    fn test_fill_from_centroid() {
        let mut sol = solution(1);
        sol.set_so0_from(Plane::Odd, 0, |x| x * x).unwrap();
        sol.set_so1_from(Plane::Odd, 0, |x| 2.0 * x).unwrap();

        let xctr = sol.xctr_plane(Plane::Odd);
        let so0 = sol.so0_plane(Plane::Odd, 0).unwrap();
        let so1 = sol.so1_plane(Plane::Odd, 0).unwrap();
        for ((x, u), ux) in xctr.iter().zip(&so0).zip(&so1) {
            assert!((u - x * x).abs() < 1e-14);
            assert!((ux - 2.0 * x).abs() < 1e-14);
        }
        assert!(!sol.has_non_finite(Plane::Odd));

        sol.set_so0_from(Plane::Even, 0, |_| f64::NAN).unwrap();
        assert!(sol.has_non_finite(Plane::Even));
    }

    #[test]
    fn test_ghost_view_geometry() {
        let sol = solution(1);

        let left = sol.view(0);
        assert_eq!(left.x(), -0.5);
        assert_eq!(left.xneg(), -1.0);
        assert_eq!(left.xpos(), 0.0);

        let right = sol.view(22);
        assert_eq!(right.x(), 10.5);
        assert_eq!(right.xpos(), 11.0);
    }
}
