//! Discrete error norms against exact solutions.
//!
//! Both norms compare the values of one variable on one plane with an exact
//! function evaluated at the solution element centroids. They are plain
//! vector norms, so they scale with the number of elements.

use crate::error::Result;
use crate::solver::Solution;
use crate::types::Plane;

/// Sum of absolute differences to `exact` over the plane.
pub fn l1_error<F>(solution: &Solution, plane: Plane, iv: usize, exact: F) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let values = solution.so0_plane(plane, iv)?;
    let xctr = solution.xctr_plane(plane);
    Ok(values
        .iter()
        .zip(&xctr)
        .map(|(u, &x)| (u - exact(x)).abs())
        .sum())
}

/// Largest absolute difference to `exact` over the plane.
pub fn linf_error<F>(solution: &Solution, plane: Plane, iv: usize, exact: F) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let values = solution.so0_plane(plane, iv)?;
    let xctr = solution.xctr_plane(plane);
    Ok(values
        .iter()
        .zip(&xctr)
        .map(|(u, &x)| (u - exact(x)).abs())
        .fold(0.0, f64::max))
}
