//! Inviscid Burgers marching validated against the exact Riemann solution.

use std::sync::Arc;

use cese_rs::{
    BoundaryCondition, Grid, InviscidBurgers, Plane, Solution, Solver, SolverConfig,
    StabilityMonitor, StabilityThresholds, StabilityWarning,
};

/// Exact solution of the Burgers Riemann problem with the jump at `x0`.
fn riemann_exact(u_left: f64, u_right: f64, x0: f64, t: f64) -> impl Fn(f64) -> f64 {
    move |x: f64| {
        let xi = x - x0;
        if u_left > u_right {
            // Shock moving with the Rankine-Hugoniot speed
            let speed = 0.5 * (u_left + u_right);
            if xi < speed * t { u_left } else { u_right }
        } else if xi <= u_left * t {
            u_left
        } else if xi >= u_right * t {
            u_right
        } else {
            xi / t
        }
    }
}

fn riemann_solver(
    u_left: f64,
    u_right: f64,
    x0: f64,
    dx: f64,
    dt: f64,
) -> Solver<InviscidBurgers> {
    let ncelm = (2.0 / dx).round() as usize;
    let grid = Arc::new(Grid::new(0.0, 2.0, ncelm).unwrap());
    let mut solution = Solution::new(grid, 1, dt).unwrap();
    solution
        .set_so0_from(Plane::Even, 0, |x| if x < x0 { u_left } else { u_right })
        .unwrap();
    let config = SolverConfig::default().with_boundary(BoundaryCondition::Extrapolate);
    let mut solver = Solver::new(solution, InviscidBurgers, config).unwrap();
    solver.setup_march();
    solver
}

/// L1 distance of the even-plane values to `exact`, weighted by the element width.
fn l1_distance<F: Fn(f64) -> f64>(solver: &Solver<InviscidBurgers>, exact: F) -> f64 {
    let sol = solver.solution();
    let dx = sol.grid().length() / sol.grid().ncelm() as f64;
    sol.so0_plane(Plane::Even, 0)
        .unwrap()
        .iter()
        .zip(sol.xctr_plane(Plane::Even))
        .map(|(u, x)| (u - exact(x)).abs() * dx)
        .sum()
}

#[test]
fn test_shock_position() {
    let (dx, dt) = (0.01, 0.005);
    let mut solver = riemann_solver(1.0, 0.0, 0.5, dx, dt);

    let status = solver.march_alpha2(100);
    assert!(status.is_admissible(1.0), "{:?}", status);

    let t = 100.0 * dt;
    let error = l1_distance(&solver, riemann_exact(1.0, 0.0, 0.5, t));
    println!("shock: t={:.3}, l1 error={:.4e}", t, error);
    assert!(error < 0.02);

    // The shock sits where the profile crosses the mean state
    let sol = solver.solution();
    let values = sol.so0_plane(Plane::Even, 0).unwrap();
    let xctr = sol.xctr_plane(Plane::Even);
    let crossing = values
        .iter()
        .zip(&xctr)
        .find(|(u, _)| **u < 0.5)
        .map(|(_, &x)| x)
        .unwrap();
    assert!((crossing - 0.75).abs() < 0.03, "shock at {}", crossing);
}

#[test]
fn test_shock_conserves_mass() {
    let (dx, dt) = (0.01, 0.005);
    let mut solver = riemann_solver(1.0, 0.0, 0.5, dx, dt);
    let steps = 80;
    let _ = solver.march_alpha2(steps);

    // Odd-plane elements tile the domain; they lag the even plane by half a step
    let sol = solver.solution();
    let mass: f64 = sol.so0_plane(Plane::Odd, 0).unwrap().iter().sum::<f64>() * dx;
    let t_odd = steps as f64 * dt - sol.hdt();
    // Initial mass 0.5 plus the inflow f(1) = 0.5 through the left end
    let expected = 0.5 + 0.5 * t_odd;
    assert!(
        (mass - expected).abs() < 0.01,
        "mass {} != {}",
        mass,
        expected
    );
}

#[test]
fn test_rarefaction_fan() {
    let (dx, dt) = (0.01, 0.004);
    let mut solver = riemann_solver(0.5, 1.5, 0.5, dx, dt);

    let status = solver.march_alpha2(100);
    assert!(status.cfl_max < 0.7);

    let t = 100.0 * dt;
    let error = l1_distance(&solver, riemann_exact(0.5, 1.5, 0.5, t));
    println!("rarefaction: t={:.3}, l1 error={:.4e}", t, error);
    assert!(error < 0.02);

    // Inside the fan the solution is close to the similarity profile
    let grid = Arc::clone(solver.solution().grid());
    let se = grid.selm((0.9 / dx).round() as isize, Plane::Even).unwrap();
    let u_mid = solver.solution().so0(&se, 0).unwrap();
    assert!((u_mid - (0.9 - 0.5) / t).abs() < 0.05);
}

#[test]
fn test_large_time_increment_is_reported() {
    let grid = Arc::new(Grid::new(0.0, 1.0, 10).unwrap());
    let mut solution = Solution::new(grid, 1, 0.2).unwrap();
    solution.set_so0_from(Plane::Even, 0, |_| 1.0).unwrap();
    let mut solver = Solver::new(solution, InviscidBurgers, SolverConfig::default()).unwrap();
    solver.setup_march();

    let status = solver.march_full();
    assert!((status.cfl_max - 2.0).abs() < 1e-12);
    assert!(!status.is_admissible(solver.config().cfl_limit));

    let mut monitor = StabilityMonitor::new(StabilityThresholds::strict());
    let report = monitor.check(solver.solution(), &status);
    assert!(!report.is_stable);
    assert!(matches!(
        report.warnings[0],
        StabilityWarning::CflExceedsMax { .. }
    ));
    assert!(monitor.should_stop());

    // Shrinking the increment restores an admissible march
    solver.solution_mut().set_time_increment(0.05).unwrap();
    let status = solver.march_full();
    assert!(status.is_admissible(1.0));
}
