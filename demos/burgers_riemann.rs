//! Burgers Riemann problems with the weighted CESE scheme.
//!
//! Solves du/dt + d(u²/2)/dx = 0 on [0, 2] for a shock (u_L > u_R) and a
//! rarefaction (u_L < u_R), both starting from a jump at x = 0.5, and prints
//! the marched profile next to the exact solution.
//!
//! Run with `RUST_LOG=warn cargo run --example burgers_riemann` to see
//! stability warnings.

use std::sync::Arc;

use cese_rs::{
    BoundaryCondition, Grid, InviscidBurgers, Plane, Result, Solution, Solver, SolverConfig,
    StabilityMonitor, StabilityThresholds,
};

/// Exact Burgers Riemann solution with the jump at `x0`.
fn exact(u_left: f64, u_right: f64, x0: f64, t: f64, x: f64) -> f64 {
    let xi = x - x0;
    if u_left > u_right {
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

fn run(name: &str, u_left: f64, u_right: f64) -> Result<()> {
    let ncelm = 100;
    let x0 = 0.5;
    let t_final = 0.6;
    let courant = 0.5;

    let grid = Arc::new(Grid::new(0.0, 2.0, ncelm)?);
    let speed = u_left.abs().max(u_right.abs());
    let n_steps = (t_final * speed / (courant * grid.dx_min())).ceil() as usize;
    let dt = t_final / n_steps as f64;

    let mut solution = Solution::new(grid, 1, dt)?;
    solution.set_so0_from(Plane::Even, 0, |x| if x < x0 { u_left } else { u_right })?;

    let config = SolverConfig::default().with_boundary(BoundaryCondition::Extrapolate);
    let mut solver = Solver::new(solution, InviscidBurgers, config)?;
    solver.setup_march();

    let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
    for step in 1..=n_steps {
        let status = solver.march_alpha2(1);
        monitor.check(solver.solution(), &status);
        monitor.log_report(step as f64 * dt, step);
        if monitor.should_stop() {
            eprintln!("{}: stopped at step {}", name, step);
            break;
        }
    }

    println!("{} (u_L = {}, u_R = {}), t = {}", name, u_left, u_right, t_final);
    println!("{:>8} {:>10} {:>10}", "x", "u", "exact");
    let sol = solver.solution();
    let values = sol.so0_plane(Plane::Even, 0)?;
    for (x, u) in sol.xctr_plane(Plane::Even).into_iter().zip(values).step_by(5) {
        println!(
            "{:8.3} {:10.5} {:10.5}",
            x,
            u,
            exact(u_left, u_right, x0, t_final, x)
        );
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    run("Shock", 1.0, 0.0)?;
    run("Rarefaction", 0.5, 1.5)?;
    Ok(())
}
