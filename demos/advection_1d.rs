//! 1D linear advection with the CESE a-scheme.
//!
//! Solves du/dt + a * du/dx = 0 on [0, 2] with:
//! - Initial condition: u(x, 0) = sin(pi * x)
//! - Advection velocity: a = 1
//! - Periodic boundaries
//!
//! After time t, exact solution is u(x, t) = sin(pi * (x - a*t))
//!
//! Run with `RUST_LOG=debug cargo run --example advection_1d` to see the
//! solver log.

use std::f64::consts::PI;
use std::sync::Arc;

use cese_rs::{
    Grid, LinearScalar, Plane, Result, Solution, Solver, SolverConfig, l1_error, linf_error,
};

fn main() -> Result<()> {
    env_logger::init();

    // Parameters
    let ncelm = 40;
    let x_min = 0.0;
    let x_max = 2.0;
    let a = 1.0;
    let t_final = 1.0;
    let courant = 0.5;

    println!("1D CESE Advection Solver");
    println!("========================");
    println!("Elements: {}", ncelm);
    println!("Domain: [{}, {}]", x_min, x_max);
    println!("Advection velocity: {}", a);
    println!("Final time: {}", t_final);
    println!();

    let grid = Arc::new(Grid::new(x_min, x_max, ncelm)?);
    let n_steps = (t_final * a / (courant * grid.dx_min())).ceil() as usize;
    let dt = t_final / n_steps as f64;

    let mut solution = Solution::new(grid, 1, dt)?;
    solution.set_so0_from(Plane::Even, 0, |x| (PI * x).sin())?;
    solution.set_so1_from(Plane::Even, 0, |x| PI * (PI * x).cos())?;

    let mut solver = Solver::new(solution, LinearScalar::new(a), SolverConfig::default())?;
    let cfl = solver.setup_march();

    println!("Time step: {:.4e}", dt);
    println!("Number of steps: {}", n_steps);
    println!("CFL: {:.3}", cfl);
    println!();

    let exact_solution = |t: f64| move |x: f64| (PI * (x - a * t)).sin();

    let output_every = n_steps / 4;
    for step in 1..=n_steps {
        let status = solver.march_full();
        if !status.is_admissible(solver.config().cfl_limit) {
            eprintln!("Stopping at step {}: {:?}", step, status);
            break;
        }
        if step % output_every == 0 {
            let t = step as f64 * dt;
            let err = linf_error(solver.solution(), Plane::Even, 0, exact_solution(t))?;
            println!("  t = {:.3}: Linf error = {:.4e}", t, err);
        }
    }

    let err_l1 = l1_error(solver.solution(), Plane::Even, 0, exact_solution(t_final))?;
    let err_linf = linf_error(solver.solution(), Plane::Even, 0, exact_solution(t_final))?;
    println!();
    println!("Final L1 error (sum): {:.4e}", err_l1);
    println!("Final Linf error: {:.4e}", err_linf);

    Ok(())
}
