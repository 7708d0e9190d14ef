//! Stability monitoring for marching runs.
//!
//! A march never fails on instability; it reports the largest local CFL
//! number and whether non-finite values appeared. The monitor turns those
//! reports and the current solution into warnings and a stop recommendation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cese_rs::analysis::{StabilityMonitor, StabilityThresholds};
//! use cese_rs::equations::InviscidBurgers;
//! use cese_rs::mesh::Grid;
//! use cese_rs::solver::{Solution, Solver, SolverConfig};
//! use cese_rs::types::Plane;
//!
//! let grid = Arc::new(Grid::new(0.0, 10.0, 20).unwrap());
//! let mut solution = Solution::new(grid, 1, 0.1).unwrap();
//! solution.set_so0_from(Plane::Even, 0, |x| if x < 5.0 { 1.0 } else { 0.0 }).unwrap();
//! let mut solver = Solver::new(solution, InviscidBurgers, SolverConfig::default()).unwrap();
//! solver.setup_march();
//!
//! let mut monitor = StabilityMonitor::new(StabilityThresholds::default());
//! for _ in 0..10 {
//!     let march = solver.march_alpha2(1);
//!     let status = monitor.check(solver.solution(), &march);
//!     if monitor.should_stop() {
//!         break;
//!     }
//!     assert!(status.is_stable);
//! }
//! ```

use crate::solver::{MarchStatus, Solution};
use crate::types::Plane;

/// Thresholds for stability monitoring.
#[derive(Debug, Clone, Copy)]
pub struct StabilityThresholds {
    /// Largest admissible local CFL number.
    pub max_cfl: f64,
    /// Largest admissible absolute value of any variable.
    pub max_abs_value: f64,
    /// Maximum consecutive warnings before recommending stop.
    pub max_consecutive_warnings: usize,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            max_cfl: 1.0,
            max_abs_value: 1e6,
            max_consecutive_warnings: 10,
        }
    }
}

impl StabilityThresholds {
    /// Strict thresholds for detecting issues early.
    ///
    /// - max_cfl: 0.9
    /// - max_abs_value: 1e3
    /// - max_consecutive_warnings: 1
    pub fn strict() -> Self {
        Self {
            max_cfl: 0.9,
            max_abs_value: 1e3,
            max_consecutive_warnings: 1,
        }
    }

    /// Set the CFL threshold.
    pub fn with_max_cfl(mut self, max_cfl: f64) -> Self {
        self.max_cfl = max_cfl;
        self
    }

    /// Set the value magnitude threshold.
    pub fn with_max_abs_value(mut self, max_abs_value: f64) -> Self {
        self.max_abs_value = max_abs_value;
        self
    }

    /// Set the number of consecutive warnings tolerated.
    pub fn with_max_consecutive_warnings(mut self, count: usize) -> Self {
        self.max_consecutive_warnings = count;
        self
    }
}

/// Types of stability warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityWarning {
    /// A local CFL number reached the threshold.
    CflExceedsMax { value: f64, threshold: f64 },
    /// A value exceeds the magnitude threshold.
    ValueExceedsMax {
        element: usize,
        iv: usize,
        value: f64,
        threshold: f64,
    },
    /// Non-finite value detected (NaN or Inf).
    NonFiniteValue { element: usize, iv: usize },
    /// Solution has blown up catastrophically.
    SolutionBlowUp,
}

impl std::fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CflExceedsMax { value, threshold } => {
                write!(f, "CFL reaches max: {:.4} >= {:.4}", value, threshold)
            }
            Self::ValueExceedsMax {
                element,
                iv,
                value,
                threshold,
            } => write!(
                f,
                "Value exceeds max: |u|={:.3e} > {:.3e} at element {}, variable {}",
                value, threshold, element, iv
            ),
            Self::NonFiniteValue { element, iv } => {
                write!(f, "Non-finite value at element {}, variable {}", element, iv)
            }
            Self::SolutionBlowUp => write!(f, "SOLUTION BLOW-UP DETECTED"),
        }
    }
}

/// Stability status after one check.
#[derive(Debug, Clone)]
pub struct StabilityStatus {
    /// Value range (min, max) over all variables on the even plane.
    pub value_range: (f64, f64),
    /// Largest local CFL number reported by the march.
    pub cfl_max: f64,
    /// Whether the solution is stable.
    pub is_stable: bool,
    /// List of warnings detected.
    pub warnings: Vec<StabilityWarning>,
}

impl StabilityStatus {
    /// Check if any warnings were generated.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if any critical warnings (blow-up, non-finite) were detected.
    pub fn has_critical_warnings(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                StabilityWarning::SolutionBlowUp | StabilityWarning::NonFiniteValue { .. }
            )
        })
    }
}

/// Monitor for tracking solution stability across marches.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    thresholds: StabilityThresholds,
    consecutive_warnings: usize,
    total_checks: usize,
    total_warnings: usize,
    last_status: Option<StabilityStatus>,
}

impl StabilityMonitor {
    /// Create a new stability monitor with the given thresholds.
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self {
            thresholds,
            consecutive_warnings: 0,
            total_checks: 0,
            total_warnings: 0,
            last_status: None,
        }
    }

    pub fn thresholds(&self) -> &StabilityThresholds {
        &self.thresholds
    }

    pub fn consecutive_warnings(&self) -> usize {
        self.consecutive_warnings
    }

    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    pub fn last_status(&self) -> Option<&StabilityStatus> {
        self.last_status.as_ref()
    }

    /// Check the even plane of a solution after a march.
    pub fn check(&mut self, solution: &Solution, march: &MarchStatus) -> StabilityStatus {
        self.total_checks += 1;

        let mut warnings = Vec::new();
        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut found_blow_up = march.non_finite;

        for iv in 0..solution.nvar() {
            for (element, h) in solution.plane_xindices(Plane::Even).enumerate() {
                let u = solution.so0_at(h, iv);
                if !u.is_finite() {
                    warnings.push(StabilityWarning::NonFiniteValue { element, iv });
                    found_blow_up = true;
                    continue;
                }
                min_u = min_u.min(u);
                max_u = max_u.max(u);
                if u.abs() > self.thresholds.max_abs_value {
                    warnings.push(StabilityWarning::ValueExceedsMax {
                        element,
                        iv,
                        value: u.abs(),
                        threshold: self.thresholds.max_abs_value,
                    });
                }
            }
        }

        if march.cfl_max >= self.thresholds.max_cfl {
            warnings.push(StabilityWarning::CflExceedsMax {
                value: march.cfl_max,
                threshold: self.thresholds.max_cfl,
            });
        }

        // Many orders of magnitude past the threshold
        if found_blow_up || max_u.abs().max(min_u.abs()) > 1e6 * self.thresholds.max_abs_value
        {
            warnings.push(StabilityWarning::SolutionBlowUp);
        }

        let is_stable = warnings.is_empty();
        if is_stable {
            self.consecutive_warnings = 0;
        } else {
            self.consecutive_warnings += 1;
            self.total_warnings += warnings.len();
        }

        let status = StabilityStatus {
            value_range: (min_u, max_u),
            cfl_max: march.cfl_max,
            is_stable,
            warnings,
        };

        self.last_status = Some(status.clone());
        status
    }

    /// Check if the run should be stopped based on warning history.
    pub fn should_stop(&self) -> bool {
        if self.consecutive_warnings >= self.thresholds.max_consecutive_warnings {
            return true;
        }
        self.last_status
            .as_ref()
            .is_some_and(StabilityStatus::has_critical_warnings)
    }

    /// Get suggested remediation actions based on warnings.
    pub fn suggest_remediation(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(status) = &self.last_status {
            for warning in &status.warnings {
                match warning {
                    StabilityWarning::CflExceedsMax { .. } => {
                        suggestions.push(
                            "CFL at or above limit: Reduce the time increment".to_string(),
                        );
                    }
                    StabilityWarning::ValueExceedsMax { .. } => {
                        suggestions.push(
                            "Value exceeds threshold: Use a weighted slope scheme near discontinuities"
                                .to_string(),
                        );
                    }
                    StabilityWarning::NonFiniteValue { .. } | StabilityWarning::SolutionBlowUp => {
                        suggestions.push(
                            "Solution blow-up: Reduce the time increment below the CFL limit"
                                .to_string(),
                        );
                        suggestions.push(
                            "Check the boundary condition against the inflow direction".to_string(),
                        );
                    }
                }
            }
        }

        suggestions.sort();
        suggestions.dedup();
        suggestions
    }

    /// Log the last status when it carries warnings.
    pub fn log_report(&self, time: f64, step: usize) {
        let Some(status) = &self.last_status else {
            return;
        };
        if status.is_stable {
            return;
        }
        log::warn!(
            "stability warning at t={:.4}, step {}: u in [{:.4}, {:.4}], CFL max {:.4}",
            time,
            step,
            status.value_range.0,
            status.value_range.1,
            status.cfl_max
        );
        for warning in &status.warnings {
            log::warn!("  - {}", warning);
        }
        if self.should_stop() {
            log::warn!("  recommendation: stop the run");
            for suggestion in self.suggest_remediation() {
                log::warn!("    * {}", suggestion);
            }
        }
    }
}
