//! Accuracy and stability analysis of marched solutions.
//!
//! - [`l1_error`], [`linf_error`]: discrete error norms against exact solutions
//! - [`StabilityMonitor`]: turns march reports into warnings and a stop recommendation

mod norms;
mod stability;

pub use norms::{l1_error, linf_error};
pub use stability::{StabilityMonitor, StabilityStatus, StabilityThresholds, StabilityWarning};
