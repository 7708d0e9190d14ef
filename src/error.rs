//! Error types for grid construction, element addressing and solution access.

use thiserror::Error;

/// Errors reported by the CESE core.
///
/// Every variant carries the name of the failing operation together with the
/// offending values, so the message alone is enough to locate the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CeseError {
    /// A constructor or setter received an argument it cannot accept.
    #[error("{operation} invalid argument: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// A requested element maps outside the valid half-step coordinate range.
    #[error("{operation}: xindex = {xindex} outside the interval [{lower}, {upper})")]
    OutOfDomain {
        operation: String,
        xindex: isize,
        lower: usize,
        upper: usize,
    },

    /// Moving an element would leave its valid half-step coordinate range.
    #[error(
        "{kind}(xindex={xindex})::move_at(offset={offset}): xindex = {target} outside the interval [{lower}, {upper})"
    )]
    MoveOutOfDomain {
        kind: &'static str,
        xindex: usize,
        offset: isize,
        target: isize,
        lower: usize,
        upper: usize,
    },

    /// Variable index not smaller than the number of variables.
    #[error("{operation}: iv = {iv} out of nvar range (nvar = {nvar})")]
    VariableOutOfRange {
        operation: String,
        iv: usize,
        nvar: usize,
    },

    /// Bulk array length does not match the element count of the plane.
    #[error("{operation}: array length {actual} does not match element count {expected}")]
    LengthMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// The element was created on a different grid than the solution.
    #[error("{operation}: element does not belong to the grid of this solution")]
    ForeignElement { operation: String },
}

impl CeseError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a variable-range error.
    pub fn variable_out_of_range(operation: impl Into<String>, iv: usize, nvar: usize) -> Self {
        Self::VariableOutOfRange {
            operation: operation.into(),
            iv,
            nvar,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CeseError>;
