//! Assessment error types.
//!
//! The core is pure arithmetic over validated inputs, so only three things
//! can go wrong: a bad level index, a posterior that cannot be normalized,
//! and a submission to a session that has already been closed.

use thiserror::Error;

/// Errors raised by the assessment core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    /// A level index outside `[0, 5]` was supplied.
    #[error("level index {index} out of range (expected 0..={max})")]
    OutOfRange { index: usize, max: usize },

    /// The unnormalized posterior had zero or non-finite total mass.
    #[error("posterior has no usable probability mass")]
    DegenerateDistribution,

    /// An answer was submitted after the session was quit.
    #[error("session is closed, no further answers accepted")]
    SessionClosed,
}
