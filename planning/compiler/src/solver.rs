//! Boundary to the external PDDL solver.
//!
//! The compiler hands over domain and problem text and gets plan text back;
//! everything about how the solving happens (local process, remote service)
//! lives behind [`Solver`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("could not reach the solver: {0}")]
    Unreachable(String),
    #[error("solver timed out after {0} seconds")]
    Timeout(u64),
    #[error("solver answered with status {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Flat plan text, one step per line.
    Plan(String),
    /// The solver proved or gave up on the goal; nothing to dispatch.
    NoPlan,
}

pub trait Solver {
    fn solve(&self, domain: &str, problem: &str) -> Result<SolveOutcome, SolverError>;
}
