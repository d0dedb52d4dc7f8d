/// Runner error types
use std::io;
use thiserror::Error;

pub type RunResult<T> = Result<T, RunError>;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to write test output: {0}")]
    Output(#[from] io::Error),
}

/// Signal raised by a failing fatal assertion.
///
/// Propagated with `?` out of the case body (or `set_up`) so the rest of the
/// body is skipped while `tear_down` still runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fatal assertion failed")]
pub struct FatalFailure;

/// What a case body, `set_up` or `tear_down` hands back to the lifecycle.
pub type Outcome = Result<(), FatalFailure>;
