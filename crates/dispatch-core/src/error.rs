//! Error types for the planning core.
//!
//! Infeasible plans are not errors - they come back as empty results. The
//! only hard failures are malformed caller inputs discovered while checking
//! drone availability.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("unparseable dispatch date: {0}")]
    InvalidDate(String),

    #[error("unparseable time: {0}")]
    InvalidTime(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
