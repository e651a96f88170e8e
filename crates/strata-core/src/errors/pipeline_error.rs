//! Pipeline errors.
//! Aggregates subsystem errors via `From` conversions. Per-class extraction
//! errors never appear here: they are contained at the job boundary.

use super::{DriveError, ResolveError, StoreError, UsageError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("fact database error: {0}")]
    Store(#[from] StoreError),

    #[error("driver error: {0}")]
    Drive(#[from] DriveError),
}
