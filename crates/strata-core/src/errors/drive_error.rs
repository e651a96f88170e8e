//! Driver errors. Anything surfacing past the drain barrier is a defect of
//! the driver itself, never a per-class condition, and terminates the run.

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("worker pool disconnected before all jobs were submitted")]
    PoolDisconnected,

    #[error("drain barrier lost {missing} of {submitted} job outcomes")]
    IncompleteDrain { submitted: usize, missing: usize },

    #[error("class hierarchy not materialized before the parallel phase")]
    HierarchyNotMaterialized,
}
