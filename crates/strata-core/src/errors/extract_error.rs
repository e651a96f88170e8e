//! Per-class extraction errors.
//!
//! These are contained at the job boundary: logged with the class identity,
//! counted against the run summary, never allowed to fail the batch. Rows the
//! job already wrote are kept.

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed body in {class}::{method}: {message}")]
    MalformedBody {
        class: String,
        method: String,
        message: String,
    },

    #[error("class {0} is not part of the resolved snapshot")]
    UnknownClass(String),

    #[error("fact write failed for {class}: {source}")]
    Store {
        class: String,
        #[source]
        source: super::StoreError,
    },

    #[error("representation dump failed for {class}: {source}")]
    Dump {
        class: String,
        #[source]
        source: std::io::Error,
    },

    #[error("job for {class} panicked: {message}")]
    JobPanicked { class: String, message: String },
}
