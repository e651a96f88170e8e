//! Fact database errors. Any of these is fatal: once a write, flush, or
//! close fails, output integrity can no longer be guaranteed.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create output unit for predicate {predicate}: {source}")]
    OpenTable {
        predicate: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}: {source}")]
    OpenDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed for predicate {predicate}: {source}")]
    Write {
        predicate: String,
        #[source]
        source: std::io::Error,
    },

    #[error("flush failed for predicate {predicate}: {source}")]
    Flush {
        predicate: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database is closed")]
    Closed,

    #[error("predicate {predicate} already registered with a different write discipline")]
    DisciplineMismatch { predicate: String },

    #[error("table lock poisoned for predicate {predicate}")]
    Poisoned { predicate: String },
}
