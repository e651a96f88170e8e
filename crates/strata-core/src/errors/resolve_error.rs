//! Resolution errors: an input or dependency cannot be found or opened.
//! Always fatal before the parallel phase starts.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("input {0} does not exist")]
    InputNotFound(PathBuf),

    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed program snapshot {path}: {message}")]
    MalformedSnapshot { path: PathBuf, message: String },

    #[error("no resolver backend accepts input {0}")]
    UnsupportedInput(PathBuf),

    #[error("failed to read auxiliary file {path}: {source}")]
    AuxiliaryFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
