//! Explicit classpath construction.
//!
//! The classpath is a value built exactly once by the caller and handed to
//! the resolver. There is no implicit "first call sets, later calls extend"
//! state anywhere.

use std::path::{Path, PathBuf};

use super::extraction_config::ResolutionMode;

/// The ordered resolution path handed to the resolver collaborator, together
/// with the resolution mode the backend is asked to apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    mode: ResolutionMode,
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates classpath entries in resolution order.
#[derive(Debug, Default)]
pub struct ClasspathBuilder {
    mode: ResolutionMode,
    entries: Vec<PathBuf>,
}

impl ClasspathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn entry(mut self, path: impl AsRef<Path>) -> Self {
        self.entries.push(path.as_ref().to_path_buf());
        self
    }

    pub fn inputs(mut self, paths: &[PathBuf]) -> Self {
        self.entries.extend(paths.iter().cloned());
        self
    }

    pub fn platforms(mut self, paths: &[PathBuf]) -> Self {
        self.entries.extend(paths.iter().cloned());
        self
    }

    pub fn dependencies(mut self, paths: &[PathBuf]) -> Self {
        self.entries.extend(paths.iter().cloned());
        self
    }

    pub fn build(self) -> Classpath {
        Classpath {
            mode: self.mode,
            entries: self.entries,
        }
    }
}
