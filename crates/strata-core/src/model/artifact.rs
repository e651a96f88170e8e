//! Packaged input artifacts, possibly nested.

use serde::{Deserialize, Serialize};

/// What role an artifact plays on the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// An application input (`-i`).
    Input,
    /// A dependency archive (`-ld` or expanded from `--deps`).
    Dependency,
    /// A platform/library archive (`-l`).
    Platform,
}

/// One packaged input unit: an archive or file that contains classes.
/// `parent` is set for nested packaging, e.g. a classes archive extracted
/// from a container archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub kind: ArtifactKind,
    #[serde(default)]
    pub parent: Option<String>,
    /// Qualified names of the classes found inside this artifact.
    #[serde(default)]
    pub classes: Vec<String>,
}
