//! Snapshot resolver: loads a `ResolvedProgram` from JSON emitted by an
//! external front end.
//!
//! Classpath entries ending in `.json` are parsed and merged; other entries
//! (archives the front end already resolved) are only checked for existence.
//! A snapshot is a closed world, so the classpath's resolution mode is
//! logged for diagnostics here; backends that resolve archives themselves
//! use it to bound their traversal.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Classpath;
use crate::errors::ResolveError;
use crate::model::{Artifact, ProgramClass};

use super::{ResolvedProgram, Resolver};

/// Serialized form of a resolved program, as produced by the front end.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgramSnapshot {
    #[serde(default)]
    pub classes: Vec<ProgramClass>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub properties: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub entry_point: Option<String>,
}

/// Resolver backend reading pre-resolved program snapshots.
#[derive(Debug, Default)]
pub struct SnapshotResolver;

impl SnapshotResolver {
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<ProgramSnapshot, ResolveError> {
        let text = fs::read_to_string(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| ResolveError::MalformedSnapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Resolver for SnapshotResolver {
    fn resolve(&self, classpath: &Classpath) -> Result<ResolvedProgram, ResolveError> {
        debug!(
            mode = ?classpath.mode(),
            entries = classpath.entries().len(),
            "resolving classpath"
        );
        let mut merged = ProgramSnapshot::default();
        let mut snapshots = 0usize;

        for entry in classpath.entries() {
            if !entry.exists() {
                return Err(ResolveError::InputNotFound(entry.clone()));
            }
            if entry.extension().is_some_and(|e| e == "json") {
                let snapshot = Self::load(entry)?;
                debug!(
                    path = %entry.display(),
                    classes = snapshot.classes.len(),
                    artifacts = snapshot.artifacts.len(),
                    "loaded program snapshot"
                );
                merged.classes.extend(snapshot.classes);
                merged.artifacts.extend(snapshot.artifacts);
                for (path, props) in snapshot.properties {
                    merged.properties.entry(path).or_default().extend(props);
                }
                if merged.entry_point.is_none() {
                    merged.entry_point = snapshot.entry_point;
                }
                snapshots += 1;
            }
        }

        if snapshots == 0 {
            let first = classpath
                .entries()
                .first()
                .cloned()
                .unwrap_or_default();
            return Err(ResolveError::UnsupportedInput(first));
        }

        Ok(ResolvedProgram::new(
            merged.classes,
            merged.artifacts,
            merged.properties,
            merged.entry_point,
        ))
    }
}
