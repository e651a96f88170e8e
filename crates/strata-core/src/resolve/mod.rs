//! The resolver collaborator seam.
//!
//! Bytecode loading, archive unpacking, and IR lifting happen outside this
//! workspace. A `Resolver` turns a classpath into a `ResolvedProgram`
//! snapshot; everything downstream treats that snapshot as immutable.

pub mod snapshot;

use std::collections::BTreeMap;

use crate::config::Classpath;
use crate::errors::ResolveError;
use crate::model::{Artifact, ClassHierarchy, ClassId, ProgramClass};
use crate::types::collections::FxHashMap;

pub use snapshot::SnapshotResolver;

/// Produces a resolved program snapshot from a classpath.
pub trait Resolver {
    fn resolve(&self, classpath: &Classpath) -> Result<ResolvedProgram, ResolveError>;
}

/// The immutable resolved snapshot of one program.
///
/// The hierarchy starts unmaterialized; `materialize_hierarchy` must be
/// called (single-threaded) before the driver will accept the program.
#[derive(Debug)]
pub struct ResolvedProgram {
    classes: Vec<ProgramClass>,
    artifacts: Vec<Artifact>,
    /// property-file path -> key -> value, ordered for stable output.
    properties: BTreeMap<String, BTreeMap<String, String>>,
    /// Synthetic call-graph entry point (e.g. a constructed main method for
    /// a packaged mobile application).
    entry_point: Option<String>,
    hierarchy: Option<ClassHierarchy>,
    class_index: FxHashMap<String, ClassId>,
    /// Scratch directories created for nested-artifact extraction. Removed
    /// on drop, whether the run succeeded or not.
    scratch_dirs: Vec<tempfile::TempDir>,
}

impl ResolvedProgram {
    pub fn new(
        classes: Vec<ProgramClass>,
        artifacts: Vec<Artifact>,
        properties: BTreeMap<String, BTreeMap<String, String>>,
        entry_point: Option<String>,
    ) -> Self {
        let class_index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), ClassId(i as u32)))
            .collect();
        Self {
            classes,
            artifacts,
            properties,
            entry_point,
            hierarchy: None,
            class_index,
            scratch_dirs: Vec::new(),
        }
    }

    /// Materialize the class hierarchy. Single-threaded by construction:
    /// takes `&mut self`, so no worker can hold the program yet.
    pub fn materialize_hierarchy(&mut self) {
        self.hierarchy = Some(ClassHierarchy::materialize(&self.classes));
    }

    pub fn is_materialized(&self) -> bool {
        self.hierarchy.is_some()
    }

    /// The materialized hierarchy, if `materialize_hierarchy` has run.
    pub fn hierarchy(&self) -> Option<&ClassHierarchy> {
        self.hierarchy.as_ref()
    }

    pub fn classes(&self) -> &[ProgramClass] {
        &self.classes
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn properties(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.properties
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    pub fn class(&self, id: ClassId) -> Option<&ProgramClass> {
        self.classes.get(id.0 as usize)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(name).copied()
    }

    /// All class ids, in snapshot order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId(i as u32))
    }

    /// Take ownership of a scratch directory so it outlives extraction and
    /// is removed when the program is dropped.
    pub fn adopt_scratch_dir(&mut self, dir: tempfile::TempDir) {
        self.scratch_dirs.push(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_dirs_are_removed_when_the_program_drops() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("unpacked.class"), b"\xca\xfe").unwrap();

        let mut program =
            ResolvedProgram::new(Vec::new(), Vec::new(), BTreeMap::new(), None);
        program.adopt_scratch_dir(scratch);
        assert!(path.exists());

        drop(program);
        assert!(!path.exists());
    }
}
