//! The resolved-program data model.
//!
//! These types are produced by the resolver collaborator and are immutable
//! for the rest of the run. Application/library status is *not* stored on the
//! class itself; it lives in a separate classification map computed once
//! after the hierarchy is materialized.

pub mod artifact;
pub mod class;
pub mod hierarchy;

pub use artifact::{Artifact, ArtifactKind};
pub use class::{ClassId, Instruction, Method, MethodBody, ProgramClass};
pub use hierarchy::ClassHierarchy;

/// Application vs. library status of one class, frozen before workers start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Application,
    Library,
}
