//! Core types for the Strata fact generator: the resolved-program data model,
//! the resolver collaborator seam, configuration, and the error taxonomy.
//!
//! Everything downstream of the resolver treats the `ResolvedProgram` as an
//! immutable snapshot. Classification and hierarchy data are computed once,
//! before any worker thread starts, and are read-only afterwards.

pub mod config;
pub mod errors;
pub mod model;
pub mod resolve;
pub mod types;
