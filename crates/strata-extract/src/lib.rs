//! The concurrent fact-extraction pipeline.
//!
//! One extraction job per class, scheduled over a fixed-size worker pool
//! writing into the shared fact database, with a deterministic sequential
//! mode for call-graph-ordered output. Per-class failures are contained at
//! the job boundary; the batch always runs to completion.

pub mod annotate;
pub mod classify;
pub mod context;
pub mod driver;
pub mod dump;
pub mod generator;
pub mod jobs;
pub mod pipeline;
pub mod provenance;

pub use context::ExtractContext;
pub use driver::{Driver, RunSummary};
pub use jobs::{Job, JobFactory, JobKind};
pub use pipeline::{run_pipeline, PipelineReport};
pub use provenance::ArtifactTracker;
