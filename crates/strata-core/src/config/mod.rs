//! Configuration for one fact-generation run.

pub mod classpath;
pub mod extraction_config;

pub use classpath::{Classpath, ClasspathBuilder};
pub use extraction_config::{ExtractionConfig, FactsSubset, OutputTarget, ResolutionMode};
