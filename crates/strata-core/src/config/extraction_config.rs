//! Global configuration for a fact-generation run, fixed before any worker
//! thread starts.

use std::path::PathBuf;

use super::classpath::{Classpath, ClasspathBuilder};

/// How the class set is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Full transitive resolution: every class reachable from the inputs.
    Full,
    /// Only the classes contained in the given inputs.
    #[default]
    InputsOnly,
}

/// Which slice of the class set facts are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactsSubset {
    /// Application classes only.
    App,
    /// Application classes plus dependency-archive classes.
    AppAndDeps,
    /// Platform/library classes only.
    Platform,
}

/// Where fact rows (and dump output) go. The two variants are mutually
/// exclusive; the CLI enforces this before a config is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One output unit per predicate under this directory.
    Directory(PathBuf),
    /// All rows interleaved on standard output, each prefixed by its
    /// predicate. Only meaningful in dump mode.
    Stdout,
}

/// Global configuration consumed by the job factory and the driver.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub mode: ResolutionMode,
    pub inputs: Vec<PathBuf>,
    pub platforms: Vec<PathBuf>,
    /// Dependency archives. Kept separate from `platforms` only under
    /// `FactsSubset::AppAndDeps`; otherwise merged into `platforms` by the
    /// CLI after parsing.
    pub dependencies: Vec<PathBuf>,
    /// Glob over qualified class names selecting application classes.
    pub app_glob: String,
    pub output: OutputTarget,
    /// Worker pool width. `None` means available hardware parallelism.
    pub cores: Option<usize>,
    pub facts_subset: Option<FactsSubset>,
    /// Emit a serialized representation dump in a second wave.
    pub dump: bool,
    /// Flow-sensitive variable facts (SSA-style versioned locals).
    pub flow_sensitive: bool,
    /// Deterministic single-threaded extraction anchored at a synthetic
    /// call-graph entry point. Never composed with the parallel path.
    pub ordered_call_graph: bool,
    pub seed_file: Option<PathBuf>,
    pub sensitivity_file: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::default(),
            inputs: Vec::new(),
            platforms: Vec::new(),
            dependencies: Vec::new(),
            app_glob: "**".to_string(),
            output: OutputTarget::Directory(PathBuf::from(".")),
            cores: None,
            facts_subset: None,
            dump: false,
            flow_sensitive: false,
            ordered_call_graph: false,
            seed_file: None,
            sensitivity_file: None,
        }
    }
}

impl ExtractionConfig {
    /// Build the resolution classpath once, from the final option values.
    /// Inputs come first, then platform archives, then any dependencies that
    /// were kept separate.
    pub fn classpath(&self) -> Classpath {
        ClasspathBuilder::new()
            .mode(self.mode)
            .inputs(&self.inputs)
            .platforms(&self.platforms)
            .dependencies(&self.dependencies)
            .build()
    }
}
