//! End-to-end pipeline: resolve, classify, preliminary facts, extraction,
//! optional dump wave, annotators, close.
//!
//! The fatal/contained split is enforced here: everything before the first
//! worker starts fails the whole run; per-class failures during extraction
//! only show up in the run summary.

use std::sync::Arc;

use tracing::{debug, info};

use strata_core::config::{ExtractionConfig, FactsSubset, OutputTarget};
use strata_core::errors::{PipelineError, UsageError};
use strata_core::model::{ArtifactKind, Classification, ClassId};
use strata_core::resolve::{ResolvedProgram, Resolver};
use strata_core::types::collections::FxHashSet;
use strata_store::{Destination, FactDatabase, SharedStream, WriteDiscipline};

use crate::annotate::{annotate_seed_file, annotate_sensitivity_file};
use crate::classify::{classify, AppClassFilter};
use crate::context::ExtractContext;
use crate::driver::{Driver, RunSummary};
use crate::dump::DumpSink;
use crate::generator::{predicates, WarningCounters};
use crate::jobs::{JobFactory, JobKind};
use crate::provenance::ArtifactTracker;

/// What one pipeline run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub facts: RunSummary,
    pub dump: Option<RunSummary>,
    pub provenance_rows: usize,
    pub seed_rows: usize,
    pub sensitivity_rows: usize,
    pub phantom_types: usize,
    pub phantom_methods: usize,
}

/// Run the whole pipeline for one configuration.
pub fn run_pipeline<R: Resolver>(
    config: &ExtractionConfig,
    resolver: &R,
) -> Result<PipelineReport, PipelineError> {
    let classpath = config.classpath();
    let mut program = resolver.resolve(&classpath)?;
    program.materialize_hierarchy();
    info!(
        classes = program.classes().len(),
        artifacts = program.artifacts().len(),
        "program resolved"
    );

    let mut tracker = ArtifactTracker::new();
    for artifact in program.artifacts() {
        for class in &artifact.classes {
            tracker.register(&artifact.id, class, artifact.parent.as_deref());
        }
    }

    let filter = AppClassFilter::new(&config.app_glob).map_err(|e| {
        UsageError::UnrecognizedOption(format!("--app-glob {}: {e}", config.app_glob))
    })?;
    let classification = classify(&program, &filter);
    let selected = select_classes(config, &program, &classification);
    debug!(
        selected = selected.len(),
        total = program.classes().len(),
        "class set selected"
    );

    let (dest, shared) = match &config.output {
        OutputTarget::Directory(dir) => (Destination::Directory(dir.clone()), None),
        OutputTarget::Stdout => {
            let stream = SharedStream::stdout();
            (Destination::Stream(stream.clone()), Some(stream))
        }
    };
    let db = Arc::new(FactDatabase::open(dest)?);

    let ctx = Arc::new(ExtractContext {
        program: Arc::new(program),
        classification: Arc::new(classification),
        db: Arc::clone(&db),
        warnings: Arc::new(WarningCounters::default()),
    });

    let provenance_rows = write_preliminary_facts(&ctx, &tracker)?;
    db.flush()?;

    let driver = Driver::new(config.cores);

    if config.ordered_call_graph {
        // Deterministic mode skips the dump wave and the annotators; the
        // run ends as soon as the ordered facts are out.
        let entry = ctx.program.entry_point().map(str::to_string);
        let facts =
            driver.run_sequential_ordered(&ctx, entry.as_deref(), &selected, config.flow_sensitive)?;
        ctx.warnings.report();
        let report = PipelineReport {
            facts,
            dump: None,
            provenance_rows,
            seed_rows: 0,
            sensitivity_rows: 0,
            phantom_types: ctx.warnings.phantom_types(),
            phantom_methods: ctx.warnings.phantom_methods(),
        };
        db.close()?;
        return Ok(report);
    }

    let factory = JobFactory::new(
        Arc::clone(&ctx),
        JobKind::Relational {
            flow_sensitive: config.flow_sensitive,
        },
    );
    let facts = driver.run_parallel(&factory, &selected)?;

    let dump = if config.dump {
        let sink = match (&config.output, &shared) {
            (_, Some(stream)) => DumpSink::Shared(stream.clone()),
            (OutputTarget::Directory(dir), None) => DumpSink::PerClassFiles(dir.clone()),
            (OutputTarget::Stdout, None) => DumpSink::Shared(SharedStream::stdout()),
        };
        let dump_factory = JobFactory::new(Arc::clone(&ctx), JobKind::Dump { sink });
        Some(driver.run_parallel_dump(&dump_factory, &selected)?)
    } else {
        None
    };

    let seed_rows = match &config.seed_file {
        Some(path) => annotate_seed_file(&db, path)?,
        None => 0,
    };
    let sensitivity_rows = match &config.sensitivity_file {
        Some(path) => annotate_sensitivity_file(&db, path)?,
        None => 0,
    };

    ctx.warnings.report();
    info!(
        submitted = facts.submitted,
        succeeded = facts.succeeded,
        failed = facts.failed,
        provenance_rows,
        seed_rows,
        sensitivity_rows,
        "extraction finished"
    );

    let report = PipelineReport {
        facts,
        dump,
        provenance_rows,
        seed_rows,
        sensitivity_rows,
        phantom_types: ctx.warnings.phantom_types(),
        phantom_methods: ctx.warnings.phantom_methods(),
    };
    db.close()?;
    Ok(report)
}

/// Narrow the resolved class set to the configured facts subset.
fn select_classes(
    config: &ExtractionConfig,
    program: &ResolvedProgram,
    classification: &strata_core::types::collections::FxHashMap<ClassId, Classification>,
) -> Vec<ClassId> {
    let Some(subset) = config.facts_subset else {
        return program.class_ids().collect();
    };

    let mut dependency_classes: FxHashSet<&str> = FxHashSet::default();
    let mut platform_classes: FxHashSet<&str> = FxHashSet::default();
    for artifact in program.artifacts() {
        let set = match artifact.kind {
            ArtifactKind::Dependency => &mut dependency_classes,
            ArtifactKind::Platform => &mut platform_classes,
            ArtifactKind::Input => continue,
        };
        for class in &artifact.classes {
            set.insert(class.as_str());
        }
    }

    program
        .class_ids()
        .filter(|id| {
            let Some(class) = program.class(*id) else {
                return false;
            };
            let is_app = classification.get(id) == Some(&Classification::Application);
            match subset {
                FactsSubset::App => is_app,
                FactsSubset::AppAndDeps => {
                    is_app || dependency_classes.contains(class.name.as_str())
                }
                FactsSubset::Platform => platform_classes.contains(class.name.as_str()),
            }
        })
        .collect()
}

/// Application-class, property, and provenance rows, written before any
/// worker starts so their tables exist with the right discipline.
fn write_preliminary_facts(
    ctx: &ExtractContext,
    tracker: &ArtifactTracker,
) -> Result<usize, PipelineError> {
    let mut app_classes: Vec<&str> = ctx
        .program
        .class_ids()
        .filter(|id| ctx.classification.get(id) == Some(&Classification::Application))
        .filter_map(|id| ctx.program.class(id).map(|c| c.name.as_str()))
        .collect();
    app_classes.sort_unstable();
    for name in app_classes {
        ctx.db
            .write_row(predicates::APPLICATION_CLASS, WriteDiscipline::Deduplicated, &[name])?;
    }

    for (path, entries) in ctx.program.properties() {
        for (key, value) in entries {
            ctx.db.write_row(
                predicates::PROPERTY,
                WriteDiscipline::Deduplicated,
                &[path, key, value],
            )?;
        }
    }

    let provenance_rows = tracker.write_facts(&ctx.db)?;
    debug!(provenance_rows, "preliminary facts written");
    Ok(provenance_rows)
}
