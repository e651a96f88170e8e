//! The extraction driver.
//!
//! `run_parallel` schedules one job per class over a fixed-size worker pool
//! and blocks on the drain barrier until every outcome is in. No job outcome
//! is ever discarded: a per-class failure is logged, counted, and contained
//! at the job boundary. `run_sequential_ordered` is the deterministic
//! single-threaded fallback for call-graph-ordered output; it is selected by
//! configuration and never composed with the parallel path.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use strata_core::errors::{DriveError, ExtractError, PipelineError};
use strata_core::model::ClassId;
use strata_store::WriteDiscipline;

use crate::context::ExtractContext;
use crate::generator::{predicates, FactGenerator, NumberingContext};
use crate::jobs::{Job, JobFactory};

/// Driver lifecycle, one instance per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Idle,
    Running,
    Draining,
    Terminated,
}

/// Completion summary of one driver invocation.
/// `submitted == succeeded + failed` always holds on a clean drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.succeeded + self.failed == self.submitted
    }
}

pub struct Driver {
    workers: usize,
}

impl Driver {
    /// `cores = None` (or zero) means available hardware parallelism.
    pub fn new(cores: Option<usize>) -> Self {
        let workers = cores.filter(|c| *c > 0).unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Schedule one relational job per class and block until all are done.
    pub fn run_parallel(
        &self,
        factory: &JobFactory,
        classes: &[ClassId],
    ) -> Result<RunSummary, DriveError> {
        self.run_pool(factory, classes, "facts")
    }

    /// Second wave: same scheduling discipline, dump-mode jobs. Invoked
    /// after relational facts are written so both outputs come from one
    /// resolved program.
    pub fn run_parallel_dump(
        &self,
        factory: &JobFactory,
        classes: &[ClassId],
    ) -> Result<RunSummary, DriveError> {
        self.run_pool(factory, classes, "dump")
    }

    fn run_pool(
        &self,
        factory: &JobFactory,
        classes: &[ClassId],
        wave: &'static str,
    ) -> Result<RunSummary, DriveError> {
        if !factory.context().program.is_materialized() {
            return Err(DriveError::HierarchyNotMaterialized);
        }
        let mut state = DriverState::Idle;
        let submitted = classes.len();
        debug!(wave, workers = self.workers, submitted, state = ?state, "driver created");

        let (job_tx, job_rx) = unbounded::<Job>();
        let (out_tx, out_rx) = unbounded::<bool>();

        state = DriverState::Running;
        debug!(wave, state = ?state, "driver started");

        let summary = thread::scope(|scope| -> Result<RunSummary, DriveError> {
            for _ in 0..self.workers {
                let jobs = job_rx.clone();
                let outcomes = out_tx.clone();
                scope.spawn(move || worker_loop(jobs, outcomes));
            }
            // Only the workers keep channel ends alive from here on.
            drop(job_rx);
            drop(out_tx);

            for &id in classes {
                job_tx
                    .send(factory.job_for(id))
                    .map_err(|_| DriveError::PoolDisconnected)?;
            }
            drop(job_tx);

            state = DriverState::Draining;
            debug!(wave, state = ?state, "all jobs submitted, waiting on drain barrier");

            let mut succeeded = 0usize;
            let mut failed = 0usize;
            for ok in out_rx.iter() {
                if ok {
                    succeeded += 1;
                } else {
                    failed += 1;
                }
            }
            Ok(RunSummary {
                submitted,
                succeeded,
                failed,
            })
        })?;

        if !summary.is_complete() {
            return Err(DriveError::IncompleteDrain {
                submitted,
                missing: submitted - summary.succeeded - summary.failed,
            });
        }
        state = DriverState::Terminated;
        info!(
            wave,
            submitted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            state = ?state,
            "driver drained"
        );
        Ok(summary)
    }

    /// Deterministic single-threaded extraction: classes in lexical order of
    /// qualified name, one numbering context anchored at the synthetic entry
    /// point, so identical inputs yield byte-identical call-graph ids.
    pub fn run_sequential_ordered(
        &self,
        ctx: &ExtractContext,
        entry_point: Option<&str>,
        classes: &[ClassId],
        flow_sensitive: bool,
    ) -> Result<RunSummary, PipelineError> {
        if !ctx.program.is_materialized() {
            return Err(DriveError::HierarchyNotMaterialized.into());
        }
        let mut ordered: Vec<ClassId> = classes.to_vec();
        ordered.sort_by_key(|id| ctx.class_name(*id));

        let mut numbering = NumberingContext::new();
        if let Some(entry) = entry_point {
            let id = numbering.entry_point_id().to_string();
            ctx.db.write_row(
                predicates::CALL_GRAPH_ENTRY_POINT,
                WriteDiscipline::Deduplicated,
                &[entry, &id],
            )?;
        }

        let generator = FactGenerator::new(ctx, flow_sensitive);
        let submitted = ordered.len();
        let mut succeeded = 0usize;
        let mut failed = 0usize;
        for id in ordered {
            match generator.write_class_facts(id, Some(&mut numbering)) {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    warn!(class = %ctx.class_name(id), error = %e, "ordered extraction failed");
                    failed += 1;
                }
            }
        }
        let summary = RunSummary {
            submitted,
            succeeded,
            failed,
        };
        info!(
            submitted,
            succeeded, failed, "ordered sequential extraction finished"
        );
        Ok(summary)
    }
}

fn worker_loop(jobs: Receiver<Job>, outcomes: Sender<bool>) {
    while let Ok(job) = jobs.recv() {
        let class = job.class_name();
        let ok = match catch_unwind(AssertUnwindSafe(|| job.run())) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(class = %class, error = %e, "extraction job failed");
                false
            }
            Err(panic) => {
                let err = ExtractError::JobPanicked {
                    class: class.clone(),
                    message: panic_message(&panic),
                };
                warn!(error = %err, "extraction job panicked");
                false
            }
        };
        if outcomes.send(ok).is_err() {
            break;
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
