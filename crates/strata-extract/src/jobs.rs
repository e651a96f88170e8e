//! Extraction jobs and their factory.
//!
//! The two extraction flavors are a tagged variant behind one factory, not
//! a subclassing scheme. A job is bound to exactly one class and exists for
//! exactly one driver invocation.

use std::sync::Arc;

use strata_core::errors::ExtractError;
use strata_core::model::ClassId;

use crate::context::ExtractContext;
use crate::dump::{self, DumpSink};
use crate::generator::FactGenerator;

/// Which flavor of job this factory builds.
#[derive(Debug, Clone)]
pub enum JobKind {
    /// Relational fact rows through the shared database.
    Relational { flow_sensitive: bool },
    /// Serialized representation dump.
    Dump { sink: DumpSink },
}

/// Builds one job per class for one global configuration.
pub struct JobFactory {
    ctx: Arc<ExtractContext>,
    kind: JobKind,
}

impl JobFactory {
    pub fn new(ctx: Arc<ExtractContext>, kind: JobKind) -> Self {
        Self { ctx, kind }
    }

    pub fn context(&self) -> &ExtractContext {
        &self.ctx
    }

    pub fn job_for(&self, class_id: ClassId) -> Job {
        Job {
            ctx: Arc::clone(&self.ctx),
            kind: self.kind.clone(),
            class_id,
        }
    }
}

/// One unit of scheduled work, bound to exactly one class.
pub struct Job {
    ctx: Arc<ExtractContext>,
    kind: JobKind,
    class_id: ClassId,
}

impl Job {
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    pub fn class_name(&self) -> String {
        self.ctx.class_name(self.class_id)
    }

    /// Run to completion. Errors abort only this class; rows already
    /// emitted are kept.
    pub fn run(&self) -> Result<(), ExtractError> {
        match &self.kind {
            JobKind::Relational { flow_sensitive } => {
                FactGenerator::new(&self.ctx, *flow_sensitive).write_class_facts(self.class_id, None)
            }
            JobKind::Dump { sink } => dump::dump_class(&self.ctx, self.class_id, sink),
        }
    }
}
