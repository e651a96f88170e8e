//! Shared, frozen state handed to every extraction job.

use std::sync::Arc;

use strata_core::model::{Classification, ClassId};
use strata_core::resolve::ResolvedProgram;
use strata_core::types::collections::FxHashMap;
use strata_store::FactDatabase;

use crate::generator::WarningCounters;

/// Everything a job may read while running. All of it is populated before
/// the first worker starts and never mutated afterwards; the database is the
/// only write target.
pub struct ExtractContext {
    pub program: Arc<ResolvedProgram>,
    pub classification: Arc<FxHashMap<ClassId, Classification>>,
    pub db: Arc<FactDatabase>,
    pub warnings: Arc<WarningCounters>,
}

impl ExtractContext {
    /// Qualified name for logging; falls back to the raw id when the class
    /// is somehow not in the snapshot.
    pub fn class_name(&self, id: ClassId) -> String {
        self.program
            .class(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("<class #{}>", id.0))
    }
}
