//! Aggregated warning counters.
//!
//! Unresolved references are common in partial classpaths; they are counted
//! during extraction and reported once after the drain barrier, never per
//! occurrence.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

#[derive(Debug, Default)]
pub struct WarningCounters {
    phantom_types: AtomicUsize,
    phantom_methods: AtomicUsize,
}

impl WarningCounters {
    pub fn record_phantom_type(&self) {
        self.phantom_types.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_phantom_method(&self) {
        self.phantom_methods.fetch_add(1, Ordering::Relaxed);
    }

    pub fn phantom_types(&self) -> usize {
        self.phantom_types.load(Ordering::Relaxed)
    }

    pub fn phantom_methods(&self) -> usize {
        self.phantom_methods.load(Ordering::Relaxed)
    }

    /// Log each non-zero counter exactly once.
    pub fn report(&self) {
        let types = self.phantom_types();
        if types > 0 {
            warn!(count = types, "input references phantom types");
        }
        let methods = self.phantom_methods();
        if methods > 0 {
            warn!(count = methods, "input references phantom methods");
        }
    }
}
