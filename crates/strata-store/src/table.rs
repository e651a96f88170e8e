//! Per-predicate tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use strata_core::errors::StoreError;
use strata_core::types::collections::FxHashSet;

use crate::row::encode_fields;
use crate::stream::SharedStream;

/// Write discipline of one table, chosen at table-creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDiscipline {
    /// Set semantics: a seen-set suppresses re-writes of identical tuples.
    /// Trades memory for strict uniqueness.
    Deduplicated,
    /// Multiset semantics: no tracking, maximum throughput; duplicate rows
    /// across jobs are possible and legal.
    AppendOnly,
}

pub(crate) enum TableSink {
    /// Dedicated buffered file, one per predicate.
    File(BufWriter<File>),
    /// Shared stream; rows carry the predicate as a leading field.
    Shared(SharedStream),
}

struct TableInner {
    sink: TableSink,
    /// Encoded rows already written. `Some` only under dedup discipline.
    seen: Option<FxHashSet<String>>,
}

/// One concurrently writable predicate table.
///
/// The `Mutex` here is the only lock a row write takes besides (in shared-
/// stream mode) the stream's own lock; tables never contend with each other.
pub struct PredicateTable {
    predicate: String,
    discipline: WriteDiscipline,
    closed: Arc<AtomicBool>,
    inner: Mutex<TableInner>,
}

impl std::fmt::Debug for PredicateTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateTable")
            .field("predicate", &self.predicate)
            .field("discipline", &self.discipline)
            .finish_non_exhaustive()
    }
}

impl PredicateTable {
    pub(crate) fn new(
        predicate: String,
        discipline: WriteDiscipline,
        sink: TableSink,
        closed: Arc<AtomicBool>,
    ) -> Self {
        let seen = match discipline {
            WriteDiscipline::Deduplicated => Some(FxHashSet::default()),
            WriteDiscipline::AppendOnly => None,
        };
        Self {
            predicate,
            discipline,
            closed,
            inner: Mutex::new(TableInner { sink, seen }),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn discipline(&self) -> WriteDiscipline {
        self.discipline
    }

    /// Append one row. Atomic at row granularity: the record is fully
    /// encoded before the table lock is taken and written with one call.
    pub fn write_row(&self, fields: &[&str]) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        let encoded = encode_fields(fields);
        let mut inner = self.lock()?;
        if let Some(seen) = inner.seen.as_mut() {
            if !seen.insert(encoded.clone()) {
                return Ok(());
            }
        }
        match &mut inner.sink {
            TableSink::File(writer) => {
                writer
                    .write_all(encoded.as_bytes())
                    .map_err(|source| StoreError::Write {
                        predicate: self.predicate.clone(),
                        source,
                    })
            }
            TableSink::Shared(stream) => {
                let mut record = String::with_capacity(self.predicate.len() + 1 + encoded.len());
                record.push_str(&self.predicate);
                record.push('\t');
                record.push_str(&encoded);
                stream
                    .write_all(record.as_bytes())
                    .map_err(|source| StoreError::Write {
                        predicate: self.predicate.clone(),
                        source,
                    })
            }
        }
    }

    /// Force buffered rows out without releasing the table.
    pub fn flush(&self) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let result = match &mut inner.sink {
            TableSink::File(writer) => writer.flush(),
            TableSink::Shared(stream) => stream.flush(),
        };
        result.map_err(|source| StoreError::Flush {
            predicate: self.predicate.clone(),
            source,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TableInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned {
            predicate: self.predicate.clone(),
        })
    }
}
