//! The fact database: a registry of predicate tables over one destination.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use strata_core::errors::StoreError;
use strata_core::types::collections::FxHashMap;

use crate::row::FactRow;
use crate::stream::SharedStream;
use crate::table::{PredicateTable, TableSink, WriteDiscipline};

/// Where output units live.
#[derive(Debug, Clone)]
pub enum Destination {
    /// One `<predicate>.facts` file per table under this directory.
    Directory(PathBuf),
    /// All tables interleave on one shared stream, rows prefixed with their
    /// predicate. Inherently serialized; used for stdout redirection.
    Stream(SharedStream),
}

/// The shared, concurrently writable destination for relational rows.
///
/// Opened at run start, flushed after the preliminary-facts phase, closed at
/// run end. The table registry lock is taken only to look up or create a
/// handle, never across a row write, so writes to different predicates scale
/// with worker count.
pub struct FactDatabase {
    dest: Destination,
    tables: RwLock<FxHashMap<String, Arc<PredicateTable>>>,
    closed: Arc<AtomicBool>,
}

impl FactDatabase {
    pub fn open(dest: Destination) -> Result<Self, StoreError> {
        if let Destination::Directory(dir) = &dest {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::OpenDirectory {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            dest,
            tables: RwLock::new(FxHashMap::default()),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get or create the table for `predicate`. The discipline is fixed by
    /// the creating call; a later request under the other discipline fails.
    pub fn table(
        &self,
        predicate: &str,
        discipline: WriteDiscipline,
    ) -> Result<Arc<PredicateTable>, StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        if let Some(table) = self.lookup(predicate)? {
            if table.discipline() != discipline {
                return Err(StoreError::DisciplineMismatch {
                    predicate: predicate.to_string(),
                });
            }
            return Ok(table);
        }

        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned {
            predicate: predicate.to_string(),
        })?;
        // Another writer may have created it while we upgraded the lock.
        if let Some(table) = tables.get(predicate) {
            if table.discipline() != discipline {
                return Err(StoreError::DisciplineMismatch {
                    predicate: predicate.to_string(),
                });
            }
            return Ok(Arc::clone(table));
        }

        let sink = match &self.dest {
            Destination::Directory(dir) => {
                let path = dir.join(format!("{predicate}.facts"));
                let file = File::create(&path).map_err(|source| StoreError::OpenTable {
                    predicate: predicate.to_string(),
                    source,
                })?;
                TableSink::File(BufWriter::new(file))
            }
            Destination::Stream(stream) => TableSink::Shared(stream.clone()),
        };
        debug!(predicate, ?discipline, "created fact table");
        let table = Arc::new(PredicateTable::new(
            predicate.to_string(),
            discipline,
            sink,
            Arc::clone(&self.closed),
        ));
        tables.insert(predicate.to_string(), Arc::clone(&table));
        Ok(table)
    }

    /// Convenience single-row write through the registry.
    pub fn write_row(
        &self,
        predicate: &str,
        discipline: WriteDiscipline,
        fields: &[&str],
    ) -> Result<(), StoreError> {
        self.table(predicate, discipline)?.write_row(fields)
    }

    /// Write an owned row value.
    pub fn write(&self, row: &FactRow, discipline: WriteDiscipline) -> Result<(), StoreError> {
        let fields: Vec<&str> = row.fields.iter().map(String::as_str).collect();
        self.write_row(&row.predicate, discipline, &fields)
    }

    /// Force all buffered rows to durable storage without releasing any
    /// table.
    pub fn flush(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        for table in self.snapshot()? {
            table.flush()?;
        }
        Ok(())
    }

    /// Flush every table, then mark the database closed. Terminal: any
    /// write or flush afterwards fails with `StoreError::Closed`.
    pub fn close(&self) -> Result<(), StoreError> {
        self.flush()?;
        self.closed.store(true, Ordering::Release);
        debug!("fact database closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn lookup(&self, predicate: &str) -> Result<Option<Arc<PredicateTable>>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned {
            predicate: predicate.to_string(),
        })?;
        Ok(tables.get(predicate).cloned())
    }

    fn snapshot(&self) -> Result<Vec<Arc<PredicateTable>>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned {
            predicate: "<registry>".to_string(),
        })?;
        Ok(tables.values().cloned().collect())
    }
}
