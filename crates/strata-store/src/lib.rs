//! The shared fact database.
//!
//! Many worker threads append rows to the same predicate tables. Each table
//! owns its buffered writer behind its own `Mutex`, so writes to different
//! predicates never serialize against each other; a row is encoded before
//! the lock is taken and appended with a single write, so one row's fields
//! can never interleave with another's.

pub mod database;
pub mod row;
pub mod stream;
pub mod table;

pub use database::{Destination, FactDatabase};
pub use row::FactRow;
pub use stream::SharedStream;
pub use table::{PredicateTable, WriteDiscipline};
