//! A shared, lock-protected output stream.
//!
//! Used when all predicates interleave on one destination (stdout mode) and
//! by dump jobs writing to a common sink. Each `write_all` call is atomic
//! with respect to other writers of the same stream.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct SharedStream {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedStream {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write one complete record under the stream lock.
    pub fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("shared stream lock poisoned"))?;
        guard.write_all(bytes)
    }

    pub fn flush(&self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("shared stream lock poisoned"))?;
        guard.flush()
    }
}

impl std::fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedStream")
    }
}
