//! Deterministic numbering for call-graph-derived identifiers.
//!
//! One context per ordered invocation. Ids are allocated in encounter order
//! while classes are processed lexically on a single thread, so identical
//! inputs always produce identical ids. Id 0 is reserved for the synthetic
//! entry point.

#[derive(Debug)]
pub struct NumberingContext {
    next_call_site: u64,
    next_edge: u64,
}

impl NumberingContext {
    pub fn new() -> Self {
        Self {
            next_call_site: 1,
            next_edge: 1,
        }
    }

    /// Id of the synthetic entry point.
    pub fn entry_point_id(&self) -> u64 {
        0
    }

    pub fn next_call_site(&mut self) -> u64 {
        let id = self.next_call_site;
        self.next_call_site += 1;
        id
    }

    pub fn next_edge(&mut self) -> u64 {
        let id = self.next_edge;
        self.next_edge += 1;
        id
    }
}

impl Default for NumberingContext {
    fn default() -> Self {
        Self::new()
    }
}
