//! Hash collections with the FxHash hasher, used throughout the workspace.

pub use rustc_hash::{FxHashMap, FxHashSet};
