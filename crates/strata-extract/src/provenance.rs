//! Artifact provenance: which packaged input each class came from,
//! including nested packaging.

use std::collections::{BTreeMap, BTreeSet};

use strata_core::errors::StoreError;
use strata_store::{FactDatabase, WriteDiscipline};

use crate::generator::predicates;

/// One (class, sub-artifact) entry under an artifact. Ordered so emission
/// is deterministic regardless of registration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ArtifactEntry {
    class_name: String,
    sub_artifact: Option<String>,
}

/// Records which artifact each class was found in. Registration is
/// idempotent per (artifact, class, sub-artifact) triple; the same class
/// found in two different artifacts yields two records.
#[derive(Debug, Default)]
pub struct ArtifactTracker {
    entries: BTreeMap<String, BTreeSet<ArtifactEntry>>,
}

impl ArtifactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `class_name` was found inside `artifact_id`, optionally
    /// nested under `parent_artifact_id` (e.g. a classes archive extracted
    /// from a container archive).
    pub fn register(&mut self, artifact_id: &str, class_name: &str, parent_artifact_id: Option<&str>) {
        self.entries
            .entry(artifact_id.to_string())
            .or_default()
            .insert(ArtifactEntry {
                class_name: class_name.to_string(),
                sub_artifact: parent_artifact_id.map(str::to_string),
            });
    }

    /// Number of recorded (artifact, class) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emit exactly one provenance row per recorded pair, in sorted order.
    /// Returns the number of rows written.
    pub fn write_facts(&self, db: &FactDatabase) -> Result<usize, StoreError> {
        let mut rows = 0;
        for (artifact, entries) in &self.entries {
            for entry in entries {
                db.write_row(
                    predicates::CLASS_ARTIFACT,
                    WriteDiscipline::Deduplicated,
                    &[
                        artifact,
                        &entry.class_name,
                        entry.sub_artifact.as_deref().unwrap_or(""),
                    ],
                )?;
                rows += 1;
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::Destination;

    #[test]
    fn same_pair_registered_twice_yields_one_row() {
        let mut tracker = ArtifactTracker::new();
        tracker.register("app.jar", "com.example.Foo", None);
        tracker.register("app.jar", "com.example.Foo", None);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn class_in_two_artifacts_yields_two_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = FactDatabase::open(Destination::Directory(dir.path().to_path_buf())).unwrap();

        let mut tracker = ArtifactTracker::new();
        tracker.register("a.jar", "com.example.Foo", None);
        tracker.register("b.jar", "com.example.Foo", None);
        tracker.register("b.jar", "com.example.Foo", None);
        let rows = tracker.write_facts(&db).unwrap();
        db.close().unwrap();

        assert_eq!(rows, 2);
        let text = std::fs::read_to_string(
            dir.path().join(format!("{}.facts", predicates::CLASS_ARTIFACT)),
        )
        .unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn nested_packaging_is_recorded() {
        let mut tracker = ArtifactTracker::new();
        tracker.register("classes.jar", "com.example.Foo", Some("bundle.aar"));
        tracker.register("classes.jar", "com.example.Foo", None);
        // Different sub-artifact means a different provenance record.
        assert_eq!(tracker.len(), 2);
    }
}
