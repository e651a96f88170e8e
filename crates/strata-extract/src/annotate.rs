//! Line-oriented annotators for seed and sensitivity files.
//!
//! Both run after extraction so their rows land in the same database and
//! close with the rest. Unclassifiable lines are skipped, not errors; a
//! missing or unreadable file is fatal because the caller asked for it
//! explicitly.

use std::fs;
use std::path::Path;

use tracing::debug;

use strata_core::errors::{ResolveError, StoreError};
use strata_store::{FactDatabase, FactRow, WriteDiscipline};

use crate::generator::predicates;

/// How one seed line is to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedEntry {
    /// A full method signature: keep this method.
    MethodKeep(String),
    /// A bare class name: keep the whole class.
    ClassKeep(String),
}

/// Classify one seed line. A line with a parameter list is a method
/// signature; a line with no colon and no parameter list is a class name;
/// everything else (field signatures, noise) is skipped. Blank and
/// whitespace-only lines are skipped too, never recorded as class names.
pub fn classify_seed_line(line: &str) -> Option<SeedEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.contains('(') {
        Some(SeedEntry::MethodKeep(line.to_string()))
    } else if !line.contains(':') {
        Some(SeedEntry::ClassKeep(line.to_string()))
    } else {
        None
    }
}

/// Classify one sensitivity line: `<method signature>, <sensitivity>`.
/// Lines without the separator are skipped.
pub fn classify_sensitivity_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    line.split_once(", ")
}

/// Read a seed file and record a keep-class or keep-method row per
/// recognized line. Returns the number of rows recorded.
pub fn annotate_seed_file(db: &FactDatabase, path: &Path) -> Result<usize, AnnotateError> {
    let text = fs::read_to_string(path).map_err(|source| ResolveError::AuxiliaryFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut recorded = 0usize;
    for line in text.lines() {
        let row = match classify_seed_line(line) {
            Some(SeedEntry::MethodKeep(sig)) => FactRow::new(predicates::KEEP_METHOD, &[&sig]),
            Some(SeedEntry::ClassKeep(name)) => FactRow::new(predicates::KEEP_CLASS, &[&name]),
            None => continue,
        };
        db.write(&row, WriteDiscipline::Deduplicated)?;
        recorded += 1;
    }
    debug!(path = %path.display(), recorded, "seed file annotated");
    Ok(recorded)
}

/// Read a sensitivity file and record one row per `signature, sensitivity`
/// line. Returns the number of rows recorded.
pub fn annotate_sensitivity_file(db: &FactDatabase, path: &Path) -> Result<usize, AnnotateError> {
    let text = fs::read_to_string(path).map_err(|source| ResolveError::AuxiliaryFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut recorded = 0usize;
    for line in text.lines() {
        if let Some((signature, sensitivity)) = classify_sensitivity_line(line) {
            let row = FactRow::new(
                predicates::SPECIAL_SENSITIVITY_METHOD,
                &[signature, sensitivity],
            );
            db.write(&row, WriteDiscipline::Deduplicated)?;
            recorded += 1;
        }
    }
    debug!(path = %path.display(), recorded, "sensitivity file annotated");
    Ok(recorded)
}

/// Annotator failures: the file itself, or the database it writes to.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error(transparent)]
    File(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AnnotateError> for strata_core::errors::PipelineError {
    fn from(e: AnnotateError) -> Self {
        match e {
            AnnotateError::File(r) => Self::Resolve(r),
            AnnotateError::Store(s) => Self::Store(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_lines_classify_by_shape() {
        assert_eq!(
            classify_seed_line("<com.example.Foo: void bar(int)>"),
            Some(SeedEntry::MethodKeep("<com.example.Foo: void bar(int)>".into()))
        );
        assert_eq!(
            classify_seed_line("com.example.Foo"),
            Some(SeedEntry::ClassKeep("com.example.Foo".into()))
        );
        // Field signature: has a colon but no parameter list.
        assert_eq!(classify_seed_line("<com.example.Foo: int count>"), None);
        assert_eq!(classify_seed_line(""), None);
        assert_eq!(classify_seed_line("   "), None);
    }

    #[test]
    fn sensitivity_lines_need_the_separator() {
        assert_eq!(
            classify_sensitivity_line("<com.example.Foo: void bar()>, 2-object"),
            Some(("<com.example.Foo: void bar()>", "2-object"))
        );
        assert_eq!(classify_sensitivity_line("no separator here"), None);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        assert_eq!(
            classify_seed_line("  com.example.Foo  "),
            Some(SeedEntry::ClassKeep("com.example.Foo".into()))
        );
    }
}
