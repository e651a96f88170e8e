//! Application/library classification.
//!
//! Computed exactly once, after the hierarchy is materialized, into a
//! separate id -> classification map. Collaborator-owned class objects are
//! never mutated; the map is frozen before workers start.

use glob::{Pattern, PatternError};

use strata_core::model::{Classification, ClassId};
use strata_core::resolve::ResolvedProgram;
use strata_core::types::collections::FxHashMap;

/// Glob filter over qualified class names selecting application classes.
#[derive(Debug)]
pub struct AppClassFilter {
    pattern: Pattern,
}

impl AppClassFilter {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }

    pub fn matches(&self, qualified_name: &str) -> bool {
        self.pattern.matches(qualified_name)
    }
}

/// Build the final classification map for the whole class set.
pub fn classify(
    program: &ResolvedProgram,
    filter: &AppClassFilter,
) -> FxHashMap<ClassId, Classification> {
    let mut map = FxHashMap::default();
    for id in program.class_ids() {
        if let Some(class) = program.class(id) {
            let classification = if filter.matches(&class.name) {
                Classification::Application
            } else {
                Classification::Library
            };
            map.insert(id, classification);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use strata_core::model::ProgramClass;

    fn program(names: &[&str]) -> ResolvedProgram {
        let classes = names
            .iter()
            .map(|n| ProgramClass {
                name: n.to_string(),
                artifacts: vec!["app.jar".into()],
                superclass: None,
                interfaces: vec![],
                modifiers: vec![],
                methods: vec![],
            })
            .collect();
        ResolvedProgram::new(classes, Vec::new(), BTreeMap::new(), None)
    }

    #[test]
    fn glob_selects_application_classes() {
        let program = program(&["com.example.Foo", "java.lang.String"]);
        let filter = AppClassFilter::new("com.example.*").unwrap();
        let map = classify(&program, &filter);
        assert_eq!(
            map[&program.class_id("com.example.Foo").unwrap()],
            Classification::Application
        );
        assert_eq!(
            map[&program.class_id("java.lang.String").unwrap()],
            Classification::Library
        );
    }

    #[test]
    fn default_glob_matches_everything() {
        let program = program(&["a.B", "c.D"]);
        let filter = AppClassFilter::new("**").unwrap();
        let map = classify(&program, &filter);
        assert!(map.values().all(|c| *c == Classification::Application));
    }
}
