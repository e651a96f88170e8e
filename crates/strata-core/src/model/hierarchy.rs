//! The materialized class hierarchy.
//!
//! Built exactly once, single-threaded, before the parallel phase; read-only
//! afterwards. Concurrent mutation during extraction would corrupt it, so
//! there is deliberately no mutation API beyond `materialize`.

use crate::types::collections::FxHashMap;

use super::class::ProgramClass;

/// Direct superclass / superinterface tables over qualified names.
#[derive(Debug, Default)]
pub struct ClassHierarchy {
    superclass: FxHashMap<String, String>,
    interfaces: FxHashMap<String, Vec<String>>,
}

impl ClassHierarchy {
    /// Materialize the hierarchy from the resolved class set.
    pub fn materialize(classes: &[ProgramClass]) -> Self {
        let mut superclass = FxHashMap::default();
        let mut interfaces = FxHashMap::default();
        for class in classes {
            if let Some(sup) = &class.superclass {
                superclass.insert(class.name.clone(), sup.clone());
            }
            if !class.interfaces.is_empty() {
                interfaces.insert(class.name.clone(), class.interfaces.clone());
            }
        }
        Self {
            superclass,
            interfaces,
        }
    }

    pub fn direct_superclass(&self, class: &str) -> Option<&str> {
        self.superclass.get(class).map(String::as_str)
    }

    pub fn direct_interfaces(&self, class: &str) -> &[String] {
        self.interfaces.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `class` is known to the hierarchy at all.
    pub fn contains(&self, class: &str) -> bool {
        self.superclass.contains_key(class) || self.interfaces.contains_key(class)
    }
}
