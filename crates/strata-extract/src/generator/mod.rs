//! Per-class relational fact generation.
//!
//! A generator walks one class's methods and instructions and emits rows
//! through the injected database handle. It never touches hierarchy or
//! classification state mutably; a traversal failure aborts only the
//! current class and keeps whatever rows were already written.

pub mod numbering;
pub mod predicates;
pub mod warnings;

pub use numbering::NumberingContext;
pub use warnings::WarningCounters;

use strata_core::errors::{ExtractError, StoreError};
use strata_core::model::{ClassId, ProgramClass};
use strata_core::types::collections::FxHashMap;
use strata_store::WriteDiscipline;

use crate::context::ExtractContext;

/// Class name of a qualified method signature
/// (`<com.Bar: void f()>` -> `com.Bar`).
fn target_class(signature: &str) -> Option<&str> {
    signature.strip_prefix('<')?.split(':').next()
}

pub struct FactGenerator<'a> {
    ctx: &'a ExtractContext,
    flow_sensitive: bool,
}

impl<'a> FactGenerator<'a> {
    pub fn new(ctx: &'a ExtractContext, flow_sensitive: bool) -> Self {
        Self {
            ctx,
            flow_sensitive,
        }
    }

    /// Emit all relational facts for one class. With a numbering context
    /// (ordered mode only), call-site and call-graph-edge ids are allocated
    /// in encounter order.
    pub fn write_class_facts(
        &self,
        id: ClassId,
        mut numbering: Option<&mut NumberingContext>,
    ) -> Result<(), ExtractError> {
        let class = self
            .ctx
            .program
            .class(id)
            .ok_or_else(|| ExtractError::UnknownClass(format!("#{}", id.0)))?;

        self.row(class, predicates::CLASS_TYPE, WriteDiscipline::Deduplicated, &[&class.name])?;
        for modifier in &class.modifiers {
            self.row(
                class,
                predicates::CLASS_MODIFIER,
                WriteDiscipline::Deduplicated,
                &[modifier, &class.name],
            )?;
        }
        self.write_hierarchy_facts(class)?;

        for method in &class.methods {
            self.write_method_facts(class, method, numbering.as_deref_mut())?;
        }
        Ok(())
    }

    fn write_hierarchy_facts(&self, class: &ProgramClass) -> Result<(), ExtractError> {
        // The hierarchy was materialized before any worker started; fall
        // back to the class's own declaration if it is absent there.
        let hierarchy = self.ctx.program.hierarchy();
        let superclass = hierarchy
            .and_then(|h| h.direct_superclass(&class.name))
            .or(class.superclass.as_deref());
        if let Some(sup) = superclass {
            if self.ctx.program.class_id(sup).is_none() {
                self.ctx.warnings.record_phantom_type();
            }
            self.row(
                class,
                predicates::DIRECT_SUPERCLASS,
                WriteDiscipline::Deduplicated,
                &[&class.name, sup],
            )?;
        }
        for iface in &class.interfaces {
            if self.ctx.program.class_id(iface).is_none() {
                self.ctx.warnings.record_phantom_type();
            }
            self.row(
                class,
                predicates::DIRECT_SUPERINTERFACE,
                WriteDiscipline::Deduplicated,
                &[&class.name, iface],
            )?;
        }
        Ok(())
    }

    fn write_method_facts(
        &self,
        class: &ProgramClass,
        method: &strata_core::model::Method,
        mut numbering: Option<&mut NumberingContext>,
    ) -> Result<(), ExtractError> {
        let sig = method.signature(&class.name);
        let arity = method.parameter_types.len().to_string();
        self.row(
            class,
            predicates::METHOD,
            WriteDiscipline::Deduplicated,
            &[&sig, &method.name, &class.name, &method.return_type, &arity],
        )?;
        for modifier in &method.modifiers {
            self.row(
                class,
                predicates::METHOD_MODIFIER,
                WriteDiscipline::Deduplicated,
                &[modifier, &sig],
            )?;
        }

        let Some(body) = &method.body else {
            return Ok(());
        };

        for local in &body.locals {
            let var = format!("{sig}/{local}");
            self.row(class, predicates::VAR, WriteDiscipline::Deduplicated, &[&sig, &var])?;
            if self.flow_sensitive {
                self.row(
                    class,
                    predicates::VAR_VERSION,
                    WriteDiscipline::Deduplicated,
                    &[&var, "0"],
                )?;
            }
        }

        let mut store_versions: FxHashMap<&str, u32> = FxHashMap::default();
        for (index, instr) in body.instructions.iter().enumerate() {
            if instr.opcode.is_empty() {
                return Err(ExtractError::MalformedBody {
                    class: class.name.clone(),
                    method: method.name.clone(),
                    message: format!("empty opcode at instruction {index}"),
                });
            }
            let index = index.to_string();
            let operands = instr.operands.join(" ");
            self.row(
                class,
                predicates::INSTRUCTION,
                WriteDiscipline::AppendOnly,
                &[&sig, &index, &instr.opcode, &operands],
            )?;

            if self.flow_sensitive {
                if let Some(local) = &instr.stores_to {
                    let version = store_versions.entry(local.as_str()).or_insert(0);
                    *version += 1;
                    let var = format!("{sig}/{local}");
                    self.row(
                        class,
                        predicates::VAR_VERSION,
                        WriteDiscipline::Deduplicated,
                        &[&var, &version.to_string()],
                    )?;
                }
            }

            if let Some(target) = &instr.call_target {
                if target_class(target).and_then(|c| self.ctx.program.class_id(c)).is_none() {
                    self.ctx.warnings.record_phantom_method();
                }
                self.row(
                    class,
                    predicates::METHOD_INVOCATION,
                    WriteDiscipline::Deduplicated,
                    &[&sig, &index, target],
                )?;
                if let Some(numbering) = numbering.as_deref_mut() {
                    let site = numbering.next_call_site().to_string();
                    self.row(
                        class,
                        predicates::REACHABLE_CALL_SITE,
                        WriteDiscipline::Deduplicated,
                        &[&sig, &index, &site],
                    )?;
                    let edge = numbering.next_edge().to_string();
                    self.row(
                        class,
                        predicates::CALL_GRAPH_EDGE,
                        WriteDiscipline::Deduplicated,
                        &[&edge, &site, target],
                    )?;
                }
            }
        }
        Ok(())
    }

    fn row(
        &self,
        class: &ProgramClass,
        predicate: &str,
        discipline: WriteDiscipline,
        fields: &[&str],
    ) -> Result<(), ExtractError> {
        self.ctx
            .db
            .write_row(predicate, discipline, fields)
            .map_err(|source: StoreError| ExtractError::Store {
                class: class.name.clone(),
                source,
            })
    }
}
