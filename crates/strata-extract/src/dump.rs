//! Representation dump: serialized method bodies instead of relational
//! facts. Produced as a second wave from the same resolved program, so no
//! re-resolution is needed.

use std::fmt::Write as _;
use std::path::PathBuf;

use strata_core::errors::ExtractError;
use strata_core::model::{ClassId, ProgramClass};
use strata_store::SharedStream;

use crate::context::ExtractContext;

/// Where dump output goes: one file per class, or one shared stream where
/// each class is written as a single atomic record.
#[derive(Debug, Clone)]
pub enum DumpSink {
    PerClassFiles(PathBuf),
    Shared(SharedStream),
}

/// Serialize one class's representation to the sink.
pub fn dump_class(ctx: &ExtractContext, id: ClassId, sink: &DumpSink) -> Result<(), ExtractError> {
    let class = ctx
        .program
        .class(id)
        .ok_or_else(|| ExtractError::UnknownClass(format!("#{}", id.0)))?;
    let text = render_class(class);
    match sink {
        DumpSink::PerClassFiles(dir) => {
            let path = dir.join(format!("{}.ir", class.name));
            std::fs::write(&path, text).map_err(|source| ExtractError::Dump {
                class: class.name.clone(),
                source,
            })
        }
        DumpSink::Shared(stream) => {
            stream
                .write_all(text.as_bytes())
                .map_err(|source| ExtractError::Dump {
                    class: class.name.clone(),
                    source,
                })
        }
    }
}

fn render_class(class: &ProgramClass) -> String {
    let mut out = String::new();
    let _ = write!(out, "class {}", class.name);
    if let Some(sup) = &class.superclass {
        let _ = write!(out, " extends {sup}");
    }
    if !class.interfaces.is_empty() {
        let _ = write!(out, " implements {}", class.interfaces.join(", "));
    }
    out.push('\n');

    for method in &class.methods {
        let _ = writeln!(out, "  method {}", method.signature(&class.name));
        let Some(body) = &method.body else {
            continue;
        };
        if !body.locals.is_empty() {
            let _ = writeln!(out, "    locals: {}", body.locals.join(", "));
        }
        for (index, instr) in body.instructions.iter().enumerate() {
            let _ = write!(out, "    {index}: {}", instr.opcode);
            if !instr.operands.is_empty() {
                let _ = write!(out, " {}", instr.operands.join(" "));
            }
            if let Some(target) = &instr.call_target {
                let _ = write!(out, " -> {target}");
            }
            out.push('\n');
        }
    }
    out.push('\n');
    out
}
