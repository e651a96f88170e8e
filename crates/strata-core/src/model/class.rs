//! Classes, methods, and instruction bodies.

use serde::{Deserialize, Serialize};

/// Index of a class in the resolved snapshot's class vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

/// One resolved class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramClass {
    /// Fully qualified name, dot-separated.
    pub name: String,
    /// Identifiers of the artifacts this class was found in, in discovery
    /// order. A class may appear in more than one artifact.
    pub artifacts: Vec<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// One method of a resolved class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub parameter_types: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Materialized body; absent for abstract/native methods or when the
    /// resolver could not lift one.
    #[serde(default)]
    pub body: Option<MethodBody>,
}

impl Method {
    /// Qualified signature:
    /// `<com.example.Foo: void bar(int,java.lang.String)>`.
    pub fn signature(&self, class_name: &str) -> String {
        format!(
            "<{}: {} {}({})>",
            class_name,
            self.return_type,
            self.name,
            self.parameter_types.join(",")
        )
    }
}

/// A materialized method body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodBody {
    #[serde(default)]
    pub locals: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// One lifted instruction. Operands are opaque strings; their meaning
/// belongs to the resolver and the downstream analysis, not to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: String,
    #[serde(default)]
    pub operands: Vec<String>,
    /// Qualified signature of a statically known call target, when this
    /// instruction is a call site.
    #[serde(default)]
    pub call_target: Option<String>,
    /// Local written by this instruction, when it is a store.
    #[serde(default)]
    pub stores_to: Option<String>,
}

impl Instruction {
    pub fn is_call_site(&self) -> bool {
        self.call_target.is_some()
    }
}
