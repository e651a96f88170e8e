//! Predicate names. Each becomes one output unit in the destination
//! directory. The downstream engine's schema is not normative here; these
//! are the tables this generator populates.

pub const APPLICATION_CLASS: &str = "ApplicationClass";
pub const PROPERTY: &str = "Property";
pub const CLASS_ARTIFACT: &str = "ClassArtifact";

pub const CLASS_TYPE: &str = "ClassType";
pub const CLASS_MODIFIER: &str = "ClassModifier";
pub const DIRECT_SUPERCLASS: &str = "DirectSuperclass";
pub const DIRECT_SUPERINTERFACE: &str = "DirectSuperinterface";

pub const METHOD: &str = "Method";
pub const METHOD_MODIFIER: &str = "MethodModifier";
pub const VAR: &str = "Var";
pub const VAR_VERSION: &str = "VarVersion";
pub const INSTRUCTION: &str = "Instruction";
pub const METHOD_INVOCATION: &str = "MethodInvocation";

pub const REACHABLE_CALL_SITE: &str = "ReachableCallSite";
pub const CALL_GRAPH_EDGE: &str = "CallGraphEdge";
pub const CALL_GRAPH_ENTRY_POINT: &str = "CallGraphEntryPoint";

pub const KEEP_CLASS: &str = "KeepClass";
pub const KEEP_METHOD: &str = "KeepMethod";
pub const SPECIAL_SENSITIVITY_METHOD: &str = "SpecialContextSensitivityMethod";
