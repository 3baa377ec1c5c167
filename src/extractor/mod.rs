//! AST extraction (§4.1): turns a parsed source file into the raw
//! statements the rest of the pipeline consumes — function/class
//! definitions, imports, assignments, and call sites. Each language's
//! extractor walks its own tree-sitter grammar but produces the same
//! language-independent shapes defined here.

pub mod go;
pub mod python;

use std::path::PathBuf;

use crate::location::SourceLocation;

/// A function or method definition as seen by the extractor, before any
/// inference has run. `receiver` is `Some` for a Go method or a Python
/// method's `self`/`cls` parameter; `None` for a free function.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFunction {
    pub name: String,
    pub qualified_name: String,
    pub params: Vec<RawParameter>,
    pub receiver: Option<String>,
    pub return_type_annotation: Option<String>,
    pub location: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawParameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default_literal: Option<String>,
}

/// A class (Python) or struct (Go) definition.
#[derive(Clone, Debug, PartialEq)]
pub struct RawClass {
    pub name: String,
    pub qualified_name: String,
    pub bases: Vec<String>,
    pub location: SourceLocation,
}

/// A single import statement. `alias` is the local name bound in the
/// importing file's scope.
#[derive(Clone, Debug, PartialEq)]
pub struct RawImport {
    pub module: String,
    pub alias: String,
    pub location: SourceLocation,
}

/// One link in a dotted/call chain (§4.3.5), in the order they appear
/// reading left to right: `a.b.c.method()` is `[Identifier("a"),
/// Attribute("b"), Attribute("c"), MethodCall("method", 0)]`.
#[derive(Clone, Debug, PartialEq)]
pub enum ChainStep {
    /// The chain's starting variable, e.g. `a` or `self`.
    Identifier(String),
    /// A `.attr` hop with no call.
    Attribute(String),
    /// A `.method(...)` hop.
    MethodCall { name: String, arg_count: usize },
    /// A capitalized call used as the chain's base, e.g. `Builder(...)`.
    Instantiation { class_name: String, arg_count: usize },
}

/// The right-hand side of an assignment, tagged by AST shape so the
/// inference strategies can dispatch on it directly instead of
/// re-deriving the shape from a string.
#[derive(Clone, Debug, PartialEq)]
pub enum RhsKind {
    /// A literal: string, number, bool, list/dict/set display, etc.
    /// `type_hint` is the builtin type name the literal's syntax implies.
    Literal { type_hint: String },
    /// A call expression, `callee(...)`.
    Call { callee: String },
    /// A bare name reference to another variable.
    NameRef { name: String },
    /// An attribute access, `base.attr`.
    Attribute { base: String, attr: String },
    /// A comparison, boolean (`and`/`or`/`not`), or `!`-negation
    /// expression. Always evaluates to a boolean regardless of its
    /// operands, so inference can skip looking at them at all (§4.3.9).
    BooleanExpr,
    /// A dotted/call chain at least three steps deep, e.g.
    /// `self.name.upper()` or `Builder().x().y()` (§4.3.5). Shorter
    /// accesses stay tagged `Attribute`/`Call` since single-hop strategies
    /// already cover them without walking a step list.
    Chain(Vec<ChainStep>),
    /// Anything the extractor doesn't specialize; inference falls back to
    /// the fluent-heuristic strategy or `Any`.
    Other,
}

/// A single assignment statement, `target = rhs` or (Python) `self.target
/// = rhs`. `owner` carries the enclosing class's qualified name when
/// `target` is an attribute assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct RawAssignment {
    pub function_qualified_name: String,
    pub target: String,
    pub owner_class: Option<String>,
    pub type_annotation: Option<String>,
    pub rhs: RhsKind,
    pub location: SourceLocation,
}

/// A call site as it appears in source, before resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCallSite {
    pub caller_qualified_name: String,
    pub callee_text: String,
    pub argument_count: usize,
    pub location: SourceLocation,
}

/// Everything extracted from a single file, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedFile {
    pub path: PathBuf,
    pub imports: Vec<RawImport>,
    pub classes: Vec<RawClass>,
    pub functions: Vec<RawFunction>,
    pub assignments: Vec<RawAssignment>,
    pub call_sites: Vec<RawCallSite>,
}
