//! opalc-sem - Name and type tables for the Opal compiler.
//!
//! The parser is syntax-directed and keeps no AST, so these two tables are
//! the only semantic state that outlives a statement:
//!
//! - [`scope::ScopeTree`]: a stack automaton of lexical scopes. Each
//!   parser routine that opens a brace-delimited construct pushes a scope
//!   and pops it at the matching close; `break`/`continue` validation
//!   walks the stack for a `Loop` frame. Symbol chains are
//!   insertion-ordered because order is meaning: struct fields lay out in
//!   declaration order and parameters emit left to right.
//! - [`types::TypeRegistry`]: named types plus synthetic array types, with
//!   forward-referenced struct names held as `Undefined` until their body
//!   promotes them.
//!
//! Both tables are arenas with integer handles (`ScopeId`, `TypeId`);
//! identity is "same index", so the handles are cheap to copy through the
//! recursive descent.

pub mod scope;
pub mod types;

pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree, SymbolInfo, SymbolKind};
pub use types::{TypeId, TypeInfo, TypeKind, TypeRegistry};
