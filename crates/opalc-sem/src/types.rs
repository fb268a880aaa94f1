//! The type registry.
//!
//! Named types live in a process-wide registry keyed by interned name;
//! array types get a synthetic registered name `<elem>$<count>` (count 0
//! for open arrays) so the emitter can reference them through the
//! generated headers. A struct name used before its body is parsed is
//! held as `Undefined` and promoted to `Struct` exactly once; a defined
//! struct never mutates.

use opalc_util::symbol::{TY_BOOL, TY_I32, TY_STR, TY_U32, TY_U8, TY_VOID};
use opalc_util::Symbol;
use rustc_hash::FxHashMap;

use crate::scope::SymbolInfo;

/// Handle to a type in the registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Bool,
    U8,
    U32,
    Array,
    Slice,
    Str,
    Struct,
    Enum,
    /// Forward-referenced struct name awaiting its body.
    Undefined,
}

/// One type record.
#[derive(Debug)]
pub struct TypeInfo {
    /// Registered name; `None` only for anonymous types.
    pub name: Option<Symbol>,
    pub kind: TypeKind,
    /// Element type for Array and Slice.
    pub elem: Option<TypeId>,
    /// Field chain for Struct, in declaration order.
    pub fields: Vec<SymbolInfo>,
    /// Element count for Array; 0 for Slice and open arrays.
    pub count: u32,
}

/// Registry of all types seen by a compilation.
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    by_name: FxHashMap<Symbol, TypeId>,

    // Base types, registered at construction.
    pub void: TypeId,
    pub bool_: TypeId,
    pub u8_: TypeId,
    pub u32_: TypeId,
    pub i32_: TypeId,
    pub str_: TypeId,
}

impl TypeRegistry {
    /// Creates a registry with the base types installed.
    ///
    /// `i32` is a named alias with kind `U32`; the distinction only
    /// matters to the C type it mangles to.
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_name: FxHashMap::default(),
            void: TypeId(0),
            bool_: TypeId(0),
            u8_: TypeId(0),
            u32_: TypeId(0),
            i32_: TypeId(0),
            str_: TypeId(0),
        };
        registry.void = registry.make(Some(TY_VOID), TypeKind::Void, None, 0);
        registry.bool_ = registry.make(Some(TY_BOOL), TypeKind::Bool, None, 0);
        registry.u8_ = registry.make(Some(TY_U8), TypeKind::U8, None, 0);
        registry.u32_ = registry.make(Some(TY_U32), TypeKind::U32, None, 0);
        registry.i32_ = registry.make(Some(TY_I32), TypeKind::U32, None, 0);
        registry.str_ = registry.make(Some(TY_STR), TypeKind::Str, None, 0);
        registry
    }

    /// Constructs a type; a named type is linked into the registry.
    pub fn make(
        &mut self,
        name: Option<Symbol>,
        kind: TypeKind,
        elem: Option<TypeId>,
        count: u32,
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeInfo {
            name,
            kind,
            elem,
            fields: Vec::new(),
            count,
        });
        if let Some(name) = name {
            self.by_name.insert(name, id);
        }
        id
    }

    /// Looks a registered type up by name.
    pub fn find(&self, name: Symbol) -> Option<TypeId> {
        self.by_name.get(&name).copied()
    }

    /// Borrow a type record.
    pub fn get(&self, id: TypeId) -> &TypeInfo {
        &self.types[id.index()]
    }

    /// Kind shorthand.
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.types[id.index()].kind
    }

    /// Returns the array (or open-array slice) type of `elem` with the
    /// given count, creating and registering it under its synthetic name
    /// on first use. The bool is true when the type was newly created,
    /// which is the caller's cue to emit its typedef.
    pub fn array(&mut self, elem: TypeId, count: u32) -> (TypeId, bool) {
        let name = Symbol::intern(&format!("{}${}", self.display_name(elem), count));
        if let Some(id) = self.find(name) {
            return (id, false);
        }
        let kind = if count == 0 {
            TypeKind::Slice
        } else {
            TypeKind::Array
        };
        let id = self.make(Some(name), kind, Some(elem), count);
        (id, true)
    }

    /// Promotes an `Undefined` placeholder to a defined struct.
    ///
    /// Returns false when the type is already defined; this is the only
    /// state transition a type ever makes.
    pub fn define_struct(&mut self, id: TypeId, fields: Vec<SymbolInfo>) -> bool {
        let info = &mut self.types[id.index()];
        if info.kind != TypeKind::Undefined {
            return false;
        }
        info.kind = TypeKind::Struct;
        info.fields = fields;
        true
    }

    /// Finds a struct field by name.
    pub fn find_field(&self, id: TypeId, name: Symbol) -> Option<&SymbolInfo> {
        self.types[id.index()]
            .fields
            .iter()
            .find(|f| f.name == name)
    }

    /// Source-level name of a type, composing the synthetic array form
    /// for anonymous array types.
    pub fn display_name(&self, id: TypeId) -> String {
        let info = self.get(id);
        match (info.name, info.elem) {
            (Some(name), _) => name.as_str().to_string(),
            (None, Some(elem)) => format!("{}${}", self.display_name(elem), info.count),
            (None, None) => String::from("void"),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
