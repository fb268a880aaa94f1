//! Lexical scopes and symbol chains.

use indexmap::IndexMap;
use opalc_util::Symbol;

use crate::types::TypeId;

/// Handle to a scope in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of construct a scope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
    Loop,
    Struct,
}

/// Classification of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Variable or parameter.
    Var,
    /// Struct field.
    Field,
    /// Struct pointer field (`*Type`).
    PtrField,
    /// Enum tag.
    EnumValue,
    /// Function name.
    Function,
}

/// One symbol: name, type, classification.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub name: Symbol,
    pub ty: TypeId,
    pub kind: SymbolKind,
}

/// A single scope node.
#[derive(Debug)]
pub struct Scope {
    /// Symbols in insertion order; order is significant for struct fields
    /// and parameter emission.
    symbols: IndexMap<Symbol, SymbolInfo>,
    parent: Option<ScopeId>,
    pub kind: ScopeKind,
}

/// The scope stack.
///
/// Scopes live in an arena; `push`/`pop` move a cursor rather than
/// deallocate, and `pop` hands back the popped scope's symbol chain in
/// declaration order (the struct parser harvests it as the field list).
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeTree {
    /// Creates a tree containing only the global scope.
    pub fn new() -> Self {
        let scopes = vec![Scope {
            symbols: IndexMap::new(),
            parent: None,
            kind: ScopeKind::Global,
        }];
        Self {
            scopes,
            current: ScopeId(0),
        }
    }

    /// The current scope.
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Kind of the current scope.
    pub fn current_kind(&self) -> ScopeKind {
        self.scopes[self.current.index()].kind
    }

    /// Enters a new scope under the current one.
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            symbols: IndexMap::new(),
            parent: Some(self.current),
            kind,
        });
        self.current = id;
        id
    }

    /// Leaves the current scope, reinstating its parent.
    ///
    /// Returns the popped scope's symbols in insertion order. Push and pop
    /// are statically paired by the parser's recursion, so popping the
    /// global scope does not occur; if it ever did, the tree stays put and
    /// returns an empty chain.
    pub fn pop(&mut self) -> Vec<SymbolInfo> {
        let idx = self.current.index();
        match self.scopes[idx].parent {
            Some(parent) => {
                self.current = parent;
                std::mem::take(&mut self.scopes[idx].symbols)
                    .into_values()
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// Appends a symbol to the current scope's chain.
    pub fn insert(&mut self, name: Symbol, ty: TypeId, kind: SymbolKind) {
        self.scopes[self.current.index()]
            .symbols
            .insert(name, SymbolInfo { name, ty, kind });
    }

    /// Appends a symbol to the global scope's chain (function names and
    /// enum tags land there regardless of the current scope).
    pub fn insert_global(&mut self, name: Symbol, ty: TypeId, kind: SymbolKind) {
        self.scopes[0]
            .symbols
            .insert(name, SymbolInfo { name, ty, kind });
    }

    /// Looks a name up from the current scope outward.
    pub fn find(&self, name: Symbol) -> Option<&SymbolInfo> {
        let mut id = self.current;
        loop {
            let scope = &self.scopes[id.index()];
            if let Some(sym) = scope.symbols.get(&name) {
                return Some(sym);
            }
            id = scope.parent?;
        }
    }

    /// Looks a name up in the current scope only (duplicate checks).
    pub fn find_in_current(&self, name: Symbol) -> Option<&SymbolInfo> {
        self.scopes[self.current.index()].symbols.get(&name)
    }

    /// Finds the nearest enclosing scope of the given kind, if any.
    ///
    /// `break` and `continue` use this to require a `Loop` frame.
    pub fn find_kind(&self, kind: ScopeKind) -> Option<ScopeId> {
        let mut id = self.current;
        loop {
            let scope = &self.scopes[id.index()];
            if scope.kind == kind {
                return Some(id);
            }
            id = scope.parent?;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
