//! Interned identifier handles.
//!
//! A [`Symbol`] is a compact (4-byte) handle to a string in the global
//! interner. Interning the same text always yields the same handle, so
//! comparisons are O(1) index equality — the property the rest of the
//! compiler leans on:
//!
//! - the lexer classifies keywords by comparing an identifier's handle to
//!   the pre-interned `KW_*` constants,
//! - the scope table and type registry key their lookups on handles,
//! - the parser recognises the `error(...)` special form by handle.
//!
//! # Examples
//!
//! ```
//! use opalc_util::symbol::{Symbol, KW_WHILE};
//!
//! let a = Symbol::intern("counter");
//! let b = Symbol::intern("counter");
//! assert_eq!(a, b);
//!
//! assert_eq!(Symbol::intern("while"), KW_WHILE);
//! assert_eq!(KW_WHILE.as_str(), "while");
//! ```

mod interner;

pub use interner::STRING_TABLE;

/// Indices below this value are reserved for the pre-interned names below.
pub(crate) const RESERVED_SYMBOLS_END: u32 = 32;

/// An interned string handle.
///
/// Exactly 4 bytes; copyable; valid for the whole process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

// ----------------------------------------------------------------------------
// Pre-interned names. Indices must match the initialisation order in
// `interner.rs`.
// ----------------------------------------------------------------------------

/// The `if` keyword.
pub const KW_IF: Symbol = Symbol { index: 0 };
/// The `fn` keyword.
pub const KW_FN: Symbol = Symbol { index: 1 };
/// The `for` keyword.
pub const KW_FOR: Symbol = Symbol { index: 2 };
/// The `var` keyword.
pub const KW_VAR: Symbol = Symbol { index: 3 };
/// The `nil` keyword.
pub const KW_NIL: Symbol = Symbol { index: 4 };
/// The `new` keyword.
pub const KW_NEW: Symbol = Symbol { index: 5 };
/// The `case` keyword.
pub const KW_CASE: Symbol = Symbol { index: 6 };
/// The `else` keyword.
pub const KW_ELSE: Symbol = Symbol { index: 7 };
/// The `enum` keyword.
pub const KW_ENUM: Symbol = Symbol { index: 8 };
/// The `true` keyword.
pub const KW_TRUE: Symbol = Symbol { index: 9 };
/// The `break` keyword.
pub const KW_BREAK: Symbol = Symbol { index: 10 };
/// The `while` keyword.
pub const KW_WHILE: Symbol = Symbol { index: 11 };
/// The `false` keyword.
pub const KW_FALSE: Symbol = Symbol { index: 12 };
/// The `switch` keyword.
pub const KW_SWITCH: Symbol = Symbol { index: 13 };
/// The `struct` keyword.
pub const KW_STRUCT: Symbol = Symbol { index: 14 };
/// The `return` keyword.
pub const KW_RETURN: Symbol = Symbol { index: 15 };
/// The `continue` keyword.
pub const KW_CONTINUE: Symbol = Symbol { index: 16 };

/// The `void` base type name.
pub const TY_VOID: Symbol = Symbol { index: 17 };
/// The `bool` base type name.
pub const TY_BOOL: Symbol = Symbol { index: 18 };
/// The `u8` base type name.
pub const TY_U8: Symbol = Symbol { index: 19 };
/// The `u32` base type name.
pub const TY_U32: Symbol = Symbol { index: 20 };
/// The `i32` base type name.
pub const TY_I32: Symbol = Symbol { index: 21 };
/// The `str` base type name.
pub const TY_STR: Symbol = Symbol { index: 22 };

/// The `error` callee recognised by the parser.
pub const ID_ERROR: Symbol = Symbol { index: 23 };

impl Symbol {
    /// Intern a string, returning its handle.
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Get the string this handle stands for.
    ///
    /// This is a linear search over the table, so it belongs in output and
    /// diagnostic paths, not in comparisons — compare handles instead.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.get(*self).unwrap_or("")
    }

    /// Raw index value, for debugging and serialisation.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// True for pre-interned names (keywords, base types, `error`).
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.index < RESERVED_SYMBOLS_END
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);
