//! String interner backing the [`Symbol`] handle type.
//!
//! The interner is a process-global table: every distinct byte sequence is
//! stored exactly once, and a [`Symbol`] is an index into that table. Two
//! occurrences of the same text therefore always produce the same handle,
//! which is what makes handle equality a valid identity test for the
//! lexer's keyword classifier and the parser's name lookups.
//!
//! # Memory model
//!
//! Interned strings are leaked (`Box::leak`) to obtain `'static`
//! references. The table lives for the whole compilation and entries are
//! never removed, so no lifetime tracking is needed.
//!
//! # Concurrency
//!
//! The table uses DashMap keyed by an `ahash` of the string, so interning
//! is lock-free and `Symbol` is `Send + Sync`. The compiler itself runs
//! single-threaded; the table only has to guarantee that the reserved
//! keyword handles are initialised exactly once, which `LazyLock` provides.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::{Symbol, RESERVED_SYMBOLS_END};

/// Global string table.
///
/// All known keywords, base type names and the `error` callee are
/// pre-interned during initialisation so their indices match the `KW_*`,
/// `TY_*` and `ID_*` constants in the parent module.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Interner storage: hash → (string, symbol index).
///
/// Keying by the 64-bit hash avoids string comparison in the common case;
/// genuine collisions fall back to linear probing with a prime offset.
pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,

    /// Next free index. Starts past the reserved range so dynamically
    /// interned names never collide with the pre-defined handles.
    next_index: AtomicU32,
}

const MAX_PROBES: u64 = 32;
const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
        }
    }

    /// Pre-intern the language's fixed names.
    ///
    /// The order of this list defines the reserved indices; it must match
    /// the constants in `symbol/mod.rs`.
    fn initialize_known_symbols(&self) {
        let known_symbols = [
            // Keywords
            "if", "fn", "for", "var", "nil", "new", "case", "else", "enum",
            "true", "break", "while", "false", "switch", "struct", "return",
            "continue",
            // Base type names
            "void", "bool", "u8", "u32", "i32", "str",
            // Special callee recognised by the parser
            "error",
        ];

        for (idx, name) in known_symbols.iter().enumerate() {
            debug_assert!((idx as u32) < RESERVED_SYMBOLS_END);
            self.insert_at(name, idx as u32);
        }
    }

    /// Insert `string` with a fixed index, probing past hash collisions.
    fn insert_at(&self, string: &str, index: u32) {
        let mut hash = Self::hash_string(string);
        for _ in 0..MAX_PROBES {
            if self.map.get(&hash).is_none() {
                break;
            }
            hash = hash.wrapping_add(PROBE_PRIME);
        }
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        self.map.insert(hash, (interned, index));
    }

    /// Intern a string, returning its symbol.
    ///
    /// If the string is already present the existing handle is returned;
    /// otherwise a new slot is allocated. Either way, interning the same
    /// text twice yields the same `Symbol`.
    pub fn intern(&self, string: &str) -> Symbol {
        let mut hash = Self::hash_string(string);

        for _ in 0..MAX_PROBES {
            if let Some(entry) = self.map.get(&hash) {
                if entry.value().0 == string {
                    return Symbol {
                        index: entry.value().1,
                    };
                }
                // Occupied by a different string: probe the next slot.
                hash = hash.wrapping_add(PROBE_PRIME);
                continue;
            }

            return match self.map.entry(hash) {
                dashmap::mapref::entry::Entry::Occupied(entry) => {
                    // Raced with another insertion at this slot.
                    if entry.get().0 == string {
                        Symbol {
                            index: entry.get().1,
                        }
                    } else {
                        self.intern(string)
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                    let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                    entry.insert((interned, idx));
                    Symbol { index: idx }
                }
            };
        }

        // Probe chain exhausted (32 colliding 64-bit hashes). Fall back to
        // the head slot and accept the overwrite.
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(Self::hash_string(string), (interned, idx));
        Symbol { index: idx }
    }

    /// Get the string for a symbol.
    ///
    /// Linear search by index. The compiler only does this when formatting
    /// output or diagnostics, so the O(n) cost is acceptable.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
    }

    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }
}
