//! opalc-gen - C text emission for the Opal compiler.
//!
//! The compiler writes three output sinks as the parse proceeds:
//!
//! - **decl**: function prototypes and struct field layouts,
//! - **type**: typedefs for named structs, enums and array types,
//! - **impl**: function bodies and statements.
//!
//! The decl and type sinks are plain text accumulators. The impl sink is
//! line-buffered with two pieces of machinery the parser relies on:
//!
//! - **Brace-driven indentation**: when a line completes, its `}` count
//!   dedents (clamped at zero) before printing and its `{` count indents
//!   after. The counting is textual, which is only sound because the
//!   parser controls every byte that reaches the sink (string literals are
//!   escaped before they get here).
//! - **Deferred parenthesisation**: each binary precedence level opens a
//!   `(` eagerly and closes its group when done; if no operator was
//!   emitted inside the group, the `(` is deleted in place and no `)` is
//!   written, so atoms never end up wrapped.
//!
//! Everything accumulates in memory; the driver writes files only after a
//! successful parse, so an error can never leave half-written output
//! behind.

mod sink;

pub mod mangle;


use sink::ImplSink;

pub use sink::Group;

/// The three accumulated output texts.
#[derive(Debug)]
pub struct Output {
    /// Contents of the `.decl.h` file.
    pub decl: String,
    /// Contents of the `.type.h` file.
    pub types: String,
    /// Contents of the `.impl.c` file.
    pub imp: String,
}

/// The compiler's output surface: three sinks, written as parsing
/// proceeds.
pub struct Emitter {
    decl_buf: String,
    type_buf: String,
    imp: ImplSink,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            decl_buf: String::new(),
            type_buf: String::new(),
            imp: ImplSink::new(),
        }
    }

    /// Appends text to the decl sink.
    pub fn decl(&mut self, s: &str) {
        self.decl_buf.push_str(s);
    }

    /// Appends text to the type sink.
    pub fn typedef(&mut self, s: &str) {
        self.type_buf.push_str(s);
    }

    /// Writes text into the impl sink's line buffer; newlines complete
    /// lines and run the indentation machinery.
    pub fn code(&mut self, s: &str) {
        self.imp.write(s);
    }

    /// Writes operator text and marks the innermost open group as needing
    /// its parentheses.
    pub fn op(&mut self, s: &str) {
        self.imp.op(s);
    }

    /// Opens a deferred-parenthesisation group; pass the returned value to
    /// [`close_group`](Self::close_group).
    pub fn open_group(&mut self) -> Group {
        self.imp.open_group()
    }

    /// Closes a group, keeping or eliding its parentheses.
    pub fn close_group(&mut self, group: Group) {
        self.imp.close_group(group);
    }

    /// Emits a numeric literal in the impl sink's hex style.
    pub fn number(&mut self, value: u32) {
        self.imp.write(&format!("0x{:x}", value));
    }

    /// Emits a string literal as a `void*`-cast C string with `\xHH`
    /// escapes outside the printable range.
    pub fn string_literal(&mut self, bytes: &[u8]) {
        self.imp.string_literal(bytes);
    }

    /// Finalises the three sinks.
    pub fn finish(self) -> Output {
        Output {
            decl: self.decl_buf,
            types: self.type_buf,
            imp: self.imp.finish(),
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
