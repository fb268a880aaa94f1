//! opalc-par - Recursive-descent parser with syntax-directed emission.
//!
//! There is no AST. Every parsing routine is coupled to emission: as the
//! token cursor advances, C text is written into the three sinks (decl,
//! type, impl) and the scope and type tables are consulted and updated
//! statement by statement. The parser owns all of that state, so it is
//! the single mutator of the compilation context.
//!
//! Structure:
//!
//! - this module: the parser value, token priming, `advance`/`expect`/
//!   `accept`, the program loop and the include prelude,
//! - `items`: top-level declarations (`enum`, `struct`, `fn`, `var`),
//! - `stmt`: blocks and statements,
//! - `expr`: the precedence ladder with deferred parenthesisation,
//! - `types`: type positions (`parse_type`).
//!
//! Scopes form a stack automaton: every routine that opens a
//! brace-delimited construct pushes a scope and pops it at the matching
//! close, so after any complete declaration the current scope is the
//! global scope. There is no error recovery; the first diagnostic unwinds
//! the whole parse.

mod expr;
mod items;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

use opalc_gen::{Emitter, Output};
use opalc_lex::{Lexer, Token};
use opalc_sem::{ScopeTree, TypeRegistry};
use opalc_util::{CompileError, CompileResult, Symbol};

/// Compile a whole program: parse `source` and return the three output
/// texts. `out_base` is the base name spliced into the impl file's
/// include prelude.
pub fn compile(source: &[u8], out_base: &str) -> CompileResult<Output> {
    let mut parser = Parser::new(source, out_base);
    parser.parse_program()?;
    Ok(parser.finish())
}

/// The parser, holding the whole compilation context.
pub struct Parser<'a> {
    pub(crate) lex: Lexer<'a>,
    /// Most recent token.
    pub(crate) tok: Token,
    pub(crate) scopes: ScopeTree,
    pub(crate) types: TypeRegistry,
    pub(crate) emit: Emitter,
    out_base: String,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`.
    pub fn new(source: &'a [u8], out_base: &str) -> Self {
        Self {
            lex: Lexer::new(source),
            tok: Token::EOF,
            scopes: ScopeTree::new(),
            types: TypeRegistry::new(),
            emit: Emitter::new(),
            out_base: out_base.to_string(),
        }
    }

    /// Parses the whole program, emitting as it goes.
    pub fn parse_program(&mut self) -> CompileResult<()> {
        self.emit_prelude();
        self.advance()?;
        loop {
            match self.tok {
                Token::EOF => break,
                Token::ENUM => self.parse_enum()?,
                Token::STRUCT => self.parse_struct()?,
                Token::FN => self.parse_function()?,
                Token::VAR => self.parse_var()?,
                t => {
                    return Err(self.fatal(format!(
                        "expected a top-level declaration, found '{}'",
                        t.spelling()
                    )))
                }
            }
        }
        self.emit.code("\n#include <library.impl.c>\n");
        Ok(())
    }

    /// Finalises the emitter, yielding the three output texts.
    pub fn finish(self) -> Output {
        self.emit.finish()
    }

    /// The impl file opens with the builtin types, the program's own
    /// headers, and the runtime prototypes; the runtime definitions are
    /// appended at end of input by `parse_program`.
    fn emit_prelude(&mut self) {
        self.emit.code("#include <builtin.type.h>\n");
        self.emit.code(&format!("#include \"{}.type.h\"\n", self.out_base));
        self.emit.code(&format!("#include \"{}.decl.h\"\n", self.out_base));
        self.emit.code("#include <library.impl.h>\n");
    }

    /// Reads the next token into `self.tok`.
    pub(crate) fn advance(&mut self) -> CompileResult<()> {
        self.tok = self.lex.next()?;
        Ok(())
    }

    /// Builds a fatal diagnostic at the current line.
    pub(crate) fn fatal(&self, message: impl Into<String>) -> CompileError {
        CompileError::fatal(self.lex.line(), message)
    }

    /// Consumes `tok` or fails.
    pub(crate) fn expect(&mut self, tok: Token) -> CompileResult<()> {
        if self.tok != tok {
            return Err(self.fatal(format!(
                "expected '{}', found '{}'",
                tok.spelling(),
                self.tok.spelling()
            )));
        }
        self.advance()
    }

    /// Consumes `tok` if it is current.
    pub(crate) fn accept(&mut self, tok: Token) -> CompileResult<bool> {
        if self.tok == tok {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes an identifier, returning its handle.
    pub(crate) fn expect_ident(&mut self) -> CompileResult<Symbol> {
        if self.tok != Token::IDENT {
            return Err(self.fatal(format!(
                "expected identifier, found '{}'",
                self.tok.spelling()
            )));
        }
        let name = self.lex.ident;
        self.advance()?;
        Ok(name)
    }
}
