//! Core lexer: state, dispatch loop, error positioning.

use opalc_util::{CompileError, CompileResult, Symbol};

use super::classify::BYTE_CLASS;
use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for Opal source.
///
/// `next()` returns the next token code; the token's payload, when it has
/// one, is left on the lexer for the parser to read:
///
/// - [`num`](Self::num) for NUM tokens (numeric and char literals),
/// - [`text`](Self::text) for STR tokens (raw body, escapes applied),
/// - [`ident`](Self::ident) for IDENT tokens (interned handle).
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,

    /// Value of the most recent NUM token.
    pub num: u32,

    /// Body of the most recent STR token, escapes already applied.
    pub text: Vec<u8>,

    /// Interned handle of the most recent IDENT token.
    pub ident: Symbol,

    /// Deliver end-of-line as a real token instead of skipping it.
    visible_eol: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given source bytes.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(source),
            num: 0,
            text: Vec::new(),
            ident: Symbol::intern(""),
            visible_eol: false,
        }
    }

    /// Controls end-of-line delivery (scan mode turns this on).
    pub fn set_visible_eol(&mut self, visible: bool) {
        self.visible_eol = visible;
    }

    /// Line number of the current position (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the next token.
    ///
    /// Whitespace and `//` comments are consumed transparently; newlines
    /// are transparent unless `set_visible_eol(true)` was called. Bytes
    /// classified INV or MSC at token start are fatal.
    pub fn next(&mut self) -> CompileResult<Token> {
        loop {
            let b = self.cursor.peek();
            match BYTE_CLASS[b as usize] {
                Token::EOF => return Ok(Token::EOF),
                Token::SPC => {
                    self.cursor.bump();
                }
                Token::EOL => {
                    self.cursor.bump();
                    if self.visible_eol {
                        return Ok(Token::EOL);
                    }
                }
                Token::IDENT => return self.lex_identifier(),
                Token::NUM => return self.lex_number(),
                Token::DQT => return self.lex_string(),
                Token::SQT => return self.lex_char(),
                Token::INV | Token::MSC => {
                    return Err(self.fatal(format!("invalid character 0x{:02x}", b)));
                }
                Token::SLASH if self.cursor.peek_at(1) == b'/' => {
                    self.skip_line_comment();
                }
                base => return self.lex_operator(base),
            }
        }
    }

    /// Builds a fatal diagnostic at the current line.
    pub(crate) fn fatal(&self, message: impl Into<String>) -> CompileError {
        CompileError::fatal(self.cursor.line(), message)
    }
}
