//! String and character literal lexing.
//!
//! Both share the escape set `\n \r \t \" \' \\ \xHH`. A char literal
//! yields a NUM token carrying the byte value; a string literal yields
//! STR with its body (escapes applied) in `self.text`, capped at 254
//! bytes.

use opalc_util::CompileResult;

use super::number::hex_digit;
use crate::token::Token;
use crate::Lexer;

/// Maximum string literal body length in bytes.
const MAX_STRING_LEN: usize = 254;

impl<'a> Lexer<'a> {
    /// Lexes a string literal; the body lands in `self.text`.
    pub(crate) fn lex_string(&mut self) -> CompileResult<Token> {
        self.cursor.bump();
        self.text.clear();

        loop {
            match self.cursor.peek() {
                0 | b'\n' => return Err(self.fatal("unterminated string literal")),
                b'"' => {
                    self.cursor.bump();
                    break;
                }
                b'\\' => {
                    self.cursor.bump();
                    let b = self.lex_escape()?;
                    self.text.push(b);
                }
                _ => {
                    let b = self.cursor.bump();
                    self.text.push(b);
                }
            }
            if self.text.len() > MAX_STRING_LEN {
                return Err(self.fatal("string literal too long"));
            }
        }

        Ok(Token::STR)
    }

    /// Lexes a character literal; yields NUM with the byte value.
    pub(crate) fn lex_char(&mut self) -> CompileResult<Token> {
        self.cursor.bump();

        let value = match self.cursor.peek() {
            0 | b'\n' => return Err(self.fatal("unterminated character literal")),
            b'\'' => return Err(self.fatal("empty character literal")),
            b'\\' => {
                self.cursor.bump();
                self.lex_escape()?
            }
            _ => self.cursor.bump(),
        };

        if !self.cursor.match_byte(b'\'') {
            return Err(self.fatal("unterminated character literal"));
        }

        self.num = value as u32;
        Ok(Token::NUM)
    }

    /// Lexes one escape sequence; the backslash is already consumed.
    fn lex_escape(&mut self) -> CompileResult<u8> {
        let b = match self.cursor.bump() {
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'"' => b'"',
            b'\'' => b'\'',
            b'\\' => b'\\',
            b'x' => {
                let hi = hex_digit(self.cursor.peek())
                    .ok_or_else(|| self.fatal("invalid escape sequence"))?;
                self.cursor.bump();
                let lo = hex_digit(self.cursor.peek())
                    .ok_or_else(|| self.fatal("invalid escape sequence"))?;
                self.cursor.bump();
                ((hi << 4) | lo) as u8
            }
            _ => return Err(self.fatal("invalid escape sequence")),
        };
        Ok(b)
    }
}
