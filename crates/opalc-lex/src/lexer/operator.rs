//! Operator and punctuation lexing.
//!
//! The classification table supplies the base token for the first byte;
//! one-byte lookahead upgrades it to the two-character operators
//! (`== != <= >= && || ++ -- << >>`) and, for the additive and
//! multiplicative classes, to the compound-assign form when the operator
//! is immediately followed by `=`.

use opalc_util::CompileResult;

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an operator whose first byte classified as `base`.
    pub(crate) fn lex_operator(&mut self, base: Token) -> CompileResult<Token> {
        self.cursor.bump();

        let tok = match base {
            Token::ASSIGN => {
                if self.cursor.match_byte(b'=') {
                    Token::EQEQ
                } else {
                    Token::ASSIGN
                }
            }
            Token::BANG => {
                if self.cursor.match_byte(b'=') {
                    Token::NE
                } else {
                    Token::BANG
                }
            }
            Token::LT => {
                if self.cursor.match_byte(b'=') {
                    Token::LE
                } else if self.cursor.match_byte(b'<') {
                    self.maybe_assign(Token::SHL)
                } else {
                    Token::LT
                }
            }
            Token::GT => {
                if self.cursor.match_byte(b'=') {
                    Token::GE
                } else if self.cursor.match_byte(b'>') {
                    self.maybe_assign(Token::SHR)
                } else {
                    Token::GT
                }
            }
            Token::AMP => {
                if self.cursor.match_byte(b'&') {
                    Token::ANDAND
                } else {
                    self.maybe_assign(Token::AMP)
                }
            }
            Token::PIPE => {
                if self.cursor.match_byte(b'|') {
                    Token::OROR
                } else {
                    self.maybe_assign(Token::PIPE)
                }
            }
            Token::PLUS => {
                if self.cursor.match_byte(b'+') {
                    Token::INC
                } else {
                    self.maybe_assign(Token::PLUS)
                }
            }
            Token::MINUS => {
                if self.cursor.match_byte(b'-') {
                    Token::DEC
                } else {
                    self.maybe_assign(Token::MINUS)
                }
            }
            Token::STAR | Token::SLASH | Token::PERCENT | Token::CARET => self.maybe_assign(base),
            // Single-byte punctuation: braces, brackets, parens, ; : . , ~
            other => other,
        };

        Ok(tok)
    }

    /// Upgrades `base` to its compound-assign form on a trailing `=`.
    fn maybe_assign(&mut self, base: Token) -> Token {
        if self.cursor.match_byte(b'=') {
            base.to_assign()
        } else {
            base
        }
    }
}
