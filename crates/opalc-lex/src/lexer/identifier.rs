//! Identifier and keyword lexing.
//!
//! An identifier is `[A-Za-z_][A-Za-z_0-9]*` with a 31-byte limit. After
//! interning, the handle is compared against the pre-interned keyword
//! handles; identity decides whether the token is a keyword or IDENT.

use opalc_util::symbol::{
    Symbol, KW_BREAK, KW_CASE, KW_CONTINUE, KW_ELSE, KW_ENUM, KW_FALSE, KW_FN, KW_FOR, KW_IF,
    KW_NEW, KW_NIL, KW_RETURN, KW_STRUCT, KW_SWITCH, KW_TRUE, KW_VAR, KW_WHILE,
};
use opalc_util::CompileResult;

use crate::token::Token;
use crate::Lexer;

/// Maximum identifier length in bytes.
const MAX_IDENT_LEN: usize = 31;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    pub(crate) fn lex_identifier(&mut self) -> CompileResult<Token> {
        let mut name = String::new();
        while is_ident_continue(self.cursor.peek()) {
            if name.len() == MAX_IDENT_LEN {
                return Err(self.fatal("identifier too long"));
            }
            name.push(self.cursor.bump() as char);
        }

        self.ident = Symbol::intern(&name);
        Ok(keyword_token(self.ident).unwrap_or(Token::IDENT))
    }
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Keyword classification by handle identity.
fn keyword_token(sym: Symbol) -> Option<Token> {
    let tok = if sym == KW_IF {
        Token::IF
    } else if sym == KW_FN {
        Token::FN
    } else if sym == KW_FOR {
        Token::FOR
    } else if sym == KW_VAR {
        Token::VAR
    } else if sym == KW_NIL {
        Token::NIL
    } else if sym == KW_NEW {
        Token::NEW
    } else if sym == KW_CASE {
        Token::CASE
    } else if sym == KW_ELSE {
        Token::ELSE
    } else if sym == KW_ENUM {
        Token::ENUM
    } else if sym == KW_TRUE {
        Token::TRUE
    } else if sym == KW_BREAK {
        Token::BREAK
    } else if sym == KW_WHILE {
        Token::WHILE
    } else if sym == KW_FALSE {
        Token::FALSE
    } else if sym == KW_SWITCH {
        Token::SWITCH
    } else if sym == KW_STRUCT {
        Token::STRUCT
    } else if sym == KW_RETURN {
        Token::RETURN
    } else if sym == KW_CONTINUE {
        Token::CONTINUE
    } else {
        return None;
    };
    Some(tok)
}
