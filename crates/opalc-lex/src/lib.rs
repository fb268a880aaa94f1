//! opalc-lex - Lexical analysis for the Opal language.
//!
//! The lexer turns a byte stream into a stream of [`Token`] codes. Three
//! design points carry over from the language's bootstrap heritage and are
//! contractual for the rest of the compiler:
//!
//! - **Aligned token classes.** Tokens are small integers grouped in
//!   aligned blocks of eight, so a token's class (relational, additive,
//!   multiplicative, compound-assign) is recoverable by masking with
//!   `0xF8`, and every compound-assign operator is its base operator plus
//!   a fixed offset. See [`token`].
//! - **Table-driven dispatch.** A 256-entry classification table assigns
//!   every byte a start class; the per-class lexing routines live in the
//!   lexer submodules (identifier, number, string, operator, comment).
//! - **Ancillary token data on the lexer.** A token is just a code; the
//!   value of a number, the raw body of a string and the interned handle
//!   of an identifier are stored on the [`Lexer`] (`num`, `text`,
//!   `ident`) for the parser to read after each `next()`.
//!
//! End-of-line is normally transparent; `set_visible_eol(true)` delivers
//! it as a real token, which the driver's scan mode uses to reproduce the
//! source line structure.
//!
//! # Example
//!
//! ```
//! use opalc_lex::{Lexer, Token};
//!
//! let mut lexer = Lexer::new(b"var x u32 = 42;");
//! assert_eq!(lexer.next().unwrap(), Token::VAR);
//! assert_eq!(lexer.next().unwrap(), Token::IDENT);
//! assert_eq!(lexer.ident.as_str(), "x");
//! ```

pub mod cursor;
pub mod token;

mod lexer;

pub use lexer::Lexer;
pub use token::Token;
