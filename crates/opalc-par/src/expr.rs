//! Expressions: the precedence ladder, postfix chains, calls.
//!
//! Precedence, lowest to highest: `||`, `&&`, relational, additive,
//! multiplicative, unary, primary. Every binary level opens a
//! deferred-parenthesisation group before its first operand; if the level
//! emits no operator, the group's `(` is elided in place, so atoms come
//! out bare and compound expressions come out fully parenthesised.
//!
//! Expressions carry just enough static type information for emission:
//! field lookup needs the struct type, indexing needs the element type,
//! and the `error(...)` form selects its writer by `str`-ness.

use opalc_gen::mangle;
use opalc_lex::Token;
use opalc_sem::{SymbolKind, TypeId, TypeKind};
use opalc_util::symbol::ID_ERROR;
use opalc_util::{CompileResult, Symbol};

use crate::Parser;

impl<'a> Parser<'a> {
    /// Expression entry point: the logical-or level.
    pub(crate) fn parse_expr(&mut self) -> CompileResult<TypeId> {
        let group = self.emit.open_group();
        let mut ty = self.parse_and_expr()?;
        while self.tok == Token::OROR {
            self.advance()?;
            self.emit.op(" || ");
            self.parse_and_expr()?;
            ty = self.types.bool_;
        }
        self.emit.close_group(group);
        Ok(ty)
    }

    fn parse_and_expr(&mut self) -> CompileResult<TypeId> {
        let group = self.emit.open_group();
        let mut ty = self.parse_rel_expr()?;
        while self.tok == Token::ANDAND {
            self.advance()?;
            self.emit.op(" && ");
            self.parse_rel_expr()?;
            ty = self.types.bool_;
        }
        self.emit.close_group(group);
        Ok(ty)
    }

    fn parse_rel_expr(&mut self) -> CompileResult<TypeId> {
        let group = self.emit.open_group();
        let mut ty = self.parse_add_expr()?;
        while self.tok.is_relop() {
            let op = self.tok;
            self.advance()?;
            self.emit.op(&format!(" {} ", op.spelling()));
            self.parse_add_expr()?;
            ty = self.types.bool_;
        }
        self.emit.close_group(group);
        Ok(ty)
    }

    fn parse_add_expr(&mut self) -> CompileResult<TypeId> {
        let group = self.emit.open_group();
        let ty = self.parse_mul_expr()?;
        while self.tok.is_addop() {
            let op = self.tok;
            self.advance()?;
            self.emit.op(&format!(" {} ", op.spelling()));
            self.parse_mul_expr()?;
        }
        self.emit.close_group(group);
        Ok(ty)
    }

    fn parse_mul_expr(&mut self) -> CompileResult<TypeId> {
        let group = self.emit.open_group();
        let ty = self.parse_unary()?;
        while self.tok.is_mulop() {
            let op = self.tok;
            self.advance()?;
            self.emit.op(&format!(" {} ", op.spelling()));
            self.parse_unary()?;
        }
        self.emit.close_group(group);
        Ok(ty)
    }

    /// Unary `+ - ! ~`; a leading `&` is rejected.
    fn parse_unary(&mut self) -> CompileResult<TypeId> {
        match self.tok {
            Token::PLUS => {
                self.advance()?;
                self.emit.op("+");
                self.parse_unary()
            }
            Token::MINUS => {
                self.advance()?;
                self.emit.op("-");
                self.parse_unary()
            }
            Token::BANG => {
                self.advance()?;
                self.emit.op("!");
                self.parse_unary()?;
                Ok(self.types.bool_)
            }
            Token::NOT => {
                self.advance()?;
                self.emit.op("~");
                self.parse_unary()
            }
            Token::AMP => Err(self.fatal("unary '&' is not supported")),
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> CompileResult<TypeId> {
        match self.tok {
            Token::NUM => {
                self.emit.number(self.lex.num);
                self.advance()?;
                Ok(self.types.u32_)
            }
            Token::STR => {
                self.emit.string_literal(&self.lex.text);
                self.advance()?;
                Ok(self.types.str_)
            }
            Token::TRUE => {
                self.emit.code("1");
                self.advance()?;
                Ok(self.types.bool_)
            }
            Token::FALSE => {
                self.emit.code("0");
                self.advance()?;
                Ok(self.types.bool_)
            }
            Token::NIL => {
                self.emit.code("0");
                self.advance()?;
                Ok(self.types.void)
            }
            Token::OPAREN => {
                self.advance()?;
                let ty = self.parse_expr()?;
                self.expect(Token::CPAREN)?;
                Ok(ty)
            }
            Token::NEW => {
                self.advance()?;
                self.expect(Token::OPAREN)?;
                let name = self.expect_ident()?;
                let ty = self
                    .types
                    .find(name)
                    .ok_or_else(|| self.fatal(format!("undefined type '{}'", name)))?;
                self.expect(Token::CPAREN)?;
                self.emit.code(&format!(
                    "calloc(1, sizeof({}))",
                    mangle::type_name(&self.types.display_name(ty))
                ));
                Ok(ty)
            }
            Token::IDENT => self.parse_ident_expr(),
            t => Err(self.fatal(format!("unexpected token '{}' in expression", t.spelling()))),
        }
    }

    /// Identifier: a call when followed by `(`, otherwise a variable
    /// reference with optional `.field` / `[index]` postfixes.
    fn parse_ident_expr(&mut self) -> CompileResult<TypeId> {
        let name = self.lex.ident;
        self.advance()?;

        if self.tok == Token::OPAREN {
            return self.parse_call(name);
        }

        let (text, mut ty) = {
            let sym = self
                .scopes
                .find(name)
                .ok_or_else(|| self.fatal(format!("undefined identifier '{}'", name)))?;
            match sym.kind {
                SymbolKind::EnumValue => (mangle::const_name(name.as_str()), self.types.u32_),
                SymbolKind::Function => (mangle::fn_name(name.as_str()), sym.ty),
                _ => (mangle::var_name(name.as_str()), sym.ty),
            }
        };
        self.emit.code(&text);

        loop {
            match self.tok {
                // Source `.` always reads through the C struct pointer.
                Token::DOT => {
                    self.advance()?;
                    let fname = self.expect_ident()?;
                    if self.types.kind(ty) != TypeKind::Struct {
                        return Err(self.fatal("not a struct"));
                    }
                    let fty = match self.types.find_field(ty, fname) {
                        Some(field) => field.ty,
                        None => {
                            return Err(
                                self.fatal(format!("struct has no such field '{}'", fname))
                            )
                        }
                    };
                    self.emit.code(&format!("->{}", fname));
                    ty = fty;
                }
                Token::OBRACK => {
                    self.advance()?;
                    self.emit.code("[");
                    self.parse_expr()?;
                    self.expect(Token::CBRACK)?;
                    self.emit.code("]");
                    ty = match self.types.kind(ty) {
                        TypeKind::Array | TypeKind::Slice => {
                            self.types.get(ty).elem.unwrap_or(self.types.u8_)
                        }
                        TypeKind::Str => self.types.u8_,
                        _ => return Err(self.fatal("cannot index this type")),
                    };
                }
                _ => return Ok(ty),
            }
        }
    }

    /// `name(arg, …)` — arguments emit left to right. An undefined callee
    /// is allowed (functions may be called before their definition).
    fn parse_call(&mut self, name: Symbol) -> CompileResult<TypeId> {
        if name == ID_ERROR {
            return self.parse_error_call();
        }

        let ret = match self.scopes.find(name) {
            Some(sym) => sym.ty,
            None => self.types.void,
        };

        self.emit.code(&mangle::fn_name(name.as_str()));
        self.emit.code("(");
        self.advance()?;
        let mut first = true;
        while self.tok != Token::CPAREN {
            if !first {
                self.emit.code(", ");
            }
            first = false;
            self.parse_expr()?;
            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CPAREN)?;
        self.emit.code(")");
        Ok(ret)
    }

    /// The `error(...)` special form.
    ///
    /// Lowers to a statement-expression that brackets the writes with
    /// `fn_error_begin()` / `fn_error_end()` on fd 2. String literals and
    /// identifiers whose static type is `str` go through `fn_writes`;
    /// everything else through `fn_writex`.
    fn parse_error_call(&mut self) -> CompileResult<TypeId> {
        self.advance()?;
        self.emit.code("({ fn_error_begin();");
        while self.tok != Token::CPAREN {
            match self.tok {
                Token::EOF => return Err(self.fatal("unexpected end of input")),
                Token::STR => {
                    self.emit.code(" fn_writes(2, ");
                    self.emit.string_literal(&self.lex.text);
                    self.emit.code(");");
                    self.advance()?;
                }
                Token::NUM => {
                    self.emit.code(" fn_writex(2, ");
                    self.emit.number(self.lex.num);
                    self.emit.code(");");
                    self.advance()?;
                }
                _ => {
                    let leading_str = self.tok == Token::IDENT
                        && matches!(
                            self.scopes.find(self.lex.ident),
                            Some(sym) if self.types.kind(sym.ty) == TypeKind::Str
                        );
                    if leading_str {
                        self.emit.code(" fn_writes(2, ");
                    } else {
                        self.emit.code(" fn_writex(2, ");
                    }
                    self.parse_expr()?;
                    self.emit.code(");");
                }
            }
            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CPAREN)?;
        self.emit.code(" fn_error_end(); })");
        Ok(self.types.void)
    }
}
