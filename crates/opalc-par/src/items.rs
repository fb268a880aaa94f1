//! Top-level declarations: enum, struct, fn, var.

use opalc_gen::mangle;
use opalc_lex::Token;
use opalc_sem::{ScopeKind, SymbolKind, TypeId, TypeKind};
use opalc_util::{CompileResult, Symbol};

use crate::Parser;

impl<'a> Parser<'a> {
    /// `enum [Name] { tag [= expr], … };`
    ///
    /// Tags enter the global scope as EnumValue symbols typed u32 and emit
    /// `#define c$TAG …` lines. Auto-numbering starts at 0; an explicit
    /// `tag = expr` emits the expression and does not advance the counter.
    pub(crate) fn parse_enum(&mut self) -> CompileResult<()> {
        self.advance()?;

        if self.tok == Token::IDENT {
            let name = self.lex.ident;
            self.advance()?;
            if self.types.find(name).is_some() {
                return Err(self.fatal(format!("type '{}' already defined", name)));
            }
            self.types.make(Some(name), TypeKind::Enum, None, 0);
            self.emit.typedef(&format!(
                "typedef t$u32 {};\n",
                mangle::type_name(name.as_str())
            ));
        }

        self.expect(Token::OBRACE)?;
        let mut next_value: u32 = 0;
        while self.tok != Token::CBRACE {
            let tag = self.expect_ident()?;
            if self.scopes.find_in_current(tag).is_some() {
                return Err(self.fatal(format!("enum tag '{}' already defined", tag)));
            }
            self.scopes.insert_global(tag, self.types.u32_, SymbolKind::EnumValue);

            if self.accept(Token::ASSIGN)? {
                let text = self.enum_value_text()?;
                self.emit
                    .code(&format!("#define {} {}\n", mangle::const_name(tag.as_str()), text));
            } else {
                self.emit.code(&format!(
                    "#define {} 0x{:x}\n",
                    mangle::const_name(tag.as_str()),
                    next_value
                ));
                next_value += 1;
            }

            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CBRACE)?;
        self.expect(Token::SEMI)?;
        Ok(())
    }

    /// Re-emits an explicit enum tag value from its tokens, verbatim:
    /// numbers in decimal, enum tags and variables mangled, operators by
    /// spelling.
    fn enum_value_text(&mut self) -> CompileResult<String> {
        let mut parts: Vec<String> = Vec::new();
        while self.tok != Token::COMMA && self.tok != Token::CBRACE {
            let part = match self.tok {
                Token::EOF => {
                    return Err(self.fatal("unexpected end of input in enum value"))
                }
                Token::NUM => self.lex.num.to_string(),
                Token::IDENT => {
                    let name = self.lex.ident;
                    match self.scopes.find(name) {
                        Some(sym) if sym.kind == SymbolKind::EnumValue => {
                            mangle::const_name(name.as_str())
                        }
                        Some(_) => mangle::var_name(name.as_str()),
                        None => {
                            return Err(self.fatal(format!("undefined identifier '{}'", name)))
                        }
                    }
                }
                Token::STR => return Err(self.fatal("expected constant expression")),
                t => t.spelling().to_string(),
            };
            parts.push(part);
            self.advance()?;
        }
        if parts.is_empty() {
            return Err(self.fatal("expected constant expression"));
        }
        Ok(parts.join(" "))
    }

    /// `struct Name { field [*]Type, … };`
    ///
    /// A previously forward-referenced (Undefined) name is promoted;
    /// redefining a defined struct is fatal. Emits the typedef to the type
    /// sink and the field layout to the decl sink in declaration order.
    pub(crate) fn parse_struct(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect_ident()?;

        let id = match self.types.find(name) {
            Some(existing) => {
                if self.types.kind(existing) != TypeKind::Undefined {
                    return Err(self.fatal(format!("struct '{}' already defined", name)));
                }
                existing
            }
            None => self.types.make(Some(name), TypeKind::Undefined, None, 0),
        };

        self.expect(Token::OBRACE)?;
        self.scopes.push(ScopeKind::Struct);
        while self.tok != Token::CBRACE {
            let fname = self.expect_ident()?;
            let is_ptr = self.accept(Token::STAR)?;
            // Forward references are legal only through a pointer field.
            let fty = self.parse_type(is_ptr)?;
            let kind = if is_ptr {
                SymbolKind::PtrField
            } else {
                SymbolKind::Field
            };
            self.scopes.insert(fname, fty, kind);
            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CBRACE)?;
        self.expect(Token::SEMI)?;

        let fields = self.scopes.pop();
        if !self.types.define_struct(id, fields) {
            return Err(self.fatal(format!("struct '{}' already defined", name)));
        }

        let tname = mangle::type_name(name.as_str());
        self.emit.typedef(&format!("typedef struct {0} {0};\n", tname));
        self.emit.decl(&format!("struct {} {{\n", tname));
        for field in self.types.get(id).fields.iter() {
            let ftype = mangle::type_name(&self.types.display_name(field.ty));
            let line = match field.kind {
                SymbolKind::PtrField => format!("    {} *{};\n", ftype, field.name),
                _ => format!("    {} {};\n", ftype, field.name),
            };
            self.emit.decl(&line);
        }
        self.emit.decl("};\n");
        Ok(())
    }

    /// `fn name(param Type, …) [ReturnType] { block }`
    ///
    /// Parameters occupy a Function scope; struct parameters and returns
    /// are reference-passed (`t$T *`). The prototype goes to the decl
    /// sink, the name into the global scope, and the body opens in the
    /// impl sink.
    pub(crate) fn parse_function(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect_ident()?;

        self.expect(Token::OPAREN)?;
        self.scopes.push(ScopeKind::Function);
        let mut params: Vec<(Symbol, TypeId)> = Vec::new();
        while self.tok != Token::CPAREN {
            let pname = self.expect_ident()?;
            if self.scopes.find_in_current(pname).is_some() {
                return Err(self.fatal(format!("duplicate parameter '{}'", pname)));
            }
            let pty = self.parse_type(false)?;
            self.scopes.insert(pname, pty, SymbolKind::Var);
            params.push((pname, pty));
            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CPAREN)?;

        let ret = if self.tok == Token::OBRACE {
            self.types.void
        } else {
            self.parse_type(false)?
        };
        self.scopes.insert_global(name, ret, SymbolKind::Function);

        let mut sig = self.c_return_type(ret);
        sig.push_str(&mangle::fn_name(name.as_str()));
        sig.push('(');
        for (i, (pname, pty)) in params.iter().enumerate() {
            if i > 0 {
                sig.push_str(", ");
            }
            sig.push_str(&self.c_param(*pty, *pname));
        }
        sig.push(')');

        self.emit.decl(&format!("{};\n", sig));
        self.emit.code(&format!("\n{} {{\n", sig));
        self.parse_block(ScopeKind::Block)?;
        self.emit.code("}\n");
        self.scopes.pop();
        Ok(())
    }

    /// `var name Type [= initialiser] ;` — top-level and local form.
    pub(crate) fn parse_var(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect_ident()?;
        let ty = self.parse_type(false)?;
        self.scopes.insert(name, ty, SymbolKind::Var);

        let kind = self.types.kind(ty);
        let tname = mangle::type_name(&self.types.display_name(ty));
        let vname = mangle::var_name(name.as_str());

        if self.accept(Token::ASSIGN)? {
            if self.tok == Token::OBRACE {
                match kind {
                    TypeKind::Struct => {
                        // The aggregate backs a pointer, like every other
                        // struct value in emitted code.
                        let bname = mangle::backing_name(name.as_str());
                        self.emit.code(&format!("{} {} = ", tname, bname));
                        self.parse_brace_init()?;
                        self.emit.code(";\n");
                        self.emit
                            .code(&format!("{} *{} = &{};\n", tname, vname, bname));
                    }
                    TypeKind::Array | TypeKind::Slice => {
                        self.emit.code(&format!("{} {} = ", tname, vname));
                        self.parse_brace_init()?;
                        self.emit.code(";\n");
                    }
                    _ => {
                        return Err(
                            self.fatal("compound initialiser requires a struct or array type")
                        )
                    }
                }
            } else {
                if kind == TypeKind::Struct {
                    self.emit.code(&format!("{} *{} = ", tname, vname));
                } else {
                    self.emit.code(&format!("{} {} = ", tname, vname));
                }
                self.parse_expr()?;
                self.emit.code(";\n");
            }
        } else {
            match kind {
                TypeKind::Array | TypeKind::Slice => {
                    self.emit.code(&format!("{} {} = {{ 0, }};\n", tname, vname));
                }
                TypeKind::Struct => {
                    self.emit.code(&format!("{} *{} = 0;\n", tname, vname));
                }
                _ => {
                    self.emit.code(&format!("{} {} = 0;\n", tname, vname));
                }
            }
        }

        self.expect(Token::SEMI)?;
        Ok(())
    }

    /// `{ element, … }` with nested brace lists, emitted element-wise
    /// through the expression machinery.
    fn parse_brace_init(&mut self) -> CompileResult<()> {
        self.expect(Token::OBRACE)?;
        self.emit.code("{ ");
        while self.tok != Token::CBRACE {
            if self.tok == Token::OBRACE {
                self.parse_brace_init()?;
            } else {
                self.parse_expr()?;
            }
            self.emit.code(", ");
            if !self.accept(Token::COMMA)? {
                break;
            }
        }
        self.expect(Token::CBRACE)?;
        self.emit.code("}");
        Ok(())
    }

    /// C return type text, including the separating space.
    pub(crate) fn c_return_type(&self, ty: TypeId) -> String {
        let tname = mangle::type_name(&self.types.display_name(ty));
        if self.types.kind(ty) == TypeKind::Struct {
            format!("{} *", tname)
        } else {
            format!("{} ", tname)
        }
    }

    /// C parameter declaration text.
    pub(crate) fn c_param(&self, ty: TypeId, name: Symbol) -> String {
        let tname = mangle::type_name(&self.types.display_name(ty));
        let vname = mangle::var_name(name.as_str());
        if self.types.kind(ty) == TypeKind::Struct {
            format!("{} *{}", tname, vname)
        } else {
            format!("{} {}", tname, vname)
        }
    }
}
