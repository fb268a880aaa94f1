//! Type positions.
//!
//! A type is an identifier (looked up, or created as an Undefined
//! placeholder when forward references are allowed), or `[N]Elem` /
//! `[]Elem` for fixed and open arrays. Pointer types, function types and
//! anonymous struct types are syntactically recognisable but rejected.

use opalc_gen::mangle;
use opalc_lex::Token;
use opalc_sem::{TypeId, TypeKind};
use opalc_util::CompileResult;

use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses a type position. With `forward_ok`, an unknown or
    /// still-undefined name is acceptable and yields the Undefined
    /// placeholder (used by struct pointer fields).
    pub(crate) fn parse_type(&mut self, forward_ok: bool) -> CompileResult<TypeId> {
        match self.tok {
            Token::IDENT => {
                let name = self.lex.ident;
                self.advance()?;
                match self.types.find(name) {
                    Some(id) => {
                        if !forward_ok && self.types.kind(id) == TypeKind::Undefined {
                            return Err(self.fatal(format!("undefined type '{}'", name)));
                        }
                        Ok(id)
                    }
                    None if forward_ok => {
                        Ok(self.types.make(Some(name), TypeKind::Undefined, None, 0))
                    }
                    None => Err(self.fatal(format!("undefined type '{}'", name))),
                }
            }
            Token::OBRACK => {
                self.advance()?;
                let count = if self.tok == Token::NUM {
                    let n = self.lex.num;
                    self.advance()?;
                    n
                } else {
                    0
                };
                self.expect(Token::CBRACK)?;
                // No forward references inside array element positions.
                let elem = self.parse_type(false)?;

                let (id, fresh) = self.types.array(elem, count);
                if fresh {
                    let ename = mangle::type_name(&self.types.display_name(elem));
                    let aname = mangle::type_name(&self.types.display_name(id));
                    if count == 0 {
                        self.emit
                            .typedef(&format!("typedef {} {}[];\n", ename, aname));
                    } else {
                        self.emit
                            .typedef(&format!("typedef {} {}[{}];\n", ename, aname, count));
                    }
                }
                Ok(id)
            }
            Token::STAR => Err(self.fatal("pointer types are not supported")),
            Token::FN => Err(self.fatal("function types are not supported")),
            Token::STRUCT => Err(self.fatal("anonymous struct types are not supported")),
            t => Err(self.fatal(format!("expected a type, found '{}'", t.spelling()))),
        }
    }
}
