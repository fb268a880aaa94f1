//! Blocks and statements.

use opalc_lex::Token;
use opalc_sem::ScopeKind;
use opalc_util::CompileResult;

use crate::Parser;

impl<'a> Parser<'a> {
    /// `{ statement … }` — pushes a scope of the given kind for the body.
    ///
    /// Emission of the braces is the caller's business: `if` needs to keep
    /// the closing `}` on the same line as a following `else`.
    pub(crate) fn parse_block(&mut self, kind: ScopeKind) -> CompileResult<()> {
        self.expect(Token::OBRACE)?;
        self.scopes.push(kind);
        while self.tok != Token::CBRACE {
            if self.tok == Token::EOF {
                return Err(self.fatal("unexpected end of input"));
            }
            self.parse_statement()?;
        }
        self.advance()?;
        self.scopes.pop();
        Ok(())
    }

    fn parse_statement(&mut self) -> CompileResult<()> {
        match self.tok {
            Token::VAR => self.parse_var(),
            Token::RETURN => self.parse_return(),
            Token::BREAK => self.parse_break(),
            Token::CONTINUE => self.parse_continue(),
            Token::WHILE => self.parse_while(),
            Token::IF => self.parse_if(),
            Token::SEMI => {
                self.advance()?;
                self.emit.code(";\n");
                Ok(())
            }
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_return(&mut self) -> CompileResult<()> {
        self.advance()?;
        self.emit.code("return");
        if self.tok != Token::SEMI {
            self.emit.code(" ");
            self.parse_expr()?;
        }
        self.expect(Token::SEMI)?;
        self.emit.code(";\n");
        Ok(())
    }

    fn parse_break(&mut self) -> CompileResult<()> {
        if self.scopes.find_kind(ScopeKind::Loop).is_none() {
            return Err(self.fatal("break must be used from inside a looping construct"));
        }
        self.advance()?;
        self.expect(Token::SEMI)?;
        self.emit.code("break;\n");
        Ok(())
    }

    fn parse_continue(&mut self) -> CompileResult<()> {
        if self.scopes.find_kind(ScopeKind::Loop).is_none() {
            return Err(self.fatal("continue must be used from inside a looping construct"));
        }
        self.advance()?;
        self.expect(Token::SEMI)?;
        self.emit.code("continue;\n");
        Ok(())
    }

    /// `while expr { block }` — the body scope is the Loop frame that
    /// `break`/`continue` search for.
    ///
    /// The condition gets literal parentheses so a single-operand
    /// condition still emits valid C; groups inside it elide as usual.
    fn parse_while(&mut self) -> CompileResult<()> {
        self.advance()?;
        self.emit.code("while (");
        self.parse_expr()?;
        self.emit.code(") {\n");
        self.parse_block(ScopeKind::Loop)?;
        self.emit.code("}\n");
        Ok(())
    }

    /// `if expr { block } [else if expr { block }]* [else { block }]`
    ///
    /// The `}` of each arm shares its line with the following `else` so
    /// the brace counting keeps the indent balanced.
    fn parse_if(&mut self) -> CompileResult<()> {
        self.advance()?;
        self.emit.code("if (");
        self.parse_expr()?;
        self.emit.code(") {\n");
        self.parse_block(ScopeKind::Block)?;

        loop {
            if !self.accept(Token::ELSE)? {
                self.emit.code("}\n");
                return Ok(());
            }
            if self.tok == Token::IF {
                self.advance()?;
                self.emit.code("} else if (");
                self.parse_expr()?;
                self.emit.code(") {\n");
                self.parse_block(ScopeKind::Block)?;
            } else {
                self.emit.code("} else {\n");
                self.parse_block(ScopeKind::Block)?;
                self.emit.code("}\n");
                return Ok(());
            }
        }
    }

    /// Expression statement, optionally continued by `=`, a
    /// compound-assign operator, `++` or `--`.
    fn parse_expr_statement(&mut self) -> CompileResult<()> {
        self.parse_expr()?;
        match self.tok {
            Token::ASSIGN => {
                self.advance()?;
                self.emit.code(" = ");
                self.parse_expr()?;
            }
            Token::INC => {
                self.advance()?;
                self.emit.code("++");
            }
            Token::DEC => {
                self.advance()?;
                self.emit.code("--");
            }
            t if t.is_assign_op() => {
                self.advance()?;
                self.emit.code(&format!(" {} ", t.spelling()));
                self.parse_expr()?;
            }
            _ => {}
        }
        self.expect(Token::SEMI)?;
        self.emit.code(";\n");
        Ok(())
    }
}
