//! Comment skipping. Opal has `//` line comments only.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips a `//` comment up to, but not including, the newline, so the
    /// EOL handling in the dispatch loop still sees the line end.
    pub(crate) fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.peek() != b'\n' {
            self.cursor.bump();
        }
    }
}
