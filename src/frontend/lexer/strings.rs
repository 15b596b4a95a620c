//! String scanning for the annotation lexer
//!
//! String literals are single-quoted. `\'` and `\\` are the only escapes; any other backslash is kept as is.

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a string literal; the opening quote has already been consumed.
    ///
    /// An unterminated literal runs to the end of the input.
    pub(super) fn scan_string(&mut self) -> TokenKind {
        let mut value = String::new();

        while let Some(c) = self.advance() {
            match c {
                '\'' => return TokenKind::String(value),
                '\\' if self.match_char('\'') => value.push('\''),
                '\\' if self.match_char('\\') => value.push('\\'),
                _ => value.push(c),
            }
        }

        TokenKind::String(value)
    }
}
