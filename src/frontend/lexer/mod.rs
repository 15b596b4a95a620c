//! Lexer for type annotations
//!
//! Produces one token per call over a byte cursor into the source buffer, so a caller can parse an annotation
//! embedded in a larger text (a comment, a docstring) and resume right after it.
//!
//! Handles:
//! - Punctuation (`...`, `->`, `~>`, `~*`, `{`, `}`, `[`, `]`, `(`, `)`, `<`, `>`, `:`, `,`, `&`, `|`)
//! - Simple type keywords, `true` / `false`, and alias identifiers
//! - Number literals (decimal with optional fraction, `0b` / `0o` / `0x` prefixed integers)
//! - Single-quoted string literals
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String literal scanning
//! - `numbers` - Numeric literal scanning
//!
//! ## Notes
//! - The lexer never fails: text it does not recognize becomes a [`TokenKind::Unknown`] token spanning up to the next
//!   whitespace, and the parser reports it.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use luatype_core::lang::keywords::{self, KeywordId};
use luatype_core::lang::punctuation;

use crate::frontend::diagnostics::Span;

/// Lexer over an annotation source buffer.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    current_pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at byte offset `start`.
    ///
    /// An offset past the end is clamped to the end; an offset inside a UTF-8 sequence moves forward to the next
    /// character boundary.
    pub fn new(source: &'a str, start: usize) -> Self {
        let mut current_pos = start.min(source.len());
        while !source.is_char_boundary(current_pos) {
            current_pos += 1;
        }
        Self { source, current_pos }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.current_pos
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Scan the next token, skipping leading whitespace.
    ///
    /// Once the input is exhausted, every call returns [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.current_pos;

        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::new(start, start));
        };

        let kind = if let Some((id, len)) = punctuation::longest_match(self.rest()) {
            self.current_pos += len;
            TokenKind::Punctuation(id)
        } else {
            match c {
                '\'' => {
                    self.advance();
                    self.scan_string()
                }
                '0'..='9' => self.scan_number(),
                _ if is_ident_start(c) => self.scan_identifier(),
                _ => self.scan_unknown(),
            }
        };

        Token::new(kind, Span::new(start, self.current_pos))
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.current_pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let name = &self.source[start..self.current_pos];

        match keywords::from_str(name) {
            Some(KeywordId::True) => TokenKind::Boolean(true),
            Some(KeywordId::False) => TokenKind::Boolean(false),
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(name.to_string()),
        }
    }

    /// Everything up to the next whitespace.
    fn scan_unknown(&mut self) -> TokenKind {
        let start = self.current_pos;
        while self.peek().is_some_and(|c| !c.is_whitespace()) {
            self.advance();
        }
        TokenKind::Unknown(self.source[start..self.current_pos].to_string())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a whole source string.
///
/// The returned tokens always end with an `Eof` token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source, 0);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::trace!(count = tokens.len(), "lexed annotation");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use luatype_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_longest_match() {
        assert_eq!(
            kinds("...->~>~*"),
            vec![
                TokenKind::Punctuation(PunctuationId::Ellipsis),
                TokenKind::Punctuation(PunctuationId::Arrow),
                TokenKind::Punctuation(PunctuationId::ThreadArrow),
                TokenKind::Punctuation(PunctuationId::ThreadEnd),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_booleans_and_aliases() {
        assert_eq!(
            kinds("nil table true false Point _x1"),
            vec![
                TokenKind::Keyword(KeywordId::Nil),
                TokenKind::Keyword(KeywordId::Table),
                TokenKind::Boolean(true),
                TokenKind::Boolean(false),
                TokenKind::Ident("Point".to_string()),
                TokenKind::Ident("_x1".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(kinds("Nil")[0], TokenKind::Ident("Nil".to_string()));
    }

    #[test]
    fn test_spans_exclude_whitespace() {
        let tokens = lex("  { a }  ");
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(2, 3), Span::new(4, 5), Span::new(6, 7), Span::new(9, 9)]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \t\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("a", 0);
        assert_eq!(lexer.next_token().kind, TokenKind::Ident("a".to_string()));
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_unknown_runs_to_whitespace() {
        assert_eq!(
            kinds("$x|y z"),
            vec![
                TokenKind::Unknown("$x|y".to_string()),
                TokenKind::Ident("z".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_start_offset() {
        let mut lexer = Lexer::new("skip: number", 5);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Keyword(KeywordId::Number));
        assert_eq!(token.span, Span::new(6, 12));
    }

    #[test]
    fn test_start_offset_is_clamped() {
        let mut lexer = Lexer::new("ab", 10);
        assert_eq!(lexer.position(), 2);
        assert!(lexer.next_token().is_eof());

        // inside the two-byte `é`
        let lexer = Lexer::new("é", 1);
        assert_eq!(lexer.position(), 2);
    }
}
