//! Token types for the annotation lexer

use std::fmt;

use luatype_core::lang::keywords::{self, KeywordId};
use luatype_core::lang::punctuation::{self, PunctuationId};

use crate::frontend::diagnostics::Span;

/// Token types for type annotations
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `{`, `->`, `|`, ...
    Punctuation(PunctuationId),
    /// A simple type name: `nil`, `number`, `table`, ...
    Keyword(KeywordId),
    /// `true` / `false`
    Boolean(bool),
    Number(f64),
    /// String literal contents, escapes already processed
    String(String),
    /// Any other identifier (an alias name)
    Ident(String),
    /// Text the lexer does not recognize
    Unknown(String),
    Eof,
}

impl TokenKind {
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Punctuation(id) => write!(f, "punctuation `{}`", punctuation::as_str(*id)),
            TokenKind::Keyword(id) => write!(f, "keyword `{}`", keywords::as_str(*id)),
            TokenKind::Boolean(value) => write!(f, "boolean {value}"),
            TokenKind::Number(value) => write!(f, "number {value}"),
            TokenKind::String(value) => write!(f, "string {value:?}"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Unknown(text) => write!(f, "unknown {text:?}"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its kind and span
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
