//! Parser for type annotations
//!
//! Recursive descent over the annotation grammar:
//!
//! ```text
//! union        = intersection ["|" union]
//! intersection = primary ["&" intersection]
//! primary      = simple | literal | alias | table | tuple | typeof | "(" union ")"
//! simple       = "nil" | "boolean" | "number" | "string"
//! literal      = number | "'" ... "'" | "true" | "false"
//! table        = "{" [field {"," field} [","]] "}"
//! field        = (name | "[" name ":" simple "]") ":" union
//! tuple        = "[" [union {"," union} [","]] "]"
//! typeof       = "<" name ">"
//! ```
//!
//! `&` binds tighter than `|`, so `a | b & c` is `a | (b & c)`; both associate to the right.
//!
//! ## Notes
//! - A bracketed field `[k: number]` is stored as a field literally named `[k: number]`.
//! - `table`, `function` and `thread` on their own, parameter lists (`()`, `(...`, `(name: ...`) and signatures
//!   (`... -> [...]`, `... ~> ... ~*`) are rejected as not supported yet.
//! - Parsing stops after the first complete type; what follows is left to the caller.
//! - Nested brackets and long `|`/`&` chains count against [`MAX_DEPTH`]; deeper input is a syntax error.
//!
//! ## Examples
//! ```rust
//! use luatype::frontend::parser::{parse_annotation, parse_type};
//!
//! let mut cursor = 0;
//! let ty = parse_annotation("number | nil, rest", &mut cursor).unwrap();
//! assert_eq!(ty.to_string(), "number | nil");
//! assert_eq!(cursor, 12);
//!
//! assert!(parse_type("{ a: ", None).is_none());
//! ```

use luatype_core::lang::keywords::{self, KeywordId};
use luatype_core::lang::punctuation::{self, PunctuationId};

use crate::frontend::diagnostics::{Span, SyntaxError, errors};
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::frontend::types::{TableType, Type, TypedValue};

/// Maximum nesting of union and intersection operands.
pub const MAX_DEPTH: u32 = 256;

/// Parser state
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// End of the last consumed token.
    previous_end: usize,
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser reading from byte offset `start` of `source`.
    pub fn new(source: &'a str, start: usize) -> Self {
        let mut lexer = Lexer::new(source, start);
        let previous_end = lexer.position();
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous_end,
            depth: 0,
        }
    }

    /// Byte offset right after the last consumed token.
    pub fn position(&self) -> usize {
        self.previous_end
    }

    /// Parse one type.
    pub fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        self.union()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn peek(&self) -> &Token {
        &self.current
    }

    /// The token after the current one, without consuming anything.
    fn peek_next(&self) -> Token {
        self.lexer.clone().next_token()
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous_end = consumed.span.end;
        consumed
    }

    fn check(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_token(&mut self, id: PunctuationId) -> bool {
        if self.check(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, id: PunctuationId) -> Result<Token, SyntaxError> {
        if self.check(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!("\"{}\"", punctuation::as_str(id))))
        }
    }

    /// Source text of the current token; `None` at end of input.
    fn current_text(&self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_eof() {
            return None;
        }
        self.lexer.source().get(token.span.start..token.span.end)
    }

    fn expected(&self, what: &str) -> SyntaxError {
        errors::expected(what, self.current_text(), self.peek().span)
    }

    fn unexpected(&self) -> SyntaxError {
        match self.current_text() {
            Some(text) => errors::unexpected(text, self.peek().span),
            None => self.expected("<type>"),
        }
    }

    fn enter_recursion(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(errors::too_deep(MAX_DEPTH, self.peek().span));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn name(&mut self) -> Result<String, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.expected("<name>")),
        }
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    fn union(&mut self) -> Result<Type, SyntaxError> {
        self.enter_recursion()?;
        let ty = self.union_operands();
        self.exit_recursion();
        ty
    }

    fn union_operands(&mut self) -> Result<Type, SyntaxError> {
        let left = self.intersection()?;
        if self.match_token(PunctuationId::Pipe) {
            let right = self.union()?;
            return Ok(Type::union(left, right));
        }
        Ok(left)
    }

    fn intersection(&mut self) -> Result<Type, SyntaxError> {
        self.enter_recursion()?;
        let ty = self.intersection_operands();
        self.exit_recursion();
        ty
    }

    fn intersection_operands(&mut self) -> Result<Type, SyntaxError> {
        let left = self.primary()?;
        if self.match_token(PunctuationId::Ampersand) {
            let right = self.intersection()?;
            return Ok(Type::intersection(left, right));
        }
        Ok(left)
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn primary(&mut self) -> Result<Type, SyntaxError> {
        let ty = match &self.peek().kind {
            TokenKind::Keyword(id) => self.simple(*id)?,
            TokenKind::Boolean(value) => Type::literal_boolean(*value),
            TokenKind::Number(value) => Type::literal_number(*value),
            TokenKind::String(value) => Type::literal_string(value.clone()),
            TokenKind::Ident(name) => Type::alias(name.clone()),
            TokenKind::Punctuation(PunctuationId::LBrace) => return self.table(),
            TokenKind::Punctuation(PunctuationId::LBracket) => return self.tuple(),
            TokenKind::Punctuation(PunctuationId::LAngle) => return self.typeof_var(),
            TokenKind::Punctuation(PunctuationId::LParen) => return self.parenthesized(),
            TokenKind::Punctuation(_) | TokenKind::Unknown(_) | TokenKind::Eof => return Err(self.unexpected()),
        };
        self.advance();
        Ok(ty)
    }

    fn simple(&self, id: KeywordId) -> Result<Type, SyntaxError> {
        let span = self.peek().span;
        match id {
            KeywordId::Nil => Ok(Type::nil()),
            KeywordId::Boolean => Ok(Type::boolean()),
            KeywordId::Number => Ok(Type::number()),
            KeywordId::String => Ok(Type::string()),
            KeywordId::True => Ok(Type::literal_boolean(true)),
            KeywordId::False => Ok(Type::literal_boolean(false)),
            KeywordId::Table | KeywordId::Function | KeywordId::Thread => {
                Err(errors::unsupported(keywords::as_str(id), span))
            }
        }
    }

    /// `{ a: number, [k: string]: boolean }`
    fn table(&mut self) -> Result<Type, SyntaxError> {
        self.expect(PunctuationId::LBrace)?;
        let table = TableType::new();

        while !self.check(PunctuationId::RBrace) {
            let (name, ty) = self.table_field()?;
            table.set_field(name, TypedValue::new(ty));
            if !self.match_token(PunctuationId::Comma) {
                break;
            }
        }

        self.expect(PunctuationId::RBrace)?;
        Ok(Type::Table(table))
    }

    fn table_field(&mut self) -> Result<(String, Type), SyntaxError> {
        let name = match &self.peek().kind {
            TokenKind::Ident(_) => self.name()?,
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                self.indexer_key()?
            }
            _ => return Err(self.expected("<name>")),
        };
        self.expect(PunctuationId::Colon)?;
        let ty = self.union()?;
        Ok((name, ty))
    }

    /// `k: simple ]`, after the opening bracket. Returns the synthesized key `[k: simple]`.
    fn indexer_key(&mut self) -> Result<String, SyntaxError> {
        let name = self.name()?;
        self.expect(PunctuationId::Colon)?;
        let simple = match self.peek().kind {
            TokenKind::Keyword(id) if keywords::is_simple_type(id) => keywords::as_str(id),
            _ => return Err(self.expected("<simple>")),
        };
        self.advance();
        self.expect(PunctuationId::RBracket)?;
        Ok(format!("[{name}: {simple}]"))
    }

    /// `[number, string]`
    fn tuple(&mut self) -> Result<Type, SyntaxError> {
        self.expect(PunctuationId::LBracket)?;
        let mut types = Vec::new();

        while !self.check(PunctuationId::RBracket) {
            types.push(self.union()?);
            if !self.match_token(PunctuationId::Comma) {
                break;
            }
        }

        self.expect(PunctuationId::RBracket)?;
        Ok(Type::tuple(types))
    }

    /// `<T>`
    fn typeof_var(&mut self) -> Result<Type, SyntaxError> {
        self.expect(PunctuationId::LAngle)?;
        let name = self.name()?;
        self.expect(PunctuationId::RAngle)?;
        Ok(Type::placeholder(name))
    }

    /// `( type )`, rejecting parameter lists and signatures.
    fn parenthesized(&mut self) -> Result<Type, SyntaxError> {
        let open = self.expect(PunctuationId::LParen)?;

        let parameters = match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::Ellipsis) => true,
            TokenKind::Ident(_) => self.peek_next().kind.is_punctuation(PunctuationId::Colon),
            _ => false,
        };
        if parameters {
            let construct = if self.check(PunctuationId::RParen) && is_thread_arrow(&self.peek_next()) {
                "thread"
            } else {
                "function"
            };
            return Err(errors::unsupported(construct, Span::new(open.span.start, self.peek().span.end)));
        }

        let inner = self.union()?;
        self.expect(PunctuationId::RParen)?;

        if self.check(PunctuationId::Arrow) || is_thread_arrow(self.peek()) {
            let construct = if self.check(PunctuationId::Arrow) { "function" } else { "thread" };
            return Err(errors::unsupported(construct, Span::new(open.span.start, self.peek().span.end)));
        }
        Ok(inner)
    }
}

fn is_thread_arrow(token: &Token) -> bool {
    token.kind.is_punctuation(PunctuationId::ThreadArrow) || token.kind.is_punctuation(PunctuationId::ThreadEnd)
}

// ============================================================================
// Entry points
// ============================================================================

/// Parse one type starting at `*cursor`.
///
/// On success the cursor moves to the end of the last token of the type (trailing whitespace is not consumed). On
/// failure the cursor is left untouched.
#[tracing::instrument(skip_all, fields(source_len = source.len(), start = *cursor))]
pub fn parse_annotation(source: &str, cursor: &mut usize) -> Result<Type, SyntaxError> {
    let mut parser = Parser::new(source, *cursor);
    let ty = parser.parse_type()?;
    *cursor = parser.position();
    Ok(ty)
}

/// Best-effort parse of one type, starting at `cursor` (or at the start of `source`).
///
/// Never fails: any syntax error yields `None` with the cursor unchanged, so calls can be chained over one buffer.
pub fn parse_type(source: &str, cursor: Option<&mut usize>) -> Option<Type> {
    let mut start = 0;
    let cursor = cursor.unwrap_or(&mut start);
    match parse_annotation(source, cursor) {
        Ok(ty) => Some(ty),
        Err(err) => {
            tracing::debug!(error = %err, at = %err.span, "no type parsed");
            None
        }
    }
}

#[cfg(test)]
mod tests;
