//! Type-annotation punctuation vocabulary.
//!
//! This module defines the canonical set of punctuators used by the type-annotation lexer/parser: delimiters,
//! separators, the union/intersection combinators, and the signature arrows.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - [`longest_match`] is the lexer's scanning primitive: it tries three-, two-, then one-character spellings.
//!
//! ## Examples
//! ```rust
//! use luatype_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("~>"), Some(PunctuationId::ThreadArrow));
//! assert_eq!(punctuation::as_str(PunctuationId::Ellipsis), "...");
//! assert_eq!(punctuation::longest_match("->[number]"), Some((PunctuationId::Arrow, 2)));
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces, parentheses and angle brackets.
    Delimiter,
    /// Separators like `,` and `:`.
    Separator,
    /// Type combinators `&` and `|`.
    Combinator,
    /// Signature arrows `->`, `~>`, `~*`.
    Arrow,
    /// The variadic marker `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Special markers
    Ellipsis,

    // Arrows
    Arrow,
    ThreadArrow,
    ThreadEnd,

    // Delimiters
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LAngle,
    RAngle,

    // Separators
    Colon,
    Comma,

    // Combinators
    Ampersand,
    Pipe,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Arrow),
    info(PunctuationId::ThreadArrow, "~>", PunctuationCategory::Arrow),
    info(PunctuationId::ThreadEnd, "~*", PunctuationCategory::Arrow),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LAngle, "<", PunctuationCategory::Delimiter),
    info(PunctuationId::RAngle, ">", PunctuationCategory::Delimiter),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Ampersand, "&", PunctuationCategory::Combinator),
    info(PunctuationId::Pipe, "|", PunctuationCategory::Combinator),
];

/// Longest spelling in [`PUNCTUATION`], in bytes.
pub const MAX_SPELLING_LEN: usize = 3;

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Match the longest punctuator at the start of `text`.
///
/// Returns the punctuator and its length in bytes.
pub fn longest_match(text: &str) -> Option<(PunctuationId, usize)> {
    (1..=MAX_SPELLING_LEN.min(text.len()))
        .rev()
        .filter_map(|len| text.get(..len))
        .find_map(|prefix| from_str(prefix).map(|id| (id, prefix.len())))
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
    }
}
