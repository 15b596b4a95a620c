//! Define the reserved words of the type-annotation language.
//!
//! Two groups of identifiers are reserved: the simple type names (`nil`, `boolean`, `number`, `string`, `table`,
//! `function`, `thread`) and the boolean literal words (`true`, `false`). Every other identifier is an alias.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `Number` is an alias, `number` is a keyword.
//! - Only `nil`, `boolean`, `number` and `string` currently map to a type; the bare `table`, `function` and `thread`
//!   words are reserved but marked [`Stability::Draft`].
//!
//! ## Examples
//! ```rust
//! use luatype_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("number"), Some(KeywordId::Number));
//! assert_eq!(keywords::category(KeywordId::True), KeywordCategory::Literal);
//! assert_eq!(keywords::from_str("Number"), None);
//! ```

use super::registry::{LangItemInfo, Stability};

/// Grouping for annotation keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// A simple type name.
    SimpleType,
    /// A literal value word.
    Literal,
}

/// Stable identifier for every annotation keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Simple types
    Nil,
    Boolean,
    Number,
    String,
    Table,
    Function,
    Thread,

    // Literals
    True,
    False,
}

/// Metadata for an annotation keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub item: LangItemInfo<KeywordId>,
    pub category: KeywordCategory,
}

/// Registry of all annotation keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Nil, "nil", "The `nil` type.", KeywordCategory::SimpleType, Stability::Stable),
    info(KeywordId::Boolean, "boolean", "Any boolean.", KeywordCategory::SimpleType, Stability::Stable),
    info(KeywordId::Number, "number", "Any number.", KeywordCategory::SimpleType, Stability::Stable),
    info(KeywordId::String, "string", "Any string.", KeywordCategory::SimpleType, Stability::Stable),
    info(KeywordId::Table, "table", "Any table.", KeywordCategory::SimpleType, Stability::Draft),
    info(KeywordId::Function, "function", "Any function.", KeywordCategory::SimpleType, Stability::Draft),
    info(KeywordId::Thread, "thread", "Any thread.", KeywordCategory::SimpleType, Stability::Draft),
    info(KeywordId::True, "true", "The literal `true`.", KeywordCategory::Literal, Stability::Stable),
    info(KeywordId::False, "false", "The literal `false`.", KeywordCategory::Literal, Stability::Stable),
];

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn from_str(name: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.item.canonical == name).map(|k| k.item.id)
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if the keyword names a simple type.
pub fn is_simple_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::SimpleType
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.item.id == id)
        .expect("keyword info missing")
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    description: &'static str,
    category: KeywordCategory,
    stability: Stability,
) -> KeywordInfo {
    KeywordInfo {
        item: LangItemInfo {
            id,
            canonical,
            description,
            stability,
        },
        category,
    }
}
