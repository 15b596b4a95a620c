//! Metamethod vocabulary.
//!
//! This module names every overloadable operation the checker core recognizes, using the Lua-style `__name`
//! spellings. It records a category for each entry, and marks as [`Stability::Draft`] the
//! metamethods that are recognized but have no dispatch body yet.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Coroutine operations are intentionally absent: they are not wired into the dispatcher at all.
//!
//! ## Examples
//! ```rust
//! use luatype_core::lang::metamethods::{self, MetaMethodCategory, MetaMethodId};
//!
//! assert_eq!(metamethods::from_str("__newindex"), Some(MetaMethodId::NewIndex));
//! assert_eq!(metamethods::category(MetaMethodId::Lt), MetaMethodCategory::Comparison);
//! assert!(metamethods::is_implemented(MetaMethodId::Call));
//! assert!(!metamethods::is_implemented(MetaMethodId::Add));
//! ```

use super::registry::{LangItemInfo, Stability};

/// Broad grouping for metamethods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaMethodCategory {
    /// `__add`, `__sub`, ..., `__concat`.
    Arithmetic,
    /// `__unm`, `__len`.
    Unary,
    /// `__eq`, `__lt`, `__le`.
    Comparison,
    /// `__index`, `__newindex`.
    Access,
    /// `__call`.
    Call,
    /// `__metatable`, `__pairs`, `__ipairs`, `__tostring`.
    Protocol,
}

/// Stable identifier for every recognized metamethod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaMethodId {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,

    // Unary
    Unm,
    Len,

    // Comparison
    Eq,
    Lt,
    Le,

    // Access / call
    Index,
    NewIndex,
    Call,

    // Protocols
    Metatable,
    IPairs,
    Pairs,
    ToString,
}

impl std::fmt::Display for MetaMethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

/// Metadata for a metamethod.
#[derive(Debug, Clone, Copy)]
pub struct MetaMethodInfo {
    pub item: LangItemInfo<MetaMethodId>,
    pub category: MetaMethodCategory,
}

/// Registry of all recognized metamethods.
pub const METAMETHODS: &[MetaMethodInfo] = &[
    // Arithmetic
    info(MetaMethodId::Add, "__add", "Addition (`a + b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(MetaMethodId::Sub, "__sub", "Subtraction (`a - b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(MetaMethodId::Mul, "__mul", "Multiplication (`a * b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(MetaMethodId::Div, "__div", "Division (`a / b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(MetaMethodId::Mod, "__mod", "Modulo (`a % b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(MetaMethodId::Pow, "__pow", "Exponentiation (`a ^ b`).", MetaMethodCategory::Arithmetic, Stability::Draft),
    info(
        MetaMethodId::Concat,
        "__concat",
        "Concatenation (`a .. b`).",
        MetaMethodCategory::Arithmetic,
        Stability::Draft,
    ),
    // Unary
    info(MetaMethodId::Unm, "__unm", "Unary minus (`-a`).", MetaMethodCategory::Unary, Stability::Draft),
    info(MetaMethodId::Len, "__len", "Length (`#a`).", MetaMethodCategory::Unary, Stability::Draft),
    // Comparison
    info(MetaMethodId::Eq, "__eq", "Equality (`a == b`).", MetaMethodCategory::Comparison, Stability::Draft),
    info(MetaMethodId::Lt, "__lt", "Less than (`a < b`).", MetaMethodCategory::Comparison, Stability::Draft),
    info(
        MetaMethodId::Le,
        "__le",
        "Less or equal (`a <= b`).",
        MetaMethodCategory::Comparison,
        Stability::Draft,
    ),
    // Access / call
    info(
        MetaMethodId::Index,
        "__index",
        "Field or indexer read (`a.k`, `a[k]`).",
        MetaMethodCategory::Access,
        Stability::Stable,
    ),
    info(
        MetaMethodId::NewIndex,
        "__newindex",
        "Field or indexer write (`a.k = v`, `a[k] = v`).",
        MetaMethodCategory::Access,
        Stability::Stable,
    ),
    info(MetaMethodId::Call, "__call", "Call (`a(...)`).", MetaMethodCategory::Call, Stability::Stable),
    // Protocols
    info(
        MetaMethodId::Metatable,
        "__metatable",
        "Metatable access (`getmetatable(a)`).",
        MetaMethodCategory::Protocol,
        Stability::Draft,
    ),
    info(
        MetaMethodId::IPairs,
        "__ipairs",
        "Sequence iteration protocol (`ipairs(a)`).",
        MetaMethodCategory::Protocol,
        Stability::Draft,
    ),
    info(
        MetaMethodId::Pairs,
        "__pairs",
        "Table iteration protocol (`pairs(a)`).",
        MetaMethodCategory::Protocol,
        Stability::Draft,
    ),
    info(
        MetaMethodId::ToString,
        "__tostring",
        "String coercion (`tostring(a)`).",
        MetaMethodCategory::Protocol,
        Stability::Draft,
    ),
];

/// Resolve a metamethod spelling to its stable id.
pub fn from_str(name: &str) -> Option<MetaMethodId> {
    METAMETHODS.iter().find(|m| m.item.canonical == name).map(|m| m.item.id)
}

/// Return the canonical spelling for a metamethod.
pub fn as_str(id: MetaMethodId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the category for a metamethod.
pub fn category(id: MetaMethodId) -> MetaMethodCategory {
    info_for(id).category
}

/// Return `true` if the checker core implements a dispatch body for this metamethod.
pub fn is_implemented(id: MetaMethodId) -> bool {
    info_for(id).item.stability == Stability::Stable
}

/// Return the full metadata entry for a metamethod.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: MetaMethodId) -> &'static MetaMethodInfo {
    METAMETHODS
        .iter()
        .find(|m| m.item.id == id)
        .expect("metamethod info missing")
}

const fn info(
    id: MetaMethodId,
    canonical: &'static str,
    description: &'static str,
    category: MetaMethodCategory,
    stability: Stability,
) -> MetaMethodInfo {
    MetaMethodInfo {
        item: LangItemInfo {
            id,
            canonical,
            description,
            stability,
        },
        category,
    }
}
