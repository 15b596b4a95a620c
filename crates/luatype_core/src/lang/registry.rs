//! Shareable metadata for `luatype_core::lang` registries.
//!
//! Every vocabulary in `luatype_core::lang` is a `const` table of metadata rows keyed by a stable id. This
//! submodule provides the small metadata types reused across all of them.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the lexer/parser.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Notes
/// - `Draft` marks items that are recognized by name but whose behavior has no body yet (e.g. most metamethods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
}

/// Shared metadata shape for "registry-first" vocabulary items.
///
/// Registries that need extra per-item data (e.g. metamethod or keyword category) wrap this struct in an
/// "extension" info type.
///
/// ## Notes
/// - `description` is intentionally mandatory to keep docs/tooling consistent.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub description: &'static str,
    pub stability: Stability,
}
