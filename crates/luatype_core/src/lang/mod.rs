//! Language vocabulary registries.
//!
//! This module is the "front door" for vocabulary: metamethod names, annotation keywords, and annotation
//! punctuation. Callers work with **stable IDs** (e.g. `MetaMethodId`, `PunctuationId`) and look up spellings and
//! metadata via registry tables instead of comparing strings at call sites.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no type representations, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics, docs,
//!   debugging output).
//!
//! ## Examples
//! ```rust
//! use luatype_core::lang::metamethods::{self, MetaMethodId};
//!
//! assert_eq!(metamethods::from_str("__index"), Some(MetaMethodId::Index));
//! assert_eq!(metamethods::as_str(MetaMethodId::Call), "__call");
//! ```

pub mod keywords;
pub mod metamethods;
pub mod punctuation;
pub mod registry;
