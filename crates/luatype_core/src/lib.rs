//! Provide the canonical vocabulary shared by the luatype checker core and its tooling.
//!
//! This crate is intentionally small and dependency-free. It holds the registry tables that the annotation lexer,
//! the metamethod dispatcher, and the CLI all read from, so spellings never drift between them.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no checker-specific types.
//! - Current scope: metamethod names, type-annotation punctuation, and annotation keywords.

pub mod lang;
