//! luatype checker core
//!
//! This module contains the checker components:
//! - `lexer`: tokenization of type annotations
//! - `parser`: parsing annotations into structural types
//! - `types`: structural types (tables, functions, placeholders, ...)
//! - `metaop`: metamethod dispatch and deferred operations on placeholders
//! - `diagnostics`: spans and syntax errors

pub mod diagnostics;
pub mod lexer;
pub mod metaop;
pub mod parser;
pub mod types;
