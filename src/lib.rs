#![forbid(unsafe_code)]
//! luatype: the operator-semantics and annotation-parsing core of a gradual type checker for a Lua-like language.
//!
//! Two halves:
//!
//! - **Metamethod dispatch** ([`metaop`]): given already-typed operands and an operator, compute the result type.
//!   When an operand's type is still an unresolved placeholder, the operation is recorded and replayed once the
//!   placeholder is resolved.
//! - **Type annotations** ([`lexer`], [`parser`]): turn annotation text such as `{ name: string } | nil` into a
//!   structural [`Type`](types::Type).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: vocabulary registry lookups `expect` their entry; a missing entry is a bug in the registry
//!   table itself.

pub mod cli;
pub mod frontend;

pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::metaop;
pub use frontend::parser;
pub use frontend::types;

pub use frontend::diagnostics::SyntaxError;
pub use frontend::metaop::{CallReturns, MetaOpConfig, MetaOpError};
pub use frontend::parser::{parse_annotation, parse_type};
