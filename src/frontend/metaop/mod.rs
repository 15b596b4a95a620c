//! Metamethod dispatch
//!
//! One function per metamethod, called with already-typed operands. Every implemented body follows the same
//! three-way pattern:
//!
//! 1. the operand's concrete type has the capability (a table for `__index`, a function for `__call`): use it;
//! 2. the operand is an unresolved placeholder: record a [`DeferredOp`] on it and hand back its companion value;
//! 3. anything else: the operation is permitted but its result is unknown, so the result is [`Type::NoType`].
//!
//! Operands are passed through [`Type::resolved`] first, so a placeholder that has been resolved behaves exactly like
//! the type it was resolved to.
//!
//! ## Notes
//! - Operand mismatches are never errors. The only error is [`MetaOpError::Unimplemented`], returned by the slots
//!   that are recognized but have no body yet (arithmetic, comparison, unary and protocol metamethods).
//! - Coroutine metamethods are not part of this vocabulary.
//!
//! ## Examples
//! ```rust
//! use luatype::frontend::metaop;
//! use luatype::frontend::types::{Type, TypedValue};
//!
//! let t = TypedValue::named("t", Type::table());
//! metaop::new_index(&t, "a", TypedValue::new(Type::number()));
//! assert_eq!(metaop::index(&t, "a").ty, Type::number());
//!
//! let p = TypedValue::named("p", Type::placeholder("P"));
//! let result = metaop::call(&metaop::index(&p, "get"), &[]);
//! assert_eq!(result[0].ty.to_string(), "<P.get()>");
//! ```

mod config;
mod deferred;

pub use config::{CallReturns, MetaOpConfig};
pub use deferred::{DeferredChain, DeferredOp};

use luatype_core::lang::metamethods::{self, MetaMethodId};

use crate::frontend::types::{IndexKey, PlaceholderType, Type, TypedValue};

/// Errors raised by the dispatcher and by deferred chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MetaOpError {
    /// The metamethod is recognized but has no implementation.
    #[error("metamethod `{0}` is not implemented")]
    Unimplemented(MetaMethodId),
}

// ============================================================================
// Access / call
// ============================================================================

/// `target[key]`, `target.key`.
pub fn index(target: &TypedValue, key: impl Into<IndexKey>) -> TypedValue {
    let key = key.into();
    match target.ty.resolved() {
        Type::Table(table) => match &key {
            IndexKey::Typed(key) => table.get_indexer(&key.ty).1,
            literal => match literal.field_name() {
                Some(name) => table.get_field(&name),
                None => TypedValue::no_type(),
            },
        },
        Type::Placeholder(placeholder) => {
            let op = DeferredOp::Index { key };
            log_deferral(&placeholder, &op);
            placeholder.get_applied(op)
        }
        _ => TypedValue::no_type(),
    }
}

/// `target[key] = value`, `target.key = value`.
pub fn new_index(target: &TypedValue, key: impl Into<IndexKey>, value: TypedValue) {
    let key = key.into();
    match target.ty.resolved() {
        Type::Table(table) => match key {
            IndexKey::Typed(key) => table.set_indexer(key.ty, value),
            literal => {
                if let Some(name) = literal.field_name() {
                    table.set_field(name, value);
                }
            }
        },
        Type::Placeholder(placeholder) => {
            let op = DeferredOp::NewIndex { key, value };
            log_deferral(&placeholder, &op);
            placeholder.set_applied(op);
        }
        _ => {}
    }
}

/// `target(args...)`.
///
/// A function yields its full return list. A placeholder yields a single companion value standing for the call's
/// result, whatever the callee later turns out to return.
pub fn call(target: &TypedValue, args: &[TypedValue]) -> Vec<TypedValue> {
    match target.ty.resolved() {
        Type::Function(function) => function.get_returns(args),
        Type::Placeholder(placeholder) => {
            let op = DeferredOp::Call { args: args.to_vec() };
            log_deferral(&placeholder, &op);
            vec![placeholder.get_applied(op)]
        }
        _ => vec![TypedValue::no_type()],
    }
}

fn log_deferral(placeholder: &PlaceholderType, op: &DeferredOp) {
    tracing::debug!(placeholder = %placeholder.name(), op = %op.metamethod(), "deferring operation");
}

// ============================================================================
// Recognized, not implemented
// ============================================================================

fn unimplemented(id: MetaMethodId) -> Result<TypedValue, MetaOpError> {
    debug_assert!(!metamethods::is_implemented(id), "`{id}` has a dispatch body");
    Err(MetaOpError::Unimplemented(id))
}

/// `left + right`.
pub fn add(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Add)
}

/// `left - right`.
pub fn sub(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Sub)
}

/// `left * right`.
pub fn mul(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Mul)
}

/// `left / right`.
pub fn div(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Div)
}

/// `left % right`.
pub fn modulo(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Mod)
}

/// `left ^ right`.
pub fn pow(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Pow)
}

/// `left .. right`.
pub fn concat(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Concat)
}

/// `left == right`.
pub fn eq(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Eq)
}

/// `left < right`.
pub fn lt(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Lt)
}

/// `left <= right`.
pub fn le(_left: &TypedValue, _right: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Le)
}

/// `-operand`.
pub fn unm(_operand: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Unm)
}

/// `#operand`.
pub fn len(_operand: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Len)
}

/// `getmetatable(target)`.
pub fn metatable(_target: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Metatable)
}

/// `ipairs(target)`.
pub fn ipairs(_target: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::IPairs)
}

/// `pairs(target)`.
pub fn pairs(_target: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::Pairs)
}

/// `tostring(target)`.
pub fn tostring(_target: &TypedValue) -> Result<TypedValue, MetaOpError> {
    unimplemented(MetaMethodId::ToString)
}
