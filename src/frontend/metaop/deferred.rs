//! Deferred operations
//!
//! An operation applied to an unresolved placeholder cannot be evaluated yet. It is recorded as a [`DeferredOp`],
//! and consecutive operations on the result form a [`DeferredChain`]: `T.a()` is the chain `__index "a"` then
//! `__call ()` over the placeholder `T`.
//!
//! A chain has two folds, both running left to right:
//! - [`DeferredChain::render`] describes the chain as source-like text over a prefix;
//! - [`DeferredChain::resolve`] replays the chain against the concrete type the placeholder turned out to be.
//!
//! ## Notes
//! - Only `__index`, `__newindex` and `__call` have bodies. Rendering or resolving any other node fails with
//!   [`MetaOpError::Unimplemented`].
//! - Resolving a `__newindex` node writes into the concrete table; replaying the same chain again performs the
//!   same write, so replay is idempotent.

use std::fmt;

use luatype_core::lang::metamethods::MetaMethodId;

use super::{CallReturns, MetaOpConfig, MetaOpError};
use crate::frontend::types::{IndexKey, Type, TypedValue};

/// One operation applied to a not-yet-known value, with its captured operands.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredOp {
    // Arithmetic
    Add { left: TypedValue, right: TypedValue },
    Sub { left: TypedValue, right: TypedValue },
    Mul { left: TypedValue, right: TypedValue },
    Div { left: TypedValue, right: TypedValue },
    Mod { left: TypedValue, right: TypedValue },
    Pow { left: TypedValue, right: TypedValue },
    Concat { left: TypedValue, right: TypedValue },

    // Unary
    Unm,
    Len,

    // Comparison
    Eq { left: TypedValue, right: TypedValue },
    Lt { left: TypedValue, right: TypedValue },
    Le { left: TypedValue, right: TypedValue },

    // Access / call
    Index { key: IndexKey },
    NewIndex { key: IndexKey, value: TypedValue },
    Call { args: Vec<TypedValue> },

    // Protocols
    Metatable { args: Vec<TypedValue> },
    IPairs { args: Vec<TypedValue> },
    Pairs { args: Vec<TypedValue> },
    ToString { args: Vec<TypedValue> },
}

impl DeferredOp {
    pub fn index(key: impl Into<IndexKey>) -> Self {
        DeferredOp::Index { key: key.into() }
    }

    pub fn new_index(key: impl Into<IndexKey>, value: TypedValue) -> Self {
        DeferredOp::NewIndex { key: key.into(), value }
    }

    pub fn call(args: Vec<TypedValue>) -> Self {
        DeferredOp::Call { args }
    }

    /// The metamethod this operation stands for.
    pub fn metamethod(&self) -> MetaMethodId {
        match self {
            DeferredOp::Add { .. } => MetaMethodId::Add,
            DeferredOp::Sub { .. } => MetaMethodId::Sub,
            DeferredOp::Mul { .. } => MetaMethodId::Mul,
            DeferredOp::Div { .. } => MetaMethodId::Div,
            DeferredOp::Mod { .. } => MetaMethodId::Mod,
            DeferredOp::Pow { .. } => MetaMethodId::Pow,
            DeferredOp::Concat { .. } => MetaMethodId::Concat,
            DeferredOp::Unm => MetaMethodId::Unm,
            DeferredOp::Len => MetaMethodId::Len,
            DeferredOp::Eq { .. } => MetaMethodId::Eq,
            DeferredOp::Lt { .. } => MetaMethodId::Lt,
            DeferredOp::Le { .. } => MetaMethodId::Le,
            DeferredOp::Index { .. } => MetaMethodId::Index,
            DeferredOp::NewIndex { .. } => MetaMethodId::NewIndex,
            DeferredOp::Call { .. } => MetaMethodId::Call,
            DeferredOp::Metatable { .. } => MetaMethodId::Metatable,
            DeferredOp::IPairs { .. } => MetaMethodId::IPairs,
            DeferredOp::Pairs { .. } => MetaMethodId::Pairs,
            DeferredOp::ToString { .. } => MetaMethodId::ToString,
        }
    }

    /// Start a chain: this operation, then `next` on its result.
    pub fn then(self, next: DeferredOp) -> DeferredChain {
        DeferredChain::new(self).then(next)
    }

    fn render(&self, to: &str) -> Result<String, MetaOpError> {
        match self {
            DeferredOp::Index { key } => Ok(match key {
                IndexKey::Name(name) => format!("{to}.{name}"),
                IndexKey::Number(n) => format!("{to}[{n}]"),
                IndexKey::Typed(key) => format!("{to}[{}]", key_kind(key)),
            }),
            DeferredOp::NewIndex { key, value } => Ok(match key {
                IndexKey::Name(name) => format!("{to}(.{name}: {})", value.ty),
                IndexKey::Number(n) => format!("{to}([{n}]: {})", value.ty),
                IndexKey::Typed(key) => format!("{to}([{}]: {})", key_kind(key), value.ty),
            }),
            DeferredOp::Call { args } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                Ok(format!("{to}({})", args.join(", ")))
            }
            _ => Err(MetaOpError::Unimplemented(self.metamethod())),
        }
    }

    fn resolve(&self, to: Type, config: &MetaOpConfig) -> Result<Type, MetaOpError> {
        let resolved = match self {
            DeferredOp::Index { key } => match (&to, key) {
                (Type::Table(table), IndexKey::Typed(key)) => table.get_indexer(&key.ty).1.ty.resolved(),
                (Type::Table(table), literal) => match literal.field_name() {
                    Some(name) => table.get_field(&name).ty.resolved(),
                    None => Type::NoType,
                },
                _ => Type::NoType,
            },
            DeferredOp::NewIndex { key, value } => {
                if let Type::Table(table) = &to {
                    match key {
                        IndexKey::Typed(key) => table.set_indexer(key.ty.clone(), value.clone()),
                        literal => {
                            if let Some(name) = literal.field_name() {
                                table.set_field(name, value.clone());
                            }
                        }
                    }
                }
                to
            }
            DeferredOp::Call { args } => match &to {
                Type::Function(function) => call_result(function.get_returns(args), config.call_returns),
                _ => Type::NoType,
            },
            _ => return Err(MetaOpError::Unimplemented(self.metamethod())),
        };
        tracing::trace!(op = %self.metamethod(), result = %resolved, "resolved deferred operation");
        Ok(resolved)
    }
}

/// How a typed index key shows up in a rendered chain.
fn key_kind(key: &TypedValue) -> String {
    match &key.ty {
        Type::Function(_) => "function".to_string(),
        Type::Table(_) => "table".to_string(),
        ty => ty.to_string(),
    }
}

fn call_result(returns: Vec<TypedValue>, call_returns: CallReturns) -> Type {
    match call_returns {
        CallReturns::First => returns.first().map(|v| v.ty.resolved()).unwrap_or(Type::NoType),
        CallReturns::All => {
            let mut types: Vec<Type> = returns.iter().map(|v| v.ty.resolved()).collect();
            if types.len() == 1 {
                types.remove(0)
            } else {
                Type::Tuple(types)
            }
        }
    }
}

/// An ordered sequence of deferred operations, each applied to the result of the previous one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeferredChain {
    ops: Vec<DeferredOp>,
}

impl DeferredChain {
    pub fn new(op: DeferredOp) -> Self {
        Self { ops: vec![op] }
    }

    /// Append `op` to the end of the chain.
    pub fn then(mut self, op: DeferredOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn ops(&self) -> &[DeferredOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Describe the chain applied to `prefix`, e.g. `x.a()`.
    pub fn render(&self, prefix: &str) -> Result<String, MetaOpError> {
        self.ops.iter().try_fold(prefix.to_string(), |acc, op| op.render(&acc))
    }

    /// Replay the chain against `concrete` with the default [`MetaOpConfig`].
    pub fn resolve(&self, concrete: &Type) -> Result<Type, MetaOpError> {
        self.resolve_with(concrete, &MetaOpConfig::default())
    }

    /// Replay the chain against `concrete`.
    ///
    /// Every intermediate result is passed through [`Type::resolved`] before the next operation sees it.
    pub fn resolve_with(&self, concrete: &Type, config: &MetaOpConfig) -> Result<Type, MetaOpError> {
        self.ops
            .iter()
            .try_fold(concrete.resolved(), |acc, op| op.resolve(acc.resolved(), config))
    }
}

impl From<DeferredOp> for DeferredChain {
    fn from(op: DeferredOp) -> Self {
        Self::new(op)
    }
}

impl fmt::Display for DeferredChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" then ")?;
            }
            write!(f, "{}", op.metamethod())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::types::{FunctionType, TableType};
    use insta::assert_snapshot;

    fn table_with(fields: &[(&str, Type)]) -> TableType {
        let table = TableType::new();
        for (name, ty) in fields {
            table.set_field(*name, TypedValue::new(ty.clone()));
        }
        table
    }

    #[test]
    fn test_render_index_then_call() {
        let chain = DeferredOp::index("a").then(DeferredOp::call(vec![]));
        assert_eq!(chain.render("x").unwrap(), "x.a()");
    }

    #[test]
    fn test_render_keys_and_writes() {
        let chain = DeferredChain::new(DeferredOp::index(0_i64))
            .then(DeferredOp::index(TypedValue::new(Type::string())))
            .then(DeferredOp::index(TypedValue::named("f", Type::function(FunctionType::returning(vec![])))))
            .then(DeferredOp::new_index("b", TypedValue::new(Type::number())));
        assert_snapshot!(chain.render("t").unwrap(), @"t[0][string][function](.b: number)");
    }

    #[test]
    fn test_render_call_arguments_use_bindings() {
        let chain = DeferredChain::new(DeferredOp::call(vec![
            TypedValue::named("self", Type::table()),
            TypedValue::new(Type::literal_string("k")),
        ]));
        assert_snapshot!(chain.render("obj.method").unwrap(), @"obj.method(self, 'k')");
    }

    #[test]
    fn test_render_typed_newindex() {
        let chain = DeferredChain::new(DeferredOp::new_index(
            TypedValue::new(Type::table()),
            TypedValue::new(Type::boolean()),
        ));
        assert_eq!(chain.render("t").unwrap(), "t([table]: boolean)");
        let chain = DeferredChain::new(DeferredOp::new_index(2_i64, TypedValue::new(Type::nil())));
        assert_eq!(chain.render("t").unwrap(), "t([2]: nil)");
    }

    #[test]
    fn test_display_lists_metamethods() {
        let chain = DeferredOp::index("a").then(DeferredOp::call(vec![]));
        assert_eq!(chain.to_string(), "__index then __call");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
        assert!(DeferredChain::default().is_empty());
    }

    #[test]
    fn test_resolve_index_field() {
        let table = table_with(&[("a", Type::number())]);
        let chain = DeferredChain::new(DeferredOp::index("a"));
        assert_eq!(chain.resolve(&Type::Table(table)).unwrap(), Type::number());
    }

    #[test]
    fn test_resolve_index_missing_or_not_a_table() {
        let chain = DeferredChain::new(DeferredOp::index("missing"));
        assert!(chain.resolve(&Type::table()).unwrap().is_no_type());
        assert!(chain.resolve(&Type::number()).unwrap().is_no_type());
    }

    #[test]
    fn test_resolve_index_typed_key_reads_indexer() {
        let table = TableType::new();
        table.set_indexer(Type::string(), TypedValue::new(Type::boolean()));
        let chain = DeferredChain::new(DeferredOp::index(TypedValue::new(Type::string())));
        assert_eq!(chain.resolve(&Type::Table(table)).unwrap(), Type::boolean());
    }

    #[test]
    fn test_resolve_newindex_writes_and_passes_through() {
        let table = TableType::new();
        let concrete = Type::Table(table.clone());
        let chain = DeferredChain::new(DeferredOp::new_index("a", TypedValue::new(Type::string())))
            .then(DeferredOp::index("a"));

        assert_eq!(chain.resolve(&concrete).unwrap(), Type::string());
        assert_eq!(table.get_field("a").ty, Type::string());

        // replaying performs the same write, nothing more
        chain.resolve(&concrete).unwrap();
        assert_eq!(table.fields().len(), 1);
    }

    #[test]
    fn test_resolve_call_first_return() {
        let function = FunctionType::returning(vec![Type::number(), Type::string()]);
        let chain = DeferredChain::new(DeferredOp::call(vec![]));
        assert_eq!(chain.resolve(&Type::function(function)).unwrap(), Type::number());

        let empty = FunctionType::returning(vec![]);
        assert!(chain.resolve(&Type::function(empty)).unwrap().is_no_type());
        assert!(chain.resolve(&Type::nil()).unwrap().is_no_type());
    }

    #[test]
    fn test_resolve_call_all_returns() {
        let config = MetaOpConfig::new().with_call_returns(CallReturns::All);
        let chain = DeferredChain::new(DeferredOp::call(vec![]));

        let pair = Type::function(FunctionType::returning(vec![Type::number(), Type::string()]));
        assert_eq!(
            chain.resolve_with(&pair, &config).unwrap(),
            Type::tuple(vec![Type::number(), Type::string()])
        );

        let single = Type::function(FunctionType::returning(vec![Type::boolean()]));
        assert_eq!(chain.resolve_with(&single, &config).unwrap(), Type::boolean());

        let none = Type::function(FunctionType::returning(vec![]));
        assert_eq!(chain.resolve_with(&none, &config).unwrap(), Type::tuple(vec![]));
    }

    #[test]
    fn test_resolve_passes_arguments_to_function() {
        let identity = Type::function(FunctionType::computed(|args| args.to_vec()));
        let chain = DeferredChain::new(DeferredOp::call(vec![TypedValue::new(Type::literal_number(3.0))]));
        assert_eq!(chain.resolve(&identity).unwrap(), Type::literal_number(3.0));
    }

    #[test]
    fn test_unimplemented_nodes_fail() {
        let chain = DeferredOp::index("a").then(DeferredOp::Len);
        assert_eq!(chain.render("x"), Err(MetaOpError::Unimplemented(MetaMethodId::Len)));
        assert_eq!(
            chain.resolve(&Type::table()),
            Err(MetaOpError::Unimplemented(MetaMethodId::Len))
        );

        let add = DeferredChain::new(DeferredOp::Add {
            left: TypedValue::new(Type::number()),
            right: TypedValue::new(Type::number()),
        });
        assert_eq!(add.render("x"), Err(MetaOpError::Unimplemented(MetaMethodId::Add)));
    }
}
