//! Typed values and index keys, the operands handed to the metamethod dispatcher.

use std::fmt;

use super::Type;

/// A structural type, plus the name of the run-time binding holding it when known.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub ty: Type,
    pub binding: Option<String>,
}

impl TypedValue {
    pub fn new(ty: Type) -> Self {
        Self { ty, binding: None }
    }

    pub fn named(binding: impl Into<String>, ty: Type) -> Self {
        Self {
            ty,
            binding: Some(binding.into()),
        }
    }

    pub fn no_type() -> Self {
        Self::new(Type::NoType)
    }
}

impl From<Type> for TypedValue {
    fn from(ty: Type) -> Self {
        Self::new(ty)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Key of an index operation: a literal name (`t.a`), a literal number (`t[1]`), or a typed value (`t[k]`).
#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey {
    Name(String),
    Number(f64),
    Typed(TypedValue),
}

impl IndexKey {
    /// The table field a literal key addresses; `None` for typed keys.
    pub fn field_name(&self) -> Option<String> {
        match self {
            IndexKey::Name(name) => Some(name.clone()),
            IndexKey::Number(n) => Some(n.to_string()),
            IndexKey::Typed(_) => None,
        }
    }
}

impl From<&str> for IndexKey {
    fn from(name: &str) -> Self {
        IndexKey::Name(name.to_string())
    }
}

impl From<String> for IndexKey {
    fn from(name: String) -> Self {
        IndexKey::Name(name)
    }
}

impl From<f64> for IndexKey {
    fn from(n: f64) -> Self {
        IndexKey::Number(n)
    }
}

impl From<i64> for IndexKey {
    fn from(n: i64) -> Self {
        IndexKey::Number(n as f64)
    }
}

impl From<TypedValue> for IndexKey {
    fn from(value: TypedValue) -> Self {
        IndexKey::Typed(value)
    }
}
