//! Structural types
//!
//! [`Type`] is the closed set of shapes a Lua-like value can have, as seen by the checker. Value-like variants are
//! compared structurally; the shared variants ([`TableType`], [`FunctionType`], [`PlaceholderType`]) are cheap
//! handles over interiorly mutable state.
//!
//! ## Notes
//! - [`Type::NoType`] is the neutral sentinel: the operation is permitted but its result is unknown. It is an
//!   ordinary value, never an error.
//! - `Display` prints annotation syntax, parenthesized so that the printed text parses back to the same tree.
//!   Shapes the annotation grammar cannot spell do not round-trip: table fields whose names are not identifiers
//!   (`{ 1: number }`, written through a numeric key), typed indexers (`[string]: boolean`), placeholders, functions,
//!   threads, and `unknown`.
//!
//! ## Examples
//! ```rust
//! use luatype::frontend::types::Type;
//!
//! let ty = Type::union(Type::number(), Type::intersection(Type::string(), Type::alias("Tagged")));
//! assert_eq!(ty.to_string(), "number | string & Tagged");
//! ```

mod function;
mod placeholder;
mod table;
mod value;

pub use function::FunctionType;
pub use placeholder::PlaceholderType;
pub use table::TableType;
pub use value::{IndexKey, TypedValue};

use std::fmt;

/// Upper bound on placeholder-to-placeholder hops followed by [`Type::resolved`].
const MAX_RESOLUTION_HOPS: usize = 64;

/// A structural type.
#[derive(Debug, Clone)]
pub enum Type {
    /// Permitted but unknown.
    NoType,
    Nil,
    Boolean,
    Number,
    String,
    LiteralBoolean(bool),
    LiteralNumber(f64),
    LiteralString(String),
    Table(TableType),
    Tuple(Vec<Type>),
    Function(FunctionType),
    Thread,
    /// A named type not known to the annotation language.
    Alias(String),
    /// A value whose type is not known yet.
    Placeholder(PlaceholderType),
    Union(Box<Type>, Box<Type>),
    Intersection(Box<Type>, Box<Type>),
}

// ============================================================================
// Constructors
// ============================================================================

impl Type {
    pub fn no_type() -> Self {
        Type::NoType
    }

    pub fn nil() -> Self {
        Type::Nil
    }

    pub fn boolean() -> Self {
        Type::Boolean
    }

    pub fn number() -> Self {
        Type::Number
    }

    pub fn string() -> Self {
        Type::String
    }

    pub fn thread() -> Self {
        Type::Thread
    }

    pub fn literal_boolean(value: bool) -> Self {
        Type::LiteralBoolean(value)
    }

    pub fn literal_number(value: f64) -> Self {
        Type::LiteralNumber(value)
    }

    pub fn literal_string(value: impl Into<String>) -> Self {
        Type::LiteralString(value.into())
    }

    /// A fresh, empty table.
    pub fn table() -> Self {
        Type::Table(TableType::new())
    }

    pub fn tuple(types: Vec<Type>) -> Self {
        Type::Tuple(types)
    }

    pub fn function(function: FunctionType) -> Self {
        Type::Function(function)
    }

    pub fn alias(name: impl Into<String>) -> Self {
        Type::Alias(name.into())
    }

    /// A fresh unresolved placeholder.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Type::Placeholder(PlaceholderType::new(name))
    }

    pub fn union(left: Type, right: Type) -> Self {
        Type::Union(Box::new(left), Box::new(right))
    }

    pub fn intersection(left: Type, right: Type) -> Self {
        Type::Intersection(Box::new(left), Box::new(right))
    }
}

// ============================================================================
// Queries
// ============================================================================

impl Type {
    pub fn is_no_type(&self) -> bool {
        matches!(self, Type::NoType)
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Type::Table(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Type::Placeholder(_))
    }

    pub fn as_table(&self) -> Option<&TableType> {
        match self {
            Type::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderType> {
        match self {
            Type::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        }
    }

    /// Follow placeholders to what they were resolved to.
    ///
    /// An unresolved placeholder (or any other type) is returned as is.
    pub fn resolved(&self) -> Type {
        let mut current = self.clone();
        for _ in 0..MAX_RESOLUTION_HOPS {
            let next = match &current {
                Type::Placeholder(placeholder) => placeholder.resolution(),
                _ => None,
            };
            match next {
                Some(next) => current = next,
                None => return current,
            }
        }
        current
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::NoType, Type::NoType)
            | (Type::Nil, Type::Nil)
            | (Type::Boolean, Type::Boolean)
            | (Type::Number, Type::Number)
            | (Type::String, Type::String)
            | (Type::Thread, Type::Thread) => true,
            (Type::LiteralBoolean(a), Type::LiteralBoolean(b)) => a == b,
            (Type::LiteralNumber(a), Type::LiteralNumber(b)) => a == b,
            (Type::LiteralString(a), Type::LiteralString(b)) => a == b,
            (Type::Alias(a), Type::Alias(b)) => a == b,
            (Type::Table(a), Type::Table(b)) => a == b,
            (Type::Tuple(a), Type::Tuple(b)) => a == b,
            (Type::Function(a), Type::Function(b)) => a.ptr_eq(b),
            (Type::Placeholder(a), Type::Placeholder(b)) => a.ptr_eq(b),
            (Type::Union(a1, a2), Type::Union(b1, b2))
            | (Type::Intersection(a1, a2), Type::Intersection(b1, b2)) => a1 == b1 && a2 == b2,
            _ => false,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::NoType => f.write_str("unknown"),
            Type::Nil => f.write_str("nil"),
            Type::Boolean => f.write_str("boolean"),
            Type::Number => f.write_str("number"),
            Type::String => f.write_str("string"),
            Type::Thread => f.write_str("thread"),
            Type::Function(_) => f.write_str("function"),
            Type::LiteralBoolean(value) => write!(f, "{value}"),
            Type::LiteralNumber(value) => write!(f, "{value}"),
            Type::LiteralString(value) => write_quoted(f, value),
            Type::Table(table) => write!(f, "{table}"),
            Type::Tuple(types) => {
                f.write_str("[")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str("]")
            }
            Type::Alias(name) => f.write_str(name),
            Type::Placeholder(placeholder) => write!(f, "<{}>", placeholder.name()),
            Type::Union(left, right) => {
                // `|` associates to the right
                write_operand(f, left, matches!(**left, Type::Union(..)))?;
                f.write_str(" | ")?;
                write!(f, "{right}")
            }
            Type::Intersection(left, right) => {
                write_operand(f, left, matches!(**left, Type::Union(..) | Type::Intersection(..)))?;
                f.write_str(" & ")?;
                write_operand(f, right, matches!(**right, Type::Union(..)))
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, ty: &Type, parenthesize: bool) -> fmt::Result {
    if parenthesize { write!(f, "({ty})") } else { write!(f, "{ty}") }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::metaop::DeferredOp;

    #[test]
    fn test_display_simple_and_literals() {
        assert_eq!(Type::nil().to_string(), "nil");
        assert_eq!(Type::no_type().to_string(), "unknown");
        assert_eq!(Type::literal_boolean(false).to_string(), "false");
        assert_eq!(Type::literal_number(1.0).to_string(), "1");
        assert_eq!(Type::literal_number(1.5).to_string(), "1.5");
        assert_eq!(Type::literal_string("it's").to_string(), r"'it\'s'");
        assert_eq!(Type::tuple(vec![]).to_string(), "[]");
        assert_eq!(Type::tuple(vec![Type::number(), Type::string()]).to_string(), "[number, string]");
    }

    #[test]
    fn test_display_parenthesizes_against_precedence() {
        let left_union = Type::union(Type::union(Type::nil(), Type::number()), Type::string());
        assert_eq!(left_union.to_string(), "(nil | number) | string");

        let right_union = Type::union(Type::nil(), Type::union(Type::number(), Type::string()));
        assert_eq!(right_union.to_string(), "nil | number | string");

        let inter_of_union = Type::intersection(Type::union(Type::nil(), Type::number()), Type::string());
        assert_eq!(inter_of_union.to_string(), "(nil | number) & string");

        let inter_right_union = Type::intersection(Type::string(), Type::union(Type::nil(), Type::number()));
        assert_eq!(inter_right_union.to_string(), "string & (nil | number)");
    }

    #[test]
    fn test_equality_is_structural_for_values() {
        assert_eq!(Type::literal_string("a"), Type::literal_string("a"));
        assert_ne!(Type::literal_string("a"), Type::alias("a"));
        assert_eq!(
            Type::union(Type::number(), Type::nil()),
            Type::union(Type::number(), Type::nil())
        );
        assert_ne!(
            Type::union(Type::number(), Type::nil()),
            Type::intersection(Type::number(), Type::nil())
        );
    }

    #[test]
    fn test_equality_is_identity_for_placeholders() {
        let a = Type::placeholder("T");
        let b = Type::placeholder("T");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolved_follows_placeholders() {
        let outer = Type::placeholder("T");
        let inner = Type::placeholder("U");
        outer.as_placeholder().unwrap().resolve(inner.clone()).unwrap();
        assert_eq!(outer.resolved(), inner);

        inner.as_placeholder().unwrap().resolve(Type::number()).unwrap();
        assert_eq!(outer.resolved(), Type::number());
    }

    #[test]
    fn test_resolved_stops_on_cycles() {
        let ty = Type::placeholder("T");
        ty.as_placeholder().unwrap().resolve(ty.clone()).unwrap();
        assert!(ty.resolved().is_placeholder());
    }

    #[test]
    fn test_resolved_stops_on_cycles_through_derived_placeholders() {
        let root = PlaceholderType::new("T");
        let field = root.get_applied(DeferredOp::index("a")).ty;
        root.resolve(field.clone()).unwrap();

        assert!(field.resolved().is_no_type());
        assert!(Type::Placeholder(root).resolved().is_no_type());
    }
}
