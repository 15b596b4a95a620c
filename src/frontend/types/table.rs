//! Table types: named fields plus type-keyed indexers.
//!
//! Tables may refer to themselves (`M.__index = M`). Equality, `Display` and `Debug` track the tables they are
//! currently inside: a revisited table prints as `{...}`, and a revisited pair compares equal.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::thread::LocalKey;

use indexmap::IndexMap;

use super::{Type, TypedValue};

#[derive(Default)]
struct TableInner {
    fields: IndexMap<String, TypedValue>,
    indexers: Vec<(Type, TypedValue)>,
}

/// A table shape.
///
/// Cloning a `TableType` yields another handle to the same table: writes through one handle are visible through
/// every other. Fields keep their insertion order.
#[derive(Clone, Default)]
pub struct TableType(Rc<RefCell<TableInner>>);

type TableId = *const RefCell<TableInner>;

thread_local! {
    /// Tables whose `Display` is in progress on this thread.
    static DISPLAYING: RefCell<Vec<TableId>> = const { RefCell::new(Vec::new()) };
    /// Table pairs whose comparison is in progress on this thread.
    static COMPARING: RefCell<Vec<(TableId, TableId)>> = const { RefCell::new(Vec::new()) };
}

/// Run `body` with `key` marked as in progress; `None` if it already was.
fn visit<K: Copy + PartialEq + 'static, R>(
    stack: &'static LocalKey<RefCell<Vec<K>>>,
    key: K,
    body: impl FnOnce() -> R,
) -> Option<R> {
    struct Leave<T: 'static>(&'static LocalKey<RefCell<Vec<T>>>);

    impl<T: 'static> Drop for Leave<T> {
        fn drop(&mut self) {
            self.0.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }

    let entered = stack.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&key) {
            return false;
        }
        stack.push(key);
        true
    });
    if !entered {
        return None;
    }
    let _leave = Leave(stack);
    Some(body())
}

impl TableType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a named field. A missing field reads as [`Type::NoType`].
    pub fn get_field(&self, name: &str) -> TypedValue {
        self.0
            .borrow()
            .fields
            .get(name)
            .cloned()
            .unwrap_or_else(TypedValue::no_type)
    }

    /// Insert or overwrite a named field.
    pub fn set_field(&self, name: impl Into<String>, value: TypedValue) {
        self.0.borrow_mut().fields.insert(name.into(), value);
    }

    /// Look up the indexer declared for `key`.
    ///
    /// Returns the key and value entries; a missing indexer reads as a pair of [`Type::NoType`].
    pub fn get_indexer(&self, key: &Type) -> (TypedValue, TypedValue) {
        let inner = self.0.borrow();
        inner
            .indexers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(k, v)| (TypedValue::new(k.clone()), v.clone()))
            .unwrap_or_else(|| (TypedValue::no_type(), TypedValue::no_type()))
    }

    /// Insert an indexer, or overwrite the one whose key type is structurally equal.
    pub fn set_indexer(&self, key: Type, value: TypedValue) {
        // the key may contain this very table, so compare before borrowing mutably
        let existing = self.0.borrow().indexers.iter().position(|(k, _)| *k == key);
        let mut inner = self.0.borrow_mut();
        match existing {
            Some(i) => inner.indexers[i].1 = value,
            None => inner.indexers.push((key, value)),
        }
    }

    /// Snapshot of the named fields, in insertion order.
    pub fn fields(&self) -> Vec<(String, TypedValue)> {
        self.0
            .borrow()
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Snapshot of the indexers, in insertion order.
    pub fn indexers(&self) -> Vec<(Type, TypedValue)> {
        self.0.borrow().indexers.clone()
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.0.borrow();
        inner.fields.is_empty() && inner.indexers.is_empty()
    }

    pub fn ptr_eq(&self, other: &TableType) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn id(&self) -> TableId {
        Rc::as_ptr(&self.0)
    }
}

impl PartialEq for TableType {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        visit(&COMPARING, (self.id(), other.id()), || {
            let (a, b) = (self.0.borrow(), other.0.borrow());
            a.fields == b.fields && a.indexers == b.indexers
        })
        .unwrap_or(true)
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        visit(&DISPLAYING, self.id(), || self.write_shape(f)).unwrap_or_else(|| f.write_str("{...}"))
    }
}

impl fmt::Debug for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableType({self})")
    }
}

impl TableType {
    fn write_shape(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let fields = self.fields();
        let indexers = self.indexers();

        f.write_str("{ ")?;
        let mut first = true;
        for (name, value) in &fields {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}: {}", value.ty)?;
        }
        for (key, value) in &indexers {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "[{key}]: {}", value.ty)?;
        }
        f.write_str(" }")
    }
}
