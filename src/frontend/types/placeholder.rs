//! Unresolved placeholders
//!
//! A placeholder stands for a value whose type is not known yet (written `<T>` in annotations). Operations applied
//! to it are recorded as [`DeferredChain`]s on the *root* placeholder; the result of such an operation is itself a
//! *derived* placeholder, named after the rendered chain (`T.a`, `T.a()`), whose path from the root is remembered.
//!
//! Once the unification layer decides what the root is, [`PlaceholderType::resolve`] stores the resolution and
//! replays every recorded chain against it, which performs the recorded table writes. A derived placeholder's
//! resolution is the root's resolution folded through its path.
//!
//! ## Notes
//! - Derived placeholders only hold a weak link to their root, so a record never keeps itself alive.
//! - The record is append-only and lives on the root; [`PlaceholderType::applied`] on a derived placeholder reports
//!   its root's record.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Type, TypedValue};
use crate::frontend::metaop::{DeferredChain, DeferredOp, MetaOpConfig, MetaOpError};

#[derive(Debug)]
struct Origin {
    root: Weak<RefCell<PlaceholderInner>>,
    path: DeferredChain,
}

#[derive(Debug)]
struct PlaceholderInner {
    name: String,
    origin: Option<Origin>,
    applied: Vec<DeferredChain>,
    resolution: Option<Type>,
    config: MetaOpConfig,
    /// Set while [`PlaceholderType::resolution`] folds this placeholder's path.
    resolving: Cell<bool>,
}

/// Shared handle to an unresolved placeholder. Equality is identity.
#[derive(Clone)]
pub struct PlaceholderType(Rc<RefCell<PlaceholderInner>>);

impl PlaceholderType {
    /// A fresh root placeholder.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(PlaceholderInner {
            name: name.into(),
            origin: None,
            applied: Vec::new(),
            resolution: None,
            config: MetaOpConfig::default(),
            resolving: Cell::new(false),
        })))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// `true` if this placeholder stands for the result of an operation on another one.
    pub fn is_derived(&self) -> bool {
        self.0.borrow().origin.is_some()
    }

    pub fn ptr_eq(&self, other: &PlaceholderType) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Record `op` and return a placeholder value standing for its result.
    pub fn get_applied(&self, op: DeferredOp) -> TypedValue {
        let (root, path) = self.record(op);
        let root_name = match root.upgrade() {
            Some(root) => root.borrow().name.clone(),
            None => self.name(),
        };
        let name = path
            .render(&root_name)
            .unwrap_or_else(|_| format!("{root_name}: {path}"));

        let derived = PlaceholderType(Rc::new(RefCell::new(PlaceholderInner {
            name,
            origin: Some(Origin { root, path }),
            applied: Vec::new(),
            resolution: None,
            config: MetaOpConfig::default(),
            resolving: Cell::new(false),
        })));
        TypedValue::new(Type::Placeholder(derived))
    }

    /// Record `op` without producing a result.
    pub fn set_applied(&self, op: DeferredOp) {
        self.record(op);
    }

    /// The chains recorded on this placeholder's root, in application order.
    pub fn applied(&self) -> Vec<DeferredChain> {
        match self.root() {
            Some(root) => root.0.borrow().applied.clone(),
            None => Vec::new(),
        }
    }

    /// Resolve to `concrete` with the default [`MetaOpConfig`].
    pub fn resolve(&self, concrete: Type) -> Result<(), MetaOpError> {
        self.resolve_with(concrete, &MetaOpConfig::default())
    }

    /// Store `concrete` as this placeholder's resolution and replay the recorded chains against it.
    ///
    /// Replaying is idempotent: resolving again against the same type performs the same writes.
    pub fn resolve_with(&self, concrete: Type, config: &MetaOpConfig) -> Result<(), MetaOpError> {
        let chains = {
            let mut inner = self.0.borrow_mut();
            inner.resolution = Some(concrete.clone());
            inner.config = *config;
            inner.applied.clone()
        };
        tracing::debug!(placeholder = %self.name(), to = %concrete, chains = chains.len(), "resolving placeholder");

        for chain in &chains {
            chain.resolve_with(&concrete, config)?;
        }
        Ok(())
    }

    /// What this placeholder is known to be, if anything.
    ///
    /// For a derived placeholder this is its root's resolution folded through the path from the root.
    pub fn resolution(&self) -> Option<Type> {
        let (root, path) = {
            let inner = self.0.borrow();
            if let Some(resolution) = &inner.resolution {
                return Some(resolution.clone());
            }
            // re-entered through a root resolved to one of its own derived placeholders
            if inner.resolving.get() {
                return None;
            }
            let origin = inner.origin.as_ref()?;
            (origin.root.upgrade()?, origin.path.clone())
        };

        let (base, config) = {
            let root = root.borrow();
            (root.resolution.clone()?, root.config)
        };

        self.0.borrow().resolving.set(true);
        let folded = path.resolve_with(&base, &config);
        self.0.borrow().resolving.set(false);
        folded.ok()
    }

    /// Register "path to this placeholder, then `op`" on the root.
    ///
    /// Returns the root link and the full chain.
    fn record(&self, op: DeferredOp) -> (Weak<RefCell<PlaceholderInner>>, DeferredChain) {
        let (root, path) = {
            let inner = self.0.borrow();
            match &inner.origin {
                Some(origin) => (origin.root.clone(), origin.path.clone().then(op)),
                None => (Rc::downgrade(&self.0), DeferredChain::new(op)),
            }
        };
        match root.upgrade() {
            Some(root) => root.borrow_mut().applied.push(path.clone()),
            None => tracing::warn!(chain = %path, "root placeholder dropped; operation not recorded"),
        }
        (root, path)
    }

    fn root(&self) -> Option<PlaceholderType> {
        match &self.0.borrow().origin {
            Some(origin) => origin.root.upgrade().map(PlaceholderType),
            None => Some(self.clone()),
        }
    }
}

impl fmt::Debug for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("PlaceholderType")
            .field("name", &inner.name)
            .field("derived", &inner.origin.is_some())
            .field("applied", &inner.applied.len())
            .field("resolved", &inner.resolution.is_some())
            .finish()
    }
}
