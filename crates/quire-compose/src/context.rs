//! Scoped component defaults.
//!
//! A [`DefaultsContext`] is a stack of scopes mapping component names to
//! props. Lookups walk from the innermost scope outwards and return the first
//! match, so an inner scope shadows an outer one without removing anything.
//!
//! The store is an ordinary value: each page render creates its own and passes
//! it down the tree walk explicitly.

use std::ops::{Deref, DerefMut};

use quire_content::Defaults;

use crate::merge::{merge, Props};

/// Nested, scope-based default props keyed by component name.
#[derive(Debug, Default)]
pub struct DefaultsContext {
    scopes: Vec<Defaults>,
}

impl DefaultsContext {
    /// An empty store with no open scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `body` inside a new scope holding `additions`.
    ///
    /// The scope is closed on every exit path, including when `body` returns
    /// an error or panics.
    pub fn with_scope<R>(&mut self, additions: Defaults, body: impl FnOnce(&mut Self) -> R) -> R {
        let mut scope = self.enter(additions);
        body(&mut *scope)
    }

    /// Open a scope that closes when the returned guard is dropped.
    pub fn enter(&mut self, additions: Defaults) -> ScopeGuard<'_> {
        self.scopes.push(additions);
        ScopeGuard { context: self }
    }

    /// Props for `name`, from the innermost scope that defines it.
    pub fn read(&self, name: &str) -> Option<&Props> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// The full mapping visible from the innermost scope.
    pub fn visible(&self) -> Defaults {
        self.scopes
            .iter()
            .fold(Defaults::new(), |acc, scope| merge(&acc, &[scope]))
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

/// An open scope on a [`DefaultsContext`].
pub struct ScopeGuard<'a> {
    context: &'a mut DefaultsContext,
}

impl Deref for ScopeGuard<'_> {
    type Target = DefaultsContext;

    fn deref(&self) -> &Self::Target {
        &*self.context
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.context
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.context.scopes.pop();
    }
}
