//! Renderer registry and component resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use quire_content::ContentNode;

use crate::merge::{merge, Props};

/// Everything a renderer gets for one node.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Component name the renderer was resolved for
    pub name: &'a str,
    /// The node being rendered
    pub node: &'a ContentNode,
    /// Effective props: inherited defaults merged with node attributes
    pub props: &'a Props,
    /// Already-rendered children, in document order
    pub children: &'a str,
}

impl RenderInput<'_> {
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }
}

/// Produces markup for one node.
pub trait Renderer: Send + Sync {
    fn render(&self, input: &RenderInput<'_>) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&RenderInput<'_>) -> String + Send + Sync,
{
    fn render(&self, input: &RenderInput<'_>) -> String {
        self(input)
    }
}

/// Renders any children verbatim as inline code.
///
/// Used for component names that have no registered renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeFallback;

impl Renderer for CodeFallback {
    fn render(&self, input: &RenderInput<'_>) -> String {
        format!("<code>{}</code>", input.children)
    }
}

/// An immutable lookup table from component names to renderers.
#[derive(Clone, Default)]
pub struct Registry {
    renderers: BTreeMap<String, Arc<dyn Renderer>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a renderer, replacing any previous one with the same name.
    pub fn with(mut self, name: impl Into<String>, renderer: impl Renderer + 'static) -> Self {
        self.insert(name, Arc::new(renderer));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, renderer: Arc<dyn Renderer>) {
        self.renderers.insert(name.into(), renderer);
    }

    /// Look up a renderer by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Renderer> {
        self.renderers.get(name).map(|r| r.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// This registry with `overrides` layered on top; overrides win.
    pub fn overlay(&self, overrides: &Registry) -> Registry {
        Registry {
            renderers: merge(&self.renderers, &[&overrides.renderers]),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("renderers", &self.names())
            .finish()
    }
}

/// Resolve `name` against `registry`, falling back to `fallback`.
pub fn resolve<'a>(name: &str, registry: &'a Registry, fallback: &'a dyn Renderer) -> &'a dyn Renderer {
    registry.get(name).unwrap_or(fallback)
}
