//! Content composition for quire pages.
//!
//! This crate turns a page's content tree into markup. Renderers are looked
//! up by component name in an immutable [`Registry`]; component defaults flow
//! down the tree through a scoped [`DefaultsContext`] and are merged with each
//! node's own attributes before the renderer sees them.

pub mod builtin;
pub mod composer;
pub mod context;
pub mod merge;
pub mod registry;

pub use builtin::{builtin_registry, escape_html};
pub use composer::{ComposeError, PageComposer, RenderedPage, SidebarEntry};
pub use context::{DefaultsContext, ScopeGuard};
pub use merge::{merge, Props};
pub use registry::{resolve, CodeFallback, Registry, RenderInput, Renderer};
