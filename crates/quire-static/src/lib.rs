//! Static site generator for quire documentation.
//!
//! This crate loads `quire.toml`, discovers content pages, composes each one
//! through a [`quire_compose::PageComposer`] and writes HTML with minijinja
//! templates, plus CSS, a search index and a sitemap.

pub mod assets;
pub mod builder;
pub mod config;
pub mod overrides;
pub mod templates;

pub use assets::{palette, palette_names, AssetPipeline, Palette};
pub use builder::{BuildError, BuildResult, StaticBuilder};
pub use config::{ConfigError, SiteConfig};
pub use overrides::{build_registry, TemplateRenderer};
pub use templates::{Chrome, Context, NavItem, TemplateEngine};
