//! Content model for quire pages.
//!
//! This crate provides the immutable page content tree, page metadata, and the
//! loaders that produce them from Markdown/MDX files with YAML front matter or
//! from pre-generated JSON content trees.

pub mod json;
pub mod metadata;
pub mod node;
pub mod parser;
pub mod toc;

pub use json::parse_json;
pub use metadata::{Defaults, Frontmatter, NavLink, PageMetadata};
pub use node::{heading_depth, Attrs, ContentNode, NodeKind};
pub use parser::{parse_markdown, LoadError, ParsedPage};
pub use toc::{build_toc, slugify, table_of_contents, TocEntry};
