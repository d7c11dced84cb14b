//! Pre-generated JSON content trees.
//!
//! A JSON page looks like:
//!
//! ```json
//! {
//!   "metadata": { "title": "Intro", "slug": "/intro" },
//!   "content": [
//!     { "kind": "heading", "attrs": { "depth": 1 }, "children": [{ "kind": "text", "text": "Intro" }] },
//!     { "kind": "element", "name": "Admonition", "attrs": { "type": "tip" }, "children": [] }
//!   ]
//! }
//! ```
//!
//! Kinds outside the closed set are rejected with the pointer of the offending node.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::metadata::Frontmatter;
use crate::node::{Attrs, ContentNode, NodeKind};
use crate::parser::{LoadError, ParsedPage};
use crate::toc::slugify;

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    metadata: Option<Frontmatter>,
    content: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attrs: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    children: Vec<RawNode>,
}

/// Parse a JSON page. `page` names the source in error messages.
pub fn parse_json(page: &str, source: &str) -> Result<ParsedPage, LoadError> {
    let raw: RawPage = serde_json::from_str(source).map_err(|e| LoadError::InvalidJson {
        page: page.to_string(),
        message: e.to_string(),
    })?;

    let content = raw
        .content
        .into_iter()
        .enumerate()
        .map(|(i, node)| convert(page, &format!("/content/{}", i), node))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedPage::new(raw.metadata, content))
}

fn convert(page: &str, pointer: &str, raw: RawNode) -> Result<ContentNode, LoadError> {
    let Some(kind) = NodeKind::from_tag(&raw.kind, raw.name.as_deref()) else {
        if raw.kind == "element" {
            return Err(LoadError::MissingField {
                page: page.to_string(),
                pointer: pointer.to_string(),
                field: "name",
            });
        }
        return Err(LoadError::UnknownContentKind {
            page: page.to_string(),
            pointer: pointer.to_string(),
            kind: raw.kind,
        });
    };

    if let NodeKind::Element(name) = &kind {
        if NodeKind::from_tag(name, None).is_some() {
            return Err(LoadError::ReservedName {
                page: page.to_string(),
                pointer: pointer.to_string(),
                name: name.clone(),
            });
        }
    }

    if kind.is_literal() && raw.text.is_none() {
        return Err(LoadError::MissingField {
            page: page.to_string(),
            pointer: pointer.to_string(),
            field: "text",
        });
    }

    let attrs: Attrs = raw
        .attrs
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();

    let children = raw
        .children
        .into_iter()
        .enumerate()
        .map(|(i, child)| convert(page, &format!("{}/children/{}", pointer, i), child))
        .collect::<Result<Vec<_>, _>>()?;

    let mut node = ContentNode::new(kind.clone())
        .with_attrs(attrs)
        .with_children(children);
    if let Some(text) = raw.text {
        node = node.with_text(text);
    }
    if kind == NodeKind::Heading && node.attr("id").is_none() {
        let id = slugify(&node.plain_text());
        node = node.with_attr("id", id);
    }

    Ok(node)
}
