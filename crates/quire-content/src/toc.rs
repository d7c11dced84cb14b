//! Table of contents built from page headings.

use serde::Serialize;

use crate::node::{heading_depth, ContentNode, NodeKind};

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub text: String,
    /// Anchor ID (without `#`)
    pub anchor: String,
    /// Heading level (1-6)
    pub depth: u8,
    /// Nested entries
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(text: impl Into<String>, anchor: impl Into<String>, depth: u8) -> Self {
        Self {
            text: text.into(),
            anchor: anchor.into(),
            depth,
            children: Vec::new(),
        }
    }
}

/// Collect headings from a content tree in document order.
///
/// The returned entries are flat; see [`build_toc`] for nesting.
pub fn headings(nodes: &[ContentNode]) -> Vec<TocEntry> {
    let mut out = Vec::new();
    collect_headings(nodes, &mut out);
    out
}

fn collect_headings(nodes: &[ContentNode], out: &mut Vec<TocEntry>) {
    for node in nodes {
        if *node.kind() == NodeKind::Heading {
            let text = node.plain_text();
            let anchor = node
                .attr("id")
                .map(str::to_string)
                .unwrap_or_else(|| slugify(&text));
            let depth = heading_depth(node.attr("depth"));
            out.push(TocEntry::new(text, anchor, depth));
        } else {
            collect_headings(node.children(), out);
        }
    }
}

/// Nest a flat heading sequence.
///
/// Each entry becomes a child of the nearest preceding entry with a smaller depth.
pub fn build_toc(flat: impl IntoIterator<Item = TocEntry>) -> Vec<TocEntry> {
    let mut roots = Vec::new();
    for entry in flat {
        insert(&mut roots, entry);
    }
    roots
}

fn insert(siblings: &mut Vec<TocEntry>, entry: TocEntry) {
    match siblings.last_mut() {
        Some(last) if last.depth < entry.depth => insert(&mut last.children, entry),
        _ => siblings.push(entry),
    }
}

/// Headings of a content tree, nested.
pub fn table_of_contents(nodes: &[ContentNode]) -> Vec<TocEntry> {
    build_toc(headings(nodes))
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamps_out_of_range_depths() {
        let deep = ContentNode::new(NodeKind::Heading)
            .with_attr("depth", "9")
            .with_children(vec![ContentNode::text("Deep")]);
        let shallow = ContentNode::new(NodeKind::Heading)
            .with_attr("depth", "0")
            .with_children(vec![ContentNode::text("Top")]);

        let flat = headings(&[shallow, deep]);

        assert_eq!(flat[0].depth, 1);
        assert_eq!(flat[1].depth, 6);
        assert_eq!(flat[1].anchor, "deep");
    }

    #[test]
    fn nests_by_depth() {
        let flat = vec![
            TocEntry::new("Intro", "intro", 1),
            TocEntry::new("Install", "install", 2),
            TocEntry::new("Pip", "pip", 3),
            TocEntry::new("Usage", "usage", 2),
            TocEntry::new("Appendix", "appendix", 1),
        ];

        let toc = build_toc(flat);

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].children.len(), 2);
        assert_eq!(toc[0].children[0].children[0].anchor, "pip");
        assert_eq!(toc[0].children[1].text, "Usage");
        assert!(toc[1].children.is_empty());
    }

    #[test]
    fn shallower_first_heading_stays_at_root() {
        let toc = build_toc(vec![
            TocEntry::new("Deep", "deep", 3),
            TocEntry::new("Shallow", "shallow", 2),
        ]);

        assert_eq!(toc.len(), 2);
    }

    #[test]
    fn collects_headings_from_tree() {
        let nodes = vec![
            ContentNode::heading("Intro", 1),
            ContentNode::paragraph("Hello"),
            ContentNode::element(
                "Tabs",
                Default::default(),
                vec![ContentNode::heading("Inside Tabs", 2)],
            ),
        ];

        let toc = table_of_contents(&nodes);

        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].anchor, "intro");
        assert_eq!(toc[0].children[0].anchor, "inside-tabs");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
