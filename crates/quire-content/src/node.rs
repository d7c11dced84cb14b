//! Content nodes: the static, renderable units of a page.

use std::collections::BTreeMap;

use crate::toc::slugify;

/// Attribute map carried by a node (e.g. `language` on a code block).
pub type Attrs = BTreeMap<String, String>;

/// Depth of a heading without a usable `depth` attribute.
pub const DEFAULT_HEADING_DEPTH: u8 = 2;

/// Heading depth from a `depth` attribute value, clamped to `1..=6`.
pub fn heading_depth(value: Option<&str>) -> u8 {
    value
        .and_then(|depth| depth.trim().parse::<i64>().ok())
        .map(|depth| depth.clamp(1, 6) as u8)
        .unwrap_or(DEFAULT_HEADING_DEPTH)
}

/// The closed set of content kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading,
    Paragraph,
    Text,
    CodeBlock,
    InlineCode,
    List,
    ListItem,
    Link,
    Image,
    Emphasis,
    Strong,
    Blockquote,
    ThematicBreak,
    /// A named component such as `Tabs` or `Admonition`.
    Element(String),
}

impl NodeKind {
    /// The kind tag used in serialized content trees.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Text => "text",
            Self::CodeBlock => "code_block",
            Self::InlineCode => "inline_code",
            Self::List => "list",
            Self::ListItem => "list_item",
            Self::Link => "link",
            Self::Image => "image",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Blockquote => "blockquote",
            Self::ThematicBreak => "thematic_break",
            Self::Element(_) => "element",
        }
    }

    /// Parse a kind tag. `element` needs the component name.
    ///
    /// Returns `None` for tags outside the closed set.
    pub fn from_tag(tag: &str, name: Option<&str>) -> Option<Self> {
        let kind = match tag {
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "text" => Self::Text,
            "code_block" => Self::CodeBlock,
            "inline_code" => Self::InlineCode,
            "list" => Self::List,
            "list_item" => Self::ListItem,
            "link" => Self::Link,
            "image" => Self::Image,
            "emphasis" => Self::Emphasis,
            "strong" => Self::Strong,
            "blockquote" => Self::Blockquote,
            "thematic_break" => Self::ThematicBreak,
            "element" => Self::Element(name?.to_string()),
            _ => return None,
        };
        Some(kind)
    }

    /// Name used to look up the renderer for this kind.
    ///
    /// Built-in kinds use their tag; elements use their component name.
    pub fn component_name(&self) -> &str {
        match self {
            Self::Element(name) => name,
            other => other.tag(),
        }
    }

    /// Whether nodes of this kind carry literal text.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Text | Self::CodeBlock | Self::InlineCode)
    }
}

/// One renderable unit of page content.
///
/// Nodes are built once when a page is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    kind: NodeKind,
    text: Option<String>,
    attrs: Attrs,
    children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: None,
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children = children;
        self
    }

    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text).with_text(text)
    }

    /// A heading whose anchor is derived from its text.
    pub fn heading(text: impl Into<String>, depth: u8) -> Self {
        let text = text.into();
        Self::new(NodeKind::Heading)
            .with_attr("depth", depth.to_string())
            .with_attr("id", slugify(&text))
            .with_children(vec![Self::text(text)])
    }

    /// A paragraph holding a single run of text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph).with_children(vec![Self::text(text)])
    }

    /// A fenced code block.
    pub fn code_block(language: Option<&str>, source: impl Into<String>) -> Self {
        let node = Self::new(NodeKind::CodeBlock).with_text(source);
        match language {
            Some(lang) if !lang.is_empty() => node.with_attr("language", lang),
            _ => node,
        }
    }

    pub fn inline_code(code: impl Into<String>) -> Self {
        Self::new(NodeKind::InlineCode).with_text(code)
    }

    pub fn link(href: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self::new(NodeKind::Link)
            .with_attr("href", href)
            .with_children(children)
    }

    /// A list of items; each item is wrapped in a `list_item` node.
    pub fn list(ordered: bool, items: Vec<Vec<ContentNode>>) -> Self {
        let items = items
            .into_iter()
            .map(|children| Self::new(NodeKind::ListItem).with_children(children))
            .collect();
        Self::new(NodeKind::List)
            .with_attr("ordered", ordered.to_string())
            .with_children(items)
    }

    /// A named component element.
    pub fn element(name: impl Into<String>, attrs: Attrs, children: Vec<ContentNode>) -> Self {
        Self::new(NodeKind::Element(name.into()))
            .with_attrs(attrs)
            .with_children(children)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
