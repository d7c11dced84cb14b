//! Markdown/MDX page parser.
//!
//! Turns a Markdown document with optional YAML front matter into a
//! [`ContentNode`] tree. Capitalized HTML tags (`<Tabs>`, `<Admonition type="tip">`)
//! become `element` nodes; other raw HTML is not carried into the tree.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::metadata::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::node::{Attrs, ContentNode, NodeKind};
use crate::toc::{slugify, table_of_contents, TocEntry};

/// A parsed page, before metadata resolution.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Parsed front matter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Content tree in document order
    pub content: Vec<ContentNode>,

    /// Nested table of contents
    pub toc: Vec<TocEntry>,
}

impl ParsedPage {
    pub fn new(frontmatter: Option<Frontmatter>, content: Vec<ContentNode>) -> Self {
        let toc = table_of_contents(&content);
        Self {
            frontmatter,
            content,
            toc,
        }
    }

    /// Text of the first level-1 heading, used as a title fallback.
    pub fn first_title(&self) -> Option<&str> {
        first_title(&self.toc)
    }
}

fn first_title(toc: &[TocEntry]) -> Option<&str> {
    toc.iter().find(|e| e.depth == 1).map(|e| e.text.as_str())
}

/// Errors that can occur when loading a page.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Front matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Invalid content tree in {page}: {message}")]
    InvalidJson { page: String, message: String },

    #[error("Unknown content kind `{kind}` in {page} at {pointer}")]
    UnknownContentKind {
        page: String,
        pointer: String,
        kind: String,
    },

    #[error("Element name `{name}` in {page} at {pointer} is reserved for a built-in kind")]
    ReservedName {
        page: String,
        pointer: String,
        name: String,
    },

    #[error("Missing field `{field}` in {page} at {pointer}")]
    MissingField {
        page: String,
        pointer: String,
        field: &'static str,
    },
}

/// Parse a Markdown/MDX document.
pub fn parse_markdown(source: &str) -> Result<ParsedPage, LoadError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let options = Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_STRIKETHROUGH;
    let mut tree = TreeBuilder::new();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(tag) => tree.start(tag),
            Event::End(tag) => tree.end(tag),
            Event::Text(text) => tree.text(&text),
            Event::Code(code) => tree.leaf(ContentNode::inline_code(code.to_string())),
            Event::SoftBreak | Event::HardBreak => tree.text("\n"),
            Event::Rule => tree.leaf(ContentNode::new(NodeKind::ThematicBreak)),
            Event::Html(html) | Event::InlineHtml(html) => tree.html(&html),
            Event::FootnoteReference(label) => tree.text(&format!("[^{}]", label)),
            Event::TaskListMarker(checked) => tree.text(if checked { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    Ok(ParsedPage::new(frontmatter, tree.finish()))
}

/// An open node while walking parser events.
#[derive(Debug)]
struct Frame {
    /// `None` for tags without a content kind; their children are spliced into the parent.
    kind: Option<NodeKind>,
    attrs: Attrs,
    literal: Option<String>,
    children: Vec<ContentNode>,
    /// Opened by a component tag rather than a Markdown construct.
    from_html: bool,
}

impl Frame {
    fn new(kind: Option<NodeKind>) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            literal: None,
            children: Vec::new(),
            from_html: false,
        }
    }

    fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    fn into_node(self) -> Result<ContentNode, Vec<ContentNode>> {
        let Some(kind) = self.kind else {
            return Err(self.children);
        };

        let mut node = ContentNode::new(kind.clone())
            .with_attrs(self.attrs)
            .with_children(self.children);

        if let Some(text) = self.literal {
            node = node.with_text(text);
        }

        if kind == NodeKind::Heading && node.attr("id").is_none() {
            let id = slugify(&node.plain_text());
            node = node.with_attr("id", id);
        }

        Ok(node)
    }
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(None)],
        }
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            // Component tags in HTML blocks may span several Markdown blocks.
            Tag::HtmlBlock => return,
            Tag::Paragraph => Frame::new(Some(NodeKind::Paragraph)),
            Tag::Heading {
                level, id, classes, ..
            } => {
                let mut attrs = Attrs::new();
                attrs.insert("depth".into(), heading_depth(level).to_string());
                if let Some(id) = id {
                    attrs.insert("id".into(), id.to_string());
                }
                if !classes.is_empty() {
                    let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
                    attrs.insert("class".into(), classes.join(" "));
                }
                Frame::new(Some(NodeKind::Heading)).with_attrs(attrs)
            }
            Tag::BlockQuote(_) => Frame::new(Some(NodeKind::Blockquote)),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let mut frame = Frame::new(Some(NodeKind::CodeBlock)).with_attrs(code_attrs(&info));
                frame.literal = Some(String::new());
                frame
            }
            Tag::List(start) => {
                let mut attrs = Attrs::new();
                attrs.insert("ordered".into(), start.is_some().to_string());
                if let Some(n) = start.filter(|n| *n != 1) {
                    attrs.insert("start".into(), n.to_string());
                }
                Frame::new(Some(NodeKind::List)).with_attrs(attrs)
            }
            Tag::Item => Frame::new(Some(NodeKind::ListItem)),
            Tag::Emphasis => Frame::new(Some(NodeKind::Emphasis)),
            Tag::Strong => Frame::new(Some(NodeKind::Strong)),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut attrs = Attrs::new();
                attrs.insert("href".into(), dest_url.to_string());
                if !title.is_empty() {
                    attrs.insert("title".into(), title.to_string());
                }
                Frame::new(Some(NodeKind::Link)).with_attrs(attrs)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut attrs = Attrs::new();
                attrs.insert("src".into(), dest_url.to_string());
                if !title.is_empty() {
                    attrs.insert("title".into(), title.to_string());
                }
                Frame::new(Some(NodeKind::Image)).with_attrs(attrs)
            }
            _ => Frame::new(None),
        };

        self.stack.push(frame);
    }

    fn end(&mut self, tag: TagEnd) {
        if tag == TagEnd::HtmlBlock {
            return;
        }

        // Component tags left open inside a Markdown construct close with it.
        while self.stack.len() > 1 && self.top().from_html {
            self.close_top();
        }
        if self.stack.len() > 1 {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let parent = self.top();
        match frame.into_node() {
            Ok(node) => parent.children.push(node),
            Err(children) => parent.children.extend(children),
        }
    }

    fn text(&mut self, text: &str) {
        let top = self.top();
        match top.literal.as_mut() {
            Some(literal) => literal.push_str(text),
            None => top.children.push(ContentNode::text(text)),
        }
    }

    fn leaf(&mut self, node: ContentNode) {
        self.top().children.push(node);
    }

    fn html(&mut self, html: &str) {
        if self.top().literal.is_some() {
            self.text(html);
            return;
        }

        let mut last = 0;
        let mut saw_component = false;

        for caps in COMPONENT_TAG.captures_iter(html) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            saw_component = true;

            self.html_text(&html[last..whole.start()]);
            last = whole.end();

            let closing = !caps[1].is_empty();
            let name = caps[2].to_string();
            let self_closing = !caps[4].is_empty();

            if closing {
                let top = self.top();
                if top.from_html && top.kind.as_ref().map(NodeKind::component_name) == Some(name.as_str()) {
                    self.close_top();
                }
            } else if self_closing {
                self.leaf(ContentNode::element(name, parse_attrs(&caps[3]), Vec::new()));
            } else {
                let mut frame = Frame::new(Some(NodeKind::Element(name))).with_attrs(parse_attrs(&caps[3]));
                frame.from_html = true;
                self.stack.push(frame);
            }
        }

        if saw_component {
            self.html_text(&html[last..]);
        }
    }

    /// Text around component tags, with any plain HTML tags removed.
    fn html_text(&mut self, chunk: &str) {
        let text = PLAIN_TAG.replace_all(chunk, "");
        let text = text.trim();
        if !text.is_empty() {
            self.text(text);
        }
    }

    fn finish(mut self) -> Vec<ContentNode> {
        while self.stack.len() > 1 {
            self.close_top();
        }
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }
}

static COMPONENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Z][A-Za-z0-9]*)((?:\s+[^<>]*?)?)\s*(/?)>")
        .expect("Invalid component tag regex")
});

static PLAIN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--.*?-->|</?[a-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("Invalid HTML tag regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#)
        .expect("Invalid attribute regex")
});

/// Parse component tag attributes. Bare attributes become `"true"`.
fn parse_attrs(source: &str) -> Attrs {
    ATTRIBUTE
        .captures_iter(source)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().trim().trim_matches(|c| c == '"' || c == '\''))
                .unwrap_or("true");
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Attributes of a fenced code block from its info string.
///
/// Supports `python title="schema.py" showLineNumbers`.
fn code_attrs(info: &str) -> Attrs {
    let mut attrs = Attrs::new();

    if let Some(lang) = info.split_whitespace().next().filter(|l| !l.contains('=')) {
        attrs.insert("language".into(), lang.to_lowercase());
    }
    if let Some(title) = extract_title(info) {
        attrs.insert("title".into(), title);
    }
    if info.split_whitespace().any(|w| w == "showLineNumbers") {
        attrs.insert("line_numbers".into(), "true".into());
    }

    attrs
}

/// Extract a title from a code fence info string if present.
fn extract_title(info: &str) -> Option<String> {
    let start = info.find("title=")?;
    let rest = &info[start + 6..];

    if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some(quoted[..end].to_string());
    }

    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let title = &rest[..end];
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_page() {
        let source = r#"---
title: Getting Started
sidebar_position: 1
---

# Intro

Turms generates **typed** clients.

```python title="query.py"
print("hi")
```

## Install {#installation}

- one
- two
"#;

        let page = parse_markdown(source).unwrap();

        let fm = page.frontmatter.as_ref().unwrap();
        assert_eq!(fm.title.as_deref(), Some("Getting Started"));

        let kinds: Vec<&str> = page.content.iter().map(|n| n.kind().tag()).collect();
        assert_eq!(
            kinds,
            vec!["heading", "paragraph", "code_block", "heading", "list"]
        );

        let code = &page.content[2];
        assert_eq!(code.attr("language"), Some("python"));
        assert_eq!(code.attr("title"), Some("query.py"));
        assert_eq!(code.text_content(), Some("print(\"hi\")\n"));

        assert_eq!(page.toc.len(), 1);
        assert_eq!(page.toc[0].anchor, "intro");
        assert_eq!(page.toc[0].children[0].anchor, "installation");
        assert_eq!(page.first_title(), Some("Intro"));

        let list = &page.content[4];
        assert_eq!(list.attr("ordered"), Some("false"));
        assert_eq!(list.children().len(), 2);
    }

    #[test]
    fn keeps_inline_structure() {
        let page = parse_markdown("See [the docs](https://example.com) and `turms gen`.").unwrap();

        let para = &page.content[0];
        let kinds: Vec<&str> = para.children().iter().map(|n| n.kind().tag()).collect();
        assert_eq!(kinds, vec!["text", "link", "text", "inline_code", "text"]);
        assert_eq!(para.children()[1].attr("href"), Some("https://example.com"));
    }

    #[test]
    fn parses_component_blocks() {
        let source = r#"
<Admonition type="tip" collapsible>

Remember to run the generator.

</Admonition>
"#;

        let page = parse_markdown(source).unwrap();

        assert_eq!(page.content.len(), 1);
        let element = &page.content[0];
        assert_eq!(element.kind(), &NodeKind::Element("Admonition".into()));
        assert_eq!(element.attr("type"), Some("tip"));
        assert_eq!(element.attr("collapsible"), Some("true"));
        assert_eq!(element.children()[0].kind(), &NodeKind::Paragraph);
    }

    #[test]
    fn parses_inline_components() {
        let page = parse_markdown("Status: <Badge color=\"green\">stable</Badge> now").unwrap();

        let para = &page.content[0];
        let badge = para
            .children()
            .iter()
            .find(|n| n.kind().component_name() == "Badge")
            .unwrap();
        assert_eq!(badge.attr("color"), Some("green"));
        assert_eq!(badge.plain_text(), "stable");
    }

    #[test]
    fn drops_plain_html() {
        let page = parse_markdown("<div align=\"center\">\n\nCentered\n\n</div>\n").unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].plain_text(), "Centered");
    }

    #[test]
    fn drops_plain_html_around_components() {
        let page = parse_markdown("<div align=\"center\"><Badge>new</Badge></div>\n").unwrap();

        assert_eq!(page.content.len(), 1);
        let badge = &page.content[0];
        assert_eq!(badge.kind(), &NodeKind::Element("Badge".into()));
        assert_eq!(badge.children(), &[ContentNode::text("new")]);
    }

    #[test]
    fn ordered_list_keeps_start() {
        let page = parse_markdown("3. three\n4. four\n").unwrap();

        assert_eq!(page.content[0].attr("ordered"), Some("true"));
        assert_eq!(page.content[0].attr("start"), Some("3"));
    }

    #[test]
    fn extracts_code_titles() {
        assert_eq!(
            extract_title("python title=\"schema.py\""),
            Some("schema.py".to_string())
        );
        assert_eq!(
            extract_title("yaml title=graphql.config.yaml"),
            Some("graphql.config.yaml".to_string())
        );
        assert_eq!(extract_title("python"), None);
    }
}
