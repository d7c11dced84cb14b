//! Built-in renderers for the standard content kinds.

use quire_content::heading_depth;

use crate::registry::{Registry, RenderInput};

/// A registry with a renderer for every built-in content kind.
pub fn builtin_registry() -> Registry {
    Registry::new()
        .with("heading", heading)
        .with("paragraph", paragraph)
        .with("text", text)
        .with("code_block", code_block)
        .with("inline_code", inline_code)
        .with("list", list)
        .with("list_item", list_item)
        .with("link", link)
        .with("image", image)
        .with("emphasis", emphasis)
        .with("strong", strong)
        .with("blockquote", blockquote)
        .with("thematic_break", thematic_break)
}

fn heading(input: &RenderInput<'_>) -> String {
    let depth = heading_depth(input.prop("depth"));
    let id = input
        .prop("id")
        .map(|id| format!(" id=\"{}\"", escape_html(id)))
        .unwrap_or_default();

    format!(
        "<h{depth}{id}{class}>{children}</h{depth}>\n",
        class = class_attr(input),
        children = input.children
    )
}

fn paragraph(input: &RenderInput<'_>) -> String {
    format!("<p{}>{}</p>\n", class_attr(input), input.children)
}

fn text(input: &RenderInput<'_>) -> String {
    escape_html(input.node.text_content().unwrap_or_default())
}

fn code_block(input: &RenderInput<'_>) -> String {
    let language = input.prop("language").unwrap_or("text");
    let source = input.node.text_content().unwrap_or_default();

    let mut out = format!("<div class=\"code-block{}\">", extra_class(input));
    if let Some(title) = input.prop("title") {
        out.push_str(&format!(
            "<div class=\"code-block-title\">{}</div>",
            escape_html(title)
        ));
    }

    let numbered = input.prop("line_numbers") == Some("true");
    out.push_str(&format!(
        "<pre><code class=\"language-{}{}\">",
        escape_html(language),
        if numbered { " line-numbers" } else { "" }
    ));
    out.push_str(&escape_html(source));
    out.push_str("</code></pre></div>\n");
    out
}

fn inline_code(input: &RenderInput<'_>) -> String {
    format!(
        "<code{}>{}</code>",
        class_attr(input),
        escape_html(input.node.text_content().unwrap_or_default())
    )
}

fn list(input: &RenderInput<'_>) -> String {
    if input.prop("ordered") == Some("true") {
        let start = input
            .prop("start")
            .map(|s| format!(" start=\"{}\"", escape_html(s)))
            .unwrap_or_default();
        format!("<ol{}{}>\n{}</ol>\n", start, class_attr(input), input.children)
    } else {
        format!("<ul{}>\n{}</ul>\n", class_attr(input), input.children)
    }
}

fn list_item(input: &RenderInput<'_>) -> String {
    format!("<li{}>{}</li>\n", class_attr(input), input.children)
}

fn link(input: &RenderInput<'_>) -> String {
    let mut attrs = format!(
        " href=\"{}\"",
        escape_html(input.prop("href").unwrap_or("#"))
    );
    for key in ["title", "target", "rel"] {
        if let Some(value) = input.prop(key) {
            attrs.push_str(&format!(" {}=\"{}\"", key, escape_html(value)));
        }
    }
    format!("<a{}{}>{}</a>", attrs, class_attr(input), input.children)
}

fn image(input: &RenderInput<'_>) -> String {
    let mut attrs = format!(
        " src=\"{}\" alt=\"{}\"",
        escape_html(input.prop("src").unwrap_or_default()),
        escape_html(&input.node.plain_text())
    );
    if let Some(title) = input.prop("title") {
        attrs.push_str(&format!(" title=\"{}\"", escape_html(title)));
    }
    if let Some(loading) = input.prop("loading") {
        attrs.push_str(&format!(" loading=\"{}\"", escape_html(loading)));
    }
    format!("<img{}{}>", attrs, class_attr(input))
}

fn emphasis(input: &RenderInput<'_>) -> String {
    format!("<em{}>{}</em>", class_attr(input), input.children)
}

fn strong(input: &RenderInput<'_>) -> String {
    format!("<strong{}>{}</strong>", class_attr(input), input.children)
}

fn blockquote(input: &RenderInput<'_>) -> String {
    format!(
        "<blockquote{}>\n{}</blockquote>\n",
        class_attr(input),
        input.children
    )
}

fn thematic_break(input: &RenderInput<'_>) -> String {
    format!("<hr{}>\n", class_attr(input))
}

fn class_attr(input: &RenderInput<'_>) -> String {
    input
        .prop("class")
        .map(|c| format!(" class=\"{}\"", escape_html(c)))
        .unwrap_or_default()
}

fn extra_class(input: &RenderInput<'_>) -> String {
    input
        .prop("class")
        .map(|c| format!(" {}", escape_html(c)))
        .unwrap_or_default()
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::Props;
    use crate::registry::Renderer;
    use quire_content::ContentNode;

    fn render(name: &str, node: &ContentNode, children: &str) -> String {
        let registry = builtin_registry();
        let renderer = registry.get(name).unwrap();
        renderer.render(&RenderInput {
            name,
            node,
            props: node.attrs(),
            children,
        })
    }

    #[test]
    fn covers_every_builtin_kind() {
        let names = builtin_registry();
        for kind in [
            "heading",
            "paragraph",
            "text",
            "code_block",
            "inline_code",
            "list",
            "list_item",
            "link",
            "image",
            "emphasis",
            "strong",
            "blockquote",
            "thematic_break",
        ] {
            assert!(names.contains(kind), "missing renderer for {kind}");
        }
    }

    #[test]
    fn renders_heading_with_anchor() {
        let node = ContentNode::heading("Intro", 1);

        assert_eq!(
            render("heading", &node, "Intro"),
            "<h1 id=\"intro\">Intro</h1>\n"
        );
    }

    #[test]
    fn heading_depth_matches_table_of_contents() {
        let node = ContentNode::heading("Deep", 9);
        let toc = quire_content::table_of_contents(std::slice::from_ref(&node));

        assert_eq!(
            render("heading", &node, "Deep"),
            "<h6 id=\"deep\">Deep</h6>\n"
        );
        assert_eq!(toc[0].depth, 6);
    }

    #[test]
    fn escapes_text() {
        let node = ContentNode::text("a < b && c");

        assert_eq!(render("text", &node, ""), "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn renders_code_block_with_title() {
        let node = ContentNode::code_block(Some("python"), "x = '<1>'\n").with_attr("title", "a.py");

        let html = render("code_block", &node, "");

        assert!(html.contains("<div class=\"code-block-title\">a.py</div>"));
        assert!(html.contains("class=\"language-python\""));
        assert!(html.contains("x = &#39;&lt;1&gt;&#39;"));
    }

    #[test]
    fn code_block_defaults_to_text() {
        let node = ContentNode::code_block(None, "plain");

        assert!(render("code_block", &node, "").contains("language-text"));
    }

    #[test]
    fn link_uses_default_target() {
        let node = ContentNode::link("https://github.com", vec![]);
        let mut props: Props = node.attrs().clone();
        props.insert("target".into(), "_blank".into());

        let html = builtin_registry().get("link").unwrap().render(&RenderInput {
            name: "link",
            node: &node,
            props: &props,
            children: "GitHub",
        });

        assert_eq!(
            html,
            "<a href=\"https://github.com\" target=\"_blank\">GitHub</a>"
        );
    }

    #[test]
    fn ordered_list_with_start() {
        let node = ContentNode::list(true, vec![]).with_attr("start", "3");

        assert_eq!(
            render("list", &node, "<li>x</li>\n"),
            "<ol start=\"3\">\n<li>x</li>\n</ol>\n"
        );
    }
}
