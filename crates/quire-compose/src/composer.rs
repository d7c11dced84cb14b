//! Page composition.
//!
//! The composer walks a page's content tree depth-first. For every node it
//! merges the node's attributes over the defaults inherited for the node's
//! component name, renders the children, resolves a renderer, and appends the
//! output in document order.

use std::sync::Arc;

use serde::Serialize;

use quire_content::{ContentNode, Defaults, NavLink, PageMetadata, TocEntry};

use crate::builtin::builtin_registry;
use crate::context::DefaultsContext;
use crate::merge::{merge, Props};
use crate::registry::{resolve, Registry, RenderInput, Renderer};

static NO_PROPS: Props = Props::new();

/// Errors raised while configuring a composer.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("No fallback renderer configured: unregistered component names cannot be resolved")]
    MissingFallback,
}

/// One sidebar entry built from the table of contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarEntry {
    pub label: String,
    pub href: String,
    pub depth: u8,
    pub children: Vec<SidebarEntry>,
}

impl From<&TocEntry> for SidebarEntry {
    fn from(entry: &TocEntry) -> Self {
        Self {
            label: entry.text.clone(),
            href: format!("#{}", entry.anchor),
            depth: entry.depth,
            children: entry.children.iter().map(SidebarEntry::from).collect(),
        }
    }
}

/// A fully composed page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// Rendered body markup
    pub body: String,
    /// Table of contents sidebar
    pub sidebar: Vec<SidebarEntry>,
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
    pub edit_url: Option<String>,
}

/// Renders pages through an immutable registry.
///
/// A composer is shared read-only across pages; every call to
/// [`render`](Self::render) gets its own [`DefaultsContext`].
pub struct PageComposer {
    registry: Registry,
    fallback: Arc<dyn Renderer>,
    site_defaults: Defaults,
}

impl PageComposer {
    /// Build a composer from theme overrides, a fallback and site-wide defaults.
    ///
    /// `overrides` are layered over the built-in renderers. The fallback is
    /// mandatory; without one an unregistered component name has no renderer.
    pub fn new(
        overrides: Registry,
        fallback: Option<Arc<dyn Renderer>>,
        site_defaults: Defaults,
    ) -> Result<Self, ComposeError> {
        let fallback = fallback.ok_or(ComposeError::MissingFallback)?;
        let registry = builtin_registry().overlay(&overrides);

        tracing::debug!(
            "Composer ready with {} renderers ({} overrides)",
            registry.len(),
            overrides.len()
        );

        Ok(Self {
            registry,
            fallback,
            site_defaults,
        })
    }

    /// The effective registry (built-ins plus overrides).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Compose one page.
    pub fn render(
        &self,
        content: &[ContentNode],
        metadata: &PageMetadata,
        toc: &[TocEntry],
    ) -> RenderedPage {
        let mut ctx = DefaultsContext::new();

        let body = ctx.with_scope(self.site_defaults.clone(), |ctx| {
            ctx.with_scope(metadata.defaults.clone(), |ctx| {
                let mut out = String::new();
                self.render_nodes(content, ctx, &mut out);
                out
            })
        });

        tracing::debug!("Composed {} ({} bytes)", metadata.slug, body.len());

        RenderedPage {
            title: metadata.title.clone(),
            slug: metadata.slug.clone(),
            description: metadata.description.clone(),
            body,
            sidebar: toc.iter().map(SidebarEntry::from).collect(),
            previous: metadata.previous.clone(),
            next: metadata.next.clone(),
            edit_url: metadata.edit_url.clone(),
        }
    }

    fn render_nodes(&self, nodes: &[ContentNode], ctx: &DefaultsContext, out: &mut String) {
        for node in nodes {
            out.push_str(&self.render_node(node, ctx));
        }
    }

    fn render_node(&self, node: &ContentNode, ctx: &DefaultsContext) -> String {
        let name = node.kind().component_name();
        let inherited = ctx.read(name).unwrap_or(&NO_PROPS);
        let props = merge(inherited, &[node.attrs()]);

        let mut children = String::new();
        self.render_nodes(node.children(), ctx, &mut children);

        let renderer = resolve(name, &self.registry, self.fallback.as_ref());
        renderer.render(&RenderInput {
            name,
            node,
            props: &props,
            children: &children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CodeFallback;
    use pretty_assertions::assert_eq;
    use quire_content::{Attrs, TocEntry};

    fn composer(overrides: Registry) -> PageComposer {
        PageComposer::new(overrides, Some(Arc::new(CodeFallback)), Defaults::new()).unwrap()
    }

    fn intro_page() -> (Vec<ContentNode>, PageMetadata, Vec<TocEntry>) {
        (
            vec![
                ContentNode::heading("Intro", 1),
                ContentNode::paragraph("Hello"),
            ],
            PageMetadata::new("Intro Page", "/intro"),
            vec![TocEntry::new("Intro", "intro", 1)],
        )
    }

    #[test]
    fn composes_intro_page() {
        let (content, metadata, toc) = intro_page();

        let page = composer(Registry::new()).render(&content, &metadata, &toc);

        assert_eq!(page.body, "<h1 id=\"intro\">Intro</h1>\n<p>Hello</p>\n");
        assert_eq!(
            page.sidebar,
            vec![SidebarEntry {
                label: "Intro".into(),
                href: "#intro".into(),
                depth: 1,
                children: vec![],
            }]
        );
        assert_eq!(page.previous, None);
        assert_eq!(page.next, None);
        assert_eq!(page.title, "Intro Page");
        assert_eq!(page.slug, "/intro");
    }

    #[test]
    fn override_takes_precedence_over_builtin() {
        let (content, metadata, toc) = intro_page();
        let overrides = Registry::new().with("paragraph", |input: &RenderInput<'_>| {
            input.children.to_uppercase()
        });

        let page = composer(overrides).render(&content, &metadata, &toc);

        assert!(page.body.contains("HELLO"));
        assert!(!page.body.contains("Hello"));
        assert!(page.body.contains("<h1 id=\"intro\">Intro</h1>"));
    }

    #[test]
    fn missing_fallback_is_a_configuration_error() {
        let result = PageComposer::new(Registry::new(), None, Defaults::new());

        assert!(matches!(result, Err(ComposeError::MissingFallback)));
    }

    #[test]
    fn unknown_elements_render_as_inline_code() {
        let content = vec![ContentNode::element(
            "Tabs",
            Attrs::new(),
            vec![ContentNode::text("python")],
        )];
        let metadata = PageMetadata::new("Tabs", "/tabs");

        let page = composer(Registry::new()).render(&content, &metadata, &[]);

        assert_eq!(page.body, "<code>python</code>");
    }

    #[test]
    fn node_attrs_override_inherited_defaults() {
        let site: Defaults = Defaults::from([(
            "code_block".to_string(),
            Attrs::from([
                ("language".to_string(), "text".to_string()),
                ("class".to_string(), "site".to_string()),
            ]),
        )]);
        let composer =
            PageComposer::new(Registry::new(), Some(Arc::new(CodeFallback)), site).unwrap();
        let content = vec![
            ContentNode::code_block(None, "plain"),
            ContentNode::code_block(Some("python"), "x = 1"),
        ];

        let page = composer.render(&content, &PageMetadata::new("Code", "/code"), &[]);

        assert!(page.body.contains("class=\"language-text\""));
        assert!(page.body.contains("class=\"language-python\""));
        assert_eq!(page.body.matches("code-block site").count(), 2);
    }

    #[test]
    fn page_defaults_shadow_site_defaults() {
        let link_target = |target: &str| -> Defaults {
            Defaults::from([(
                "link".to_string(),
                Attrs::from([("target".to_string(), target.to_string())]),
            )])
        };
        let composer = PageComposer::new(
            Registry::new(),
            Some(Arc::new(CodeFallback)),
            link_target("_self"),
        )
        .unwrap();
        let content = vec![ContentNode::link("/x", vec![ContentNode::text("x")])];

        let mut metadata = PageMetadata::new("Links", "/links");
        let plain = composer.render(&content, &metadata, &[]);
        metadata.defaults = link_target("_blank");
        let scoped = composer.render(&content, &metadata, &[]);

        assert!(plain.body.contains("target=\"_self\""));
        assert!(scoped.body.contains("target=\"_blank\""));
    }

    #[test]
    fn renderers_receive_effective_props() {
        let overrides = Registry::new().with("Admonition", |input: &RenderInput<'_>| {
            format!(
                "<aside class=\"{}\">{}</aside>",
                input.prop("type").unwrap_or("note"),
                input.children
            )
        });
        let content = vec![ContentNode::element(
            "Admonition",
            Attrs::from([("type".to_string(), "tip".to_string())]),
            vec![ContentNode::paragraph("Run it")],
        )];

        let page = composer(overrides).render(&content, &PageMetadata::new("A", "/a"), &[]);

        assert_eq!(page.body, "<aside class=\"tip\"><p>Run it</p>\n</aside>");
    }

    #[test]
    fn sidebar_keeps_nesting_and_navigation() {
        let mut intro = TocEntry::new("Intro", "intro", 1);
        intro.children.push(TocEntry::new("Setup", "setup", 2));
        let metadata = PageMetadata::new("Intro", "/intro")
            .with_navigation(None, Some(NavLink::new("Next", "/next")));

        let page = composer(Registry::new()).render(&[], &metadata, &[intro]);

        assert_eq!(page.sidebar[0].children[0].href, "#setup");
        assert_eq!(page.next, Some(NavLink::new("Next", "/next")));
        assert_eq!(page.body, "");
    }
}
