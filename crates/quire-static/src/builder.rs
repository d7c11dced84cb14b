//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use quire_compose::{CodeFallback, ComposeError, PageComposer};
use quire_content::{
    parse_json, parse_markdown, ContentNode, LoadError, NavLink, PageMetadata, ParsedPage,
    TocEntry,
};

use crate::assets::{palette, palette_names, AssetPipeline, Palette};
use crate::config::SiteConfig;
use crate::overrides::build_registry;
use crate::templates::{Chrome, Context, NavItem, TemplateEngine};

/// Pages without a `sidebar_position` sort after positioned ones.
const DEFAULT_POSITION: i32 = 999;

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, including a generated homepage
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    Read(String),

    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A page to be built.
#[derive(Debug)]
struct Page {
    /// Relative path from docs dir
    relative_path: PathBuf,

    /// Public URL, including the base URL
    url: String,

    /// Output path
    output_path: PathBuf,

    metadata: PageMetadata,
    content: Vec<ContentNode>,
    toc: Vec<TocEntry>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: SiteConfig,
    composer: PageComposer,
    templates: TemplateEngine,
    light: Palette,
    dark: Palette,
}

impl StaticBuilder {
    /// Create a new static builder.
    ///
    /// Override templates are compiled and palettes resolved here, so a bad
    /// configuration fails before any page is read.
    pub fn new(config: SiteConfig) -> Result<Self, BuildError> {
        let overrides = build_registry(&config.components).map_err(|(name, e)| {
            BuildError::Config(format!("invalid template for component {}: {}", name, e))
        })?;

        let composer = PageComposer::new(
            overrides,
            Some(Arc::new(CodeFallback)),
            config.defaults.clone(),
        )?;

        let light = find_palette(&config.theme.light)?;
        let dark = find_palette(&config.theme.dark)?;

        let templates = TemplateEngine::new().map_err(|e| BuildError::Template(e.to_string()))?;

        Ok(Self {
            config,
            composer,
            templates,
            light,
            dark,
        })
    }

    /// Directory the site is written to.
    pub fn output_dir(&self) -> &Path {
        &self.config.docs.output
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = self.output_dir();

        fs::create_dir_all(output_dir).map_err(|e| BuildError::Write(e.to_string()))?;

        let mut pages = self.discover_pages()?;
        assign_navigation(&mut pages);
        tracing::info!("Discovered {} pages", pages.len());

        let nav = self.build_navigation(&pages);
        let chrome = Chrome::from_config(&self.config, self.stylesheet_urls());

        // Every page composes with its own defaults context, so pages render independently
        pages
            .par_iter()
            .map(|page| self.build_page(page, &nav, &chrome))
            .collect::<Result<Vec<()>, BuildError>>()?;

        let mut total_pages = pages.len();
        if !pages.iter().any(|page| page.metadata.slug == "/") {
            self.generate_homepage(&nav, &chrome)?;
            total_pages += 1;
        }

        self.generate_assets()?;
        self.generate_search_index(&pages)?;
        self.generate_sitemap(&pages)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: total_pages,
            duration_ms: duration.as_millis() as u64,
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Discover all content pages in the docs directory, in sidebar order.
    fn discover_pages(&self) -> Result<Vec<Page>, BuildError> {
        let docs_dir = &self.config.docs.dir;

        if !docs_dir.exists() {
            return Err(BuildError::Read(format!(
                "Docs directory not found: {}",
                docs_dir.display()
            )));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !matches!(ext, "md" | "mdx" | "json") {
                continue;
            }

            let relative_path = path.strip_prefix(docs_dir).unwrap_or(path).to_path_buf();
            let source_name = source_name(&relative_path);

            let source = fs::read_to_string(path)
                .map_err(|e| BuildError::Read(format!("{}: {}", path.display(), e)))?;

            let parsed = if ext == "json" {
                parse_json(&source_name, &source)
            } else {
                parse_markdown(&source)
            }
            .map_err(|source| BuildError::Load {
                path: source_name.clone(),
                source,
            })?;

            pages.push(self.load_page(relative_path, parsed));
        }

        pages.sort_by(|a, b| {
            let order_a = a.metadata.sidebar_position.unwrap_or(DEFAULT_POSITION);
            let order_b = b.metadata.sidebar_position.unwrap_or(DEFAULT_POSITION);
            order_a
                .cmp(&order_b)
                .then_with(|| a.metadata.slug.cmp(&b.metadata.slug))
        });

        let mut seen = HashSet::new();
        pages.retain(|page| {
            if seen.insert(page.metadata.slug.clone()) {
                true
            } else {
                tracing::warn!(
                    "Skipping {}: slug {} is already taken",
                    page.relative_path.display(),
                    page.metadata.slug
                );
                false
            }
        });

        Ok(pages)
    }

    /// Resolve a parsed file into a page with metadata and output location.
    fn load_page(&self, relative_path: PathBuf, parsed: ParsedPage) -> Page {
        let stem = relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");

        let fallback_title = match parsed.first_title() {
            Some(title) => title.to_string(),
            None if stem == "index" => self.config.site.title.clone(),
            None => capitalize(stem),
        };

        let source = source_name(&relative_path);
        let edit_url = self
            .config
            .site
            .edit_url
            .as_ref()
            .map(|prefix| format!("{}/{}", prefix.trim_end_matches('/'), source));

        let ParsedPage {
            frontmatter,
            content,
            toc,
        } = parsed;

        let metadata = frontmatter
            .unwrap_or_default()
            .into_metadata(&fallback_title, &path_to_slug(&relative_path))
            .with_source(source, edit_url);

        let url = self.slug_to_url(&metadata.slug);
        let output_path = self
            .output_dir()
            .join(metadata.slug.trim_start_matches('/'))
            .join("index.html");

        Page {
            relative_path,
            url,
            output_path,
            metadata,
            content,
            toc,
        }
    }

    /// Convert a slug to a public URL.
    fn slug_to_url(&self, slug: &str) -> String {
        let base_url = &self.config.site.base_url;
        let path = slug.trim_matches('/');

        if path.is_empty() {
            base_url.clone()
        } else {
            format!("{}{}/", base_url, path)
        }
    }

    /// Build navigation structure from pages.
    ///
    /// Top-level pages come first; pages in subdirectories are grouped under
    /// one item per directory, in order of first appearance.
    fn build_navigation(&self, pages: &[Page]) -> Vec<NavItem> {
        let mut nav = Vec::new();
        let mut dirs: Vec<(PathBuf, Vec<NavItem>)> = Vec::new();

        for page in pages.iter().filter(|page| page.metadata.nav) {
            let item = NavItem {
                title: page.metadata.label().to_string(),
                path: page.url.clone(),
                children: Vec::new(),
                active: false,
            };

            let parent = page.relative_path.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                nav.push(item);
                continue;
            }

            match dirs.iter_mut().find(|(dir, _)| dir == parent) {
                Some((_, items)) => items.push(item),
                None => dirs.push((parent.to_path_buf(), vec![item])),
            }
        }

        for (dir, items) in dirs {
            let dir_name = dir
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("Section");

            nav.push(NavItem {
                title: capitalize(dir_name),
                path: items[0].path.clone(),
                children: items,
                active: false,
            });
        }

        nav
    }

    /// URLs of the configured stylesheets once copied into `assets/`.
    fn stylesheet_urls(&self) -> Vec<String> {
        self.config
            .site
            .styles
            .iter()
            .map(|s| {
                let filename = Path::new(s)
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                format!("{}assets/{}", self.config.site.base_url, filename)
            })
            .collect()
    }

    /// Build a single page.
    fn build_page(&self, page: &Page, nav: &[NavItem], chrome: &Chrome) -> Result<(), BuildError> {
        let rendered = self
            .composer
            .render(&page.content, &page.metadata, &page.toc);

        let context = Context {
            title: rendered.title,
            description: rendered.description,
            content: rendered.body,
            nav: mark_active(nav, &page.url),
            toc: rendered.sidebar,
            previous: rendered.previous,
            next: rendered.next,
            edit_url: rendered.edit_url,
            features: Vec::new(),
            chrome,
        };

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::Template(format!("{}: {}", page.metadata.slug, e)))?;

        write_file(&page.output_path, html)?;
        tracing::debug!("Built {} -> {}", page.relative_path.display(), page.url);

        Ok(())
    }

    /// Write the hero and feature list as the site root.
    fn generate_homepage(&self, nav: &[NavItem], chrome: &Chrome) -> Result<(), BuildError> {
        let context = Context {
            title: self.config.site.title.clone(),
            description: self.config.site.tagline.clone(),
            content: String::new(),
            nav: nav.to_vec(),
            toc: Vec::new(),
            previous: None,
            next: None,
            edit_url: None,
            features: self.config.features.clone(),
            chrome,
        };

        let html = self
            .templates
            .render_page("home.html", &context)
            .map_err(|e| BuildError::Template(e.to_string()))?;

        write_file(&self.output_dir().join("index.html"), html)?;
        tracing::debug!("Generated homepage with {} features", self.config.features.len());

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.output_dir().join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::Write(e.to_string()))?;

        let css = AssetPipeline::generate_css(&self.light, &self.dark);
        let css = if self.config.build.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Failed to minify CSS, writing it unminified: {}", e);
                    css
                }
            }
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), css)?;
        write_file(&assets_dir.join("main.js"), AssetPipeline::generate_js())?;

        for style_path in &self.config.site.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::Read(format!("Failed to read stylesheet: {}", e))
                })?;
                write_file(&assets_dir.join(filename), content)?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, pages: &[Page]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                let content = page
                    .content
                    .iter()
                    .map(ContentNode::plain_text)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");

                serde_json::json!({
                    "title": page.metadata.title,
                    "description": page.metadata.description.clone().unwrap_or_default(),
                    "url": page.url,
                    "content": content,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        write_file(&self.output_dir().join("search-index.json"), json)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[Page]) -> Result<(), BuildError> {
        let origin = self
            .config
            .site
            .url
            .as_deref()
            .unwrap_or("")
            .trim_end_matches('/');

        let mut urls: Vec<&str> = pages.iter().map(|page| page.url.as_str()).collect();
        if !pages.iter().any(|page| page.metadata.slug == "/") {
            urls.insert(0, self.config.site.base_url.as_str());
        }

        let entries: Vec<String> = urls
            .iter()
            .map(|url| format!("  <url>\n    <loc>{}{}</loc>\n  </url>", origin, url))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            entries.join("\n")
        );
        write_file(&self.output_dir().join("sitemap.xml"), sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}{}sitemap.xml",
            origin, self.config.site.base_url
        );
        write_file(&self.output_dir().join("robots.txt"), robots)
    }
}

/// Fill previous/next links along the sidebar order of listed pages.
///
/// Links set explicitly in front matter win.
fn assign_navigation(pages: &mut [Page]) {
    let listed: Vec<usize> = pages
        .iter()
        .enumerate()
        .filter(|(_, page)| page.metadata.nav)
        .map(|(i, _)| i)
        .collect();

    let links: Vec<NavLink> = listed
        .iter()
        .map(|&i| NavLink::new(pages[i].metadata.label(), pages[i].url.clone()))
        .collect();

    for (pos, &i) in listed.iter().enumerate() {
        let previous = pos.checked_sub(1).map(|p| links[p].clone());
        let next = links.get(pos + 1).cloned();
        pages[i].metadata = pages[i].metadata.clone().with_navigation(previous, next);
    }
}

/// Copy of `nav` with the item for `url` marked active.
fn mark_active(nav: &[NavItem], url: &str) -> Vec<NavItem> {
    nav.iter()
        .map(|item| NavItem {
            active: item.children.is_empty() && item.path == url,
            children: mark_active(&item.children, url),
            ..item.clone()
        })
        .collect()
}

fn find_palette(name: &str) -> Result<Palette, BuildError> {
    palette(name).ok_or_else(|| {
        BuildError::Config(format!(
            "unknown palette {}; expected one of {}",
            name,
            palette_names().join(", ")
        ))
    })
}

/// `guide/setup.md` -> `/guide/setup`, `guide/index.md` -> `/guide`.
fn path_to_slug(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(|parent| parent.components())
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    if stem != "index" {
        parts.push(stem.to_string());
    }

    format!("/{}", parts.join("/"))
}

/// Forward-slash path of a source file, relative to the docs directory.
fn source_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::Write(e.to_string()))?;
    }
    fs::write(path, contents).map_err(|e| BuildError::Write(format!("{}: {}", path.display(), e)))
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Feature;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn site(docs: &Path, out: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.docs.dir = docs.to_path_buf();
        config.docs.output = out.to_path_buf();
        config.build.minify = false;
        config
    }

    // minijinja escapes `/` inside interpolated values
    fn read_html(path: &Path) -> String {
        fs::read_to_string(path).unwrap().replace("&#x2f;", "/")
    }

    fn write_doc(docs: &Path, name: &str, content: &str) {
        let path = docs.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn builds_simple_site() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(&docs, "index.md", "---\ntitle: Home\n---\n# Welcome\n");

        let builder = StaticBuilder::new(site(&docs, &out)).unwrap();
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 1);
        let html = read_html(&out.join("index.html"));
        assert!(html.contains("<h1 id=\"welcome\">Welcome</h1>"));
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());
    }

    #[tokio::test]
    async fn previous_and_next_follow_sidebar_order() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(&docs, "index.md", "---\nsidebar_position: 0\n---\n# Home\n");
        write_doc(&docs, "a.md", "---\ntitle: Alpha\nsidebar_position: 2\n---\nA\n");
        write_doc(&docs, "b.md", "---\ntitle: Beta\nsidebar_position: 1\n---\nB\n");
        write_doc(&docs, "hidden.md", "---\ntitle: Hidden\nnav: false\n---\nH\n");

        let builder = StaticBuilder::new(site(&docs, &out)).unwrap();
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 4);

        let beta = read_html(&out.join("b/index.html"));
        assert!(beta.contains("class=\"pagination-prev\" href=\"/\""));
        assert!(beta.contains("class=\"pagination-next\" href=\"/a/\""));

        let alpha = read_html(&out.join("a/index.html"));
        assert!(alpha.contains("class=\"pagination-prev\" href=\"/b/\""));
        assert!(!alpha.contains("pagination-next"));

        let hidden = read_html(&out.join("hidden/index.html"));
        assert!(!hidden.contains("pagination"));
        assert!(!alpha.contains("Hidden"));
    }

    #[tokio::test]
    async fn generates_search_index_and_sitemap() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(
            &docs,
            "guide/setup.md",
            "---\ntitle: Setup\ndescription: Install it\n---\nSearchable content\n",
        );

        let mut config = site(&docs, &out);
        config.site.url = Some("https://example.org/".to_string());
        StaticBuilder::new(config).unwrap().build().await.unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("search-index.json")).unwrap())
                .unwrap();
        assert_eq!(
            index,
            serde_json::json!([{
                "title": "Setup",
                "description": "Install it",
                "url": "/guide/setup/",
                "content": "Searchable content",
            }])
        );

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.org/guide/setup/</loc>"));
        assert!(sitemap.contains("<loc>https://example.org/</loc>"));

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.org/sitemap.xml"));
    }

    #[tokio::test]
    async fn generates_homepage_with_features() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(&docs, "intro.md", "# Intro\n");

        let mut config = site(&docs, &out);
        config.site.title = "Turms".to_string();
        config.site.tagline = Some("GraphQL Codegen".to_string());
        config.features = vec![Feature {
            title: "Pydantic".to_string(),
            image: None,
            description: "Typed models for every operation.".to_string(),
        }];

        let result = StaticBuilder::new(config).unwrap().build().await.unwrap();

        assert_eq!(result.pages, 2);
        let home = read_html(&out.join("index.html"));
        assert!(home.contains("GraphQL Codegen"));
        assert!(home.contains("<h3>Pydantic</h3>"));
        assert!(home.contains("href=\"/intro/\""));
    }

    #[tokio::test]
    async fn applies_overrides_and_defaults_from_config() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(
            &docs,
            "usage.md",
            "# Usage\n\n<Admonition type=\"tip\">\n\nRun it\n\n</Admonition>\n\nSee [the repo](https://example.org).\n",
        );

        let config = SiteConfig::from_toml(&format!(
            r#"
[docs]
dir = "{}"
output = "{}"

[build]
minify = false

[defaults.link]
target = "_blank"

[components.Admonition]
template = '<aside class="admonition-{{{{ props.type }}}}">{{{{ children }}}}</aside>'
"#,
            docs.display(),
            out.display()
        ))
        .unwrap();

        StaticBuilder::new(config).unwrap().build().await.unwrap();

        let html = read_html(&out.join("usage/index.html"));
        assert!(html.contains("<aside class=\"admonition-tip\">"));
        assert!(html.contains("target=\"_blank\""));
    }

    #[tokio::test]
    async fn loads_json_pages() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(
            &docs,
            "api.json",
            r#"{
  "metadata": { "title": "API" },
  "content": [
    { "kind": "heading", "attrs": { "depth": "2" }, "children": [{ "kind": "text", "text": "Client" }] },
    { "kind": "element", "name": "Tabs", "children": [{ "kind": "text", "text": "python" }] }
  ]
}"#,
        );

        StaticBuilder::new(site(&docs, &out)).unwrap().build().await.unwrap();

        let html = read_html(&out.join("api/index.html"));
        assert!(html.contains("<title>API | Documentation</title>"));
        assert!(html.contains("<code>python</code>"));
        assert!(html.contains("href=\"#client\""));
    }

    #[tokio::test]
    async fn unknown_content_kind_fails_the_build() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_doc(
            &docs,
            "broken.json",
            r#"{ "content": [{ "kind": "carousel" }] }"#,
        );

        let err = StaticBuilder::new(site(&docs, &out))
            .unwrap()
            .build()
            .await
            .unwrap_err();

        match err {
            BuildError::Load {
                path,
                source: LoadError::UnknownContentKind { pointer, kind, .. },
            } => {
                assert_eq!(path, "broken.json");
                assert_eq!(pointer, "/content/0");
                assert_eq!(kind, "carousel");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn front_matter_slug_stays_inside_output() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("site").join("dist");
        write_doc(&docs, "evil.md", "---\nslug: ../../escaped\n---\n# Evil\n");

        StaticBuilder::new(site(&docs, &out)).unwrap().build().await.unwrap();

        assert!(out.join("escaped/index.html").exists());
        assert!(!temp.path().join("escaped").exists());
        assert!(!temp.path().join("site/escaped").exists());
    }

    #[test]
    fn rejects_unknown_palette() {
        let mut config = SiteConfig::default();
        config.theme.dark = "solarized".to_string();

        assert!(matches!(
            StaticBuilder::new(config),
            Err(BuildError::Config(_))
        ));
    }

    #[test]
    fn rejects_invalid_override_template() {
        let config = SiteConfig::from_toml("[components.Tabs]\ntemplate = \"{% for %}\"").unwrap();

        assert!(matches!(
            StaticBuilder::new(config),
            Err(BuildError::Config(_))
        ));
    }

    #[test]
    fn converts_paths_to_slugs() {
        assert_eq!(path_to_slug(Path::new("index.md")), "/");
        assert_eq!(path_to_slug(Path::new("intro.mdx")), "/intro");
        assert_eq!(path_to_slug(Path::new("guide/setup.md")), "/guide/setup");
        assert_eq!(path_to_slug(Path::new("guide/index.md")), "/guide");
    }

    #[test]
    fn capitalizes() {
        assert_eq!(capitalize("guides"), "Guides");
        assert_eq!(capitalize(""), "");
    }
}
