//! Front matter extraction and page metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::Attrs;

/// Component defaults keyed by component name.
pub type Defaults = BTreeMap<String, Attrs>;

/// A previous/next navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub permalink: String,
}

impl NavLink {
    pub fn new(title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            permalink: permalink.into(),
        }
    }
}

/// Front matter of a Markdown page, or the `metadata` object of a JSON page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title; falls back to the first top-level heading
    #[serde(default)]
    pub title: Option<String>,

    /// Page description for SEO and the search index
    #[serde(default)]
    pub description: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Label shown in the sidebar instead of the title
    #[serde(default)]
    pub sidebar_label: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default)]
    pub sidebar_position: Option<i32>,

    /// Whether to show in navigation
    #[serde(default = "default_true")]
    pub nav: bool,

    /// Explicit previous link; computed from sidebar order when absent
    #[serde(default)]
    pub previous: Option<NavLink>,

    /// Explicit next link; computed from sidebar order when absent
    #[serde(default)]
    pub next: Option<NavLink>,

    /// Page-level component defaults
    #[serde(default)]
    pub defaults: Defaults,
}

fn default_true() -> bool {
    true
}

impl Default for Frontmatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            slug: None,
            sidebar_label: None,
            sidebar_position: None,
            nav: true,
            previous: None,
            next: None,
            defaults: Defaults::new(),
        }
    }
}

/// Resolved metadata of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    /// URL slug, always starting with `/`
    pub slug: String,
    pub sidebar_label: Option<String>,
    pub sidebar_position: Option<i32>,
    pub description: Option<String>,
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
    /// Source file the page was generated from
    pub source: Option<String>,
    pub edit_url: Option<String>,
    pub nav: bool,
    pub defaults: Defaults,
}

impl PageMetadata {
    /// Minimal metadata with a title and slug.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: normalize_slug(&slug.into()),
            sidebar_label: None,
            sidebar_position: None,
            description: None,
            previous: None,
            next: None,
            source: None,
            edit_url: None,
            nav: true,
            defaults: Defaults::new(),
        }
    }

    /// Label used for this page in navigation.
    pub fn label(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }

    /// Fill in previous/next links that were not set explicitly.
    pub fn with_navigation(mut self, previous: Option<NavLink>, next: Option<NavLink>) -> Self {
        self.previous = self.previous.or(previous);
        self.next = self.next.or(next);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, edit_url: Option<String>) -> Self {
        self.source = Some(source.into());
        self.edit_url = edit_url;
        self
    }
}

impl Frontmatter {
    /// Resolve into page metadata.
    ///
    /// `fallback_title` and `fallback_slug` apply when the front matter does not set them.
    pub fn into_metadata(self, fallback_title: &str, fallback_slug: &str) -> PageMetadata {
        let title = self.title.unwrap_or_else(|| fallback_title.to_string());
        let slug = self.slug.unwrap_or_else(|| fallback_slug.to_string());

        PageMetadata {
            sidebar_label: self.sidebar_label,
            sidebar_position: self.sidebar_position,
            description: self.description,
            previous: self.previous,
            next: self.next,
            nav: self.nav,
            defaults: self.defaults,
            ..PageMetadata::new(title, slug)
        }
    }
}

/// Ensure a slug starts with `/` and has no trailing `/` (except the root).
///
/// Empty, `.` and `..` segments are dropped, so a slug never points above the
/// site root.
pub fn normalize_slug(slug: &str) -> String {
    let segments: Vec<&str> = slug
        .trim()
        .split(['/', '\\'])
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect();
    format!("/{}", segments.join("/"))
}

/// Extract front matter from Markdown content.
///
/// Returns the parsed front matter and the remaining content after the front matter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = if yaml_content.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front matter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Configuration
description: Configuring the code generator
sidebar_position: 2
defaults:
  code_block:
    language: yaml
---

# Configuration
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title.as_deref(), Some("Configuration"));
        assert_eq!(
            fm.description.as_deref(),
            Some("Configuring the code generator")
        );
        assert_eq!(fm.sidebar_position, Some(2));
        assert!(fm.nav);
        assert_eq!(fm.defaults["code_block"]["language"], "yaml");
        assert!(content.starts_with("# Configuration"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo front matter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn metadata_falls_back_to_derived_values() {
        let meta = Frontmatter::default().into_metadata("Intro", "intro/");

        assert_eq!(meta.title, "Intro");
        assert_eq!(meta.slug, "/intro");
        assert_eq!(meta.label(), "Intro");
    }

    #[test]
    fn explicit_navigation_wins() {
        let fm = Frontmatter {
            previous: Some(NavLink::new("Home", "/")),
            ..Default::default()
        };

        let meta = fm
            .into_metadata("Page", "/page")
            .with_navigation(Some(NavLink::new("Other", "/other")), None);

        assert_eq!(meta.previous, Some(NavLink::new("Home", "/")));
        assert_eq!(meta.next, None);
    }

    #[test]
    fn normalizes_slugs() {
        assert_eq!(normalize_slug("/"), "/");
        assert_eq!(normalize_slug(""), "/");
        assert_eq!(normalize_slug("docs/intro/"), "/docs/intro");
        assert_eq!(normalize_slug("docs//./intro"), "/docs/intro");
    }

    #[test]
    fn slugs_cannot_leave_the_site_root() {
        assert_eq!(normalize_slug("../../escaped"), "/escaped");
        assert_eq!(normalize_slug("/guide/../../etc"), "/guide/etc");
        assert_eq!(normalize_slug(".."), "/");
        assert_eq!(normalize_slug("..\\outside"), "/outside");
    }
}
