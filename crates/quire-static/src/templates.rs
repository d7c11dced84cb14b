//! Template engine for rendering documentation pages.

use minijinja::Environment;
use serde::Serialize;

use quire_compose::SidebarEntry;
use quire_content::NavLink;

use crate::config::{Feature, FooterStyle, LinkTarget, Position, SiteConfig};

/// A navigation item.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A resolved navbar or footer link.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkView {
    pub label: String,
    pub url: String,
    pub external: bool,
}

impl LinkView {
    fn new(label: &str, target: &LinkTarget, base_url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: target.url(base_url),
            external: target.is_external(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterGroupView {
    pub title: String,
    pub items: Vec<LinkView>,
}

/// Site-wide parts of every page: navbar, footer and head metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub site_title: String,
    pub tagline: Option<String>,
    pub base_url: String,
    pub favicon: Option<String>,
    pub navbar_title: String,
    pub logo: Option<LinkView>,
    pub navbar_left: Vec<LinkView>,
    pub navbar_right: Vec<LinkView>,
    pub footer_dark: bool,
    pub footer_links: Vec<FooterGroupView>,
    pub copyright: Option<String>,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Chrome {
    /// Resolve navbar and footer links against the site's base URL.
    pub fn from_config(config: &SiteConfig, styles: Vec<String>) -> Self {
        let base_url = &config.site.base_url;
        let asset = |path: &str| format!("{}{}", base_url, path.trim_start_matches('/'));

        let (navbar_left, navbar_right): (Vec<_>, Vec<_>) = config
            .navbar
            .items
            .iter()
            .partition(|item| item.position == Position::Left);

        Self {
            site_title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
            base_url: base_url.clone(),
            favicon: config.site.favicon.as_deref().map(asset),
            navbar_title: config.navbar_title().to_string(),
            logo: config.navbar.logo.as_ref().map(|logo| LinkView {
                label: logo.alt.clone(),
                url: asset(&logo.src),
                external: false,
            }),
            navbar_left: navbar_left
                .into_iter()
                .map(|item| LinkView::new(&item.label, &item.target, base_url))
                .collect(),
            navbar_right: navbar_right
                .into_iter()
                .map(|item| LinkView::new(&item.label, &item.target, base_url))
                .collect(),
            footer_dark: config.footer.style == FooterStyle::Dark,
            footer_links: config
                .footer
                .links
                .iter()
                .map(|group| FooterGroupView {
                    title: group.title.clone(),
                    items: group
                        .items
                        .iter()
                        .map(|item| LinkView::new(&item.label, &item.target, base_url))
                        .collect(),
                })
                .collect(),
            copyright: config.footer.copyright.clone(),
            styles,
        }
    }
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context<'a> {
    /// Page title
    pub title: String,
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<SidebarEntry>,
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
    pub edit_url: Option<String>,
    /// Homepage feature cards
    pub features: Vec<Feature>,
    pub chrome: &'a Chrome,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("nav.html", NAV_TEMPLATE),
            ("footer.html", FOOTER_TEMPLATE),
        ] {
            env.add_template_owned(name.to_string(), source.to_string())?;
        }

        Ok(Self { env })
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != chrome.site_title %}{{ title }} | {% endif %}{{ chrome.site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% if chrome.favicon %}<link rel="icon" href="{{ chrome.favicon }}">
  {% endif %}{% for style in chrome.styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ chrome.base_url }}assets/main.css">
</head>
<body>
  <header class="navbar">
    <button class="menu-btn" type="button" aria-label="Menu">&#9776;</button>
    <a class="navbar-brand" href="{{ chrome.base_url }}">
      {% if chrome.logo %}<img src="{{ chrome.logo.url }}" alt="{{ chrome.logo.label }}">{% endif %}
      <span>{{ chrome.navbar_title }}</span>
    </a>
    <ul class="navbar-items">
    {% for link in chrome.navbar_left %}
      <li><a href="{{ link.url }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
    {% endfor %}
    </ul>
    <ul class="navbar-items navbar-right">
    {% for link in chrome.navbar_right %}
      <li><a href="{{ link.url }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
    {% endfor %}
      <li><button class="theme-toggle" type="button" aria-label="Toggle color mode">&#9680;</button></li>
    </ul>
  </header>
  {% block body %}{% endblock %}
  {% include "footer.html" %}
  <script src="{{ chrome.base_url }}assets/main.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<div class="layout">
  <nav class="sidebar">
    {% include "nav.html" %}
  </nav>
  <main class="main">
    <article class="doc">
      <div class="content">
        {{ content | safe }}
      </div>
      {% if edit_url %}<a class="edit-link" href="{{ edit_url }}">Edit this page</a>{% endif %}
      {% if previous or next %}
      <nav class="pagination">
        {% if previous %}<a class="pagination-prev" href="{{ previous.permalink }}"><span class="pagination-label">Previous</span>{{ previous.title }}</a>{% endif %}
        {% if next %}<a class="pagination-next" href="{{ next.permalink }}"><span class="pagination-label">Next</span>{{ next.title }}</a>{% endif %}
      </nav>
      {% endif %}
    </article>

    {% if toc %}
    <aside class="toc">
      <h2>On this page</h2>
      <ul>
      {% for entry in toc recursive %}
        <li class="toc-level-{{ entry.depth }}">
          <a href="{{ entry.href }}">{{ entry.label }}</a>
          {% if entry.children %}<ul>{{ loop(entry.children) }}</ul>{% endif %}
        </li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<header class="hero">
  <h1>{{ chrome.site_title }}</h1>
  {% if chrome.tagline %}<p>{{ chrome.tagline }}</p>{% endif %}
</header>
<main>
  {% if content %}<div class="content">{{ content | safe }}</div>{% endif %}
  {% if features %}
  <section class="features">
  {% for feature in features %}
    <div class="feature">
      {% if feature.image %}<img src="{{ chrome.base_url }}{{ feature.image | trim("/") }}" alt="{{ feature.title }}">{% endif %}
      <h3>{{ feature.title }}</h3>
      <p>{{ feature.description }}</p>
    </div>
  {% endfor %}
  </section>
  {% endif %}
</main>
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer{% if chrome.footer_dark %} footer-dark{% endif %}">
  {% if chrome.footer_links %}
  <div class="footer-links">
  {% for group in chrome.footer_links %}
    <div class="footer-group">
      <h4>{{ group.title }}</h4>
      <ul>
      {% for link in group.items %}
        <li><a href="{{ link.url }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
      {% endfor %}
      </ul>
    </div>
  {% endfor %}
  </div>
  {% endif %}
  {% if chrome.copyright %}<div class="footer-copyright">{{ chrome.copyright }}</div>{% endif %}
</footer>"##;
