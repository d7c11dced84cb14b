//! Asset pipeline: themed CSS and the runtime script.

/// Colors for one color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub muted: &'static str,
    pub muted_foreground: &'static str,
    pub border: &'static str,
    pub primary: &'static str,
    pub primary_foreground: &'static str,
    pub code_background: &'static str,
    pub code_foreground: &'static str,
}

const PALETTES: &[Palette] = &[
    Palette {
        name: "github",
        background: "#ffffff",
        foreground: "#1f2328",
        muted: "#f6f8fa",
        muted_foreground: "#59636e",
        border: "#d1d9e0",
        primary: "#0969da",
        primary_foreground: "#ffffff",
        code_background: "#f6f8fa",
        code_foreground: "#1f2328",
    },
    Palette {
        name: "vs-light",
        background: "#ffffff",
        foreground: "#000000",
        muted: "#f3f3f3",
        muted_foreground: "#616161",
        border: "#e5e5e5",
        primary: "#0066b8",
        primary_foreground: "#ffffff",
        code_background: "#f8f8f8",
        code_foreground: "#393a34",
    },
    Palette {
        name: "dracula",
        background: "#21222c",
        foreground: "#f8f8f2",
        muted: "#282a36",
        muted_foreground: "#bfbfbf",
        border: "#44475a",
        primary: "#bd93f9",
        primary_foreground: "#21222c",
        code_background: "#282a36",
        code_foreground: "#f8f8f2",
    },
    Palette {
        name: "vs-dark",
        background: "#1e1e1e",
        foreground: "#d4d4d4",
        muted: "#252526",
        muted_foreground: "#a0a0a0",
        border: "#3c3c3c",
        primary: "#4fc1ff",
        primary_foreground: "#1e1e1e",
        code_background: "#1e1e1e",
        code_foreground: "#d4d4d4",
    },
];

/// Look up a palette by name.
pub fn palette(name: &str) -> Option<Palette> {
    PALETTES.iter().copied().find(|p| p.name == name)
}

/// Names of every known palette.
pub fn palette_names() -> Vec<&'static str> {
    PALETTES.iter().map(|p| p.name).collect()
}

impl Palette {
    fn variables(&self) -> String {
        format!(
            "  --background: {};\n  --foreground: {};\n  --muted: {};\n  --muted-foreground: {};\n  --border: {};\n  --primary: {};\n  --primary-foreground: {};\n  --code-background: {};\n  --code-foreground: {};\n",
            self.background,
            self.foreground,
            self.muted,
            self.muted_foreground,
            self.border,
            self.primary,
            self.primary_foreground,
            self.code_background,
            self.code_foreground,
        )
    }
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file for a light/dark palette pair.
    ///
    /// Dark colors apply under `prefers-color-scheme: dark` unless the user
    /// picked a mode, which the runtime script stores in `data-theme`.
    pub fn generate_css(light: &Palette, dark: &Palette) -> String {
        format!(
            ":root {{\n{light}}}\n\n\
             @media (prefers-color-scheme: dark) {{\n  :root:not([data-theme=\"light\"]) {{\n{dark}  }}\n}}\n\n\
             [data-theme=\"dark\"] {{\n{dark}}}\n\n{base}",
            light = light.variables(),
            dark = dark.variables(),
            base = BASE_CSS,
        )
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const BASE_CSS: &str = r#"/* Layout tokens */
:root {
  --navbar-height: 60px;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 800px;
  --radius: 0.375rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: var(--primary);
}

/* Navbar */
.navbar {
  display: flex;
  align-items: center;
  gap: 1.5rem;
  height: var(--navbar-height);
  padding: 0 1.5rem;
  border-bottom: 1px solid var(--border);
  position: sticky;
  top: 0;
  background: var(--background);
  z-index: 10;
}

.navbar-brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-weight: 700;
  color: var(--foreground);
  text-decoration: none;
}

.navbar-brand img {
  height: 2rem;
}

.navbar-items {
  display: flex;
  gap: 1rem;
  list-style: none;
}

.navbar-items a {
  color: var(--foreground);
  text-decoration: none;
}

.navbar-right {
  margin-left: auto;
}

.theme-toggle {
  background: none;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--foreground);
  padding: 0.25rem 0.5rem;
  cursor: pointer;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - var(--navbar-height));
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
}

.nav-item a {
  display: block;
  padding: 0.4rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

/* Main content */
.main {
  display: grid;
  grid-template-columns: 1fr var(--toc-width);
  gap: 2rem;
  padding: 2rem;
}

.doc {
  max-width: var(--content-max-width);
}

.content h1 {
  font-size: 2.5rem;
  margin-bottom: 1.5rem;
}

.content h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.content h3 {
  font-size: 1.25rem;
  margin: 1.5rem 0 0.75rem;
}

.content p,
.content ul,
.content ol,
.content blockquote {
  margin-bottom: 1rem;
}

.content ul,
.content ol {
  padding-left: 1.5rem;
}

.content blockquote {
  border-left: 4px solid var(--border);
  padding-left: 1rem;
  color: var(--muted-foreground);
}

.content code {
  font-family: ui-monospace, monospace;
  font-size: 0.875em;
  background: var(--code-background);
  color: var(--code-foreground);
  padding: 0.125rem 0.375rem;
  border-radius: 0.25rem;
}

/* Code blocks */
.code-block {
  margin-bottom: 1rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  overflow: hidden;
}

.code-block-title {
  font-size: 0.8rem;
  padding: 0.4rem 1rem;
  border-bottom: 1px solid var(--border);
  background: var(--muted);
}

.code-block pre {
  background: var(--code-background);
  padding: 1rem;
  overflow-x: auto;
  position: relative;
}

.code-block pre code {
  background: none;
  padding: 0;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  background: var(--muted);
  color: var(--foreground);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  cursor: pointer;
}

/* Previous/next */
.pagination {
  display: flex;
  justify-content: space-between;
  gap: 1rem;
  margin-top: 3rem;
}

.pagination a {
  flex: 1;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 0.75rem 1rem;
  text-decoration: none;
}

.pagination-next {
  text-align: right;
}

.pagination-label {
  display: block;
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

.edit-link {
  display: inline-block;
  margin-top: 2rem;
  font-size: 0.875rem;
}

/* Table of contents */
.toc {
  position: sticky;
  top: calc(var(--navbar-height) + 2rem);
  align-self: start;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-foreground);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc ul ul {
  padding-left: 1rem;
}

.toc a {
  font-size: 0.875rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

/* Homepage */
.hero {
  padding: 4rem 2rem;
  text-align: center;
  background: var(--muted);
}

.hero h1 {
  font-size: 3rem;
}

.hero p {
  font-size: 1.25rem;
  color: var(--muted-foreground);
}

.features {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
  gap: 2rem;
  padding: 3rem 2rem;
}

.feature {
  text-align: center;
}

.feature img {
  height: 160px;
}

/* Footer */
.footer {
  padding: 2rem;
  border-top: 1px solid var(--border);
}

.footer-dark {
  background: #303846;
  color: #ebedf0;
}

.footer-dark a {
  color: #ebedf0;
}

.footer-links {
  display: flex;
  gap: 3rem;
  margin-bottom: 1.5rem;
}

.footer-links ul {
  list-style: none;
}

.footer-copyright {
  text-align: center;
  font-size: 0.875rem;
}

@media (max-width: 1024px) {
  .layout,
  .main {
    grid-template-columns: 1fr;
  }

  .sidebar {
    display: none;
  }

  .sidebar.open {
    display: block;
  }

  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"(function() {
  'use strict';

  // Color mode toggle, remembered across pages
  const root = document.documentElement;
  const stored = localStorage.getItem('quire-theme');
  if (stored) {
    root.setAttribute('data-theme', stored);
  }

  const toggle = document.querySelector('.theme-toggle');
  if (toggle) {
    toggle.addEventListener('click', () => {
      const current = root.getAttribute('data-theme')
        || (window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light');
      const next = current === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      localStorage.setItem('quire-theme', next);
    });
  }

  // Mobile menu toggle
  const menuBtn = document.querySelector('.menu-btn');
  const sidebar = document.querySelector('.sidebar');
  if (menuBtn && sidebar) {
    menuBtn.addEventListener('click', () => {
      sidebar.classList.toggle('open');
    });
  }

  // Copy button for code blocks
  document.querySelectorAll('.code-block pre').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      try {
        await navigator.clipboard.writeText(code ? code.textContent : '');
        btn.textContent = 'Copied!';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });

    pre.appendChild(btn);
  });
})();
"#;
