//! Site configuration (`quire.toml`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use quire_content::Defaults;

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub docs: DocsSettings,
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub footer: FooterConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Site-wide component defaults, keyed by component name
    #[serde(default)]
    pub defaults: Defaults,
    /// Template-backed component overrides, keyed by component name
    #[serde(default)]
    pub components: BTreeMap<String, ComponentOverride>,
    /// Homepage feature list
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Public origin, e.g. `https://example.github.io`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub favicon: Option<String>,
    /// Prefix for "edit this page" links; the page's source path is appended
    #[serde(default)]
    pub edit_url: Option<String>,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: None,
            url: None,
            base_url: default_base_url(),
            favicon: None,
            edit_url: None,
            styles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocsSettings {
    #[serde(default = "default_docs_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NavbarConfig {
    /// Title next to the logo; defaults to the site title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub logo: Option<Logo>,
    #[serde(default)]
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct Logo {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavbarItem {
    pub label: String,
    #[serde(flatten)]
    pub target: LinkTarget,
    #[serde(default)]
    pub position: Position,
}

/// A link either inside the site (`to`) or to an external URL (`href`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkTarget {
    Internal { to: String },
    External { href: String },
}

impl LinkTarget {
    /// Resolve to a URL; internal targets are prefixed with the base URL.
    pub fn url(&self, base_url: &str) -> String {
        match self {
            Self::Internal { to } => {
                format!("{}{}", base_url, to.trim_start_matches('/'))
            }
            Self::External { href } => href.clone(),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External { .. })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FooterConfig {
    #[serde(default)]
    pub style: FooterStyle,
    #[serde(default)]
    pub links: Vec<FooterGroup>,
    #[serde(default)]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FooterItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterItem {
    pub label: String,
    #[serde(flatten)]
    pub target: LinkTarget,
}

/// Light/dark palette pair.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_light")]
    pub light: String,
    #[serde(default = "default_dark")]
    pub dark: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: default_light(),
            dark: default_dark(),
        }
    }
}

/// A component rendered from a minijinja snippet.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentOverride {
    pub template: String,
}

/// One homepage feature card.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct Feature {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_light() -> String {
    "github".to_string()
}
fn default_dark() -> String {
    "dracula".to_string()
}
fn default_minify() -> bool {
    true
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl SiteConfig {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let mut config: SiteConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.site.base_url = normalize_base_url(&config.site.base_url);
        Ok(config)
    }

    /// Title shown in the navbar.
    pub fn navbar_title(&self) -> &str {
        self.navbar.title.as_deref().unwrap_or(&self.site.title)
    }
}

/// Ensure the base URL starts and ends with `/`.
fn normalize_base_url(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
