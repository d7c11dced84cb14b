//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use quire_static::SiteConfig;

/// Run the serve command.
///
/// The site is mounted under the configured base URL, matching the links
/// `quire build` emits.
pub async fn run(config_path: &Path, port: u16, dir: PathBuf, open_browser: bool) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'quire build' first.",
            dir.display()
        );
    }

    let config = SiteConfig::load(config_path)?;
    let base_url = &config.site.base_url;

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let app = router(&dir, base_url);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let url = format!("http://{}{}", addr, base_url);
    tracing::info!("Serving {} at {}", dir.display(), url);

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Static file router for `dir`, nested under `base_url` when it is not `/`.
fn router(dir: &Path, base_url: &str) -> Router {
    let files = ServeDir::new(dir);
    let prefix = base_url.trim_end_matches('/');

    if prefix.is_empty() {
        return Router::new().fallback_service(files);
    }

    let target = format!("{}/", prefix);
    Router::new()
        .route(
            "/",
            get(move || {
                let target = target.clone();
                async move { Redirect::temporary(&target) }
            }),
        )
        .nest_service(prefix, files)
}
