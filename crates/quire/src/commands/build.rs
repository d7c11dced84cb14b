//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use quire_static::{SiteConfig, StaticBuilder};

/// Run the build command.
///
/// Command-line flags take precedence over `quire.toml`.
pub async fn run(config_path: &Path, output: Option<PathBuf>, no_minify: bool) -> Result<()> {
    tracing::info!("Building static site...");

    let mut config = SiteConfig::load(config_path)?;
    if let Some(output) = output {
        config.docs.output = output;
    }
    if no_minify {
        config.build.minify = false;
    }

    let result = StaticBuilder::new(config)?.build().await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
