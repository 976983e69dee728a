//! Render command - wrap a single page fragment in the site shell

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use siteshell_render::{PageContent, SiteShell};

use super::{content_repository, load_config};

/// Run the render command.
///
/// Writes the full document to `output`, or to stdout when no output is given.
pub async fn run(
    config_path: &Path,
    page: &Path,
    output: Option<&Path>,
    title: Option<&str>,
    fixtures: Option<&Path>,
) -> Result<()> {
    tracing::info!(?config_path, ?page, ?output, "Rendering page");

    let config = Arc::new(load_config(config_path)?);
    let repository = content_repository(&config, fixtures)?;
    let shell = SiteShell::new(repository, config);

    let body = tokio::fs::read_to_string(page)
        .await
        .wrap_err_with(|| format!("Failed to read page {}", page.display()))?;
    let mut content = PageContent::new(body);
    if let Some(t) = title {
        content = content.with_title(t);
    }

    let html = shell
        .render_page(&content)
        .await
        .wrap_err("Failed to render page")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, html)
                .await
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            println!("  ✓ Wrote {}", path.display());
        }
        None => print!("{html}"),
    }

    Ok(())
}
