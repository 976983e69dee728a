//! Check command - validate configuration and the shell's content documents

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use siteshell_cms::{ContentRepository, fetch_single};
use siteshell_core::{FooterDoc, NavigationDoc, SiteSettings};

use super::{content_repository, load_config};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads the configuration, fetches every singleton the shell needs and
/// reports problems that would break or degrade rendering.
pub async fn run(config_path: &Path, fixtures: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    println!("Checking configuration...");
    let config = match load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e:#}");
            bail!("Validation failed with 1 error(s)");
        }
    };

    let repository = content_repository(&config, fixtures)?;

    println!("\nChecking content documents...");
    let result = check_documents(repository.as_ref()).await;

    println!();
    for warn in &result.warnings {
        println!("  ⚠ {warn}");
    }
    for err in &result.errors {
        println!("  ✗ {err}");
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }
    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) in strict mode",
            result.warnings.len()
        );
    }

    println!("  ✓ All checks passed");
    Ok(())
}

/// Fetch each singleton independently so every problem gets reported.
async fn check_documents(repository: &dyn ContentRepository) -> ValidationResult {
    let mut result = ValidationResult::default();

    match fetch_single::<SiteSettings>(repository).await {
        Ok(settings) => {
            println!("  ✓ settings");
            if settings.site_title.is_empty() {
                result.add_warning("settings: siteTitle is empty");
            }
        }
        Err(e) => result.add_error(format!("settings: {e}")),
    }

    match fetch_single::<NavigationDoc>(repository).await {
        Ok(navigation) => {
            println!("  ✓ navigation ({} links)", navigation.links.len());
            for (index, item) in navigation.links.iter().enumerate() {
                if item.link.href().is_none() {
                    result.add_warning(format!(
                        "navigation: link {index} ({}) has no URL",
                        item.label.as_text()
                    ));
                }
            }
        }
        Err(e) => result.add_error(format!("navigation: {e}")),
    }

    match fetch_single::<FooterDoc>(repository).await {
        Ok(footer) => {
            println!("  ✓ footer ({} services)", footer.our_services.len());
            for (index, service) in footer.our_services.iter().enumerate() {
                if service.service_link.href().is_none() {
                    result.add_warning(format!(
                        "footer: service {index} ({}) has no URL",
                        service.service_name.as_deref().unwrap_or_default()
                    ));
                }
            }
        }
        Err(e) => result.add_error(format!("footer: {e}")),
    }

    result
}
