//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for SiteShell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide metadata settings.
    pub site: SiteConfig,

    /// Content repository settings.
    pub cms: CmsConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Site-wide configuration. Everything here is static metadata; the dynamic
/// parts of the shell come from the content repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL for the site (e.g., "https://thaipfa.com").
    pub base_url: String,

    /// Canonical path advertised in `<link rel="canonical">`.
    #[serde(default = "default_canonical_path")]
    pub canonical_path: String,

    /// Social preview image path, relative to the base URL.
    #[serde(default = "default_og_image")]
    pub og_image: String,

    /// Document language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Name shown in the footer copyright line.
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,

    /// Fixed copyright year; the current year is used when unset.
    #[serde(default)]
    pub copyright_year: Option<i32>,
}

/// Content repository (Prismic) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Repository name (e.g., "thaipfa").
    pub repository: String,

    /// Explicit API endpoint. Derived from the repository name when unset.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access token for private repositories.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Locale to query documents in (e.g., "en-us").
    #[serde(default)]
    pub lang: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds a looked-up master ref is reused; 0 looks it up on every fetch.
    #[serde(default = "default_master_ref_ttl_secs")]
    pub master_ref_ttl_secs: u64,

    /// Whether preview sessions are enabled: the toolbar script is injected
    /// and the preview cookie pins the content ref.
    #[serde(default = "default_true")]
    pub preview_toolbar: bool,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding page content fragments.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory holding static files (social image, assets).
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

// Default value functions
fn default_canonical_path() -> String {
    "/".to_string()
}

fn default_og_image() -> String {
    "/og-image.png".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_copyright_holder() -> String {
    "Thai Professional Finance Academy (ThaiPFA)".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_master_ref_ttl_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            pages_dir: default_pages_dir(),
            public_dir: default_public_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `SITESHELL__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SITESHELL").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if !self.site.canonical_path.starts_with('/') {
            return Err(CoreError::config("site.canonical_path must start with '/'"));
        }

        if self.cms.repository.is_empty() {
            return Err(CoreError::config("cms.repository cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// API endpoint of the content repository.
    pub fn cms_endpoint(&self) -> String {
        match &self.cms.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.cdn.prismic.io/api/v2", self.cms.repository),
        }
    }

    /// Address the server binds to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
