//! The site shell: fetch the singleton documents, render the regions around
//! a page.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use siteshell_cms::{CmsError, ContentRepository, fetch_single};
use siteshell_core::{Config, FooterDoc, NavigationDoc, SiteSettings};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    html::{Copyright, Metadata, footer_html, header_html, metadata_html},
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// Shell rendering errors. Any of these aborts the whole page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A content document could not be fetched or decoded.
    #[error("content error: {0}")]
    Content(#[from] CmsError),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for shell rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Page-specific content placed between header and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Document title; the site title is used when absent.
    pub title: Option<String>,
    /// Pre-rendered page body, inserted verbatim.
    pub body: String,
}

impl PageContent {
    /// Create page content from a rendered body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A rendered header along with the plain site title it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
    pub site_title: String,
    pub html: String,
}

/// Renders the header/footer shell around page content.
///
/// Holds an explicitly injected content repository; the shell never builds a
/// client of its own.
#[derive(Clone)]
pub struct SiteShell {
    repository: Arc<dyn ContentRepository>,
    config: Arc<Config>,
    templates: Arc<TemplateRegistry>,
}

impl SiteShell {
    /// Create a shell over a content repository.
    pub fn new(repository: Arc<dyn ContentRepository>, config: Arc<Config>) -> Self {
        Self {
            repository,
            config,
            templates: Arc::new(TemplateRegistry::new()),
        }
    }

    fn with_repository(&self, repository: Arc<dyn ContentRepository>) -> Self {
        Self {
            repository,
            ..self.clone()
        }
    }

    /// The same shell reading at a preview session's content ref.
    ///
    /// `None` when previews are disabled in configuration or the repository
    /// cannot serve refs.
    pub fn at_preview_ref(&self, reference: &str) -> Option<Self> {
        if !self.config.cms.preview_toolbar || reference.is_empty() {
            return None;
        }
        self.repository
            .at_ref(reference)
            .map(|repository| self.with_repository(repository))
    }

    /// Fetch settings and navigation, then render the header.
    #[instrument(skip(self))]
    pub async fn render_header(&self) -> Result<RenderedHeader> {
        let repository = self.repository.as_ref();
        let (settings, navigation) = tokio::try_join!(
            fetch_single::<SiteSettings>(repository),
            fetch_single::<NavigationDoc>(repository),
        )?;
        debug!(links = navigation.links.len(), "rendering header");

        Ok(RenderedHeader {
            site_title: settings.site_title.as_text(),
            html: header_html(&self.templates, &settings, &navigation)?,
        })
    }

    /// Fetch the footer document and render the footer.
    #[instrument(skip(self))]
    pub async fn render_footer(&self) -> Result<String> {
        let footer = fetch_single::<FooterDoc>(self.repository.as_ref()).await?;
        debug!(services = footer.our_services.len(), "rendering footer");

        let copyright = Copyright {
            year: self
                .config
                .site
                .copyright_year
                .unwrap_or_else(|| Utc::now().year()),
            holder: &self.config.site.copyright_holder,
        };
        Ok(footer_html(&self.templates, &footer, &copyright)?)
    }

    /// Static head metadata from configuration.
    pub fn render_metadata(&self) -> Metadata {
        Metadata {
            canonical_url: self.config.url_for(&self.config.site.canonical_path),
            og_image_url: self.config.url_for(&self.config.site.og_image),
        }
    }

    /// Render the full document for a page. Fails as a whole if any region
    /// cannot be rendered.
    #[instrument(skip_all)]
    pub async fn render_page(&self, page: &PageContent) -> Result<String> {
        let (header, footer) = tokio::try_join!(self.render_header(), self.render_footer())?;
        let metadata = metadata_html(&self.templates, &self.render_metadata())?;

        let title = page
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or(header.site_title);

        let mut ctx = TemplateContext::new()
            .with_var("lang", &self.config.site.language)
            .with_var("title", title)
            .with_var("metadata", metadata)
            .with_var("header", header.html)
            .with_var("content", &page.body)
            .with_var("footer", footer);

        if self.config.cms.preview_toolbar {
            let toolbar_ctx =
                TemplateContext::new().with_var("repository", &self.config.cms.repository);
            ctx.insert(
                "preview_toolbar",
                self.templates.render("preview_toolbar", &toolbar_ctx)?,
            );
        }

        Ok(self.templates.render("document", &ctx)?)
    }
}

impl std::fmt::Debug for SiteShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteShell")
            .field("base_url", &self.config.site.base_url)
            .field("repository", &self.config.cms.repository)
            .finish_non_exhaustive()
    }
}
