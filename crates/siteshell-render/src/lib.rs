//! SiteShell Render Library
//!
//! Renders the site header, footer and document shell around page content.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with escaped and raw interpolation
//! - [`html`] - Header, footer and metadata markup from typed documents
//! - [`shell`] - [`SiteShell`], which fetches the documents and assembles the page

pub mod html;
pub mod shell;
pub mod template;

pub use html::Metadata;
pub use shell::{PageContent, RenderError, RenderedHeader, SiteShell};
pub use template::{Template, TemplateContext, TemplateRegistry};
