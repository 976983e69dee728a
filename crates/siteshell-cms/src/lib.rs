//! SiteShell content repository client.
//!
//! # Modules
//!
//! - [`repository`] - The [`ContentRepository`] seam and typed singleton fetches
//! - [`prismic`] - HTTP client for the Prismic REST API
//! - [`memory`] - In-memory repository backed by fixtures
//! - [`error`] - Fetch error taxonomy

pub mod error;
pub mod memory;
pub mod prismic;
pub mod repository;

pub use error::{CmsError, Result};
pub use memory::MemoryRepository;
pub use prismic::PrismicClient;
pub use repository::{ContentRepository, Document, fetch_single};
