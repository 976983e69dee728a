//! SiteShell Core Library
//!
//! Configuration, error handling, and the typed content documents consumed by
//! the site shell renderer.

pub mod config;
pub mod document;
pub mod error;
pub mod richtext;

pub use config::Config;
pub use document::{
    FooterDoc, LinkField, NavigationDoc, NavigationLink, ServiceItem, SiteSettings, Singleton,
};
pub use error::{CoreError, Result};
pub use richtext::RichText;
