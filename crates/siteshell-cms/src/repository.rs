//! Content repository abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use siteshell_core::Singleton;
use tracing::debug;

use crate::error::Result;

/// Source of singleton content documents.
///
/// One instance is constructed at startup and shared behind an `Arc`; it is
/// never mutated, so the same instance serves concurrent requests.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch the single document of the given type.
    async fn get_single(&self, doc_type: &str) -> Result<Document>;

    /// A view of this repository pinned to a specific content ref, used for
    /// previews. Repositories without refs return `None`.
    fn at_ref(&self, _reference: &str) -> Option<Arc<dyn ContentRepository>> {
        None
    }
}

/// A raw document as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub doc_type: String,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub data: serde_json::Value,
}

impl Document {
    /// Decode the document payload into its typed form.
    pub fn decode<T: Singleton>(self) -> Result<T> {
        Ok(T::decode(self.data)?)
    }
}

/// Fetch a singleton and decode it into its typed form.
pub async fn fetch_single<T: Singleton>(repository: &dyn ContentRepository) -> Result<T> {
    debug!(doc_type = T::TYPE, "fetching singleton");
    repository.get_single(T::TYPE).await?.decode()
}
