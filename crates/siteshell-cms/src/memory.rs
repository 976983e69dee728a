//! In-memory content repository.
//!
//! Serves documents from a map, optionally loaded from a JSON fixture file of
//! the form `{ "settings": { ...data... }, "navigation": { ... } }`. Used for
//! offline rendering and in tests, where individual document types can also
//! be made to fail.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;

use crate::{
    error::{CmsError, Result},
    repository::{ContentRepository, Document},
};

/// Content repository holding documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    documents: HashMap<String, Document>,
    failures: HashMap<String, String>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load documents from a JSON fixture file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CmsError::fetch_with_source(format!("cannot read fixtures {}", path.display()), e)
        })?;
        let fixtures: HashMap<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| {
                CmsError::fetch_with_source(format!("invalid fixtures {}", path.display()), e)
            })?;

        Ok(fixtures
            .into_iter()
            .fold(Self::new(), |repo, (doc_type, data)| {
                repo.with_document(doc_type, data)
            }))
    }

    /// Add or replace the document of a type.
    #[must_use]
    pub fn with_document(mut self, doc_type: impl Into<String>, data: serde_json::Value) -> Self {
        let doc_type = doc_type.into();
        self.documents.insert(
            doc_type.clone(),
            Document {
                id: format!("{doc_type}-fixture"),
                doc_type,
                lang: None,
                data,
            },
        );
        self
    }

    /// Make every fetch of a type fail with a fetch error.
    #[must_use]
    pub fn with_failure(mut self, doc_type: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(doc_type.into(), message.into());
        self
    }

    /// Document types this repository can serve.
    pub fn document_types(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.documents.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn get_single(&self, doc_type: &str) -> Result<Document> {
        if let Some(message) = self.failures.get(doc_type) {
            return Err(CmsError::fetch(message.clone()));
        }

        self.documents
            .get(doc_type)
            .cloned()
            .ok_or_else(|| CmsError::not_found(doc_type))
    }
}
