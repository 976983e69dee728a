//! Prismic REST API client.
//!
//! Every query runs against a content ref. Normal requests use the
//! repository's master ref, looked up at most once per cache window; preview
//! requests are pinned to the ref handed out by the preview session and skip
//! that lookup.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use serde::Deserialize;
use siteshell_core::Config;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    error::{CmsError, Result},
    repository::{ContentRepository, Document},
};

const USER_AGENT: &str = concat!("siteshell/", env!("CARGO_PKG_VERSION"));

/// How long a looked-up master ref is reused by default.
pub const DEFAULT_MASTER_REF_TTL: Duration = Duration::from_secs(5);

/// Content repository backed by the Prismic REST API v2.
///
/// Clones share the connection pool and the master ref cache.
#[derive(Debug, Clone)]
pub struct PrismicClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    lang: Option<String>,
    pinned_ref: Option<String>,
    master_ref_ttl: Duration,
    master_ref_cache: Arc<RwLock<Option<CachedRef>>>,
}

#[derive(Debug)]
struct CachedRef {
    reference: String,
    fetched_at: Instant,
}

impl CachedRef {
    fn fresh(&self, ttl: Duration) -> Option<&str> {
        (self.fetched_at.elapsed() < ttl).then_some(self.reference.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ApiRoot {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Document>,
}

impl PrismicClient {
    /// Create a client for an API endpoint such as
    /// `https://thaipfa.cdn.prismic.io/api/v2`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CmsError::fetch_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            access_token: None,
            lang: None,
            pinned_ref: None,
            master_ref_ttl: DEFAULT_MASTER_REF_TTL,
            master_ref_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from the `[cms]` configuration section.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(
            config.cms_endpoint(),
            Duration::from_secs(config.cms.timeout_secs),
        )?;
        client.access_token = config.cms.access_token.clone();
        client.lang = config.cms.lang.clone();
        client.master_ref_ttl = Duration::from_secs(config.cms.master_ref_ttl_secs);
        Ok(client)
    }

    /// Set the access token for private repositories.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Query documents in a specific locale.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// How long a master ref lookup is reused. Zero looks it up on every
    /// fetch.
    #[must_use]
    pub fn with_master_ref_ttl(mut self, ttl: Duration) -> Self {
        self.master_ref_ttl = ttl;
        self
    }

    /// A copy of this client pinned to a content ref. Shares the connection
    /// pool with the original.
    #[must_use]
    pub fn with_ref(&self, reference: impl Into<String>) -> Self {
        Self {
            pinned_ref: Some(reference.into()),
            ..self.clone()
        }
    }

    /// The API endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up the repository's current master ref.
    pub async fn master_ref(&self) -> Result<String> {
        let mut request = self.http.get(&self.endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let root: ApiRoot = Self::send_json(request, "repository root").await?;
        root.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| CmsError::fetch("repository has no master ref"))
    }

    /// Query all documents of a type at the given ref.
    pub async fn query_type(&self, reference: &str, doc_type: &str) -> Result<Vec<Document>> {
        let predicate = format!(r#"[[at(document.type, "{doc_type}")]]"#);
        let mut params = vec![
            ("ref", reference),
            ("q", predicate.as_str()),
            ("pageSize", "1"),
        ];
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.as_str()));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.as_str()));
        }

        let request = self
            .http
            .get(format!("{}/documents/search", self.endpoint))
            .query(&params);
        let response: SearchResponse = Self::send_json(request, doc_type).await?;
        Ok(response.results)
    }

    async fn resolve_ref(&self) -> Result<String> {
        match &self.pinned_ref {
            Some(reference) => Ok(reference.clone()),
            None => self.cached_master_ref().await,
        }
    }

    async fn cached_master_ref(&self) -> Result<String> {
        let ttl = self.master_ref_ttl;
        if ttl.is_zero() {
            return self.master_ref().await;
        }

        if let Some(reference) = self
            .master_ref_cache
            .read()
            .await
            .as_ref()
            .and_then(|cached| cached.fresh(ttl))
        {
            return Ok(reference.to_string());
        }

        // Held across the lookup so concurrent fetches share one request.
        let mut slot = self.master_ref_cache.write().await;
        if let Some(reference) = slot.as_ref().and_then(|cached| cached.fresh(ttl)) {
            return Ok(reference.to_string());
        }

        let reference = self.master_ref().await?;
        debug!(%reference, "cached master ref");
        *slot = Some(CachedRef {
            reference: reference.clone(),
            fetched_at: Instant::now(),
        });
        Ok(reference)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| CmsError::fetch_with_source(format!("request for {what} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, what, "content API returned an error");
            return Err(CmsError::fetch(format!(
                "content API error {status} for {what}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CmsError::fetch_with_source(format!("invalid response for {what}"), e))
    }
}

#[async_trait]
impl ContentRepository for PrismicClient {
    async fn get_single(&self, doc_type: &str) -> Result<Document> {
        let reference = self.resolve_ref().await?;
        debug!(doc_type, %reference, "querying singleton");

        self.query_type(&reference, doc_type)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::not_found(doc_type))
    }

    fn at_ref(&self, reference: &str) -> Option<Arc<dyn ContentRepository>> {
        Some(Arc::new(self.with_ref(reference)))
    }
}
