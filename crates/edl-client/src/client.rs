//! HTTP indicator store client.

use crate::config::RateLimitConfig;
use async_trait::async_trait;
use edl_core::{EdlError, IndicatorStore, PageResult, Result};
use governor::{DefaultDirectRateLimiter, RateLimiter};
use reqwest::Client as HttpClient;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Indicator search endpoint, relative to the base URL
const SEARCH_PATH: &str = "/indicators/search";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a remote indicator store
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: Option<String>,
    search_url: Url,
    timeout: Duration,
    rate_limiter: DefaultDirectRateLimiter,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    page: usize,
    size: usize,
}

impl StoreClient {
    /// Create a client for the store at `base_url` using default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        StoreClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> StoreClientBuilder {
        StoreClientBuilder::new(base_url)
    }

    /// The fully resolved search endpoint
    #[must_use]
    pub fn search_url(&self) -> &Url {
        &self.inner.search_url
    }

    /// Request one page of indicators
    #[instrument(skip(self), fields(store = %self.inner.search_url))]
    pub async fn search(&self, query: &str, page: usize, size: usize) -> Result<PageResult> {
        self.inner.rate_limiter.until_ready().await;
        debug!(page, size, "indicator search request");

        let mut request = self
            .inner
            .http
            .post(self.inner.search_url.clone())
            .json(&SearchRequest { query, page, size });
        if let Some(key) = &self.inner.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| self.transport_error(&e))?;
        self.handle_response(response).await
    }

    fn transport_error(&self, err: &reqwest::Error) -> EdlError {
        if err.is_timeout() {
            EdlError::Timeout(self.inner.timeout.as_secs())
        } else {
            EdlError::Http(err.to_string())
        }
    }

    /// Handle a search response
    async fn handle_response(&self, response: reqwest::Response) -> Result<PageResult> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(EdlError::Json)
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to an EdlError
    async fn handle_error(status: u16, response: reqwest::Response) -> EdlError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            401 | 403 => EdlError::Unauthorized,
            429 => {
                warn!("rate limited by indicator store");
                EdlError::RateLimited { retry_after }
            }
            _ => EdlError::Store {
                code: status,
                message,
            },
        }
    }
}

#[async_trait]
impl IndicatorStore for StoreClient {
    async fn find_page(&self, query: &str, page: usize, size: usize) -> Result<PageResult> {
        self.search(query, page, size).await
    }
}

/// Builder for configuring a [`StoreClient`]
pub struct StoreClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: String,
    rate_limit: RateLimitConfig,
}

impl StoreClientBuilder {
    /// Create a new builder for the store at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("edl-rs/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Set the API key sent as a bearer token
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the request rate limit
    #[must_use]
    pub const fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<StoreClient> {
        let search_url = format!("{}{SEARCH_PATH}", self.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&search_url).map_err(|e| {
            EdlError::Config(format!("invalid store URL '{}': {e}", self.base_url))
        })?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| EdlError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(StoreClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                search_url,
                timeout: self.timeout,
                rate_limiter: RateLimiter::direct(self.rate_limit.quota()),
            }),
        })
    }
}
