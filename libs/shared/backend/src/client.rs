use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::cache::ResponseCache;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HMS backend URL is not configured")]
    NotConfigured,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// REST client for the HMS backend. Only GET is needed by the availability
/// endpoints; successful bodies go through the optional [`ResponseCache`].
pub struct BackendClient {
    client: Client,
    base_url: String,
    service_token: Option<String>,
    cache: Option<ResponseCache>,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });

        let cache = config
            .is_cache_enabled()
            .then(|| {
                ResponseCache::new(
                    Duration::from_secs(config.booked_times_cache_ttl_secs),
                    config.cache_capacity,
                )
            });

        Self {
            client,
            base_url: config.hms_api_url.trim_end_matches('/').to_string(),
            service_token: config.hms_api_token.clone(),
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    fn effective_token<'a>(&'a self, auth_token: Option<&'a str>) -> Option<&'a str> {
        auth_token.or(self.service_token.as_deref())
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.effective_token(auth_token) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Dropping bearer token with invalid header characters"),
            }
        }

        headers
    }

    /// Builds `{base_url}/{segments...}?{query}`. Each segment is
    /// percent-encoded on its own, so `/`, `?` and `#` inside a caller
    /// supplied id cannot change the path that is requested.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, BackendError> {
        if self.base_url.is_empty() {
            return Err(BackendError::NotConfigured);
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// GET the resource at `segments` (relative to the base URL) and decode
    /// the JSON body. Memoized bodies are scoped to the bearer token the
    /// request goes out with, so one caller never sees another's response.
    pub async fn get_json<T>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        auth_token: Option<&str>,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, query)?;
        let cache_key = format!("{} {}", self.effective_token(auth_token).unwrap_or(""), url);

        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&cache_key)) {
            return Ok(serde_json::from_value(cached)?);
        }

        debug!("Making request to {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.get_headers(auth_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, body);
            return Err(BackendError::Status { status, body });
        }

        let value: Value = response.json().await?;
        let data = serde_json::from_value(value.clone())?;

        if let Some(cache) = &self.cache {
            cache.insert(&cache_key, value);
        }

        Ok(data)
    }
}
