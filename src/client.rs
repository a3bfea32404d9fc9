//! EDSM API client.
//!
//! Low-level HTTP client that handles request assembly, the upstream's
//! response conventions and optional response caching. Entity operations
//! are implemented via the `Fetch` trait and model methods.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::cache::ResponseCache;
use crate::error::{EdsmError, Result};

const DEFAULT_API_URL: &str = "https://www.edsm.net";
const USER_AGENT: &str = concat!("edsm/", env!("CARGO_PKG_VERSION"));

/// Low-level EDSM API client.
///
/// Handles HTTP requests against the `api-v1` and `api-system-v1` endpoint
/// families. Entity-specific operations are implemented via the
/// [`Fetch`](crate::Fetch) trait and methods on the model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and cache.
///
/// # Example
///
/// ```no_run
/// use edsm::EdsmClient;
///
/// # fn example() -> edsm::Result<()> {
/// // Create from environment variables
/// let client = EdsmClient::from_env()?;
///
/// // Or configure manually
/// let client = EdsmClient::new("https://www.edsm.net")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EdsmClient {
    http: Client,
    base_url: Arc<Url>,
    cache: Option<Arc<ResponseCache>>,
}

impl std::fmt::Debug for EdsmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdsmClient")
            .field("base_url", &self.base_url.as_str())
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl EdsmClient {
    /// Create a client from environment variables.
    ///
    /// Uses `EDSM_API_URL` for the base URL (defaults to
    /// `https://www.edsm.net`) and, when `EDSM_CACHE_DIR` is set, enables a
    /// disk cache rooted at that directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("EDSM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let client = Self::new(&base_url)?;

        match env::var("EDSM_CACHE_DIR") {
            Ok(dir) => Ok(client.with_cache(ResponseCache::new(dir))),
            Err(_) => Ok(client),
        }
    }

    /// Create a new client with the provided base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the EDSM API (e.g., `https://www.edsm.net`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(EdsmError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            cache: None,
        })
    }

    /// Attach a disk-backed response cache.
    ///
    /// Identical lookups (same endpoint, same parameters) are then answered
    /// from disk without touching the network.
    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform a GET against `path` with the given query parameters and
    /// decode the JSON body.
    ///
    /// The query string is encoded once and reused as the cache key, so a
    /// cached response is keyed by exactly the URL that would have been
    /// requested. A body of exactly `{}` is the upstream's "no such entity"
    /// sentinel and is reported as [`EdsmError::NotFound`]; it is never
    /// written to the cache.
    #[tracing::instrument(skip(self, query))]
    pub async fn fetch<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut url = self.base_url.join(path)?;
        let encoded = serde_urlencoded::to_string(query)?;
        if !encoded.is_empty() {
            url.set_query(Some(&encoded));
        }

        let namespace = path.replace('/', "-");
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&namespace, url.as_str())? {
                tracing::debug!(%url, "cache hit");
                return serde_json::from_value(hit).map_err(EdsmError::ParseError);
            }
        }

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(EdsmError::HttpError)?;
        let response = Self::check_response(response).await?;
        let body = response.text().await.map_err(EdsmError::HttpError)?;

        if body == "{}" {
            return Err(EdsmError::NotFound {
                endpoint: path.to_string(),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        if let Some(cache) = &self.cache {
            cache.put(&namespace, url.as_str(), &value)?;
        }

        serde_json::from_value(value).map_err(EdsmError::ParseError)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(EdsmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(EdsmError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // EDSM error payloads carry a "msg" field; fall back to the raw body.
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("msg").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = EdsmClient::new("https://www.edsm.net").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("EdsmClient"));
        assert!(debug.contains("base_url"));
        assert!(debug.contains("cached: false"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = EdsmClient::new("https://www.edsm.net").unwrap();
        let client2 = EdsmClient::new("https://www.edsm.net/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_with_cache_is_reported_in_debug() {
        let dir = tempfile::tempdir().unwrap();
        let client = EdsmClient::new("https://www.edsm.net")
            .unwrap()
            .with_cache(ResponseCache::new(dir.path()));
        assert!(format!("{:?}", client).contains("cached: true"));
    }
}
