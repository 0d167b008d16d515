//! HTTP client with rate limiting for the OMDb API
//!
//! This module provides a rate-limited HTTP client that keeps request
//! spacing polite toward the OMDb free tier and implements retry logic
//! with exponential backoff for transient errors.

use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{OmdbError, Result};

/// Base URL for the OMDb API
const OMDB_BASE_URL: &str = "https://www.omdbapi.com";

/// Environment variable holding the OMDb API key
const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 500;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart so a
/// fast-scrolling user cannot burn through the OMDb request quota.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Mutex<Instant>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Arguments
    /// * `requests_per_second` - Maximum number of requests allowed per second
    ///
    /// # Example
    /// ```
    /// use omdb_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(4.0); // 4 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Mutex::new(Instant::now() - min_interval),
        }
    }

    /// Acquire permission to make a request
    ///
    /// This method will wait if necessary to ensure the minimum interval
    /// between requests is respected.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the OMDb HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OMDb API key, sent with every request
    pub api_key: String,
    /// Base URL of the service (overridable for tests)
    pub base_url: String,
    /// Maximum requests per second (default: 4.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration for the given API key with default limits
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read the API key from the `OMDB_API_KEY` environment variable
    ///
    /// # Errors
    /// Returns `OmdbError::MissingApiKey` if the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(OmdbError::MissingApiKey);
        }
        Ok(Self::new(api_key))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: OMDB_BASE_URL.to_string(),
            requests_per_second: 4.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the OMDb API with rate limiting and retry logic
///
/// This client automatically:
/// - Attaches the configured API key to every request
/// - Limits request rate to stay inside the free-tier quota
/// - Retries on transient errors (429, 5xx) with exponential backoff
pub struct OmdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
    /// OMDb API key
    api_key: String,
    /// Service base URL, without a trailing slash
    base_url: String,
}

impl OmdbClient {
    /// Create a new client from the given configuration
    ///
    /// # Errors
    /// - `OmdbError::MissingApiKey` if the configured key is blank
    /// - `OmdbError::Http` if the HTTP client cannot be created
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OmdbError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(config.requests_per_second);

        Ok(Self {
            client,
            rate_limiter,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET request with the given query parameters
    ///
    /// The `apikey` parameter is attached automatically. Rate limiting
    /// and retries are handled internally.
    ///
    /// # Arguments
    /// * `params` - Query parameters, e.g. `[("s", "batman"), ("page", "2")]`
    ///
    /// # Returns
    /// The raw response body as a string
    ///
    /// # Errors
    /// - `OmdbError::Http` - Network or HTTP error after all retries
    /// - `OmdbError::RateLimited` - Server returned 429 after all retries
    pub async fn get(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut url = format!(
            "{}/?apikey={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        self.fetch_with_retry(&url, 0).await
    }

    /// Internal method to fetch with retry logic
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            // Wait for rate limiter before making request
            self.rate_limiter.acquire().await;

            debug!("GET {} (attempt {})", redact_key(url), attempt + 1);
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // Handle 429 - Rate Limited
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    warn!("rate limited, retrying in {:?}", delay);
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(OmdbError::RateLimited);
            }

            // Handle 5xx - Server errors
            if status.is_server_error() {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    warn!("server error {}, retrying in {:?}", status, delay);
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(OmdbError::Http(
                    response.error_for_status().unwrap_err(),
                ));
            }

            // Other errors (401 for a rejected key, etc.) - no retry
            Err(OmdbError::Http(response.error_for_status().unwrap_err()))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: 500ms, 1s, 2s, ...
        let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

/// Strip the API key value out of a URL before it reaches the logs
fn redact_key(url: &str) -> String {
    match url.split_once("apikey=") {
        Some((prefix, rest)) => {
            let tail = rest.split_once('&').map(|(_, t)| t).unwrap_or("");
            if tail.is_empty() {
                format!("{}apikey=***", prefix)
            } else {
                format!("{}apikey=***&{}", prefix, tail)
            }
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.omdbapi.com");
        assert_eq!(config.requests_per_second, 4.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation_requires_key() {
        let result = OmdbClient::new(ClientConfig::default());
        assert!(matches!(result, Err(OmdbError::MissingApiKey)));
    }

    #[test]
    fn test_client_creation_with_key() {
        let client = OmdbClient::new(ClientConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..ClientConfig::new("test-key")
        };
        let client = OmdbClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = OmdbClient::new(ClientConfig::new("test-key")).unwrap();

        assert_eq!(client.calculate_backoff_delay(0), Duration::from_millis(500));
        assert_eq!(client.calculate_backoff_delay(1), Duration::from_millis(1000));
        assert_eq!(client.calculate_backoff_delay(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("http://x/?apikey=secret&s=batman"),
            "http://x/?apikey=***&s=batman"
        );
        assert_eq!(redact_key("http://x/?apikey=secret"), "http://x/?apikey=***");
        assert_eq!(redact_key("http://x/?s=batman"), "http://x/?s=batman");
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 10 requests per second = 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(100));
    }
}
