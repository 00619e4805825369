//! Forum API client implementation.
//!
//! Provides the HTTP client for a Discourse-style forum: tag search and
//! site metadata. Handles request/response processing, error mapping,
//! and retry logic for transient failures.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{Site, TagSearchResponse, TagSearchResult};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// The forum API client.
///
/// Provides async methods for the endpoints lazyforum consumes. The
/// forum is browsed anonymously, so no credentials are attached.
#[derive(Debug)]
pub struct ForumClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the forum instance.
    base_url: String,
}

impl ForumClient {
    /// Create a new forum client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Self::build_http_client()?;
        let base_url = normalize_base_url(base_url);

        Ok(Self { client, base_url })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Validate the connection by fetching the site payload.
    #[instrument(skip(self))]
    pub async fn validate_connection(&self) -> Result<Site> {
        debug!("Validating forum connection");

        let site = self.fetch_site().await.map_err(|e| {
            error!("Connection validation failed: {}", e);
            match e {
                ApiError::Network(_) => ApiError::ConnectionFailed(format!(
                    "Cannot connect to {}: {}",
                    self.base_url, e
                )),
                _ => ApiError::ConnectionFailed(e.to_string()),
            }
        })?;

        info!(top_tags = site.top_tags.len(), "Connected to forum");
        Ok(site)
    }

    /// Fetch site metadata, including the ranked top tags.
    ///
    /// Calls `GET /site.json`.
    #[instrument(skip(self))]
    pub async fn fetch_site(&self) -> Result<Site> {
        let url = format!("{}/site.json", self.base_url);
        let site: Site = self.get(&url).await?;
        Ok(site)
    }

    /// Search tags matching a query.
    ///
    /// Calls `GET /tags/filter/search.json?q=<query>&limit=<limit>`.
    ///
    /// # Arguments
    ///
    /// * `query` - The search text typed by the user
    /// * `limit` - Maximum number of results to return
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_tags(&self, query: &str, limit: u32) -> Result<Vec<TagSearchResult>> {
        debug!("Searching tags: limit={}", limit);

        let url = format!(
            "{}/tags/filter/search.json?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );

        let response: TagSearchResponse = self.get(&url).await?;
        debug!("Found {} tags", response.results.len());
        Ok(response.results)
    }

    /// Perform a GET request with error handling.
    ///
    /// Includes retry logic for transient failures (rate limiting,
    /// server errors, network hiccups).
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempts = 0;
        let mut last_error: Option<ApiError> = None;

        while attempts < MAX_RETRIES {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get::<T>(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if Self::is_retryable(&e) && attempts < MAX_RETRIES {
                        let delay = Self::calculate_retry_delay(attempts);
                        warn!(
                            "Request failed (attempt {}), retrying in {}ms: {}",
                            attempts, delay, e
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::ServerError("Max retries exceeded".to_string())))
    }

    /// Execute a single GET request.
    async fn execute_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        // Discourse-style errors arrive as {"errors": ["..."]}
        let context = if body.is_empty() {
            url.to_string()
        } else {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(arr) = json.get("errors").and_then(|v| v.as_array()) {
                    let messages: Vec<&str> = arr.iter().filter_map(|v| v.as_str()).collect();
                    if !messages.is_empty() {
                        return ApiError::from_status(status, &messages.join(", "));
                    }
                }
            }
            url.to_string()
        };

        ApiError::from_status(status, &context)
    }

    /// Check if an error is retryable.
    fn is_retryable(error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(attempt: u32) -> u64 {
        RETRY_DELAY_MS * 2u64.pow(attempt - 1)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!(
            "URL does not use HTTPS: {}. This is insecure for production use.",
            url
        );
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://forum.example.com/"),
            "https://forum.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://forum.example.com///"),
            "https://forum.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://example.com/forum/"),
            "https://example.com/forum"
        );
    }

    #[test]
    fn test_is_retryable_rate_limited() {
        assert!(ForumClient::is_retryable(&ApiError::RateLimited));
    }

    #[test]
    fn test_is_retryable_server_error() {
        assert!(ForumClient::is_retryable(&ApiError::ServerError(
            "test".to_string()
        )));
    }

    #[test]
    fn test_is_not_retryable_not_found() {
        assert!(!ForumClient::is_retryable(&ApiError::NotFound(
            "test".to_string()
        )));
    }

    #[test]
    fn test_retry_delay_exponential() {
        assert_eq!(ForumClient::calculate_retry_delay(1), 1000);
        assert_eq!(ForumClient::calculate_retry_delay(2), 2000);
        assert_eq!(ForumClient::calculate_retry_delay(3), 4000);
    }

    #[test]
    fn test_error_from_response_extracts_discourse_errors() {
        let err = ForumClient::error_from_response(
            StatusCode::NOT_FOUND,
            "https://forum.example.com/x",
            r#"{"errors": ["The requested URL or resource could not be found."]}"#,
        );
        match err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("could not be found"));
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_response_falls_back_to_url() {
        let err = ForumClient::error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "https://forum.example.com/x",
            "not json",
        );
        match err {
            ApiError::ServerError(msg) => assert!(msg.contains("forum.example.com")),
            _ => panic!("Expected ServerError"),
        }
    }
}
