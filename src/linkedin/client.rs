// src/linkedin/client.rs
use crate::extractors::html::extract_from_html;
use crate::linkedin::models::{FetchConfig, ProfileRecord};
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

/// HTTP collaborator for URL-based extraction: validates profile URLs,
/// fetches the page with a fixed retry policy, and hands the HTML to the
/// extractors. Parsing itself happens outside this client and never fails.
pub struct ProfileClient {
    config: FetchConfig,
    http: reqwest::Client,
}

impl ProfileClient {
    /// Creates a client configured for LinkedIn interaction: browser-style
    /// User-Agent and Accept headers, plus a per-attempt timeout.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?; // Propagates reqwest::Error as FetchError::Network

        Ok(Self { config, http })
    }

    /// Validates that a URL points at a LinkedIn profile: linkedin.com host
    /// and an `/in/` path segment. Company pages and job listings fail here.
    pub fn is_valid_profile_url(url: &str) -> bool {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return false;
        };
        let host_ok = matches!(
            parsed.host_str().map(|h| h.to_lowercase()).as_deref(),
            Some("linkedin.com") | Some("www.linkedin.com")
        );
        host_ok && parsed.path().to_lowercase().contains("/in/")
    }

    /// Validates the URL, fetches the profile page, and extracts a record.
    /// `InvalidUrl` is returned before any network call is made.
    pub async fn fetch_and_parse(&self, url: &str) -> Result<ProfileRecord, FetchError> {
        if !Self::is_valid_profile_url(url) {
            tracing::warn!("Rejected non-profile URL: {}", url);
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let html = self.fetch_profile_text(url).await?;
        Ok(extract_from_html(&html, url))
    }

    /// Downloads the page body with a fixed attempt ceiling and a fixed
    /// delay between attempts. An anti-automation block aborts immediately;
    /// HTTP and network failures are retried until the ceiling, then
    /// surfaced as `RetriesExhausted` carrying the final cause.
    pub async fn fetch_profile_text(&self, url: &str) -> Result<String, FetchError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::info!(
                "Fetching profile (attempt {}/{}): {}",
                attempt,
                max_attempts,
                url
            );

            match self.fetch_once(url).await {
                Ok(body) => {
                    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
                    return Ok(body);
                }
                // Retrying a detected block only gets the client banned faster.
                Err(err @ FetchError::Blocked(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!("Attempt {}/{} failed: {}", attempt, max_attempts, err);
                    if attempt >= max_attempts {
                        return Err(FetchError::RetriesExhausted {
                            attempts: max_attempts,
                            cause: Box::new(err),
                        });
                    }
                    tokio::time::sleep(Duration::from_secs(self.config.retry_delay_secs)).await;
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        // LinkedIn's anti-automation layer answers with status 999 or
        // redirects to a challenge page.
        let status = response.status();
        if status.as_u16() == 999 {
            return Err(FetchError::Blocked(format!("status 999 from {}", url)));
        }
        if response.url().as_str().to_lowercase().contains("challenge") {
            return Err(FetchError::Blocked(format!(
                "challenge redirect at {}",
                response.url()
            )));
        }
        if !status.is_success() {
            tracing::warn!("HTTP error status {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout_secs)
        } else {
            FetchError::Network(err)
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> FetchConfig {
        FetchConfig {
            retry_delay_secs: 0, // no pauses in tests
            timeout_secs: 5,
            ..FetchConfig::default()
        }
    }

    #[test]
    fn test_url_validation() {
        let valid = [
            "https://www.linkedin.com/in/johndoe",
            "https://linkedin.com/in/jane-smith-123",
            "https://www.linkedin.com/in/company-ceo-456/",
        ];
        let invalid = [
            "https://facebook.com/johndoe",
            "https://linkedin.com/company/tech-corp",
            "https://www.linkedin.com/jobs/search",
            "not a url",
            "",
        ];

        for url in valid {
            assert!(ProfileClient::is_valid_profile_url(url), "rejected: {}", url);
        }
        for url in invalid {
            assert!(!ProfileClient::is_valid_profile_url(url), "accepted: {}", url);
        }
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_network_call() {
        let client = ProfileClient::new(test_config()).unwrap();
        let err = client.fetch_and_parse("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(ref input) if input == "not a url"));
    }

    #[tokio::test]
    async fn test_retries_exhausted_reports_configured_attempts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/in/failing")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = ProfileClient::new(test_config()).unwrap();
        let err = client
            .fetch_profile_text(&format!("{}/in/failing", server.url()))
            .await
            .unwrap_err();

        match err {
            FetchError::RetriesExhausted { attempts, cause } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*cause, FetchError::Http(status) if status.as_u16() == 503));
            }
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_anti_bot_status_aborts_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/in/blocked")
            .with_status(999)
            .expect(1)
            .create_async()
            .await;

        let client = ProfileClient::new(test_config()).unwrap();
        let err = client
            .fetch_profile_text(&format!("{}/in/blocked", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Blocked(_)));
        assert_eq!(err.attempts(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_successful_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let body = "<html><body><h1>Jane Smith</h1></body></html>";
        server
            .mock("GET", "/in/janesmith")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = ProfileClient::new(test_config()).unwrap();
        let fetched = client
            .fetch_profile_text(&format!("{}/in/janesmith", server.url()))
            .await
            .unwrap();
        assert_eq!(fetched, body);
    }
}
