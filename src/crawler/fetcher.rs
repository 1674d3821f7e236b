//! HTTP fetching and link probing
//!
//! One shared reqwest client serves both the page fetch and the link probes.
//! The page fetch needs the body and a generous timeout; probes are
//! body-less HEAD requests on a short leash, with a single GET retry when
//! HEAD fails at the transport level (some servers reject or drop HEAD).

use crate::config::FetcherConfig;
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connect, TLS, or timeout
    #[error("request failed: {0}")]
    Unreachable(String),

    /// The server answered with an error status
    #[error("server returned HTTP {0}")]
    Status(u16),
}

/// Outcome of probing a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The server answered; callers decide what the status means
    Status(u16),
    /// Neither HEAD nor GET got a response
    Unreachable,
}

/// Builds the shared HTTP client
///
/// Per-request timeouts are set at call sites since the page fetch and link
/// probes run on different budgets.
///
/// # Arguments
///
/// * `config` - Fetcher settings, of which only the user agent applies here
///
/// # Returns
///
/// * `Ok(Client)` - A configured client
/// * `Err(reqwest::Error)` - TLS backend initialization failed
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body as text
///
/// Redirects are followed by the client; any final status outside the 2xx
/// range is a fetch failure, as is a transport error at any point (including
/// while streaming the body).
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - Absolute URL of the page
/// * `timeout` - Hard deadline for the whole request
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - The page could not be retrieved
pub async fn fetch_page(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    tracing::debug!("Fetched {} (HTTP {})", url, status.as_u16());

    response
        .text()
        .await
        .map_err(|e| FetchError::Unreachable(e.to_string()))
}

/// Probes a link for liveness
///
/// Sends a HEAD request; if that fails at the transport level, retries once
/// as GET before giving up. Any response at all, whatever its status, counts
/// as reaching the server.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - Absolute URL of the link
/// * `timeout` - Hard deadline applied to each attempt separately
pub async fn probe_link(client: &Client, url: &str, timeout: Duration) -> ProbeResult {
    match send_probe(client, Method::HEAD, url, timeout).await {
        Some(status) => ProbeResult::Status(status),
        None => match send_probe(client, Method::GET, url, timeout).await {
            Some(status) => {
                tracing::debug!("HEAD failed for {}, GET fallback got {}", url, status);
                ProbeResult::Status(status)
            }
            None => ProbeResult::Unreachable,
        },
    }
}

async fn send_probe(client: &Client, method: Method, url: &str, timeout: Duration) -> Option<u16> {
    client
        .request(method, url)
        .timeout(timeout)
        .send()
        .await
        .ok()
        .map(|response| response.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&FetcherConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let body = fetch_page(&test_client(), &server.uri(), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_page_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = fetch_page(&test_client(), &server.uri(), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_page_redirect_without_location_is_error() {
        // A 3xx the client cannot follow must not pass for a fetched page
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(301))
            .mount(&server)
            .await;

        let err = fetch_page(&test_client(), &server.uri(), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(301)));
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable() {
        let err = fetch_page(
            &test_client(),
            "http://127.0.0.1:1/",
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_probe_reports_status_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let result = probe_link(
            &test_client(),
            &format!("{}/gone", server.uri()),
            Duration::from_secs(2),
        )
        .await;
        assert_eq!(result, ProbeResult::Status(410));
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_get() {
        let server = MockServer::start().await;
        // HEAD stalls past the probe deadline; GET answers promptly
        Mock::given(method("HEAD"))
            .and(path("/slow-head"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow-head"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = probe_link(
            &test_client(),
            &format!("{}/slow-head", server.uri()),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(result, ProbeResult::Status(200));
    }

    #[tokio::test]
    async fn test_probe_unreachable() {
        let result = probe_link(&test_client(), "http://127.0.0.1:1/", Duration::from_secs(1)).await;
        assert_eq!(result, ProbeResult::Unreachable);
    }
}
