//! HTTP client for the Financial Modeling Prep API.
//!
//! [`FmpClient`] is the single gateway every tool and resource funnels
//! through. Each call builds `GET {base_url}/{endpoint}?{params}&apikey={key}`
//! with a bounded timeout, and converts every failure mode into the
//! [`ApiResponse::Error`] shape instead of propagating it.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::envelope::{ApiResponse, ErrorKind};
use crate::core::config::ApiConfig;
use crate::core::error::{Error, Result};

/// Gateway to the Financial Modeling Prep REST API.
///
/// The client holds the shared reqwest connection pool and the resolved
/// API key. It is cheap to clone and safe to use from concurrent tool
/// invocations; each call is independent, with no retries or caching.
#[derive(Clone)]
pub struct FmpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl FmpClient {
    /// Create a client from API configuration.
    ///
    /// When no API key is configured, the upstream `demo` key is used so the
    /// server still starts (with restricted data) rather than failing.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("FMP_API_KEY not set - using demo mode (limited data access)");
                "demo".to_string()
            }
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Issue one GET request against a named endpoint.
    ///
    /// `params` are serialized as query parameters; the API key is always
    /// appended. On success the parsed JSON body is returned unchanged (list
    /// or object, as provided upstream). Every failure - transport error,
    /// timeout, non-2xx status, undecodable body - becomes the error
    /// envelope; this method never returns an `Err` and never panics.
    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResponse {
        let url = self.endpoint_url(endpoint, params);
        debug!(endpoint, "requesting upstream endpoint");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return transport_error(endpoint, e),
        };

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, %status, "upstream returned non-success status");
            return ApiResponse::error(ErrorKind::HttpError, format!("HTTP {status}"));
        }

        match response.json::<Value>().await {
            Ok(payload) => ApiResponse::Payload(payload),
            Err(e) if e.is_decode() => {
                warn!(endpoint, "upstream body was not valid JSON: {e}");
                ApiResponse::error(ErrorKind::DecodeError, format!("invalid JSON in response: {e}"))
            }
            Err(e) => transport_error(endpoint, e),
        }
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        pairs.push(("apikey", self.api_key.as_str()));

        // Serializing string pairs cannot fail.
        let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        format!("{}/{}?{}", self.base_url, endpoint, query)
    }
}

/// Map a reqwest failure onto the envelope taxonomy.
fn transport_error(endpoint: &str, e: reqwest::Error) -> ApiResponse {
    let kind = if e.is_timeout() {
        ErrorKind::Timeout
    } else if e.is_decode() {
        ErrorKind::DecodeError
    } else {
        ErrorKind::ConnectionError
    };
    warn!(endpoint, ?kind, "upstream request failed: {e}");
    ApiResponse::error(kind, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_client(base_url: &str) -> FmpClient {
        FmpClient::new(&ApiConfig {
            api_key: Some("test-key".to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_url_injects_api_key() {
        let client = test_client("https://example.com/stable");
        let url = client.endpoint_url("quote", &[("symbol", "AAPL".to_string())]);
        assert_eq!(url, "https://example.com/stable/quote?symbol=AAPL&apikey=test-key");
    }

    #[test]
    fn test_endpoint_url_encodes_parameters() {
        let client = test_client("https://example.com/stable");
        let url = client.endpoint_url("search-symbol", &[("query", "S&P 500".to_string())]);
        assert!(url.contains("query=S%26P+500"));
    }

    #[test]
    fn test_missing_api_key_falls_back_to_demo() {
        let client = FmpClient::new(&ApiConfig {
            api_key: None,
            base_url: "https://example.com".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.api_key, "demo");
    }

    #[tokio::test]
    async fn test_payload_returned_unchanged() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "AAPL".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"symbol":"AAPL","price":150.0}]"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let response = client.get("quote", &[("symbol", "AAPL".to_string())]).await;

        let records = response.records().expect("expected array payload");
        assert_eq!(records[0]["symbol"], "AAPL");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/profile")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let response = client.get("profile", &[("symbol", "AAPL".to_string())]).await;

        match response {
            ApiResponse::Error(envelope) => {
                assert_eq!(envelope.error, ErrorKind::HttpError);
                assert!(envelope.message.contains("403"));
            }
            ApiResponse::Payload(_) => panic!("expected error envelope"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let response = client.get("quote", &[("symbol", "AAPL".to_string())]).await;

        match response {
            ApiResponse::Error(envelope) => assert_eq!(envelope.error, ErrorKind::DecodeError),
            ApiResponse::Payload(_) => panic!("expected error envelope"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_becomes_connection_error() {
        // Port 1 on localhost is never listening.
        let client = test_client("http://127.0.0.1:1");
        let response = client.get("quote", &[("symbol", "AAPL".to_string())]).await;

        match response {
            ApiResponse::Error(envelope) => assert_eq!(envelope.error, ErrorKind::ConnectionError),
            ApiResponse::Payload(_) => panic!("expected error envelope"),
        }
    }
}
