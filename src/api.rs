// API client module: a small blocking HTTP client for the Open Library
// search endpoint. The rest of the crate only sees the `BookSource` trait,
// so tests can swap in a canned source without touching the network.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Endpoint used when `BOOK_SEARCH_URL` is not set.
pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org/search.json";

/// Environment variable that overrides the search endpoint.
pub const SEARCH_URL_ENV: &str = "BOOK_SEARCH_URL";

/// Failures at the HTTP boundary. None of them are retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Anything that can answer a free-text book query with a raw JSON document.
pub trait BookSource {
    fn search(&self, query: &str) -> Result<Value, TransportError>;
}

/// Blocking client for `GET <base_url>?q=<query>`.
#[derive(Clone, Debug)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Create a client configured from `BOOK_SEARCH_URL`, falling back to
    /// the public Open Library endpoint.
    pub fn from_env() -> Result<Self, TransportError> {
        let base_url =
            std::env::var(SEARCH_URL_ENV).unwrap_or_else(|_| DEFAULT_SEARCH_URL.into());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Client)?;
        Ok(OpenLibraryClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl BookSource for OpenLibraryClient {
    fn search(&self, query: &str) -> Result<Value, TransportError> {
        tracing::debug!(url = %self.base_url, query, "sending search request");
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .map_err(TransportError::Request)?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "search endpoint returned an error status");
            return Err(TransportError::Status(status));
        }

        let body: Value = res.json().map_err(TransportError::Decode)?;
        tracing::debug!("search response decoded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use std::net::TcpListener;

    fn client_for(server: &ServerGuard) -> OpenLibraryClient {
        OpenLibraryClient::new(format!("{}/search.json", server.url())).unwrap()
    }

    #[test]
    fn test_search_sends_query_parameter() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::UrlEncoded("q".into(), "the lord of the rings".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"numFound":0,"docs":[]}"#)
            .create();

        let body = client_for(&server).search("the lord of the rings").unwrap();

        mock.assert();
        assert_eq!(body["numFound"], 0);
    }

    #[test]
    fn test_search_reports_error_status() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let err = client_for(&server).search("dune").unwrap_err();

        assert!(matches!(err, TransportError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_search_rejects_non_json_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let err = client_for(&server).search("dune").unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_unreachable_host_is_request_error() {
        // Grab a free port, then release it so nothing is listening there.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = OpenLibraryClient::new(format!("http://127.0.0.1:{}/search.json", port)).unwrap();
        let err = client.search("dune").unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
