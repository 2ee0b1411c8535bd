//! HTTP client for the storefront API.
//!
//! The base URL is injected at construction; nothing in here reads the
//! environment or config files.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use super::types::{Book, ErrorBody, SignupRequest};

/// Errors that can occur while talking to the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client misconfigured (unparseable base URL).
    Config(String),
    /// Transport failure (DNS, connection refused, reset, body read error).
    Network(String),
    /// Server answered with a non-success status. `message` is the server's
    /// own explanation when it sent one.
    Status { status: u16, message: Option<String> },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status {
                status,
                message: Some(message),
            } => write!(f, "HTTP {status}: {message}"),
            ApiError::Status {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote storefront as seen by the screens.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetches one book. `Ok(None)` means the server answered successfully
    /// but carried no book (empty body or JSON `null`).
    async fn fetch_book(&self, book_id: &str) -> Result<Option<Book>, ApiError>;

    /// Creates an account. Any 2xx counts as success.
    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError>;
}

/// `StoreApi` over plain HTTP + JSON.
pub struct HttpStoreClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpStoreClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Config(format!("invalid API base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Appends path segments to the base URL. Each segment is percent-encoded,
    /// so an opaque id can never escape its slot in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Config("API base URL cannot carry a path".to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl StoreApi for HttpStoreClient {
    async fn fetch_book(&self, book_id: &str) -> Result<Option<Book>, ApiError> {
        let url = self.endpoint(&["api", "books", book_id])?;
        info!("Fetching book {book_id} from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Book fetch status: {status}");
        if !status.is_success() {
            warn!("Book fetch for {book_id} failed with HTTP {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            info!("Book fetch for {book_id} returned an empty body");
            return Ok(None);
        }

        serde_json::from_str::<Option<Book>>(&body).map_err(|e| {
            warn!("Book payload for {book_id} did not parse: {e}");
            ApiError::Parse(e.to_string())
        })
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "signup"])?;
        info!("Submitting signup request to {url}");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Signup status: {status}");
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        warn!("Signup failed with HTTP {status}: {message:?}");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
