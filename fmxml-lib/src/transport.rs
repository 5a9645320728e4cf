//! HttpExecutor trait and the reqwest-backed executor

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use url::Url;

use crate::error::ApiError;

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = "fmxml-lib connector";

/// HTTP Basic credentials for the server.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Status and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the single HTTP GET behind every connector operation.
///
/// The connector builds the URL and interprets the status; implementors only
/// move bytes. Implementations must not retry.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use fmxml_lib::error::ApiError;
/// use fmxml_lib::transport::{Credentials, HttpExecutor, HttpResponse};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl HttpExecutor for Canned {
///     async fn get(&self, _url: &url::Url, _credentials: &Credentials) -> Result<HttpResponse, ApiError> {
///         Ok(HttpResponse::new(200, self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Sends a GET to `url` with HTTP Basic `credentials`.
    async fn get(&self, url: &Url, credentials: &Credentials) -> Result<HttpResponse, ApiError>;
}

/// [`HttpExecutor`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestExecutor {
    /// Wraps an existing client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn get(&self, url: &Url, credentials: &Credentials) -> Result<HttpResponse, ApiError> {
        let mut request = self
            .client
            .get(url.clone())
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(USER_AGENT, USER_AGENT_VALUE);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

impl ReqwestExecutor {
    fn map_error(&self, error: reqwest::Error) -> ApiError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}
