//! Connector configuration

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the server host.
pub const ENV_HOST: &str = "FM_HOST";
/// Environment variable holding the server port (optional).
pub const ENV_PORT: &str = "FM_PORT";
/// Environment variable holding the account name.
pub const ENV_USER: &str = "FM_USER";
/// Environment variable holding the account password.
pub const ENV_PASS: &str = "FM_PASS";
/// Environment variable holding the URL scheme (optional, default `http`).
pub const ENV_SCHEME: &str = "FM_SCHEME";
/// Environment variable holding the request timeout in seconds (optional).
pub const ENV_TIMEOUT_SECS: &str = "FM_TIMEOUT_SECS";

/// Where the server lives and how to log in.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fmxml_lib::ConnectorConfig;
///
/// let config = ConnectorConfig::new("fm.example.com", "admin", "secret")
///     .with_port(8080)
///     .with_scheme("https")
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub host: String,
    pub port: Option<u16>,
    /// URL scheme.
    ///
    /// Default: `http`
    pub scheme: String,
    pub username: String,
    pub password: String,
    pub timeout: Option<Duration>,
}

impl ConnectorConfig {
    /// Creates a config with the default scheme and no port or timeout.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            scheme: "http".to_string(),
            username: username.into(),
            password: password.into(),
            timeout: None,
        }
    }

    /// Loads the config from `FM_HOST`, `FM_USER`, `FM_PASS` and the optional
    /// `FM_PORT`, `FM_SCHEME`, `FM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let mut config = Self::new(required(ENV_HOST)?, required(ENV_USER)?, required(ENV_PASS)?);

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            config.port = Some(parse_port(&port)?);
        }
        if let Some(scheme) = lookup(ENV_SCHEME).filter(|v| !v.is_empty()) {
            config.scheme = scheme;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the URL scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parses a TCP port number.
pub fn parse_port(s: &str) -> Result<u16, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(s.to_string()))
}
