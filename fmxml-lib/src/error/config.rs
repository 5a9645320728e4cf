//! Configuration error types

/// Errors raised while assembling a [`ConnectorConfig`](crate::ConnectorConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// The port is not a valid TCP port number.
    #[error("Invalid port: '{0}'")]
    InvalidPort(String),

    /// The timeout is not a whole number of seconds.
    #[error("Invalid timeout: '{0}'")]
    InvalidTimeout(String),
}
