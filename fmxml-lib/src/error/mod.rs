//! Error types

mod api;
mod config;
mod field;
mod parse;
mod protocol;
mod query;

pub use api::*;
pub use config::*;
pub use field::*;
pub use parse::*;
pub use protocol::*;
pub use query::*;

use crate::model::ResultEnvelope;

/// Top-level error returned by [`FmConnector`](crate::FmConnector) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure: connection, non-2xx status, unauthorized.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body was not a well-formed result envelope.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The server answered with a non-zero error code.
    ///
    /// The envelope is still returned (materialized) because the server may
    /// send a partial record set alongside the code.
    #[error("{error}")]
    Protocol {
        /// The protocol error reported by the server.
        error: ProtocolError,
        /// The envelope that carried the error code.
        envelope: Box<ResultEnvelope>,
    },

    /// The query could not be compiled.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Connector configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the protocol error code, if the server reported one.
    pub fn protocol_code(&self) -> Option<i32> {
        match self {
            Self::Protocol { error, .. } => Some(error.code),
            _ => None,
        }
    }

    /// Returns the envelope that accompanied a protocol error.
    pub fn envelope(&self) -> Option<&ResultEnvelope> {
        match self {
            Self::Protocol { envelope, .. } => Some(envelope.as_ref()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}
