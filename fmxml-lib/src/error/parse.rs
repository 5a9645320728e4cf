//! Deserialization error types

/// The response body could not be deserialized into a result envelope.
///
/// This is fatal for the call: no partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The XML was malformed or did not match the result-set grammar.
    #[error("XML deserialization failed: {source}")]
    Xml {
        #[source]
        source: quick_xml::DeError,
    },
}

impl From<quick_xml::DeError> for ParseError {
    fn from(source: quick_xml::DeError) -> Self {
        Self::Xml { source }
    }
}
