/// Error types for OOXML operations.
use crate::common::xml::FragmentError;
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// XML parsing error inside a part
    #[error("XML error in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: FragmentError,
    },

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OoxmlError {
    /// Attach the partname to an XML scanning failure.
    pub(crate) fn xml(part: impl Into<String>, source: FragmentError) -> Self {
        OoxmlError::Xml {
            part: part.into(),
            source,
        }
    }
}
