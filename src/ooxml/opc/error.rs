/// Error types for OPC package operations
use crate::common::xml::FragmentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    #[error("Content type not found for partname: {0}")]
    ContentTypeNotFound(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("XML parsing error in {part}: {source}")]
    XmlError {
        part: String,
        #[source]
        source: FragmentError,
    },

    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OpcError {
    /// Attach the partname to an XML scanning failure.
    pub(crate) fn xml(part: impl Into<String>, source: FragmentError) -> Self {
        OpcError::XmlError {
            part: part.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
