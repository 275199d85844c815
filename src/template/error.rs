/// Error types for template substitution.
use crate::ooxml::error::OoxmlError;
use crate::ooxml::pptx::dml::color::ColorError;
use crate::template::style::CapturedColor;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template is missing, unreadable or not a presentation package
    #[error("failed to load template {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// The updated presentation could not be serialized or written
    #[error("failed to save presentation to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// Document error not tied to a file path
    #[error("document error: {0}")]
    Document(#[from] OoxmlError),
}

/// A captured color could not be set on the replacement run.
///
/// Never fatal: the updater reports it and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not apply color {color}: {source}")]
pub struct ColorApplyError {
    pub color: CapturedColor,
    #[source]
    pub source: ColorError,
}
