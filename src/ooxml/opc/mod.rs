/// Open Packaging Conventions (OPC) implementation.
///
/// Just enough of OPC for in-place editing of an existing package:
///
/// - ZIP-based physical packaging that keeps member order and compression
/// - Partnames (`PackURI`) and relationship resolution
/// - Content type lookup from `[Content_Types].xml`
///
/// Parts are held as raw bytes. Only parts that are explicitly replaced are
/// written back with new content; every other member round-trips verbatim.

pub mod constants;
pub mod content_types;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
