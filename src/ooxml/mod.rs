//! Office Open XML (OOXML) support.
//!
//! Only the pieces needed to edit PowerPoint (.pptx) text in place:
//!
//! 1. **OPC Layer** (`opc`): ZIP container, partnames, relationships, content types
//! 2. **PresentationML** (`pptx`): slides, shapes, text frames, runs and fonts
//!
//! # Example
//!
//! ```rust,no_run
//! use deckfill::ooxml::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! for slide in pkg.slides() {
//!     for shape in slide.shapes() {
//!         if let Some(frame) = shape.text_frame() {
//!             println!("{}: {}", shape.name(), frame.text());
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
