//! Deckfill - fill `{{key}}` placeholders in PowerPoint templates
//!
//! This library opens a .pptx template, replaces the placeholders found in
//! its text frames with supplied values and saves the result, keeping the
//! character formatting of the replaced text.
//!
//! # Features
//!
//! - **Format-preserving substitution**: typeface, size, bold, italic,
//!   underline and RGB or theme colors of the first run carry over
//! - **Minimal rewrites**: only text frames that contain placeholders are
//!   regenerated; every other byte of the package is kept
//! - **PresentationML model**: slides, shapes, text frames, runs and fonts
//!   for direct editing
//!
//! # Example - Filling a template
//!
//! ```no_run
//! use deckfill::{Replacements, TemplateUpdater};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut updater = TemplateUpdater::new("template.pptx", "report.pptx")?;
//! let values = Replacements::new()
//!     .with("theme", "School")
//!     .with("year", 2024);
//! updater.update_template(&values)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading slide text
//!
//! ```no_run
//! use deckfill::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("presentation.pptx")?;
//! for (i, slide) in pkg.slides().iter().enumerate() {
//!     for shape in slide.shapes() {
//!         if let Some(frame) = shape.text_frame() {
//!             println!("slide {}: {}", i + 1, frame.text());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Shared XML helpers
pub mod common;

/// OOXML (Office Open XML) packages and the PresentationML model
///
/// This module provides the OPC container layer and the slide, shape and
/// text model of .pptx presentations.
pub mod ooxml;

/// Placeholder substitution on top of the presentation model
pub mod template;

// Re-export commonly used types for convenience
pub use template::{
    CollectingSink, Diagnostic, DiagnosticSink, Replacements, TemplateError, TemplateUpdater,
    TracingSink,
};
