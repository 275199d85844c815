//! PowerPoint (.pptx) presentation support.
//!
//! This module reads a presentation package, exposes its slides, shapes,
//! text frames and run fonts, and writes edited text back while leaving
//! every other part of the package untouched.
//!
//! - `Package`: The overall .pptx file package
//! - `Slide`: The shape tree of one slide
//! - `shapes`: Shapes, text frames, paragraphs, runs and fonts
//! - `dml`: DrawingML colors
//!
//! # Example
//!
//! ```rust,no_run
//! use deckfill::ooxml::pptx::{Package, RGBColor};
//!
//! let mut pkg = Package::open("deck.pptx")?;
//! let slide = &mut pkg.slides_mut()[0];
//! if let Some(frame) = slide.shapes_mut()[0].text_frame_mut() {
//!     frame.clear();
//!     let run = frame.add_paragraph().add_run();
//!     run.set_text("Quarterly review");
//!     run.font_mut().set_bold(true);
//!     run.font_mut().set_rgb(RGBColor::new(0x1F, 0x4E, 0x79));
//! }
//! pkg.save("deck-out.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dml;
pub mod package;
pub mod presentation;
pub mod shapes;
pub mod slide;

#[cfg(test)]
pub(crate) mod testutil;

pub use dml::{ColorError, ColorFormat, ColorType, RGBColor, ThemeColor};
pub use package::Package;
pub use shapes::{
    Font, FontSize, Paragraph, ParagraphItem, Run, Shape, ShapeType, TextFrame, Underline,
};
pub use slide::Slide;
