/// Shapes module for PowerPoint presentations.
///
/// This module provides types for working with shapes on slides:
/// - Shapes and their kinds
/// - Text frames, paragraphs and runs
/// - Run fonts
///
/// The design follows the python-pptx library structure.
pub mod base;
pub mod font;
pub mod textframe;

pub use base::{Shape, ShapeType};
pub use font::{Font, FontSize, Underline};
pub use textframe::{Paragraph, ParagraphItem, Run, TextFrame};
