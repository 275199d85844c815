/// DrawingML building blocks shared by PresentationML text.
pub mod color;

pub use color::{ColorError, ColorFormat, ColorType, RGBColor, ThemeColor};
