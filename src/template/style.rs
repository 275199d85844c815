//! Capturing a run's character formatting and putting it back.
use crate::ooxml::pptx::dml::color::{ColorFormat, ColorType, RGBColor, ThemeColor};
use crate::ooxml::pptx::shapes::{Font, FontSize, TextFrame, Underline};
use crate::template::error::ColorApplyError;
use std::fmt;

/// Color of a captured style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturedColor {
    /// Literal sRGB value
    Rgb(RGBColor),
    /// Theme palette reference, kept as a reference
    Theme(ThemeColor),
    /// A color that cannot be carried over (system colors and the like)
    Unsupported,
}

impl CapturedColor {
    /// Resolve a run's fill color into something that can be reapplied.
    pub fn resolve(color: &ColorFormat) -> Self {
        match color.color_type() {
            Some(ColorType::Rgb) => color.rgb().map(Self::Rgb).unwrap_or(Self::Unsupported),
            Some(ColorType::Scheme) => color
                .theme_color()
                .map(Self::Theme)
                .unwrap_or(Self::Unsupported),
            Some(ColorType::System) => Self::Unsupported,
            // Best effort for the remaining types
            _ => color.rgb().map(Self::Rgb).unwrap_or(Self::Unsupported),
        }
    }
}

impl fmt::Display for CapturedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(rgb) => write!(f, "{}", rgb),
            Self::Theme(theme) => write!(f, "theme {}", theme),
            Self::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Snapshot of the formatting of one run.
///
/// `None` fields were not set on the run, which inherits them from the
/// placeholder, layout or master; they are left unset when the style is
/// applied again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStyle {
    pub name: Option<String>,
    pub size: Option<FontSize>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<Underline>,
    pub color: Option<CapturedColor>,
}

impl FontStyle {
    /// Style of the first run of the first paragraph, if there is one.
    pub fn capture(frame: &TextFrame) -> Option<Self> {
        let run = frame.paragraphs().first()?.runs().next()?;
        Some(Self::from_font(run.font()))
    }

    pub fn from_font(font: &Font) -> Self {
        Self {
            name: font.name(),
            size: font.size(),
            bold: font.bold(),
            italic: font.italic(),
            underline: font.underline(),
            color: font.color().as_ref().map(CapturedColor::resolve),
        }
    }

    /// Set every captured attribute on `font`.
    ///
    /// Empty typefaces and zero sizes are skipped. A color the font refuses
    /// is passed to `on_color_error` and the other attributes are still set.
    pub fn apply(&self, font: &mut Font, on_color_error: &mut dyn FnMut(ColorApplyError)) {
        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            font.set_name(name);
        }
        if let Some(size) = self.size.filter(|size| size.centipoints() != 0) {
            font.set_size(size);
        }
        if let Some(bold) = self.bold {
            font.set_bold(bold);
        }
        if let Some(italic) = self.italic {
            font.set_italic(italic);
        }
        if let Some(underline) = &self.underline {
            font.set_underline(underline);
        }

        match self.color {
            Some(CapturedColor::Rgb(rgb)) => font.set_rgb(rgb),
            Some(color @ CapturedColor::Theme(theme)) => {
                if let Err(source) = font.set_theme_color(theme) {
                    on_color_error(ColorApplyError { color, source });
                }
            },
            Some(CapturedColor::Unsupported) | None => {},
        }
    }
}
