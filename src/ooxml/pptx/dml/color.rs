/// DrawingML color values.
///
/// A solid fill holds exactly one color element. `srgbClr` carries a literal
/// triple, `schemeClr` links to a slot of the theme palette, `sysClr` names
/// an operating system color, and `prstClr`/`hslClr`/`scrgbClr` are the
/// rarer encodings. Color transforms (`lumMod`, `alpha`, ...) nested inside
/// the color element are not modeled.
use crate::common::xml::fragment::{ElementSpan, child_elements};
use std::fmt;
use thiserror::Error;

/// RGB color representation.
///
/// # Examples
///
/// ```rust
/// use deckfill::ooxml::pptx::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// assert_eq!(red.to_hex(), "FF0000");
/// assert_eq!(RGBColor::from_hex("#0000ff"), Some(RGBColor::new(0, 0, 255)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGBColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a six digit hex string, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Upper-case hex string without `#`, as stored in `a:srgbClr/@val`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Theme palette slot referenced by `a:schemeClr/@val` (ST_SchemeColorVal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Background1,
    Text1,
    Background2,
    Text2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    /// `phClr`: stands for "the color of the referencing element" and is
    /// only meaningful inside theme style matrices
    Placeholder,
    Dark1,
    Light1,
    Dark2,
    Light2,
}

/// ST_SchemeColorVal tokens
static THEME_COLOR_TOKENS: phf::Map<&'static str, ThemeColor> = phf::phf_map! {
    "bg1" => ThemeColor::Background1,
    "tx1" => ThemeColor::Text1,
    "bg2" => ThemeColor::Background2,
    "tx2" => ThemeColor::Text2,
    "accent1" => ThemeColor::Accent1,
    "accent2" => ThemeColor::Accent2,
    "accent3" => ThemeColor::Accent3,
    "accent4" => ThemeColor::Accent4,
    "accent5" => ThemeColor::Accent5,
    "accent6" => ThemeColor::Accent6,
    "hlink" => ThemeColor::Hyperlink,
    "folHlink" => ThemeColor::FollowedHyperlink,
    "phClr" => ThemeColor::Placeholder,
    "dk1" => ThemeColor::Dark1,
    "lt1" => ThemeColor::Light1,
    "dk2" => ThemeColor::Dark2,
    "lt2" => ThemeColor::Light2,
};

impl ThemeColor {
    pub fn from_xml(value: &str) -> Option<Self> {
        THEME_COLOR_TOKENS.get(value).copied()
    }

    pub fn to_xml(self) -> &'static str {
        match self {
            Self::Background1 => "bg1",
            Self::Text1 => "tx1",
            Self::Background2 => "bg2",
            Self::Text2 => "tx2",
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Hyperlink => "hlink",
            Self::FollowedHyperlink => "folHlink",
            Self::Placeholder => "phClr",
            Self::Dark1 => "dk1",
            Self::Light1 => "lt1",
            Self::Dark2 => "dk2",
            Self::Light2 => "lt2",
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Background1 => "Background1",
            Self::Text1 => "Text1",
            Self::Background2 => "Background2",
            Self::Text2 => "Text2",
            Self::Accent1 => "Accent1",
            Self::Accent2 => "Accent2",
            Self::Accent3 => "Accent3",
            Self::Accent4 => "Accent4",
            Self::Accent5 => "Accent5",
            Self::Accent6 => "Accent6",
            Self::Hyperlink => "Hyperlink",
            Self::FollowedHyperlink => "FollowedHyperlink",
            Self::Placeholder => "Placeholder",
            Self::Dark1 => "Dark1",
            Self::Light1 => "Light1",
            Self::Dark2 => "Dark2",
            Self::Light2 => "Light2",
        };
        f.write_str(name)
    }
}

/// Declared type of a color, after the element that encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    /// `a:srgbClr`
    Rgb,
    /// `a:schemeClr`
    Scheme,
    /// `a:sysClr`
    System,
    /// `a:prstClr`
    Preset,
    /// `a:hslClr`
    Hsl,
    /// `a:scrgbClr`
    ScRgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color of type {0:?} has no literal RGB value")]
    NoRgb(Option<ColorType>),

    #[error("theme color {0} cannot be used on text runs")]
    ThemeColorRejected(ThemeColor),
}

#[derive(Debug, Clone, PartialEq)]
enum ColorElement {
    Srgb(RGBColor),
    Scheme(ThemeColor),
    System(String),
    Preset(String),
    Hsl,
    ScRgb,
}

/// The color held by a solid fill.
///
/// `color_type()` is `None` when the fill is empty or its color element
/// could not be understood.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorFormat {
    element: Option<ColorElement>,
}

impl ColorFormat {
    /// Literal sRGB color.
    pub fn rgb_color(color: RGBColor) -> Self {
        Self {
            element: Some(ColorElement::Srgb(color)),
        }
    }

    /// Theme palette reference.
    pub fn theme(color: ThemeColor) -> Self {
        Self {
            element: Some(ColorElement::Scheme(color)),
        }
    }

    /// Read the color from the content of an `a:solidFill` element.
    pub(crate) fn from_solid_fill_content(xml: &[u8]) -> Self {
        // An unreadable fill degrades to "no color" rather than failing the run
        let element = child_elements(xml)
            .ok()
            .and_then(|children| children.into_iter().next())
            .and_then(|child| Self::parse_element(&child));
        Self { element }
    }

    fn parse_element(child: &ElementSpan) -> Option<ColorElement> {
        let value = child.attr("val");
        match child.local_name() {
            "srgbClr" => RGBColor::from_hex(value.as_deref()?).map(ColorElement::Srgb),
            "schemeClr" => ThemeColor::from_xml(value.as_deref()?).map(ColorElement::Scheme),
            "sysClr" => Some(ColorElement::System(value.unwrap_or_default())),
            "prstClr" => Some(ColorElement::Preset(value.unwrap_or_default())),
            "hslClr" => Some(ColorElement::Hsl),
            "scrgbClr" => Some(ColorElement::ScRgb),
            _ => None,
        }
    }

    pub fn color_type(&self) -> Option<ColorType> {
        self.element.as_ref().map(|element| match element {
            ColorElement::Srgb(_) => ColorType::Rgb,
            ColorElement::Scheme(_) => ColorType::Scheme,
            ColorElement::System(_) => ColorType::System,
            ColorElement::Preset(_) => ColorType::Preset,
            ColorElement::Hsl => ColorType::Hsl,
            ColorElement::ScRgb => ColorType::ScRgb,
        })
    }

    /// Literal RGB value.
    ///
    /// Only an `srgbClr` carries one; every other type is an error.
    pub fn rgb(&self) -> Result<RGBColor, ColorError> {
        match &self.element {
            Some(ColorElement::Srgb(color)) => Ok(*color),
            _ => Err(ColorError::NoRgb(self.color_type())),
        }
    }

    /// Theme palette slot, for scheme colors.
    pub fn theme_color(&self) -> Option<ThemeColor> {
        match &self.element {
            Some(ColorElement::Scheme(color)) => Some(*color),
            _ => None,
        }
    }

    /// Name of a system or preset color (e.g. `windowText`, `red`).
    pub fn named(&self) -> Option<&str> {
        match &self.element {
            Some(ColorElement::System(name)) | Some(ColorElement::Preset(name)) => Some(name),
            _ => None,
        }
    }

    /// Serialize as a complete `a:solidFill` element.
    ///
    /// Only literal and theme colors are ever written by this crate.
    pub(crate) fn to_solid_fill_xml(&self) -> Option<String> {
        match &self.element {
            Some(ColorElement::Srgb(color)) => Some(format!(
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )),
            Some(ColorElement::Scheme(color)) => Some(format!(
                r#"<a:solidFill><a:schemeClr val="{}"/></a:solidFill>"#,
                color.to_xml()
            )),
            _ => None,
        }
    }
}
