/// Character formatting of a text run (`a:rPr`).
///
/// Only the attributes this crate reads or writes are modeled: typeface,
/// size, bold, italic, underline and solid-fill color. Everything else in
/// the element (language, kerning, effects, hyperlinks, ...) is kept as raw
/// XML and written back unchanged.
use crate::common::xml::escape::escape_xml;
use crate::common::xml::fragment::{ElementSpan, FragmentError, children_of, root_element};
use crate::ooxml::pptx::dml::color::{ColorError, ColorFormat, RGBColor, ThemeColor};
use std::fmt;

/// Font size in hundredths of a point, as stored in `a:rPr/@sz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    #[inline]
    pub const fn from_centipoints(centipoints: u32) -> Self {
        Self(centipoints)
    }

    /// Size from points, rounded to the nearest hundredth.
    pub fn from_pt(pt: f64) -> Self {
        Self((pt * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub fn pt(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub fn centipoints(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.pt())
    }
}

/// Underline style (`a:rPr/@u`, ST_TextUnderlineType).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Underline {
    /// `none`: explicitly not underlined
    None,
    /// `sng`: single line
    Single,
    /// Any other style token (`dbl`, `wavy`, `dotted`, ...)
    Styled(String),
}

impl Underline {
    pub fn from_xml(value: &str) -> Self {
        match value {
            "none" => Self::None,
            "sng" => Self::Single,
            other => Self::Styled(other.to_string()),
        }
    }

    pub fn to_xml(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Single => "sng",
            Self::Styled(token) => token,
        }
    }

    /// Whether any underline is drawn.
    #[inline]
    pub fn is_on(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<bool> for Underline {
    fn from(on: bool) -> Self {
        if on { Self::Single } else { Self::None }
    }
}

/// Position of a child element inside CT_TextCharacterProperties.
///
/// Children must appear in schema order, so new children are inserted by
/// slot rather than appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Line,
    Fill,
    Effect,
    Highlight,
    UnderlineLine,
    UnderlineFill,
    Latin,
    Trailing,
}

impl Slot {
    fn of(local: &str) -> Self {
        match local {
            "ln" => Slot::Line,
            "noFill" | "solidFill" | "gradFill" | "blipFill" | "pattFill" | "grpFill" => Slot::Fill,
            "effectLst" | "effectDag" => Slot::Effect,
            "highlight" => Slot::Highlight,
            "uLnTx" | "uLn" => Slot::UnderlineLine,
            "uFillTx" | "uFill" => Slot::UnderlineFill,
            "latin" => Slot::Latin,
            // ea, cs, sym, hlinkClick, hlinkMouseOver, rtl, extLst
            _ => Slot::Trailing,
        }
    }
}

#[derive(Debug, Clone)]
struct Child {
    slot: Slot,
    local: String,
    xml: String,
}

/// Run-level font.
///
/// Every property is tri-state: `None` means the value is inherited from
/// the paragraph, list style, layout or master.
#[derive(Debug, Clone)]
pub struct Font {
    /// Qualified element name as written (normally `a:rPr`)
    tag: String,
    /// Attributes in document order, values still XML-escaped
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
    /// Original markup, dropped on the first modification
    raw: Option<String>,
}

impl Default for Font {
    /// An empty `<a:rPr/>`: everything inherited.
    fn default() -> Self {
        Self {
            tag: "a:rPr".to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            raw: None,
        }
    }
}

impl Font {
    /// Font for a newly created run.
    pub fn new() -> Self {
        Self {
            attrs: vec![
                ("lang".to_string(), "en-US".to_string()),
                ("dirty".to_string(), "0".to_string()),
            ],
            ..Self::default()
        }
    }

    /// Build from the `a:rPr` element at `span` inside `xml`.
    pub(crate) fn from_element(xml: &[u8], span: &ElementSpan) -> Result<Self, FragmentError> {
        let children = children_of(xml, span)?
            .into_iter()
            .map(|child| Child {
                slot: Slot::of(child.local_name()),
                local: child.local_name().to_string(),
                xml: String::from_utf8_lossy(&xml[child.range.clone()]).into_owned(),
            })
            .collect();

        Ok(Self {
            tag: span.name.clone(),
            attrs: span.attrs.clone(),
            children,
            raw: Some(String::from_utf8_lossy(&xml[span.range.clone()]).into_owned()),
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, key: &str, value: String) {
        self.raw = None;
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    fn bool_attr(&self, key: &str) -> Option<bool> {
        match self.attr(key)? {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    fn child(&self, local: &str) -> Option<&Child> {
        self.children.iter().find(|child| child.local == local)
    }

    /// Put `xml` into `slot`, replacing whatever occupied it.
    fn set_child(&mut self, slot: Slot, local: &str, xml: String) {
        self.raw = None;
        self.children.retain(|child| child.slot != slot);
        let pos = self
            .children
            .iter()
            .position(|child| child.slot > slot)
            .unwrap_or(self.children.len());
        self.children.insert(
            pos,
            Child {
                slot,
                local: local.to_string(),
                xml,
            },
        );
    }

    /// Latin typeface name (`a:latin/@typeface`).
    pub fn name(&self) -> Option<String> {
        let latin = self.child("latin")?;
        root_element(latin.xml.as_bytes())
            .ok()
            .flatten()
            .and_then(|element| element.attr("typeface"))
    }

    pub fn set_name(&mut self, name: &str) {
        self.set_child(
            Slot::Latin,
            "latin",
            format!(r#"<a:latin typeface="{}"/>"#, escape_xml(name)),
        );
    }

    pub fn size(&self) -> Option<FontSize> {
        atoi_simd::parse::<u32, false, false>(self.attr("sz")?.as_bytes())
            .ok()
            .map(FontSize::from_centipoints)
    }

    pub fn set_size(&mut self, size: FontSize) {
        self.set_attr("sz", size.centipoints().to_string());
    }

    pub fn bold(&self) -> Option<bool> {
        self.bool_attr("b")
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.set_attr("b", String::from(if bold { "1" } else { "0" }));
    }

    pub fn italic(&self) -> Option<bool> {
        self.bool_attr("i")
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.set_attr("i", String::from(if italic { "1" } else { "0" }));
    }

    pub fn underline(&self) -> Option<Underline> {
        self.attr("u").map(Underline::from_xml)
    }

    pub fn set_underline(&mut self, underline: &Underline) {
        self.set_attr("u", underline.to_xml().to_string());
    }

    /// Color of the run's solid fill.
    ///
    /// `None` when the run has no fill of its own or uses a non-solid fill.
    pub fn color(&self) -> Option<ColorFormat> {
        let fill = self.child("solidFill")?;
        let bytes = fill.xml.as_bytes();
        let inner = root_element(bytes).ok().flatten()?.inner;
        Some(ColorFormat::from_solid_fill_content(&bytes[inner]))
    }

    /// Set a literal sRGB color, replacing any existing fill.
    pub fn set_rgb(&mut self, color: RGBColor) {
        if let Some(xml) = ColorFormat::rgb_color(color).to_solid_fill_xml() {
            self.set_child(Slot::Fill, "solidFill", xml);
        }
    }

    /// Link the run color to a theme palette slot, replacing any fill.
    ///
    /// `phClr` is rejected: outside a theme style matrix it has nothing to
    /// resolve against.
    pub fn set_theme_color(&mut self, color: ThemeColor) -> Result<(), ColorError> {
        if color == ThemeColor::Placeholder {
            return Err(ColorError::ThemeColorRejected(color));
        }
        if let Some(xml) = ColorFormat::theme(color).to_solid_fill_xml() {
            self.set_child(Slot::Fill, "solidFill", xml);
        }
        Ok(())
    }

    /// Whether the font still matches the markup it was read from.
    #[inline]
    pub fn is_pristine(&self) -> bool {
        self.raw.is_some()
    }

    pub fn to_xml(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut xml = String::with_capacity(64);
        xml.push('<');
        xml.push_str(&self.tag);
        for (key, value) in &self.attrs {
            xml.push(' ');
            xml.push_str(key);
            xml.push_str("=\"");
            xml.push_str(value);
            xml.push('"');
        }

        if self.children.is_empty() {
            xml.push_str("/>");
            return xml;
        }

        xml.push('>');
        for child in &self.children {
            xml.push_str(&child.xml);
        }
        xml.push_str("</");
        xml.push_str(&self.tag);
        xml.push('>');
        xml
    }
}
