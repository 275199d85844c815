/// Text frame for accessing and rewriting text content in shapes.
use crate::common::xml::escape::{escape_run_text, unescape_run_text};
use crate::common::xml::fragment::{ElementSpan, FragmentError, children_of, text_content};
use crate::ooxml::pptx::shapes::font::Font;

type Result<T> = std::result::Result<T, FragmentError>;

fn raw_slice(xml: &[u8], span: &ElementSpan) -> String {
    String::from_utf8_lossy(&xml[span.range.clone()]).into_owned()
}

/// A text frame (`p:txBody`) containing paragraphs.
///
/// Unchanged paragraphs serialize from their original markup. Any mutable
/// access marks the frame as modified, after which the owning slide writes
/// the frame back from this model.
///
/// # Examples
///
/// ```rust,ignore
/// let frame = shape.text_frame().unwrap();
/// println!("Text: {}", frame.text());
///
/// for para in frame.paragraphs() {
///     println!("Paragraph: {}", para.text());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TextFrame {
    /// Start tag of the txBody, e.g. `<p:txBody>`
    open_tag: String,
    /// Non-paragraph children (bodyPr, lstStyle), in document order
    preamble: Vec<String>,
    paragraphs: Vec<Paragraph>,
    /// End tag of the txBody, e.g. `</p:txBody>`
    close_tag: String,
    modified: bool,
}

impl TextFrame {
    /// Parse the `p:txBody` element at `span` inside `xml`.
    pub(crate) fn from_element(xml: &[u8], span: &ElementSpan) -> Result<Self> {
        let (open_tag, close_tag) = if span.is_empty {
            (format!("<{}>", span.name), format!("</{}>", span.name))
        } else {
            (
                String::from_utf8_lossy(&xml[span.range.start..span.inner.start]).into_owned(),
                String::from_utf8_lossy(&xml[span.inner.end..span.range.end]).into_owned(),
            )
        };

        let mut preamble = Vec::new();
        let mut paragraphs = Vec::new();
        for child in children_of(xml, span)? {
            if child.local_name() == "p" {
                paragraphs.push(Paragraph::from_element(xml, &child)?);
            } else {
                preamble.push(raw_slice(xml, &child));
            }
        }

        Ok(Self {
            open_tag,
            preamble,
            paragraphs,
            close_tag,
            modified: false,
        })
    }

    /// Flattened text: paragraph texts joined with `\n`.
    ///
    /// Line breaks inside a paragraph appear as vertical tab (`\u{b}`), as
    /// do `_x000B_` escapes in run text.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        self.modified = true;
        &mut self.paragraphs
    }

    /// Remove all paragraphs.
    ///
    /// The frame is left without paragraphs; add one before saving, a
    /// `p:txBody` needs at least one `a:p` to be schema-valid.
    pub fn clear(&mut self) {
        self.modified = true;
        self.paragraphs.clear();
    }

    /// Append an empty paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.modified = true;
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Whether the frame was accessed for modification since it was read.
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256);
        xml.push_str(&self.open_tag);
        for part in &self.preamble {
            xml.push_str(part);
        }
        for para in &self.paragraphs {
            para.write_xml(&mut xml);
        }
        xml.push_str(&self.close_tag);
        xml
    }
}

/// Content of a paragraph, in document order.
#[derive(Debug, Clone)]
pub enum ParagraphItem {
    /// A text run (`a:r`)
    Run(Run),
    /// A soft line break (`a:br`)
    LineBreak { raw: String },
    /// A field such as a slide number or date (`a:fld`)
    Field { raw: String, text: String },
}

/// A paragraph in a text frame (`a:p`).
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Paragraph properties (`a:pPr`)
    props: Option<String>,
    items: Vec<ParagraphItem>,
    /// End-of-paragraph run properties (`a:endParaRPr`)
    end_props: Option<String>,
    /// Original markup, dropped on the first modification
    raw: Option<String>,
}

impl Paragraph {
    fn from_element(xml: &[u8], span: &ElementSpan) -> Result<Self> {
        let mut para = Paragraph {
            raw: Some(raw_slice(xml, span)),
            ..Paragraph::default()
        };

        for child in children_of(xml, span)? {
            match child.local_name() {
                "pPr" => para.props = Some(raw_slice(xml, &child)),
                "endParaRPr" => para.end_props = Some(raw_slice(xml, &child)),
                "r" => para.items.push(ParagraphItem::Run(Run::from_element(xml, &child)?)),
                "br" => para.items.push(ParagraphItem::LineBreak {
                    raw: raw_slice(xml, &child),
                }),
                "fld" => {
                    let text = match children_of(xml, &child)?
                        .into_iter()
                        .find(|c| c.local_name() == "t")
                    {
                        Some(t) => unescape_run_text(&text_content(&xml[t.inner.clone()])?),
                        None => String::new(),
                    };
                    para.items.push(ParagraphItem::Field {
                        raw: raw_slice(xml, &child),
                        text,
                    });
                },
                // Anything else (e.g. math in mc:AlternateContent) has no run text
                _ => {},
            }
        }

        Ok(para)
    }

    /// Text of the paragraph; line breaks become `\u{b}`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            match item {
                ParagraphItem::Run(run) => text.push_str(run.text()),
                ParagraphItem::LineBreak { .. } => text.push('\u{b}'),
                ParagraphItem::Field { text: field, .. } => text.push_str(field),
            }
        }
        text
    }

    #[inline]
    pub fn items(&self) -> &[ParagraphItem] {
        &self.items
    }

    /// The text runs of this paragraph, skipping breaks and fields.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.items.iter().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            _ => None,
        })
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.raw = None;
        self.items.iter_mut().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Append an empty run and return it.
    pub fn add_run(&mut self) -> &mut Run {
        self.raw = None;
        self.items.push(ParagraphItem::Run(Run::new()));
        match self.items.last_mut() {
            Some(ParagraphItem::Run(run)) => run,
            _ => unreachable!("a run was just pushed"),
        }
    }

    fn write_xml(&self, xml: &mut String) {
        if let Some(raw) = &self.raw {
            xml.push_str(raw);
            return;
        }

        xml.push_str("<a:p>");
        if let Some(props) = &self.props {
            xml.push_str(props);
        }
        for item in &self.items {
            match item {
                ParagraphItem::Run(run) => run.write_xml(xml),
                ParagraphItem::LineBreak { raw } | ParagraphItem::Field { raw, .. } => {
                    xml.push_str(raw)
                },
            }
        }
        if let Some(end_props) = &self.end_props {
            xml.push_str(end_props);
        }
        xml.push_str("</a:p>");
    }
}

/// A run of text sharing one font (`a:r`).
#[derive(Debug, Clone)]
pub struct Run {
    font: Font,
    text: String,
    /// Original markup, dropped on the first modification
    raw: Option<String>,
}

impl Run {
    fn new() -> Self {
        Self {
            font: Font::new(),
            text: String::new(),
            raw: None,
        }
    }

    fn from_element(xml: &[u8], span: &ElementSpan) -> Result<Self> {
        let mut font = Font::default();
        let mut text = String::new();

        for child in children_of(xml, span)? {
            match child.local_name() {
                "rPr" => font = Font::from_element(xml, &child)?,
                "t" => text = unescape_run_text(&text_content(&xml[child.inner.clone()])?),
                _ => {},
            }
        }

        Ok(Self {
            font,
            text,
            raw: Some(raw_slice(xml, span)),
        })
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw = None;
        self.text = text.into();
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Font {
        self.raw = None;
        &mut self.font
    }

    fn write_xml(&self, xml: &mut String) {
        if let Some(raw) = &self.raw {
            xml.push_str(raw);
            return;
        }

        xml.push_str("<a:r>");
        xml.push_str(&self.font.to_xml());
        xml.push_str("<a:t>");
        xml.push_str(&escape_run_text(&self.text));
        xml.push_str("</a:t></a:r>");
    }
}
