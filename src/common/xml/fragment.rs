/// Byte-span view over XML fragments.
///
/// The document model edits slides by splicing new markup into the original
/// part bytes, so parsing works on byte ranges instead of building an owned
/// DOM. An [`ElementSpan`] records where an element (and its content) lives
/// inside the slice it was read from; everything outside the spans that get
/// replaced is written back untouched.
use crate::common::xml::escape::unescape_xml;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;

/// Error raised while scanning an XML fragment.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unclosed element <{0}>")]
    Unclosed(String),

    #[error("Invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, FragmentError>;

/// One element of a fragment, located by byte ranges.
#[derive(Debug, Clone)]
pub struct ElementSpan {
    /// Qualified name as written (e.g. `a:rPr`)
    pub name: String,
    /// Raw attributes in document order; values are still XML-escaped
    pub attrs: Vec<(String, String)>,
    /// Whole element, from `<` of the start tag to `>` of the end tag
    pub range: Range<usize>,
    /// Content between the start and end tags; empty for `<x/>`
    pub inner: Range<usize>,
    /// Whether the element was written as a self-closing tag
    pub is_empty: bool,
}

impl ElementSpan {
    /// Local part of the element name, without any namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Raw (still escaped) value of the attribute with the given local name.
    pub fn attr_raw(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| local_part(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Unescaped value of the attribute with the given local name.
    pub fn attr(&self, local: &str) -> Option<String> {
        self.attr_raw(local).map(unescape_xml)
    }

    /// Move both ranges by `offset` bytes.
    ///
    /// Used when the span came from a sub-slice and must be expressed
    /// relative to the enclosing buffer.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.range = (self.range.start + offset)..(self.range.end + offset);
        self.inner = (self.inner.start + offset)..(self.inner.end + offset);
        self
    }
}

#[inline]
pub fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn start_info(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = std::str::from_utf8(&attr.value)?.to_string();
        attrs.push((key, value));
    }
    Ok((name, attrs))
}

/// List the top-level elements of `xml`, in document order.
///
/// Text, comments, processing instructions and the XML declaration between
/// elements are skipped. Ranges are relative to `xml`.
pub fn child_elements(xml: &[u8]) -> Result<Vec<ElementSpan>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut children = Vec::new();

    // (name, attrs, element start, content start)
    let mut open: Option<(String, Vec<(String, String)>, usize, usize)> = None;
    let mut depth = 0usize;

    loop {
        buf.clear();
        let before = reader.buffer_position() as usize;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| FragmentError::Xml {
                position: reader.buffer_position() as usize,
                source,
            })?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    let (name, attrs) = start_info(&e)?;
                    open = Some((name, attrs, before, after));
                }
                depth += 1;
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some((name, attrs, start, content_start)) = open.take() {
                        children.push(ElementSpan {
                            name,
                            attrs,
                            range: start..after,
                            inner: content_start..before,
                            is_empty: false,
                        });
                    }
                }
            },
            Event::Empty(e) if depth == 0 => {
                let (name, attrs) = start_info(&e)?;
                children.push(ElementSpan {
                    name,
                    attrs,
                    range: before..after,
                    inner: after..after,
                    is_empty: true,
                });
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some((name, ..)) = open {
        return Err(FragmentError::Unclosed(name));
    }

    Ok(children)
}

/// Direct children of `parent`, with ranges relative to `xml`.
pub fn children_of(xml: &[u8], parent: &ElementSpan) -> Result<Vec<ElementSpan>> {
    let offset = parent.inner.start;
    Ok(child_elements(&xml[parent.inner.clone()])?
        .into_iter()
        .map(|child| child.shifted(offset))
        .collect())
}

/// First top-level element of `xml` (the document element for a part).
pub fn root_element(xml: &[u8]) -> Result<Option<ElementSpan>> {
    Ok(child_elements(xml)?.into_iter().next())
}

/// Concatenated, unescaped character data of a fragment.
///
/// Nested markup is ignored; only text and CDATA content is kept.
pub fn text_content(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                text.push_str(&unescape_xml(std::str::from_utf8(&e)?));
            },
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(&e)?);
            },
            Ok(Event::GeneralRef(e)) => {
                let name = std::str::from_utf8(&e)?;
                text.push_str(&unescape_xml(&format!("&{};", name)));
            },
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(FragmentError::Xml {
                    position: reader.buffer_position() as usize,
                    source,
                });
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(text)
}
