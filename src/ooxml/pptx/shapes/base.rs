/// Base shape types for PowerPoint presentations.
use crate::common::xml::fragment::{ElementSpan, FragmentError, children_of};
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use std::ops::Range;

/// Shape type enumeration.
///
/// Indicates what kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// An auto shape or text box (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table, chart or diagram (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
    /// Ink or other content part (p:contentPart)
    ContentPart,
    /// Markup-compatibility wrapper (mc:AlternateContent)
    AlternateContent,
}

impl ShapeType {
    /// Map an element of `p:spTree` to a shape type.
    ///
    /// Returns `None` for the tree's own properties (`p:nvGrpSpPr`,
    /// `p:grpSpPr`) and extension lists, which are not shapes.
    pub fn from_element_name(local_name: &str) -> Option<Self> {
        Some(match local_name {
            "sp" => Self::Shape,
            "pic" => Self::Picture,
            "graphicFrame" => Self::GraphicFrame,
            "grpSp" => Self::GroupShape,
            "cxnSp" => Self::Connector,
            "contentPart" => Self::ContentPart,
            "AlternateContent" => Self::AlternateContent,
            _ => return None,
        })
    }
}

/// A shape on a slide.
///
/// Only `p:sp` shapes can carry a text frame; pictures, connectors, graphic
/// frames and groups never do.
///
/// # Examples
///
/// ```rust,ignore
/// for shape in slide.shapes() {
///     match shape.text_frame() {
///         Some(frame) => println!("{}: {}", shape.name(), frame.text()),
///         None => println!("{} has no text", shape.name()),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    shape_type: ShapeType,
    /// Shape id from `p:cNvPr/@id`
    id: Option<u32>,
    /// Shape name from `p:cNvPr/@name`
    name: String,
    text_frame: Option<TextFrame>,
    /// Byte range of the `p:txBody` element inside the slide part
    text_frame_range: Option<Range<usize>>,
}

impl Shape {
    /// Build a shape from its element inside the slide XML.
    pub(crate) fn from_element(
        xml: &[u8],
        span: &ElementSpan,
        shape_type: ShapeType,
    ) -> Result<Self, FragmentError> {
        let mut shape = Shape {
            shape_type,
            id: None,
            name: String::new(),
            text_frame: None,
            text_frame_range: None,
        };

        if shape_type == ShapeType::AlternateContent {
            return Ok(shape);
        }

        for child in children_of(xml, span)? {
            let local = child.local_name();
            if local.starts_with("nv") && local.ends_with("Pr") {
                // p:nvSpPr, p:nvPicPr, ... all start with p:cNvPr
                if let Some(c_nv_pr) = children_of(xml, &child)?
                    .into_iter()
                    .find(|c| c.local_name() == "cNvPr")
                {
                    shape.id = c_nv_pr
                        .attr_raw("id")
                        .and_then(|id| atoi_simd::parse::<u32, false, false>(id.as_bytes()).ok());
                    shape.name = c_nv_pr.attr("name").unwrap_or_default();
                }
            } else if local == "txBody" && shape_type == ShapeType::Shape {
                shape.text_frame = Some(TextFrame::from_element(xml, &child)?);
                shape.text_frame_range = Some(child.range.clone());
            }
        }

        Ok(shape)
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    #[inline]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    #[inline]
    pub fn text_frame(&self) -> Option<&TextFrame> {
        self.text_frame.as_ref()
    }

    #[inline]
    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        self.text_frame.as_mut()
    }

    /// The text frame together with its byte range in the slide part.
    pub(crate) fn text_frame_with_range(&self) -> Option<(&TextFrame, Range<usize>)> {
        Some((self.text_frame.as_ref()?, self.text_frame_range.clone()?))
    }
}
