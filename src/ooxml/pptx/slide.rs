/// Slide objects: the shape tree of one slide part.
use crate::common::xml::fragment::{ElementSpan, children_of, root_element};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::shapes::{Shape, ShapeType};

/// A slide in a presentation.
///
/// Holds the slide part bytes and the top-level shapes of its
/// `p:cSld/p:spTree`, in document order. Shapes nested inside groups are
/// part of their group shape and are not listed separately.
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::ooxml::pptx::Package;
///
/// let pkg = Package::open("deck.pptx")?;
/// for slide in pkg.slides() {
///     println!("{} has {} shapes", slide.partname(), slide.shapes().len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Slide {
    partname: PackURI,
    /// Slide name from `p:cSld/@name`
    name: Option<String>,
    /// Slide part content as read from the package
    xml: Vec<u8>,
    shapes: Vec<Shape>,
}

impl Slide {
    /// Parse a slide part.
    pub fn from_xml(partname: PackURI, xml: Vec<u8>) -> Result<Self> {
        let parse_err = |e| OoxmlError::xml(partname.as_str(), e);

        let root = root_element(&xml)
            .map_err(parse_err)?
            .filter(|root| root.local_name() == "sld")
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("{} is not a slide part", partname)))?;

        let mut name = None;
        let mut shapes = Vec::new();

        let c_sld = find_child(&xml, &root, "cSld").map_err(parse_err)?;
        if let Some(c_sld) = c_sld {
            name = c_sld.attr("name");
            if let Some(sp_tree) = find_child(&xml, &c_sld, "spTree").map_err(parse_err)? {
                for child in children_of(&xml, &sp_tree).map_err(parse_err)? {
                    if let Some(shape_type) = ShapeType::from_element_name(child.local_name()) {
                        shapes.push(Shape::from_element(&xml, &child, shape_type).map_err(parse_err)?);
                    }
                }
            }
        }

        Ok(Self {
            partname,
            name,
            xml,
            shapes,
        })
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Whether any text frame on the slide was modified.
    pub fn is_modified(&self) -> bool {
        self.shapes
            .iter()
            .filter_map(Shape::text_frame)
            .any(|frame| frame.is_modified())
    }

    /// Slide part content with modified text frames spliced in.
    ///
    /// Bytes outside the modified `p:txBody` elements are copied verbatim.
    pub fn to_xml(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.xml.len());
        let mut cursor = 0;

        for (frame, range) in self.shapes.iter().filter_map(Shape::text_frame_with_range) {
            if !frame.is_modified() {
                continue;
            }
            out.extend_from_slice(&self.xml[cursor..range.start]);
            out.extend_from_slice(frame.to_xml().as_bytes());
            cursor = range.end;
        }
        out.extend_from_slice(&self.xml[cursor..]);
        out
    }
}

fn find_child(
    xml: &[u8],
    parent: &ElementSpan,
    local: &str,
) -> std::result::Result<Option<ElementSpan>, crate::common::xml::FragmentError> {
    Ok(children_of(xml, parent)?
        .into_iter()
        .find(|child| child.local_name() == local))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
        r#"<p:cSld name="Intro"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/>"#,
        r#"<p:txBody><a:bodyPr/><a:p><a:r><a:t>{{theme}}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        r#"<p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture 2"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill/><p:spPr/></p:pic>"#,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="Body 3"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/>"#,
        r#"<p:txBody>  <a:bodyPr/>  <a:p><a:r><a:t>static</a:t></a:r></a:p>  </p:txBody></p:sp>"#,
        r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    );

    fn slide() -> Slide {
        Slide::from_xml(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            SLIDE.as_bytes().to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_shapes() {
        let slide = slide();
        assert_eq!(slide.name(), Some("Intro"));
        let names: Vec<&str> = slide.shapes().iter().map(Shape::name).collect();
        assert_eq!(names, ["Title 1", "Picture 2", "Body 3"]);
        assert_eq!(slide.shapes()[1].shape_type(), ShapeType::Picture);
    }

    #[test]
    fn test_unmodified_slide_is_identical() {
        let slide = slide();
        assert!(!slide.is_modified());
        assert_eq!(slide.to_xml(), SLIDE.as_bytes());
    }

    #[test]
    fn test_splice_only_modified_frame() {
        let mut slide = slide();
        let frame = slide.shapes_mut()[0].text_frame_mut().unwrap();
        frame.clear();
        frame.add_paragraph().add_run().set_text("School");
        assert!(slide.is_modified());

        let xml = String::from_utf8(slide.to_xml()).unwrap();
        assert!(xml.contains(r#"<a:t>School</a:t>"#));
        assert!(!xml.contains("{{theme}}"));
        // The untouched frame keeps its whitespace
        assert!(xml.contains(r#"<p:txBody>  <a:bodyPr/>  <a:p><a:r><a:t>static</a:t></a:r></a:p>  </p:txBody>"#));

        let reparsed = Slide::from_xml(slide.partname().clone(), xml.into_bytes()).unwrap();
        assert_eq!(reparsed.shapes()[0].text_frame().unwrap().text(), "School");
    }

    #[test]
    fn test_rejects_non_slide_part() {
        let result = Slide::from_xml(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            b"<p:notes/>".to_vec(),
        );
        assert!(matches!(result, Err(OoxmlError::InvalidFormat(_))));
    }
}
