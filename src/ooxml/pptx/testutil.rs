//! In-memory presentation fixtures for unit tests.
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// A `p:sp` text box with the given `a:p` elements as its body.
pub(crate) fn text_shape(id: u32, name: &str, paragraphs: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#
    )
}

/// A `p:pic` shape, which never has a text frame.
pub(crate) fn picture(id: u32, name: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId9"/></p:blipFill><p:spPr/></p:pic>"#
    )
}

/// Slide part XML holding the given shapes.
pub(crate) fn slide_xml(shapes: &[String]) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\r\n",
            r#"<p:sld {ns}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
            "{shapes}",
            r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
        ),
        ns = NS,
        shapes = shapes.concat()
    )
}

/// Build a .pptx archive whose slides are the given slide part XMLs.
///
/// Relationship ids are assigned in reverse so that slide order has to be
/// taken from `p:sldIdLst`, not from the rels part.
pub(crate) fn build_pptx(slides: &[String]) -> Vec<u8> {
    build_pptx_with_main_type(
        slides,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    )
}

pub(crate) fn build_pptx_with_main_type(slides: &[String], main_content_type: &str) -> Vec<u8> {
    let count = slides.len();
    let mut overrides = format!(
        r#"<Override PartName="/ppt/presentation.xml" ContentType="{main_content_type}"/>"#
    );
    let mut pres_rels = String::new();
    let mut sld_ids = String::new();
    for i in 1..=count {
        let r_id = count - i + 2;
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
        pres_rels.push_str(&format!(
            r#"<Relationship Id="rId{r_id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{i}.xml"/>"#
        ));
        sld_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{r_id}"/>"#, 255 + i));
    }

    let parts: Vec<(String, String)> = vec![
        (
            "[Content_Types].xml".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/>{overrides}</Types>"#
            ),
        ),
        (
            "_rels/.rels".into(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#.into(),
        ),
        (
            "ppt/presentation.xml".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NS}><p:sldIdLst>{sld_ids}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#
            ),
        ),
        (
            "ppt/_rels/presentation.xml.rels".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{pres_rels}</Relationships>"#
            ),
        ),
    ];

    let mut zip_data = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = SimpleFileOptions::default();
        for (name, content) in &parts {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        for (i, slide) in slides.iter().enumerate() {
            writer
                .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                .unwrap();
            writer.write_all(slide.as_bytes()).unwrap();
        }
        writer
            .start_file(
                "ppt/media/image1.png",
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored),
            )
            .unwrap();
        writer.write_all(b"\x89PNG\r\n\x1a\n").unwrap();
        writer.finish().unwrap();
    }
    zip_data
}
