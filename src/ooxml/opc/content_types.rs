/// Content type map read from `[Content_Types].xml`.
use crate::common::xml::fragment::{children_of, root_element};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::collections::HashMap;

/// Lookup table from partname to content type.
///
/// An `Override` entry for the exact partname wins over a `Default` entry
/// for the partname's extension. Extensions compare case-insensitively,
/// partnames compare case-insensitively, as OPC requires.
#[derive(Debug, Default)]
pub struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    /// Parse the content of the `[Content_Types].xml` member.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let parse_err = |e| OpcError::xml(CONTENT_TYPES_URI, e);
        let mut types = Self::default();

        let Some(root) = root_element(xml).map_err(parse_err)? else {
            return Ok(types);
        };

        for child in children_of(xml, &root).map_err(parse_err)? {
            match child.local_name() {
                "Default" => {
                    if let (Some(ext), Some(ct)) = (child.attr("Extension"), child.attr("ContentType")) {
                        types.defaults.insert(ext.to_ascii_lowercase(), ct);
                    }
                },
                "Override" => {
                    if let (Some(partname), Some(ct)) = (child.attr("PartName"), child.attr("ContentType")) {
                        types.overrides.insert(partname.to_ascii_lowercase(), ct);
                    }
                },
                _ => {},
            }
        }

        Ok(types)
    }

    /// Content type of the given part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&partname.as_str().to_ascii_lowercase()) {
            return Ok(ct);
        }
        self.defaults
            .get(&partname.ext().to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_beats_default() {
        let xml = br#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;
        let types = ContentTypes::from_xml(xml).unwrap();

        let pres = PackURI::new("/ppt/presentation.xml").unwrap();
        assert!(types.content_type(&pres).unwrap().ends_with("presentation.main+xml"));

        let other = PackURI::new("/ppt/viewProps.xml").unwrap();
        assert_eq!(types.content_type(&other).unwrap(), "application/xml");

        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(types.content_type(&image).unwrap(), "image/png");

        let unknown = PackURI::new("/ppt/media/clip.bin").unwrap();
        assert!(matches!(types.content_type(&unknown), Err(OpcError::ContentTypeNotFound(_))));
    }
}
