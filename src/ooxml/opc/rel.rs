use crate::common::xml::fragment::{children_of, root_element};
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// A `.rels` part lists the relationships from one source part (or the
/// package itself) to its targets. Only reading is needed: relationships are
/// never edited, so the `.rels` members are written back unchanged.

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference as written in the .rels part.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets external resource '{}'",
                self.r_id, self.target_ref
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref)
    }
}

/// Collection of relationships from a single source, in document order.
#[derive(Debug, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse the XML of a `.rels` part.
    ///
    /// # Arguments
    /// * `source` - The partname the relationships originate from; relative
    ///   targets resolve against its base URI
    /// * `xml` - The `.rels` part content
    pub fn from_xml(source: &PackURI, xml: &[u8]) -> Result<Self> {
        let rels_uri = source.rels_uri();
        let parse_err = |e| OpcError::xml(rels_uri.as_str(), e);

        let Some(root) = root_element(xml).map_err(parse_err)? else {
            return Ok(Self::default());
        };

        let mut rels = Vec::new();
        for child in children_of(xml, &root).map_err(parse_err)? {
            if child.local_name() != "Relationship" {
                continue;
            }
            let (Some(r_id), Some(reltype), Some(target_ref)) =
                (child.attr("Id"), child.attr("Type"), child.attr("Target"))
            else {
                return Err(OpcError::InvalidRelationship(format!(
                    "relationship in {} is missing Id, Type or Target",
                    rels_uri
                )));
            };
            let is_external = child.attr("TargetMode").as_deref() == Some(target_mode::EXTERNAL);
            rels.push(Relationship {
                r_id,
                reltype,
                target_ref,
                base_uri: source.base_uri().to_string(),
                is_external,
            });
        }

        Ok(Self { rels })
    }

    /// Get a relationship by its rId.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the single relationship of the given type.
    ///
    /// Returns an error if there is no relationship of that type.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        self.rels
            .iter()
            .find(|rel| rel.reltype == reltype)
            .ok_or_else(|| OpcError::RelationshipNotFound(reltype.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const PRES_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let source = PackURI::new("/ppt/presentation.xml").unwrap();
        let rels = Relationships::from_xml(&source, PRES_RELS).unwrap();
        assert_eq!(rels.len(), 2);

        let slide = rels.get("rId2").unwrap();
        assert_eq!(slide.reltype(), rt::SLIDE);
        assert_eq!(slide.target_partname().unwrap().as_str(), "/ppt/slides/slide1.xml");

        let link = rels.get("rId9").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
        assert!(link.target_partname().is_err());
    }

    #[test]
    fn test_part_with_reltype() {
        let source = PackURI::new("/ppt/presentation.xml").unwrap();
        let rels = Relationships::from_xml(&source, PRES_RELS).unwrap();
        assert_eq!(rels.part_with_reltype(rt::SLIDE).unwrap().r_id(), "rId2");
        assert!(matches!(
            rels.part_with_reltype(rt::OFFICE_DOCUMENT),
            Err(OpcError::RelationshipNotFound(_))
        ));
    }
}
