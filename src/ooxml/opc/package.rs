/// In-memory OPC package.
///
/// OpcPackage keeps every ZIP member as raw bytes, in archive order, and
/// offers partname-based access on top: content types, relationships and
/// the main document part. Replacing a part's blob is the only edit; saving
/// writes all members back in their original order.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::content_types::ContentTypes;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{Member, PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

pub struct OpcPackage {
    /// All members, in archive order
    members: Vec<Member>,
    /// Member index by partname
    index: HashMap<PackURI, usize>,
    /// Parsed [Content_Types].xml
    content_types: ContentTypes,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use deckfill::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("deck.pptx").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_members(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_members(PhysPkgReader::from_reader(reader)?)
    }

    /// Load an OPC package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_members(PhysPkgReader::from_bytes(data)?)
    }

    fn from_members(members: Vec<Member>) -> Result<Self> {
        let index: HashMap<PackURI, usize> = members
            .iter()
            .enumerate()
            .filter(|(_, member)| !member.is_dir)
            .map(|(i, member)| (PackURI::from_membername(&member.name), i))
            .collect();

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI)?;
        let ct_index = index
            .get(&content_types_uri)
            .copied()
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))?;
        let content_types = ContentTypes::from_xml(&members[ct_index].data)?;

        Ok(Self {
            members,
            index,
            content_types,
        })
    }

    /// Partname of the main document part.
    ///
    /// For PowerPoint, the presentation.xml part.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let package = PackURI::new(PACKAGE_URI)?;
        let rels = self.rels_for(&package)?;
        rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Content of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.index
            .get(partname)
            .map(|&i| self.members[i].data.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Replace the content of an existing part.
    pub fn replace_blob(&mut self, partname: &PackURI, data: Vec<u8>) -> Result<()> {
        let i = *self
            .index
            .get(partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;
        self.members[i].data = data;
        Ok(())
    }

    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname)
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.content_type(partname)
    }

    /// Relationships originating from `source` (use "/" for the package).
    ///
    /// A part without a `.rels` member has no relationships.
    pub fn rels_for(&self, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri();
        if !self.contains_part(&rels_uri) {
            return Ok(Relationships::default());
        }
        Relationships::from_xml(source, self.blob(&rels_uri)?)
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.index.len()
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();
        for member in &self.members {
            writer.write(member)?;
        }
        writer.finish()
    }

    /// Write the package to a file.
    ///
    /// The archive is fully built in memory first, so a serialization error
    /// never leaves a truncated file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
