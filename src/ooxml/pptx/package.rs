/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::presentation::slide_rel_ids;
use crate::ooxml::pptx::slide::Slide;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for working with PowerPoint presentations.
/// It wraps an OPC package and keeps the parsed slides, in presentation
/// order. Edits made through [`Package::slides_mut`] are written back to the
/// slide parts when the package is saved; every other part is written out
/// unchanged.
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::ooxml::pptx::Package;
///
/// let mut pkg = Package::open("template.pptx")?;
/// for slide in pkg.slides_mut() {
///     for shape in slide.shapes_mut() {
///         if let Some(frame) = shape.text_frame_mut() {
///             frame.clear();
///             frame.add_paragraph().add_run().set_text("Hello");
///         }
///     }
/// }
/// pkg.save("hello.pptx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    /// Partname of presentation.xml
    main_partname: PackURI,
    slides: Vec<Slide>,
}

impl Package {
    /// Open a .pptx package from a file path.
    ///
    /// Presentations, macro-enabled presentations, templates and slide
    /// shows are accepted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use deckfill::ooxml::pptx::Package;
    /// use std::io::Cursor;
    ///
    /// let data = std::fs::read("presentation.pptx")?;
    /// let pkg = Package::from_reader(Cursor::new(data))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .pptx package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        // Verify it's a PowerPoint presentation by checking the main part's content type
        let main_partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = opc.content_type(&main_partname)?;
        if !ct::PML_MAIN_PARTS.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_MAIN_PARTS.join(" or "),
                got: content_type.to_string(),
            });
        }

        let slides = load_slides(&opc, &main_partname)?;
        info!(
            parts = opc.part_count(),
            slides = slides.len(),
            "loaded presentation package"
        );

        Ok(Self {
            opc,
            main_partname,
            slides,
        })
    }

    /// Partname of the main presentation part.
    #[inline]
    pub fn main_partname(&self) -> &PackURI {
        &self.main_partname
    }

    /// Slides in presentation order.
    #[inline]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[inline]
    pub fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Access the underlying OPC package.
    #[inline]
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }

    /// Serialize the package, including any slide edits, to ZIP bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.sync_slides()?;
        Ok(self.opc.to_bytes()?)
    }

    /// Save the package, including any slide edits, to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.sync_slides()?;
        self.opc.save(path.as_ref())?;
        info!(path = %path.as_ref().display(), "saved presentation package");
        Ok(())
    }

    /// Write modified slides back into their parts.
    ///
    /// Synced slides are parsed again from the written bytes, so they read
    /// as unmodified afterwards.
    fn sync_slides(&mut self) -> Result<()> {
        for slide in self.slides.iter_mut().filter(|slide| slide.is_modified()) {
            let partname = slide.partname().clone();
            let xml = slide.to_xml();
            self.opc.replace_blob(&partname, xml.clone())?;
            debug!(part = %partname, bytes = xml.len(), "updated slide part");
            *slide = Slide::from_xml(partname, xml)?;
        }
        Ok(())
    }
}

fn load_slides(opc: &OpcPackage, main_partname: &PackURI) -> Result<Vec<Slide>> {
    let rels = opc.rels_for(main_partname)?;
    let r_ids = slide_rel_ids(main_partname.as_str(), opc.blob(main_partname)?)?;

    let mut slides = Vec::with_capacity(r_ids.len());
    for r_id in r_ids {
        let rel = rels.get(&r_id).ok_or_else(|| {
            OpcError::RelationshipNotFound(format!("{} in {}", r_id, main_partname))
        })?;
        if rel.reltype() != relationship_type::SLIDE {
            return Err(OpcError::InvalidRelationship(format!(
                "{} in {} is not a slide relationship",
                r_id, main_partname
            ))
            .into());
        }
        let partname = rel.target_partname()?;
        let xml = opc.blob(&partname)?.to_vec();
        slides.push(Slide::from_xml(partname, xml)?);
    }
    Ok(slides)
}
