//! Physical (ZIP) side of an OPC package.
//!
//! Reading pulls every member into memory in archive order. Writing emits
//! members in the order given, reusing each member's original compression
//! method, so a package that is read and written without edits keeps its
//! layout.

use crate::ooxml::opc::error::{OpcError, Result};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// One member of the ZIP container.
#[derive(Debug, Clone)]
pub struct Member {
    /// ZIP member name, e.g. `ppt/slides/slide1.xml`
    pub name: String,
    /// Uncompressed content
    pub data: Vec<u8>,
    /// Compression method used in the source archive
    pub compression: CompressionMethod,
    /// Whether the entry is a directory entry
    pub is_dir: bool,
}

/// Reads the members of a ZIP-based OPC package.
pub struct PhysPkgReader;

impl PhysPkgReader {
    /// Read all members of the package at `path`.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Vec<Member>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Read all members from an in-memory archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Vec<Member>> {
        Self::from_reader(Cursor::new(data))
    }

    /// Read all members from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Vec<Member>> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::with_capacity(prealloc_size(file.size()));
            file.read_to_end(&mut data)?;
            members.push(Member {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        Ok(members)
    }
}

/// Largest buffer reserved up front for one member.
const MAX_PREALLOC: usize = 1 << 20;

/// Capacity to reserve for a member whose header declares `declared` bytes.
///
/// The declared size comes from the archive and is not trusted; larger
/// members grow the buffer while they are read.
#[inline]
fn prealloc_size(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PREALLOC, |size| size.min(MAX_PREALLOC))
}

/// Writes members into a new ZIP archive held in memory.
pub struct PhysPkgWriter {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Append one member.
    pub fn write(&mut self, member: &Member) -> Result<()> {
        // Only stored and deflated entries can be produced with the enabled features
        let method = match member.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        };
        let options = SimpleFileOptions::default().compression_method(method);

        if member.is_dir {
            self.writer.add_directory(member.name.as_str(), options)?;
        } else {
            self.writer.start_file(member.name.as_str(), options)?;
            self.writer.write_all(&member.data)?;
        }
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.writer.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
