//! EXT2 directory entry structure and parsing.
//!
//! Directory data is a sequence of variable-length records. Each record holds
//! the child's inode number, the distance to the next record, and a
//! length-prefixed name that is not NUL-terminated on disk.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io::{Read, Seek, SeekFrom};

use super::ext2_error::Ext2Error;
use super::file_type::FileType;

/// Names that are never listed nor eligible as lookup targets.
pub const HIDDEN_NAMES: [&[u8]; 3] = [b".", b"..", b"lost+found"];

/// EXT2 directory entry.
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
pub struct DirEntry {
    /// Inode number of the child (0 for an unused record)
    #[get = "pub"]
    inode: u32,
    /// Distance in bytes from the start of this record to the next one
    #[get = "pub"]
    rec_len: u16,
    #[get = "pub"]
    name_len: u8,
    file_type: u8,
    #[br(count = name_len as usize)]
    name: Vec<u8>,
}

impl DirEntry {
    /// Reads the directory entry located at an absolute byte offset.
    pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<Self, Ext2Error> {
        reader.seek(SeekFrom::Start(offset))?;
        Ok(reader.read_le()?)
    }

    /// Returns the raw name bytes, exactly `name_len` long.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    pub fn file_type(&self) -> FileType {
        FileType::from(self.file_type)
    }

    /// Whether this entry is `.`, `..` or `lost+found`.
    pub fn is_hidden(&self) -> bool {
        HIDDEN_NAMES.contains(&self.name_bytes())
    }
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" inode {} ({}, rec_len {})",
            self.name(),
            self.inode,
            self.file_type(),
            self.rec_len
        )
    }
}
