//! FAT directory entry structure and parsing.
//!
//! Each directory entry is 32 bytes and holds an 8.3 short name, an attribute
//! byte, two timestamps, the first cluster of the content and its size.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use crate::fat16::fat_error::FATError;

/// Attribute bit of a directory.
pub const ATTR_DIRECTORY: u8 = 0x10;
/// Attribute bit of a regular file ("archive").
pub const ATTR_ARCHIVE: u8 = 0x20;

/// FAT16 directory entry.
///
/// # Notes
/// - The name uses the legacy 8.3 format with space padding
/// - A first name byte of 0x00 marks the end of the directory
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
pub struct DirEntry {
    /// Base name, space padded
    name: [u8; 8],
    /// Extension, space padded
    ext: [u8; 3],
    /// File attributes byte
    #[get = "pub"]
    attr: u8,
    _reserved: [u8; 10],
    /// Last write time
    #[get = "pub"]
    time: u16,
    /// Last write date
    #[get = "pub"]
    date: u16,
    /// First cluster of the content
    #[get = "pub"]
    fst_clus: u16,
    /// File size in bytes (0 for directories)
    #[get = "pub"]
    file_size: u32,
}

impl DirEntry {
    /// Creates a directory entry from a byte slice of at least 32 bytes.
    pub fn from_slice(buf: &[u8]) -> Result<Self, FATError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(FATError::from)
    }

    /// Whether this entry marks the end of the directory.
    pub fn is_end(&self) -> bool {
        self.name[0] == 0
    }

    /// Checks if the directory attribute bit (0x10) is set.
    pub fn is_dir(&self) -> bool {
        self.attr & ATTR_DIRECTORY != 0
    }

    /// Checks if the archive attribute bit (0x20) is set on a non-directory.
    pub fn is_file(&self) -> bool {
        !self.is_dir() && self.attr & ATTR_ARCHIVE != 0
    }

    /// Returns the displayed name of this entry.
    ///
    /// Both parts are trimmed of their space padding and lower-cased. The base
    /// name is cut at the first `~`, and the extension is only appended when
    /// its first character is not a digit from 1 to 9.
    pub fn short_name(&self) -> String {
        let mut name = clean(&self.name);
        if let Some(tilde) = name.find('~') {
            name.truncate(tilde);
        }

        let ext = clean(&self.ext);
        match ext.chars().next() {
            Some(c) if !('1'..='9').contains(&c) => format!("{name}.{ext}"),
            _ => name,
        }
    }

    /// Whether this entry is the `.` or `..` link.
    pub fn is_dot(&self) -> bool {
        matches!(clean(&self.name).as_str(), "." | "..")
    }
}

fn clean(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(' ')
        .to_ascii_lowercase()
}

impl fmt::Display for DirEntry {
    /// Shows the name, the first cluster and the size.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" attr 0x{:02X} cluster {} {}B",
            self.short_name(),
            self.attr,
            self.fst_clus,
            self.file_size
        )
    }
}
