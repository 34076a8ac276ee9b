//! Filesystem detection.
//!
//! An image is probed for EXT2 first, then for FAT16. Every probe answers
//! `false` on read failures instead of reporting them.

use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::ext2::superblock::{EXT2_MAGIC, MAGIC_OFFSET, SUPERBLOCK_OFFSET};
use crate::fat16::{Bpb, FATType};
use crate::utils::{read_at, u16_at};

/// Filesystems that can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsType {
    Ext2,
    Fat16,
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsType::Ext2 => write!(f, "EXT2"),
            FsType::Fat16 => write!(f, "FAT16"),
        }
    }
}

/// Whether the two bytes at absolute offset 1080 hold the EXT2 magic number.
pub fn is_ext2_image<R: Read + Seek>(reader: &mut R) -> bool {
    match read_at(reader, SUPERBLOCK_OFFSET + MAGIC_OFFSET, 2) {
        Ok(magic) => u16_at(&magic, 0) == Some(EXT2_MAGIC),
        Err(err) => {
            debug!("No EXT2 magic: {err}");
            false
        }
    }
}

/// Whether the boot sector describes a volume with a FAT16 cluster count.
pub fn is_fat16_image<R: Read + Seek>(reader: &mut R) -> bool {
    match Bpb::from(reader) {
        Ok(bpb) => {
            let fat_type = bpb.fat_type();
            debug!("Bpb cluster count {:?}", bpb.cluster_count());
            fat_type == Some(FATType::FAT16)
        }
        Err(err) => {
            debug!("No Bpb: {err}");
            false
        }
    }
}

/// Checks the file at `path` for an EXT2 filesystem.
pub fn is_ext2(path: &Path) -> bool {
    File::open(path).is_ok_and(|mut file| is_ext2_image(&mut file))
}

/// Checks the file at `path` for a FAT16 filesystem.
pub fn is_fat16(path: &Path) -> bool {
    File::open(path).is_ok_and(|mut file| is_fat16_image(&mut file))
}

/// Detects the filesystem of an image, EXT2 taking priority over FAT16.
pub fn detect_image<R: Read + Seek>(reader: &mut R) -> Option<FsType> {
    if is_ext2_image(reader) {
        Some(FsType::Ext2)
    } else if is_fat16_image(reader) {
        Some(FsType::Fat16)
    } else {
        None
    }
}

/// Detects the filesystem of the file at `path`.
pub fn detect(path: &Path) -> Option<FsType> {
    let mut file = File::open(path).ok()?;
    detect_image(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Ext2Image, Fat16Image};
    use std::io::Cursor;

    #[test]
    fn ext2_magic_is_recognised() {
        let mut image = Cursor::new(Ext2Image::new(0).finish());
        assert!(is_ext2_image(&mut image));
        assert!(!is_fat16_image(&mut image));
        assert_eq!(detect_image(&mut image), Some(FsType::Ext2));
    }

    #[test]
    fn magic_must_match_exactly() {
        let mut raw = vec![0u8; 2048];
        raw[1080] = 0x53;
        raw[1081] = 0xEE;
        assert!(!is_ext2_image(&mut Cursor::new(raw)));
    }

    #[test]
    fn fat16_cluster_count_is_recognised() {
        let mut image = Cursor::new(Fat16Image::new().finish());
        assert!(!is_ext2_image(&mut image));
        assert!(is_fat16_image(&mut image));
        assert_eq!(detect_image(&mut image), Some(FsType::Fat16));
    }

    #[test]
    fn fat12_and_fat32_counts_are_not_fat16() {
        let mut small = Fat16Image::new();
        small.set_total_sectors(65 + 4084, 0);
        assert!(!is_fat16_image(&mut Cursor::new(small.finish())));

        let mut large = Fat16Image::new();
        large.set_total_sectors(0, 65 + 65525);
        assert!(!is_fat16_image(&mut Cursor::new(large.finish())));
    }

    #[test]
    fn ext2_takes_priority() {
        let mut raw = Fat16Image::new().finish();
        raw[1080] = 0x53;
        raw[1081] = 0xEF;
        assert_eq!(detect_image(&mut Cursor::new(raw)), Some(FsType::Ext2));
    }

    #[test]
    fn short_or_blank_images_are_unsupported() {
        assert_eq!(detect_image(&mut Cursor::new(vec![0u8; 100])), None);
        assert_eq!(detect_image(&mut Cursor::new(vec![0u8; 4096])), None);
    }

    #[test]
    fn missing_files_are_not_detected() {
        let path = Path::new("/nonexistent/fsutils/image.img");
        assert!(!is_ext2(path));
        assert!(!is_fat16(path));
        assert_eq!(detect(path), None);
    }
}
