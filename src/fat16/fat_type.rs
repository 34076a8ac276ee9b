//! Enum for the different FAT types (FAT12, FAT16, FAT32).
//!
//! The FAT type of a volume is determined solely by its count of data
//! clusters.

use std::fmt;

/// Volumes with fewer clusters than this are FAT12.
pub const FAT16_MIN_CLUSTERS: u32 = 4085;
/// Volumes with at least this many clusters are FAT32.
pub const FAT32_MIN_CLUSTERS: u32 = 65525;

/// Represents the different types of FAT filesystems.
///
/// Only FAT16 volumes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FATType {
    FAT12,
    FAT16,
    FAT32,
}

impl FATType {
    /// Classifies a volume by its count of data clusters:
    /// - `FAT12` if cluster count < 4085
    /// - `FAT16` if cluster count < 65525
    /// - `FAT32` otherwise
    pub fn from_cluster_count(clus_cnt: u32) -> Self {
        if clus_cnt < FAT16_MIN_CLUSTERS {
            FATType::FAT12
        } else if clus_cnt < FAT32_MIN_CLUSTERS {
            FATType::FAT16
        } else {
            FATType::FAT32
        }
    }
}

impl fmt::Display for FATType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FATType::FAT12 => "FAT12",
            FATType::FAT16 => "FAT16",
            FATType::FAT32 => "FAT32",
        };
        write!(f, "{s}")
    }
}
