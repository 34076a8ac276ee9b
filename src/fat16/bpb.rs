//! FAT Bpb structure.
//!
//! This module implements:
//! - BIOS Parameter Block (Bpb) parsing
//! - Region arithmetic and FAT type detection by cluster count

use std::fmt;
use std::fmt::Write;
use std::io;

use super::fat_error::FATError;
use super::fat_type::FATType;
use crate::layout::{self, layout};
use crate::traits::LayoutDisplay;
use crate::utils::padded_str;

/// Size of the boot sector holding the Bpb.
pub const BOOT_SECTOR_SIZE: usize = 512;
/// Size of one directory entry.
pub const DIR_ENTRY_SIZE: u32 = 32;

layout! {
    /// BIOS Parameter Block structure for FAT16 filesystems.
    ///
    /// The Bpb contains essential information about the filesystem layout and properties.
    pub struct Bpb {
        /// OEM identifier (e.g., "MSWIN4.1")
        3 => oem_name: [u8; 8],
        /// Number of bytes per sector (512, 1024, 2048, or 4096)
        11 => bytes_per_sec: u16,
        /// Number of sectors per cluster
        13 => sec_per_clus: u8,
        /// Number of reserved sectors from start of volume
        14 => rsvd_sec_cnt: u16,
        /// Number of FAT copies (typically 2 for redundancy)
        16 => num_fat: u8,
        /// Maximum number of root directory entries
        17 => root_ent_cnt: u16,
        /// Total sectors for volumes < 32MB, 0 otherwise
        19 => tot_sec_16: u16,
        /// Sectors per FAT
        22 => fat_sz_16: u16,
        /// Total sectors when `tot_sec_16` is 0
        32 => tot_sec_32: u32,
        /// Volume label (11 bytes)
        43 => vol_lab: [u8; 11],
    }
}

impl Bpb {
    /// Reads the Bpb from the boot sector of a volume.
    ///
    /// # Errors
    /// - Returns `FATError::BinReadError` if the boot sector cannot be read
    pub fn from<T: io::Read + io::Seek>(file: &mut T) -> Result<Bpb, FATError> {
        Ok(layout::decode(file, 0, BOOT_SECTOR_SIZE)?)
    }

    /// Total count of sectors, falling back to the 32-bit field when the
    /// 16-bit one is 0.
    pub fn tot_sec(&self) -> u32 {
        if self.tot_sec_16 == 0 {
            self.tot_sec_32
        } else {
            self.tot_sec_16.into()
        }
    }

    /// Sectors occupied by all FAT copies.
    pub fn fat_region_sectors(&self) -> u32 {
        u32::from(self.fat_sz_16) * u32::from(self.num_fat)
    }

    /// Sectors occupied by the root directory, rounded up.
    ///
    /// Returns `None` if the sector size is 0.
    pub fn root_dir_sectors(&self) -> Option<u32> {
        if self.bytes_per_sec == 0 {
            return None;
        }
        Some((u32::from(self.root_ent_cnt) * DIR_ENTRY_SIZE).div_ceil(u32::from(self.bytes_per_sec)))
    }

    /// Determines the number of clusters in the data region.
    ///
    /// Returns `None` when the Bpb cannot describe a volume: a zero sector or
    /// cluster size, or metadata regions larger than the volume.
    pub fn cluster_count(&self) -> Option<u32> {
        if self.sec_per_clus == 0 {
            return None;
        }

        let data_sec = self
            .tot_sec()
            .checked_sub(u32::from(self.rsvd_sec_cnt))?
            .checked_sub(self.fat_region_sectors())?
            .checked_sub(self.root_dir_sectors()?)?;

        Some(data_sec / u32::from(self.sec_per_clus))
    }

    /// Determines the FAT type based on the number of clusters in the filesystem.
    pub fn fat_type(&self) -> Option<FATType> {
        self.cluster_count().map(FATType::from_cluster_count)
    }

    /// Returns the size of a cluster in bytes.
    pub fn cluster_size(&self) -> u64 {
        u64::from(self.bytes_per_sec) * u64::from(self.sec_per_clus)
    }

    pub fn oem(&self) -> String {
        padded_str(&self.oem_name)
    }

    pub fn label(&self) -> String {
        padded_str(&self.vol_lab)
    }
}

impl fmt::Display for Bpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------ Filesystem Information ------")?;
        writeln!(f)?;
        writeln!(f, "Filesystem: FAT16")?;
        writeln!(f)?;
        writeln!(f, "System name: {}", self.oem())?;
        writeln!(f, "Sector Size: {}", self.bytes_per_sec)?;
        writeln!(f, "Sectors per cluster: {}", self.sec_per_clus)?;
        writeln!(f, "Reserved sectors: {}", self.rsvd_sec_cnt)?;
        writeln!(f, "# of FATs: {}", self.num_fat)?;
        writeln!(f, "Max root entries: {}", self.root_ent_cnt)?;
        writeln!(f, "Sectors per FAT: {}", self.fat_sz_16)?;
        writeln!(f, "Label: {}", self.label())?;
        Ok(())
    }
}

impl LayoutDisplay for Bpb {
    /// Renders the regions of the volume, in sectors.
    fn display_layout(&self, indent: u8) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let indent = " ".repeat(indent.into());

        let fat_start = u64::from(self.rsvd_sec_cnt);
        let fat_sz = u64::from(self.fat_sz_16);
        let root_start = fat_start + u64::from(self.fat_region_sectors());
        let data_start = root_start + u64::from(self.root_dir_sectors().unwrap_or(0));
        let data_end = data_start
            + u64::from(self.cluster_count().unwrap_or(0)) * u64::from(self.sec_per_clus);

        writeln!(out, "{}┌{:─^55}┐", indent, " FAT16 Volume Layout ")?;
        writeln!(
            out,
            "{}├{:^12}┬{:^12}┬{:^12}┬{:^16}┤",
            indent, "Region", "Start", "End", "Description"
        )?;
        writeln!(out, "{}├{:─<12}┼{:─<12}┼{:─<12}┼{:─<16}┤", indent, "", "", "", "")?;

        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent, "Reserved", 0, fat_start, "Boot + Reserved"
        )?;
        for i in 0..u64::from(self.num_fat) {
            let fat_i_start = fat_start + i * fat_sz;
            writeln!(
                out,
                "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
                indent,
                format!("FAT #{i}"),
                fat_i_start,
                fat_i_start + fat_sz,
                "FAT Tables"
            )?;
        }
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent, "Root Dir", root_start, data_start, "Root Entries"
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent, "Data", data_start, data_end, "Cluster Data"
        )?;

        writeln!(out, "{}└{:─<12}┴{:─<12}┴{:─<12}┴{:─<16}┘", indent, "", "", "", "")?;

        Ok(out)
    }
}
