//! EXT2 superblock.
//!
//! Only the fields needed to locate inodes and to report the volume are
//! decoded. Offsets are relative to [`SUPERBLOCK_OFFSET`].

use std::fmt;
use std::io::{Read, Seek};

use super::ext2_error::Ext2Error;
use crate::layout::{self, layout};
use crate::utils::{format_timestamp, padded_str};

/// Absolute byte offset of the superblock.
pub const SUPERBLOCK_OFFSET: u64 = 1024;
/// Size of the superblock region.
pub const SUPERBLOCK_SIZE: usize = 1024;
/// Offset of the magic number inside the superblock.
pub const MAGIC_OFFSET: u64 = 56;
/// The EXT2 magic number.
pub const EXT2_MAGIC: u16 = 0xEF53;
/// Largest block-size exponent accepted (64 MiB blocks).
pub const MAX_LOG_BLOCK_SIZE: u32 = 16;

layout! {
    /// EXT2 superblock fields.
    pub struct Superblock {
        /// Total number of inodes
        0 => inodes_count: u32,
        /// Total number of blocks
        4 => blocks_count: u32,
        /// Blocks reserved for the super user
        8 => r_blocks_count: u32,
        /// Free blocks
        12 => free_blocks_count: u32,
        /// Free inodes
        16 => free_inodes_count: u32,
        /// Id of the block holding the superblock
        20 => first_data_block: u32,
        /// Block size is `1024 << log_block_size`
        24 => log_block_size: u32,
        32 => blocks_per_group: u32,
        36 => frags_per_group: u32,
        40 => inodes_per_group: u32,
        /// Last mount time
        44 => mtime: u32,
        /// Last write time
        48 => wtime: u32,
        56 => magic: u16,
        /// Last consistency check time
        64 => lastcheck: u32,
        /// First non-reserved inode
        84 => first_ino: u32,
        88 => inode_size: u16,
        120 => volume_name: [u8; 16],
    }
}

impl Superblock {
    /// Reads the superblock of an EXT2 image.
    ///
    /// # Errors
    /// - `Ext2Error::BinRead` if the superblock region cannot be read
    /// - `Ext2Error::InvalidBlockSize` if the block-size exponent is out of range
    pub fn from<R: Read + Seek>(reader: &mut R) -> Result<Superblock, Ext2Error> {
        let sb: Superblock = layout::decode(reader, SUPERBLOCK_OFFSET, SUPERBLOCK_SIZE)?;

        if sb.log_block_size > MAX_LOG_BLOCK_SIZE {
            return Err(Ext2Error::InvalidBlockSize(sb.log_block_size));
        }

        Ok(sb)
    }

    /// Returns the block size in bytes.
    pub fn block_size(&self) -> u64 {
        1024 << self.log_block_size
    }

    /// Returns the volume name without its padding.
    pub fn volume_label(&self) -> String {
        padded_str(&self.volume_name)
    }
}

impl fmt::Display for Superblock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------ Filesystem Information ------")?;
        writeln!(f)?;
        writeln!(f, "Filesystem: EXT2")?;

        writeln!(f)?;
        writeln!(f, "INODE INFO:")?;
        writeln!(f, "\tSize: {}", self.inode_size)?;
        writeln!(f, "\tNum inodes: {}", self.inodes_count)?;
        writeln!(f, "\tFirst inode: {}", self.first_ino)?;
        writeln!(f, "\tInodes Group: {}", self.inodes_per_group)?;
        writeln!(f, "\tFree inodes: {}", self.free_inodes_count)?;

        writeln!(f)?;
        writeln!(f, "BLOCK INFO:")?;
        writeln!(f, "\tBlock Size: {}", self.block_size())?;
        writeln!(f, "\tReserved blocks: {}", self.r_blocks_count)?;
        writeln!(f, "\tFree blocks: {}", self.free_blocks_count)?;
        writeln!(f, "\tTotal blocks: {}", self.blocks_count)?;
        writeln!(f, "\tFirst block: {}", self.first_data_block)?;
        writeln!(f, "\tGroup blocks: {}", self.blocks_per_group)?;
        writeln!(f, "\tGroup flags: {}", self.frags_per_group)?;

        writeln!(f)?;
        writeln!(f, "VOLUME INFO:")?;
        writeln!(f, "\tVolume name: {}", self.volume_label())?;
        writeln!(f, "\tLast Checked: {}", format_timestamp(self.lastcheck))?;
        writeln!(f, "\tLast Mounted: {}", format_timestamp(self.mtime))?;
        writeln!(f, "\tLast Written: {}", format_timestamp(self.wtime))?;

        Ok(())
    }
}
