//! EXT2 inode record.

use binread::BinRead;
use getset::Getters;

/// Number of block pointers held by an inode.
pub const BLOCK_SLOTS: usize = 15;
/// Number of direct block pointers; the remaining slots are indirect.
pub const DIRECT_BLOCKS: usize = 12;
/// Bytes of an inode record that are decoded.
pub const INODE_RECORD_SIZE: usize = 128;

/// EXT2 inode, revision 0 layout (the first 128 bytes of every inode).
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
#[getset(get = "pub")]
pub struct Inode {
    /// File type and permissions
    mode: u16,
    uid: u16,
    /// File size in bytes (lower 32 bits)
    size: u32,
    atime: u32,
    ctime: u32,
    mtime: u32,
    dtime: u32,
    gid: u16,
    links_count: u16,
    /// Number of 512-byte sectors reserved for this inode
    blocks: u32,
    flags: u32,
    osd1: u32,
    /// 12 direct pointers followed by single, double and triple indirect pointers
    block: [u32; BLOCK_SLOTS],
    generation: u32,
    /// Block holding extended attributes
    file_acl: u32,
    dir_acl: u32,
    faddr: u32,
    osd2: [u8; 12],
}

impl Inode {
    /// Returns the direct data blocks of this inode, stopping at the first
    /// unused (zero) pointer.
    ///
    /// Indirect pointers are never followed, so at most [`DIRECT_BLOCKS`]
    /// blocks are returned.
    pub fn direct_blocks(&self) -> Vec<u32> {
        self.block[..DIRECT_BLOCKS]
            .iter()
            .copied()
            .take_while(|&b| b != 0)
            .collect()
    }
}
