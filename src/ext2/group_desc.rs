use binread::BinRead;
use getset::Getters;

/// Size in bytes of a block group descriptor.
pub const GROUP_DESC_SIZE: usize = 32;

/// Block group descriptor.
///
/// Only `inode_table` is needed to locate inodes; the remaining fields are
/// decoded for completeness.
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
#[getset(get = "pub")]
pub struct GroupDescriptor {
    /// Block id of the block bitmap
    block_bitmap: u32,
    /// Block id of the inode bitmap
    inode_bitmap: u32,
    /// Block id of the first inode table block
    inode_table: u32,
    free_blocks_count: u16,
    free_inodes_count: u16,
    used_dirs_count: u16,
    pad: u16,
    reserved: [u8; 12],
}
