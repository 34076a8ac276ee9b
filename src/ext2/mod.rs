//! EXT2 backend: superblock, group descriptor, inode and directory decoding.

pub mod dir_entry;
pub mod ext2_error;
pub mod file_type;
pub mod fs;
pub mod group_desc;
pub mod inode;
pub mod superblock;

pub use ext2_error::Ext2Error;
pub use fs::Ext2Vol;
pub use superblock::Superblock;
