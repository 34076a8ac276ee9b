//! Error types for EXT2 decoding.

use std::io;
use thiserror::Error;

use crate::walk::WalkError;

/// Errors that can occur while decoding an EXT2 image.
#[derive(Error, Debug)]
pub enum Ext2Error {
    /// Underlying I/O errors that occur while reading the image.
    #[error("IO Error: `{0}`")]
    Io(io::Error),

    /// A structure could not be decoded, typically because the image is truncated.
    #[error("BinRead Error: `{0}`")]
    BinRead(binread::Error),

    /// The superblock's block-size exponent cannot describe a real block size.
    #[error("Invalid block size exponent: `{0}`")]
    InvalidBlockSize(u32),

    /// The inode number cannot be located (inode 0, or no inodes per group).
    #[error("Invalid inode number: `{0}`")]
    InvalidInode(u32),

    /// The directory walk was aborted.
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Converts standard I/O errors into Ext2Error.
impl From<io::Error> for Ext2Error {
    fn from(err: io::Error) -> Self {
        Ext2Error::Io(err)
    }
}

/// Converts BinRead errors into Ext2Error.
impl From<binread::Error> for Ext2Error {
    fn from(err: binread::Error) -> Self {
        Ext2Error::BinRead(err)
    }
}
