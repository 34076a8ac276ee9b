//! Error types for FAT16 decoding.

use std::io;
use thiserror::Error;

use crate::walk::WalkError;

/// Errors that can occur while decoding a FAT16 volume.
#[derive(Error, Debug)]
pub enum FATError {
    /// Underlying I/O errors that occur while reading the volume.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),

    /// Clusters 0 and 1 are reserved; the data area starts at cluster 2.
    #[error("Invalid cluster number `{0}`. Data clusters start at 2.")]
    InvalidCluster(u16),

    /// The detected FAT type is not supported (only FAT16 is supported).
    #[error("Unsupported FAT type: `{0}`")]
    UnsupportedFATType(String),

    /// The directory walk was aborted.
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Converts standard I/O errors into FATError.
impl From<io::Error> for FATError {
    fn from(err: io::Error) -> Self {
        FATError::IOError(err)
    }
}

/// Converts BinRead errors into FATError.
impl From<binread::Error> for FATError {
    fn from(err: binread::Error) -> Self {
        FATError::BinReadError(err)
    }
}
