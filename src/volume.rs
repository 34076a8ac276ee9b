//! Volume opened from an image file, whichever its filesystem.
//!
//! This module implements:
//! - Filesystem detection on open (EXT2 first, then FAT16)
//! - Dispatch of the info, tree and cat operations to the backend

use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::detect::{self, FsType};
use crate::ext2::{Ext2Error, Ext2Vol};
use crate::fat16::{FATError, Fat16Vol};
use crate::traits::LayoutDisplay;
use crate::tree::Tree;

/// Errors reported to the user of a volume.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// The image file is missing or unreadable.
    #[error("Error while opening the file {}: {source}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    /// Neither EXT2 nor FAT16 was detected.
    #[error("Unsupported file system: {}", .0.display())]
    Unsupported(PathBuf),

    /// No regular file carries the requested name.
    #[error("File not found")]
    FileNotFound(String),

    #[error("EXT2 Error: {0}")]
    Ext2(#[from] Ext2Error),

    #[error("FAT16 Error: {0}")]
    Fat(#[from] FATError),

    #[error("Report formatting failed: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Supported volumes.
pub enum Volume {
    Ext2(Ext2Vol<File>),
    Fat16(Fat16Vol<File>),
}

impl Volume {
    /// Opens an image file and selects its backend.
    ///
    /// # Errors
    /// - `VolumeError::FileOpen` if the file cannot be opened
    /// - `VolumeError::Unsupported` if no filesystem is detected
    /// - a backend error if the detected metadata cannot be decoded
    pub fn open(path: &Path) -> Result<Self, VolumeError> {
        let mut file = File::open(path).map_err(|source| VolumeError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let fs_type = detect::detect_image(&mut file)
            .ok_or_else(|| VolumeError::Unsupported(path.to_path_buf()))?;
        info!("{} detected in {}", fs_type, path.display());

        Ok(match fs_type {
            FsType::Ext2 => Volume::Ext2(Ext2Vol::from_reader(file)?),
            FsType::Fat16 => Volume::Fat16(Fat16Vol::from_reader(file)?),
        })
    }

    pub fn fs_type(&self) -> FsType {
        match self {
            Volume::Ext2(_) => FsType::Ext2,
            Volume::Fat16(_) => FsType::Fat16,
        }
    }

    /// Returns the metadata report of the volume.
    ///
    /// FAT16 reports are followed by the region layout table.
    pub fn info(&self) -> Result<String, VolumeError> {
        match self {
            Volume::Ext2(vol) => Ok(vol.superblock().to_string()),
            Volume::Fat16(vol) => {
                let bpb = vol.bpb();
                Ok(format!("{bpb}\n{}", bpb.display_layout(0)?))
            }
        }
    }

    /// Builds the directory tree of the volume.
    pub fn tree(&mut self) -> Result<Tree, VolumeError> {
        let tree = match self {
            Volume::Ext2(vol) => vol.tree()?,
            Volume::Fat16(vol) => vol.tree()?,
        };
        debug!("Tree of {} entries", tree.len());
        Ok(tree)
    }

    /// Returns the content of the first regular file called `name`.
    ///
    /// # Errors
    /// - `VolumeError::FileNotFound` once the whole hierarchy was searched
    pub fn cat(&mut self, name: &str) -> Result<Vec<u8>, VolumeError> {
        let content = match self {
            Volume::Ext2(vol) => vol.cat(name)?,
            Volume::Fat16(vol) => vol.cat(name)?,
        };
        content.ok_or_else(|| VolumeError::FileNotFound(name.to_string()))
    }
}
