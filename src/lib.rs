//!
//! fsutils: A library and CLI for inspecting EXT2 and FAT16 filesystem images.
//!
//! This crate provides tools for:
//! - Detecting the filesystem of an image
//! - Reporting the EXT2 superblock and the FAT16 BIOS Parameter Block
//! - Rendering the directory hierarchy of a volume as a tree
//! - Extracting the content of a file by name
//!
//! Images are only ever read.
//!
//! # Re-exports
//! - [`Volume`]: Enum for supported volume types
//! - [`Ext2Vol`]: EXT2 volume abstraction
//! - [`Fat16Vol`]: FAT16 volume abstraction
//! - [`Tree`]: Directory tree of a volume

pub mod commands;
pub mod detect;
pub mod ext2;
pub mod fat16;
pub mod layout;
pub mod traits;
pub mod tree;
pub mod utils;
pub mod volume;
pub mod walk;

#[cfg(test)]
mod fixtures;

/// EXT2 volume abstraction (see [`ext2::fs::Ext2Vol`]).
pub use crate::ext2::Ext2Vol;
/// FAT16 volume abstraction (see [`fat16::fat::Fat16Vol`]).
pub use crate::fat16::Fat16Vol;
/// Directory tree (see [`tree::Tree`]).
pub use crate::tree::Tree;
/// Enum for supported volume types (see [`volume::Volume`]).
pub use crate::volume::Volume;
