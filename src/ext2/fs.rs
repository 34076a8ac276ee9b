//! EXT2 volume structure and operations.
//!
//! This module implements read-only access to an EXT2 image:
//! - Reading the superblock and the first block group descriptor
//! - Locating inodes
//! - Iterating directory entries
//! - Extracting file content from direct blocks

use binread::BinReaderExt;
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::dir_entry::DirEntry;
use super::ext2_error::Ext2Error;
use super::file_type::FileType;
use super::group_desc::{GROUP_DESC_SIZE, GroupDescriptor};
use super::inode::Inode;
use super::superblock::Superblock;
use crate::traits::{DirWalk, WalkEntry};
use crate::tree::Tree;
use crate::utils::read_at;
use crate::walk;

/// Inode number of the root directory.
pub const ROOT_INODE: u32 = 2;

/// An EXT2 image opened for reading.
pub struct Ext2Vol<R> {
    reader: R,
    superblock: Superblock,
}

impl Ext2Vol<File> {
    /// Opens the EXT2 image at `path` and reads its superblock.
    ///
    /// # Errors
    /// - `Ext2Error::Io` if the file cannot be opened
    /// - any error of [`Ext2Vol::from_reader`]
    pub fn open(path: &Path) -> Result<Self, Ext2Error> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> Ext2Vol<R> {
    /// Wraps an image and reads its superblock.
    pub fn from_reader(mut reader: R) -> Result<Self, Ext2Error> {
        let superblock = Superblock::from(&mut reader)?;
        debug!(
            "EXT2 superblock: block size {}, {} inodes per group, inode size {}",
            superblock.block_size(),
            superblock.inodes_per_group(),
            superblock.inode_size()
        );

        Ok(Self { reader, superblock })
    }

    pub fn superblock(&self) -> &Superblock {
        &self.superblock
    }

    pub fn block_size(&self) -> u64 {
        self.superblock.block_size()
    }

    /// Reads the group descriptor located in the block that follows the superblock.
    ///
    /// Only this first descriptor is ever consulted, so inodes of groups whose
    /// inode table is not at `inode_table + group * blocks_per_group` are
    /// located incorrectly.
    pub fn group_descriptor(&mut self) -> Result<GroupDescriptor, Ext2Error> {
        let offset = (u64::from(*self.superblock.first_data_block()) + 1) * self.block_size();
        let buf = read_at(&mut self.reader, offset, GROUP_DESC_SIZE)?;
        Ok(std::io::Cursor::new(buf).read_le()?)
    }

    /// Returns the absolute byte offset of inode `inode_nb`.
    pub fn inode_offset(&mut self, inode_nb: u32) -> Result<u64, Ext2Error> {
        let inodes_per_group = *self.superblock.inodes_per_group();
        if inode_nb == 0 || inodes_per_group == 0 {
            return Err(Ext2Error::InvalidInode(inode_nb));
        }

        let gd = self.group_descriptor()?;

        let relative_index = u64::from((inode_nb - 1) % inodes_per_group);
        let block_group = u64::from((inode_nb - 1) / inodes_per_group);

        // Every factor comes from the image.
        block_group
            .checked_mul(u64::from(*self.superblock.blocks_per_group()))
            .and_then(|blocks| blocks.checked_add(u64::from(*gd.inode_table())))
            .and_then(|table| table.checked_mul(self.block_size()))
            .and_then(|table| {
                relative_index
                    .checked_mul(u64::from(*self.superblock.inode_size()))
                    .and_then(|within| table.checked_add(within))
            })
            .ok_or(Ext2Error::InvalidInode(inode_nb))
    }

    /// Locates and reads inode `inode_nb`.
    pub fn inode(&mut self, inode_nb: u32) -> Result<Inode, Ext2Error> {
        let offset = self.inode_offset(inode_nb)?;
        trace!("inode {inode_nb} at byte {offset}");

        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(self.reader.read_le()?)
    }

    /// Decodes every record of the directory `inode_nb`, in on-disk order.
    ///
    /// Records are read contiguously from the first direct block. Iteration
    /// stops at a zero record length or once the running offset passes the
    /// directory size.
    pub fn dir_entries(&mut self, inode_nb: u32) -> Result<Vec<DirEntry>, Ext2Error> {
        let inode = self.inode(inode_nb)?;
        let base = u64::from(inode.block()[0])
            .checked_mul(self.block_size())
            .ok_or(Ext2Error::InvalidInode(inode_nb))?;
        let size = u64::from(*inode.size());

        debug!("Directory inode {inode_nb}: {size} bytes at byte {base}");

        let mut entries = Vec::new();
        let mut offset: u64 = 0;
        while offset < size {
            let entry = DirEntry::read_at(&mut self.reader, base + offset)?;
            if *entry.rec_len() == 0 {
                warn!("Zero record length in directory inode {inode_nb} at offset {offset}");
                break;
            }

            offset += u64::from(*entry.rec_len());
            if offset > size {
                break;
            }

            trace!("{entry}");
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Reads the content of `inode` from its direct blocks.
    ///
    /// At most 12 blocks are read: indirect blocks are not followed, so
    /// larger files are truncated. The result never exceeds the inode size.
    pub fn read_content(&mut self, inode: &Inode) -> Result<Vec<u8>, Ext2Error> {
        let block_size = self.block_size();
        let mut remaining = u64::from(*inode.size());
        let mut content = Vec::new();

        for block in inode.direct_blocks() {
            if remaining == 0 {
                break;
            }
            let len = remaining.min(block_size);
            let buf = read_at(&mut self.reader, u64::from(block) * block_size, len as usize)?;
            content.extend_from_slice(&buf);
            remaining -= len;
        }

        if remaining > 0 {
            debug!("{remaining} bytes beyond the direct blocks were not read");
        }

        Ok(content)
    }

    /// Builds the directory tree of the volume.
    pub fn tree(&mut self) -> Result<Tree, Ext2Error> {
        walk::build_tree(self)
    }

    /// Finds the first regular file named exactly `name` and returns its content.
    pub fn cat(&mut self, name: &str) -> Result<Option<Vec<u8>>, Ext2Error> {
        walk::cat_file(self, name)
    }
}

impl<R: Read + Seek> DirWalk for Ext2Vol<R> {
    type Dir = u32;
    type File = u32;
    type Error = Ext2Error;

    fn root(&self) -> u32 {
        ROOT_INODE
    }

    fn read_dir(&mut self, dir: &u32) -> Result<Vec<WalkEntry<u32, u32>>, Ext2Error> {
        let entries = self
            .dir_entries(*dir)?
            .into_iter()
            .filter(|entry| !entry.is_hidden())
            .filter_map(|entry| match entry.file_type() {
                FileType::Directory => Some(WalkEntry::Dir {
                    name: entry.name(),
                    dir: *entry.inode(),
                }),
                FileType::RegularFile => Some(WalkEntry::File {
                    name: entry.name(),
                    file: *entry.inode(),
                }),
                _ => None,
            })
            .collect();

        Ok(entries)
    }

    fn read_file(&mut self, file: &u32) -> Result<Vec<u8>, Ext2Error> {
        let inode = self.inode(*file)?;
        self.read_content(&inode)
    }
}
