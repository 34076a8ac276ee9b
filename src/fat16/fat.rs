//! FAT16 volume structure and operations.
//!
//! Directories and files are addressed by their first cluster only: the
//! allocation table is never consulted, so content spanning more than one
//! cluster is read contiguously from the first one.

use log::{debug, trace};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use super::bpb::{Bpb, DIR_ENTRY_SIZE};
use super::dir_entry::DirEntry;
use super::fat_error::FATError;
use super::fat_type::FATType;
use crate::traits::{DirWalk, WalkEntry};
use crate::tree::Tree;
use crate::utils::read_at;
use crate::walk;

/// Cluster number standing for the root directory.
pub const ROOT_CLUSTER: u16 = 2;

/// A FAT16 image opened for reading.
pub struct Fat16Vol<R> {
    reader: R,
    bpb: Bpb,
}

impl Fat16Vol<File> {
    /// Opens the FAT16 image at `path` and reads its Bpb.
    pub fn open(path: &Path) -> Result<Self, FATError> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> Fat16Vol<R> {
    /// Wraps an image and reads its Bpb.
    ///
    /// # Errors
    /// - `FATError::BinReadError` if the boot sector cannot be decoded
    /// - `FATError::UnsupportedFATType` if the cluster count is not in the FAT16 range
    pub fn from_reader(mut reader: R) -> Result<Self, FATError> {
        let bpb = Bpb::from(&mut reader)?;

        match bpb.fat_type() {
            Some(FATType::FAT16) => {}
            Some(other) => return Err(FATError::UnsupportedFATType(other.to_string())),
            None => return Err(FATError::UnsupportedFATType("unknown".to_string())),
        }

        let vol = Self { reader, bpb };
        debug!(
            "FAT16 regions: root directory at byte {}, data at byte {}, {} bytes per cluster",
            vol.root_start(),
            vol.data_start(),
            vol.bpb.cluster_size()
        );

        Ok(vol)
    }

    pub fn bpb(&self) -> &Bpb {
        &self.bpb
    }

    /// Byte offset of the root directory region.
    pub fn root_start(&self) -> u64 {
        (u64::from(*self.bpb.rsvd_sec_cnt()) + u64::from(self.bpb.fat_region_sectors()))
            * u64::from(*self.bpb.bytes_per_sec())
    }

    /// Size in bytes of the root directory region.
    pub fn root_size(&self) -> u64 {
        u64::from(*self.bpb.root_ent_cnt()) * u64::from(DIR_ENTRY_SIZE)
    }

    /// Byte offset of cluster 2, the first cluster of the data region.
    pub fn data_start(&self) -> u64 {
        self.root_start() + self.root_size()
    }

    /// Byte offset of the directory starting at `cluster`.
    ///
    /// Cluster 2 denotes the root directory, which precedes the data region.
    pub fn dir_offset(&self, cluster: u16) -> Result<u64, FATError> {
        if cluster == ROOT_CLUSTER {
            return Ok(self.root_start());
        }
        self.data_offset(cluster)
    }

    /// Byte offset of data cluster `cluster`.
    pub fn data_offset(&self, cluster: u16) -> Result<u64, FATError> {
        if cluster < 2 {
            return Err(FATError::InvalidCluster(cluster));
        }
        Ok(self.data_start() + u64::from(cluster - 2) * self.bpb.cluster_size())
    }

    /// Decodes every raw entry of the directory starting at `cluster`, up to
    /// the end-of-directory marker.
    ///
    /// The root directory stops after `root_ent_cnt` entries even when no
    /// end marker is found, so a full root never reads into the data region.
    pub fn dir_entries(&mut self, cluster: u16) -> Result<Vec<DirEntry>, FATError> {
        let base = self.dir_offset(cluster)?;
        let limit = (cluster == ROOT_CLUSTER).then(|| u64::from(*self.bpb.root_ent_cnt()));

        debug!("Directory cluster {cluster} at byte {base}");

        let mut entries = Vec::new();
        let mut index: u64 = 0;
        while limit.is_none_or(|max| index < max) {
            let offset = base + index * u64::from(DIR_ENTRY_SIZE);
            let raw = read_at(&mut self.reader, offset, DIR_ENTRY_SIZE as usize)?;
            let entry = DirEntry::from_slice(&raw)?;
            if entry.is_end() {
                break;
            }

            trace!("{entry}");
            entries.push(entry);
            index += 1;
        }

        Ok(entries)
    }

    /// Reads exactly `file_size` bytes from the first cluster of `entry`.
    pub fn read_content(&mut self, entry: &DirEntry) -> Result<Vec<u8>, FATError> {
        let size = *entry.file_size() as usize;
        if size == 0 {
            return Ok(Vec::new());
        }

        let offset = self.data_offset(*entry.fst_clus())?;
        if size as u64 > self.bpb.cluster_size() {
            debug!(
                "File of {size} bytes spans several clusters, reading contiguously from byte {offset}"
            );
        }

        Ok(read_at(&mut self.reader, offset, size)?)
    }

    /// Builds the directory tree of the volume.
    pub fn tree(&mut self) -> Result<Tree, FATError> {
        walk::build_tree(self)
    }

    /// Finds the first regular file named `name`, ignoring case, and returns its content.
    pub fn cat(&mut self, name: &str) -> Result<Option<Vec<u8>>, FATError> {
        walk::cat_file(self, name)
    }
}

impl<R: Read + Seek> DirWalk for Fat16Vol<R> {
    type Dir = u16;
    type File = DirEntry;
    type Error = FATError;

    fn root(&self) -> u16 {
        ROOT_CLUSTER
    }

    /// Classifies the raw entries of a directory.
    ///
    /// An entry whose non-zero first cluster repeats the one of the previous
    /// kept entry is dropped, which removes long-name records sharing the
    /// cluster of the short-name record.
    fn read_dir(&mut self, dir: &u16) -> Result<Vec<WalkEntry<u16, DirEntry>>, FATError> {
        let mut last_cluster: Option<u16> = None;
        let mut walk_entries = Vec::new();

        for entry in self.dir_entries(*dir)? {
            let cluster = *entry.fst_clus();
            if cluster != 0 && last_cluster == Some(cluster) {
                trace!("Skipping duplicate of cluster {cluster}");
                continue;
            }
            last_cluster = Some(cluster);

            if entry.is_dir() {
                if !entry.is_dot() {
                    walk_entries.push(WalkEntry::Dir {
                        name: entry.short_name(),
                        dir: cluster,
                    });
                }
            } else if entry.is_file() {
                walk_entries.push(WalkEntry::File {
                    name: entry.short_name(),
                    file: entry,
                });
            }
        }

        Ok(walk_entries)
    }

    fn read_file(&mut self, file: &DirEntry) -> Result<Vec<u8>, FATError> {
        self.read_content(file)
    }

    fn name_matches(&self, name: &str, query: &str) -> bool {
        name.eq_ignore_ascii_case(query)
    }
}
