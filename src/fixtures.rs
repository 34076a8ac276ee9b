//! Builders of minimal EXT2 and FAT16 images for tests.
//!
//! Both builders lay the image out the way formatting tools do, but only
//! write the fields the decoders read. They panic on misuse.
#![allow(dead_code)]

/// EXT2 directory entry type of a regular file.
pub const EXT2_FILE: u8 = 1;
/// EXT2 directory entry type of a directory.
pub const EXT2_DIR: u8 = 2;

const EXT2_INODES_PER_GROUP: u32 = 32;
const EXT2_INODE_SIZE: usize = 128;
const EXT2_FIRST_INO: u32 = 11;
const EXT2_ROOT_INO: u32 = 2;

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// EXT2 image with a single block group.
pub struct Ext2Image {
    block_size: usize,
    log_block_size: u32,
    first_data_block: u32,
    inode_table: u32,
    next_ino: u32,
    data: Vec<u8>,
}

impl Ext2Image {
    pub fn new(log_block_size: u32) -> Self {
        let block_size = 1024usize << log_block_size;
        let first_data_block = if log_block_size == 0 { 1 } else { 0 };
        let inode_table = first_data_block + 2;
        let table_blocks = (EXT2_INODES_PER_GROUP as usize * EXT2_INODE_SIZE).div_ceil(block_size);
        let first_free = inode_table as usize + table_blocks;

        Self {
            block_size,
            log_block_size,
            first_data_block,
            inode_table,
            next_ino: EXT2_FIRST_INO,
            data: vec![0u8; first_free * block_size],
        }
    }

    fn block_count(&self) -> u32 {
        (self.data.len() / self.block_size) as u32
    }

    fn alloc_block(&mut self) -> u32 {
        let block = self.block_count();
        self.data.resize(self.data.len() + self.block_size, 0);
        block
    }

    fn inode_offset(&self, ino: u32) -> usize {
        self.inode_table as usize * self.block_size + (ino as usize - 1) * EXT2_INODE_SIZE
    }

    fn write_inode(&mut self, ino: u32, mode: u16, size: u32, blocks: &[u32]) {
        let off = self.inode_offset(ino);
        put(&mut self.data, off, &mode.to_le_bytes());
        put(&mut self.data, off + 4, &size.to_le_bytes());
        put(&mut self.data, off + 26, &1u16.to_le_bytes());
        let sectors = (blocks.len() * self.block_size / 512) as u32;
        put(&mut self.data, off + 28, &sectors.to_le_bytes());
        for (slot, block) in blocks.iter().enumerate() {
            put(&mut self.data, off + 40 + slot * 4, &block.to_le_bytes());
        }
    }

    fn alloc_ino(&mut self) -> u32 {
        let ino = self.next_ino;
        assert!(ino <= EXT2_INODES_PER_GROUP, "fixture inode table is full");
        self.next_ino += 1;
        ino
    }

    /// Adds a regular file and returns its inode number.
    ///
    /// Files larger than 12 blocks get a single indirect block.
    pub fn add_file(&mut self, content: &[u8]) -> u32 {
        let ino = self.alloc_ino();
        let mut blocks = Vec::new();
        for chunk in content.chunks(self.block_size) {
            let block = self.alloc_block();
            let off = block as usize * self.block_size;
            put(&mut self.data, off, chunk);
            blocks.push(block);
        }

        let mut slots: Vec<u32> = blocks.iter().copied().take(12).collect();
        if blocks.len() > 12 {
            let indirect = self.alloc_block();
            let off = indirect as usize * self.block_size;
            for (i, block) in blocks[12..].iter().enumerate() {
                put(&mut self.data, off + i * 4, &block.to_le_bytes());
            }
            slots.push(indirect);
        }

        self.write_inode(ino, 0x81A4, content.len() as u32, &slots);
        ino
    }

    fn write_dir(&mut self, ino: u32, entries: &[(&str, u32, u8)]) {
        let block = self.alloc_block();
        let base = block as usize * self.block_size;

        let mut records: Vec<(&[u8], u32, u8)> =
            vec![(&b"."[..], ino, EXT2_DIR), (&b".."[..], EXT2_ROOT_INO, EXT2_DIR)];
        records.extend(entries.iter().map(|&(n, i, t)| (n.as_bytes(), i, t)));

        let mut offset = 0;
        for (index, (name, inode, file_type)) in records.iter().enumerate() {
            let rec_len = if index + 1 == records.len() {
                self.block_size - offset
            } else {
                (8 + name.len()).div_ceil(4) * 4
            };
            assert!(offset + rec_len <= self.block_size, "fixture directory overflows its block");

            let off = base + offset;
            put(&mut self.data, off, &inode.to_le_bytes());
            put(&mut self.data, off + 4, &(rec_len as u16).to_le_bytes());
            self.data[off + 6] = name.len() as u8;
            self.data[off + 7] = *file_type;
            put(&mut self.data, off + 8, name);
            offset += rec_len;
        }

        self.write_inode(ino, 0x41ED, self.block_size as u32, &[block]);
    }

    /// Adds a directory holding `entries` (name, inode, type) after its
    /// `.` and `..` records and returns its inode number.
    pub fn add_dir(&mut self, entries: &[(&str, u32, u8)]) -> u32 {
        let ino = self.alloc_ino();
        self.write_dir(ino, entries);
        ino
    }

    /// Writes the root directory.
    pub fn set_root(&mut self, entries: &[(&str, u32, u8)]) {
        self.write_dir(EXT2_ROOT_INO, entries);
    }

    /// Overrides the size recorded in the inode of directory `ino`.
    pub fn set_dir_size(&mut self, ino: u32, size: u32) {
        let off = self.inode_offset(ino);
        put(&mut self.data, off + 4, &size.to_le_bytes());
    }

    /// Zeroes the record length of record `index` of directory `ino`.
    pub fn corrupt_rec_len(&mut self, ino: u32, index: usize) {
        let inode = self.inode_offset(ino);
        let block = u32::from_le_bytes(self.data[inode + 40..inode + 44].try_into().unwrap());
        let mut off = block as usize * self.block_size;
        for _ in 0..index {
            off += u16::from_le_bytes([self.data[off + 4], self.data[off + 5]]) as usize;
        }
        put(&mut self.data, off + 4, &0u16.to_le_bytes());
    }

    /// Writes the superblock and group descriptor and returns the image.
    pub fn finish(mut self) -> Vec<u8> {
        let blocks = self.block_count();
        let mut sb = vec![0u8; 1024];
        put(&mut sb, 0, &EXT2_INODES_PER_GROUP.to_le_bytes());
        put(&mut sb, 4, &blocks.to_le_bytes());
        put(&mut sb, 12, &0u32.to_le_bytes());
        put(&mut sb, 16, &(EXT2_INODES_PER_GROUP + 1 - self.next_ino).to_le_bytes());
        put(&mut sb, 20, &self.first_data_block.to_le_bytes());
        put(&mut sb, 24, &self.log_block_size.to_le_bytes());
        put(&mut sb, 28, &self.log_block_size.to_le_bytes());
        put(&mut sb, 32, &8192u32.to_le_bytes());
        put(&mut sb, 36, &8192u32.to_le_bytes());
        put(&mut sb, 40, &EXT2_INODES_PER_GROUP.to_le_bytes());
        put(&mut sb, 44, &1_700_000_000u32.to_le_bytes());
        put(&mut sb, 48, &1_700_000_000u32.to_le_bytes());
        put(&mut sb, 56, &0xEF53u16.to_le_bytes());
        put(&mut sb, 64, &1_700_000_000u32.to_le_bytes());
        put(&mut sb, 84, &EXT2_FIRST_INO.to_le_bytes());
        put(&mut sb, 88, &(EXT2_INODE_SIZE as u16).to_le_bytes());
        put(&mut sb, 120, b"fixture");
        put(&mut self.data, 1024, &sb);

        let gd = (self.first_data_block as usize + 1) * self.block_size;
        let bitmap = self.first_data_block + 1;
        put(&mut self.data, gd, &bitmap.to_le_bytes());
        put(&mut self.data, gd + 4, &bitmap.to_le_bytes());
        put(&mut self.data, gd + 8, &self.inode_table.to_le_bytes());

        self.data
    }
}

/// A 32-byte FAT directory record.
pub type FatRecord = [u8; 32];

const FAT_SECTOR: usize = 512;
const FAT_ROOT_ENTRIES: usize = 512;
/// Reserved sector, two FATs of 16 sectors and 32 root directory sectors.
const FAT_DATA_SECTOR: usize = 65;

/// FAT16 image with 512-byte sectors and one sector per cluster.
///
/// Clusters are handed out from 3 upwards, so cluster 2 stays empty and
/// never aliases the root directory.
pub struct Fat16Image {
    boot: Vec<u8>,
    root: Vec<FatRecord>,
    clusters: Vec<[u8; FAT_SECTOR]>,
}

fn record(name: &[u8; 11], attr: u8, cluster: u16, size: u32) -> FatRecord {
    let mut rec = [0u8; 32];
    put(&mut rec, 0, name);
    rec[11] = attr;
    put(&mut rec, 26, &cluster.to_le_bytes());
    put(&mut rec, 28, &size.to_le_bytes());
    rec
}

fn record_cluster(rec: &FatRecord) -> u16 {
    u16::from_le_bytes([rec[26], rec[27]])
}

impl Default for Fat16Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Fat16Image {
    pub fn new() -> Self {
        let mut boot = vec![0u8; FAT_SECTOR];
        put(&mut boot, 0, &[0xEB, 0x3C, 0x90]);
        put(&mut boot, 3, b"MSWIN4.1");
        put(&mut boot, 11, &(FAT_SECTOR as u16).to_le_bytes());
        boot[13] = 1;
        put(&mut boot, 14, &1u16.to_le_bytes());
        boot[16] = 2;
        put(&mut boot, 17, &(FAT_ROOT_ENTRIES as u16).to_le_bytes());
        put(&mut boot, 19, &4161u16.to_le_bytes());
        boot[21] = 0xF8;
        put(&mut boot, 22, &16u16.to_le_bytes());
        put(&mut boot, 43, b"FIXTURE    ");
        put(&mut boot, 54, b"FAT16   ");
        put(&mut boot, 510, &[0x55, 0xAA]);

        Self {
            boot,
            root: Vec::new(),
            clusters: Vec::new(),
        }
    }

    /// Overrides the 16-bit and 32-bit total sector counts.
    pub fn set_total_sectors(&mut self, tot_sec_16: u16, tot_sec_32: u32) {
        put(&mut self.boot, 19, &tot_sec_16.to_le_bytes());
        put(&mut self.boot, 32, &tot_sec_32.to_le_bytes());
    }

    fn alloc_cluster(&mut self) -> u16 {
        self.clusters.push([0u8; FAT_SECTOR]);
        (self.clusters.len() + 2) as u16
    }

    fn cluster_mut(&mut self, cluster: u16) -> &mut [u8; FAT_SECTOR] {
        &mut self.clusters[cluster as usize - 3]
    }

    /// Stores `content` in consecutive clusters and returns the file's record.
    /// Empty files get cluster 0.
    pub fn add_file(&mut self, name: &[u8; 11], content: &[u8]) -> FatRecord {
        let mut first = 0;
        for chunk in content.chunks(FAT_SECTOR) {
            let cluster = self.alloc_cluster();
            if first == 0 {
                first = cluster;
            }
            put(self.cluster_mut(cluster), 0, chunk);
        }
        record(name, 0x20, first, content.len() as u32)
    }

    /// Creates a one-cluster directory holding `.`, `..` and `children`.
    pub fn add_dir(&mut self, name: &[u8; 11], children: &[FatRecord]) -> FatRecord {
        assert!(children.len() + 2 <= FAT_SECTOR / 32, "fixture directory overflows its cluster");
        let cluster = self.alloc_cluster();

        let mut entries = vec![
            record(b".          ", 0x10, cluster, 0),
            record(b"..         ", 0x10, 0, 0),
        ];
        entries.extend_from_slice(children);
        for (i, entry) in entries.iter().enumerate() {
            put(self.cluster_mut(cluster), i * 32, entry);
        }

        for child in children {
            let child_cluster = record_cluster(child);
            if child[11] & 0x10 != 0 && child_cluster >= 3 {
                put(self.cluster_mut(child_cluster), 32 + 26, &cluster.to_le_bytes());
            }
        }

        record(name, 0x10, cluster, 0)
    }

    /// Returns a copy of `rec` under another name, sharing its first cluster.
    pub fn alias(&self, rec: FatRecord, name: &[u8; 11]) -> FatRecord {
        let mut copy = rec;
        put(&mut copy, 0, name);
        copy
    }

    pub fn set_root(&mut self, entries: &[FatRecord]) {
        assert!(entries.len() <= FAT_ROOT_ENTRIES, "fixture root directory is full");
        self.root = entries.to_vec();
    }

    /// Lays out the boot sector, the FATs, the root directory and cluster 2
    /// onwards.
    pub fn finish(self) -> Vec<u8> {
        let mut image = vec![0u8; (FAT_DATA_SECTOR + 1 + self.clusters.len()) * FAT_SECTOR];
        put(&mut image, 0, &self.boot);

        // Media descriptor and end-of-chain marker in both FAT copies.
        for fat in [1, 17] {
            put(&mut image, fat * FAT_SECTOR, &[0xF8, 0xFF, 0xFF, 0xFF]);
        }

        for (i, entry) in self.root.iter().enumerate() {
            put(&mut image, 33 * FAT_SECTOR + i * 32, entry);
        }
        for (i, cluster) in self.clusters.iter().enumerate() {
            put(&mut image, (FAT_DATA_SECTOR + 1 + i) * FAT_SECTOR, cluster);
        }

        image
    }
}
