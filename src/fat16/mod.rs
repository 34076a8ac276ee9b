//! FAT16 backend: Bpb, region arithmetic and directory entry decoding.

pub mod bpb;
pub mod dir_entry;
pub mod fat;
pub mod fat_error;
pub mod fat_type;

pub use bpb::Bpb;
pub use fat::Fat16Vol;
pub use fat_error::FATError;
pub use fat_type::FATType;
