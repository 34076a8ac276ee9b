//! Declarative binary layouts for fixed-offset on-disk headers.
//!
//! A header such as the EXT2 superblock or the FAT BIOS Parameter Block is a
//! sparse set of little-endian fields at fixed byte offsets. Rather than
//! seeking and reading each field by hand, a header is declared once with the
//! [`layout!`] macro:
//!
//! - a `BinRead` struct is generated whose fields each seek to their offset
//!   before being read,
//! - an associated `FIELDS` table lists `(name, offset, width)` for every field.
//!
//! The struct is then parsed by the generic [`decode`] function.

use binread::{BinRead, BinReaderExt};
use std::io::{self, Read, Seek};

use crate::utils::read_at;

/// One field of a binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name of the struct field holding the value
    pub name: &'static str,
    /// Byte offset relative to the start of the header
    pub offset: u64,
    /// Width in bytes
    pub width: usize,
}

impl Field {
    /// Returns the first byte past this field.
    pub fn end(&self) -> u64 {
        self.offset + self.width as u64
    }
}

/// Returns the number of bytes a header must span to hold every field of `fields`.
pub fn span(fields: &[Field]) -> u64 {
    fields.iter().map(Field::end).max().unwrap_or(0)
}

/// Reads `len` bytes at absolute offset `base` and parses them as `T`.
///
/// Field offsets declared with [`layout!`] are relative to `base`.
///
/// # Errors
/// - `binread::Error::Io` if the region cannot be read in full
/// - any parsing error raised by `T`
pub fn decode<T: BinRead, R: Read + Seek>(
    reader: &mut R,
    base: u64,
    len: usize,
) -> Result<T, binread::Error> {
    let buf = read_at(reader, base, len)?;
    let mut cursor = io::Cursor::new(buf);
    cursor.read_le()
}

/// Declares a fixed-offset header.
///
/// ```ignore
/// layout! {
///     /// Doc comment for the struct
///     pub struct Header {
///         /// Doc comment for the field
///         0 => count: u32,
///         8 => label: [u8; 11],
///     }
/// }
/// ```
macro_rules! layout {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $offset:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(binread::BinRead, getset::Getters, Debug, Clone)]
        #[br(little)]
        #[getset(get = "pub")]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                #[br(seek_before = std::io::SeekFrom::Start($offset))]
                $field: $ty,
            )*
        }

        impl $name {
            /// Offset and width of every field, relative to the start of the header.
            pub const FIELDS: &'static [$crate::layout::Field] = &[
                $(
                    $crate::layout::Field {
                        name: stringify!($field),
                        offset: $offset,
                        width: std::mem::size_of::<$ty>(),
                    },
                )*
            ];
        }
    };
}

pub(crate) use layout;
