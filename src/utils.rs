use chrono::DateTime;
use std::io::{self, Read, Seek, SeekFrom};

/// Reads `len` bytes located at an absolute byte offset.
///
/// # Arguments
///
/// - `reader`: The image to read from.
/// - `offset`: The absolute offset in bytes where the read starts.
/// - `len`: The number of bytes to read.
///
/// # Errors
///
/// Returns an `io::Error` if the region cannot be read in full.
pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0; len];

    reader.seek(SeekFrom::Start(offset))?;

    reader.read_exact(&mut buffer).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Failed to read {len} bytes at offset {offset}: {err}"),
        )
    })?;

    Ok(buffer)
}

/// Extracts a little-endian 16-bit unsigned integer from a buffer at a given offset.
///
/// Returns `None` if the buffer ends before the two bytes.
pub fn u16_at(buffer: &[u8], offset: usize) -> Option<u16> {
    let bytes = buffer.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Turns a fixed-size, NUL- or space-padded on-disk string into text.
pub fn padded_str(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end])
        .trim_end_matches(' ')
        .to_string()
}

/// Renders a UNIX timestamp as UTC calendar text, e.g. `Thu Jan  1 00:00:00 1970`.
pub fn format_timestamp(secs: u32) -> String {
    match DateTime::from_timestamp(i64::from(secs), 0) {
        Some(dt) => dt.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => format!("<invalid timestamp {secs}>"),
    }
}
