//! Fixed-width binary record codec.
//!
//! Every persisted entity is a flat run of bytes of a constant width. Files
//! have no header and no count field; the record count is the file size
//! divided by the width.
//!
//! # Field Encoding
//!
//! ```text
//! text    NUL-terminated byte buffer, zero-filled after the terminator
//! f32     4 bytes, little-endian IEEE-754
//! bool    1 byte, 0 = false, anything else = true
//! pad     zero bytes keeping f32 fields 4-byte aligned
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::{RecordError, Result};

/// A record with a constant on-disk width.
pub trait FixedRecord: Sized {
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Human-readable record kind, used in errors and log fields.
    const KIND: &'static str;

    /// Write the record into `buf`, which is exactly `WIDTH` bytes and zeroed.
    fn encode_into(&self, buf: &mut [u8]);

    /// Decode a record from the first `WIDTH` bytes of `buf`.
    fn decode(buf: &[u8]) -> Result<Self>;

    /// Encode into a freshly allocated buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::WIDTH];
        self.encode_into(&mut buf);
        buf
    }
}

/// Fail unless `buf` holds at least one `R`.
pub fn ensure_width<R: FixedRecord>(buf: &[u8]) -> Result<()> {
    if buf.len() < R::WIDTH {
        return Err(RecordError::ShortBuffer {
            kind: R::KIND,
            expected: R::WIDTH,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Copy `value` into `field`, leaving at least one trailing NUL.
///
/// Callers validate lengths at construction, so an over-long value here is
/// cut at the buffer boundary rather than overflowing into the next field.
pub fn put_text(field: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(field.len().saturating_sub(1));
    field[..len].copy_from_slice(&bytes[..len]);
    field[len..].fill(0);
}

/// Read a NUL-terminated string out of `field`.
pub fn get_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Write a little-endian `f32` at `offset`.
pub fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    LittleEndian::write_f32(&mut buf[offset..offset + 4], value);
}

/// Read a little-endian `f32` at `offset`.
pub fn get_f32(buf: &[u8], offset: usize) -> f32 {
    LittleEndian::read_f32(&buf[offset..offset + 4])
}

/// Write a one-byte boolean at `offset`.
pub fn put_bool(buf: &mut [u8], offset: usize, value: bool) {
    buf[offset] = u8::from(value);
}

/// Read a one-byte boolean at `offset`.
pub fn get_bool(buf: &[u8], offset: usize) -> bool {
    buf[offset] != 0
}
