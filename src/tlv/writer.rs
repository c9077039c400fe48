//! TLV Writer
//!
//! Accumulates type-length-value records into an outgoing message buffer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, VbxError};
use super::constants::{MAGIC, MAX_VALUE_LEN};

/// Builds one outgoing TLV message.
///
/// Writes accumulate in call order. The caller must emit the magic
/// signature first via [`TlvWriter::write_magic`], exactly once per
/// message; the writer does not insert it automatically.
///
/// [`TlvWriter::finalize`] is a non-destructive snapshot: it can be called
/// repeatedly and does not require writes to have stopped.
#[derive(Debug, Default)]
pub struct TlvWriter {
    buffer: BytesMut,
}

impl TlvWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the magic signature
    pub fn write_magic(&mut self) {
        self.buffer.put_slice(&MAGIC);
    }

    /// Append one record: type, length, value bytes
    ///
    /// Fails if the value exceeds the 255-byte single-record capacity;
    /// nothing is committed to the buffer in that case.
    pub fn write(&mut self, type_code: u8, value: &[u8]) -> Result<()> {
        if value.len() > MAX_VALUE_LEN {
            return Err(VbxError::Range(format!(
                "value of {} bytes for type {} exceeds the {}-byte record capacity",
                value.len(),
                type_code,
                MAX_VALUE_LEN
            )));
        }

        self.buffer.put_u8(type_code);
        self.buffer.put_u8(value.len() as u8);
        self.buffer.put_slice(value);

        Ok(())
    }

    /// Append an unsigned 8-bit record
    pub fn write_u8(&mut self, type_code: u8, value: u8) -> Result<()> {
        self.write(type_code, &[value])
    }

    /// Append a big-endian unsigned 16-bit record
    pub fn write_u16(&mut self, type_code: u8, value: u16) -> Result<()> {
        self.write(type_code, &value.to_be_bytes())
    }

    /// Append a big-endian unsigned 32-bit record
    pub fn write_u32(&mut self, type_code: u8, value: u32) -> Result<()> {
        self.write(type_code, &value.to_be_bytes())
    }

    /// Append a big-endian unsigned 64-bit record
    pub fn write_u64(&mut self, type_code: u8, value: u64) -> Result<()> {
        self.write(type_code, &value.to_be_bytes())
    }

    /// Append a UTF-8 string record with a trailing NUL terminator
    ///
    /// If the encoded string is longer than `max_len` bytes it is cut at
    /// the last code-point boundary at or below `max_len`; a multi-byte
    /// character is never split. The on-wire value is the truncated string
    /// plus one 0x00 byte, and must still fit the record capacity.
    pub fn write_str(&mut self, type_code: u8, value: &str, max_len: usize) -> Result<()> {
        let truncated = truncate_to_boundary(value, max_len);

        let mut bytes = Vec::with_capacity(truncated.len() + 1);
        bytes.extend_from_slice(truncated.as_bytes());
        bytes.push(0x00);

        self.write(type_code, &bytes)
    }

    /// Snapshot the accumulated records into one contiguous buffer
    ///
    /// Pure and repeatable; the writer keeps its state and may continue
    /// accumulating afterwards.
    pub fn finalize(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buffer)
    }

    /// Number of bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Largest prefix of `value` that fits `max_len` bytes without splitting
/// a code point
fn truncate_to_boundary(value: &str, max_len: usize) -> &str {
    if value.len() <= max_len {
        return value;
    }

    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }

    &value[..end]
}
