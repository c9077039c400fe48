//! TLV Reader
//!
//! Validates framing and decodes a fully buffered message into typed
//! fields via per-type callbacks.

use std::collections::HashMap;

use crate::error::{Result, VbxError};
use super::constants::{HEADER_SIZE, MAGIC};

/// How a record's value is decoded before the callback fires.
///
/// The set is closed: registrations are checked at compile time, so an
/// unknown kind cannot reach the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    /// Big-endian unsigned integer; width taken from the record's actual
    /// length (1, 2, 4, or 8 bytes)
    Numeric,

    /// UTF-8 text with a single optional trailing NUL stripped
    Text,
}

/// A decoded record value, handed to the registered callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvValue {
    /// Unsigned integer, widened to 64 bits
    Numeric(u64),

    /// Text with the terminator removed
    Text(String),
}

struct Registration<'a> {
    kind: DecodeKind,
    callback: Box<dyn FnMut(u8, TlvValue) + 'a>,
}

/// Decodes one received TLV buffer.
///
/// Constructed once per buffer; the magic signature is validated at
/// construction and the scan cursor starts immediately after it. The
/// buffer is scanned exactly once via [`TlvReader::read_all`]; calling it
/// again after a completed scan is a no-op.
///
/// Registering or replacing handlers between `read_all` calls (or from
/// inside a callback) is undefined with respect to the in-progress scan;
/// register everything up front.
pub struct TlvReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    handlers: HashMap<u8, Registration<'a>>,
}

impl<'a> TlvReader<'a> {
    /// Create a reader over a complete message buffer
    ///
    /// Fails if the buffer is shorter than the magic signature or does not
    /// start with it exactly.
    pub fn new(buffer: &'a [u8]) -> Result<Self> {
        if buffer.len() < MAGIC.len() || buffer[..MAGIC.len()] != MAGIC {
            return Err(VbxError::Format(
                "missing or invalid magic signature".to_string(),
            ));
        }

        Ok(Self {
            buffer,
            cursor: MAGIC.len(),
            handlers: HashMap::new(),
        })
    }

    /// Register a decode callback for a type code
    ///
    /// Replaces any previous registration for the same type. Types without
    /// a registration are skipped silently during the scan.
    pub fn register<F>(&mut self, type_code: u8, kind: DecodeKind, callback: F)
    where
        F: FnMut(u8, TlvValue) + 'a,
    {
        self.handlers.insert(
            type_code,
            Registration {
                kind,
                callback: Box::new(callback),
            },
        );
    }

    /// Scan all records from the cursor to the end of the buffer
    ///
    /// Callbacks fire synchronously in the order records appear in the
    /// buffer. The scan stops silently when fewer than a full header
    /// remains or when a record's declared length would overrun the
    /// buffer. A decode failure (unsupported numeric width) aborts the
    /// remainder of the scan.
    pub fn read_all(&mut self) -> Result<()> {
        let buffer = self.buffer;

        while self.cursor + HEADER_SIZE <= buffer.len() {
            let type_code = buffer[self.cursor];
            let length = buffer[self.cursor + 1] as usize;
            let value_start = self.cursor + HEADER_SIZE;

            // Truncated or padded trailing bytes end the scan, not an error
            if value_start + length > buffer.len() {
                break;
            }

            let value = &buffer[value_start..value_start + length];

            if let Some(registration) = self.handlers.get_mut(&type_code) {
                let decoded = decode_value(type_code, registration.kind, value)?;
                (registration.callback)(type_code, decoded);
            }

            self.cursor = value_start + length;
        }

        Ok(())
    }
}

/// Decode a raw record value according to the registered kind
fn decode_value(type_code: u8, kind: DecodeKind, value: &[u8]) -> Result<TlvValue> {
    match kind {
        DecodeKind::Numeric => decode_numeric(type_code, value).map(TlvValue::Numeric),
        DecodeKind::Text => Ok(TlvValue::Text(decode_text(value))),
    }
}

/// Width is taken from the record's actual length; anything other than
/// 1, 2, 4, or 8 bytes is a format error.
fn decode_numeric(type_code: u8, value: &[u8]) -> Result<u64> {
    match value.len() {
        1 => Ok(u64::from(value[0])),
        2 => Ok(u64::from(u16::from_be_bytes([value[0], value[1]]))),
        4 => Ok(u64::from(u32::from_be_bytes([
            value[0], value[1], value[2], value[3],
        ]))),
        8 => Ok(u64::from_be_bytes([
            value[0], value[1], value[2], value[3], value[4], value[5], value[6], value[7],
        ])),
        other => Err(VbxError::Format(format!(
            "unsupported numeric length {} for type {}",
            other, type_code
        ))),
    }
}

/// Strip exactly one trailing NUL if present; no further normalization
fn decode_text(value: &[u8]) -> String {
    let raw = match value.split_last() {
        Some((0x00, rest)) => rest,
        _ => value,
    };

    String::from_utf8_lossy(raw).into_owned()
}
