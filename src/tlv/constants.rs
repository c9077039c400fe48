//! Framing constants shared by the reader and writer.

/// Magic signature identifying the protocol and its version.
///
/// ASCII "AMB82VBX" followed by a version byte.
pub const MAGIC: [u8; 9] = [0x41, 0x4D, 0x42, 0x38, 0x32, 0x56, 0x42, 0x58, 0x01];

/// Record header size: 1 byte type + 1 byte length
pub const HEADER_SIZE: usize = 2;

/// Maximum value length of a single record (the length field is one byte)
pub const MAX_VALUE_LEN: usize = 255;
