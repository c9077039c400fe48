//! TLV Codec Module
//!
//! Binary Type-Length-Value encoding used by the VBX settings interface.
//!
//! ## Wire Format
//!
//! ```text
//! ┌───────────────────┬──────────────────────────────────────┐
//! │ Magic (9 bytes)   │ Records...                           │
//! └───────────────────┴──────────────────────────────────────┘
//!
//! Record:
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Type (1) │ Len (1)  │         Value               │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! - Records appear back to back after the signature; the buffer boundary
//!   is the only terminator. Records are not sorted or padded as a group.
//! - `Len` caps a single value at 255 bytes.
//! - Multi-byte integers are big-endian.
//! - Strings are UTF-8 with a single optional trailing NUL.
//!
//! A record whose declared length would overrun the buffer ends the scan
//! silently; trailing padding and short reads are tolerated, not errors.

mod constants;
mod reader;
mod writer;

pub use constants::{HEADER_SIZE, MAGIC, MAX_VALUE_LEN};
pub use reader::{DecodeKind, TlvReader, TlvValue};
pub use writer::TlvWriter;
