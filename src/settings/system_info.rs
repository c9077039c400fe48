//! System info aggregate
//!
//! Status the device reports on request: SD-card usage and the current
//! clock reading.
//!
//! ## Field Table
//! - 1: free storage bytes (u32)
//! - 2: used storage bytes (u32)
//! - 3: clock timestamp (u64)

use std::cell::RefCell;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::tlv::{DecodeKind, TlvReader, TlvValue, TlvWriter};

pub const FIELD_FREE_SPACE: u8 = 1;
pub const FIELD_USED_SPACE: u8 = 2;
pub const FIELD_TIMESTAMP: u8 = 3;

/// SD-card usage as reported by the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SdCardInfo {
    pub free_space: u32,
    pub used_space: u32,
}

impl SdCardInfo {
    /// Fraction of the card in use, in `[0.0, 1.0]`
    ///
    /// An empty or absent card (zero total) reports 0.0.
    pub fn usage_ratio(&self) -> f64 {
        let total = u64::from(self.free_space) + u64::from(self.used_space);

        if total == 0 {
            return 0.0;
        }

        f64::from(self.used_space) / total as f64
    }
}

/// Device status snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub sdcard: SdCardInfo,

    /// Unix timestamp of the device clock
    pub timestamp: u64,
}

impl SystemInfo {
    /// Encode the snapshot as one message
    pub fn to_tlv(&self) -> Result<Bytes> {
        let mut writer = TlvWriter::new();
        writer.write_magic();

        writer.write_u32(FIELD_FREE_SPACE, self.sdcard.free_space)?;
        writer.write_u32(FIELD_USED_SPACE, self.sdcard.used_space)?;
        writer.write_u64(FIELD_TIMESTAMP, self.timestamp)?;

        Ok(writer.finalize())
    }

    /// Decode a status message
    ///
    /// Unknown fields are skipped; missing fields keep their defaults.
    pub fn from_tlv(buffer: &[u8]) -> Result<Self> {
        let info = RefCell::new(Self::default());

        {
            let mut reader = TlvReader::new(buffer)?;

            reader.register(FIELD_FREE_SPACE, DecodeKind::Numeric, |_, value| {
                if let TlvValue::Numeric(v) = value {
                    if let Ok(free) = u32::try_from(v) {
                        info.borrow_mut().sdcard.free_space = free;
                    }
                }
            });

            reader.register(FIELD_USED_SPACE, DecodeKind::Numeric, |_, value| {
                if let TlvValue::Numeric(v) = value {
                    if let Ok(used) = u32::try_from(v) {
                        info.borrow_mut().sdcard.used_space = used;
                    }
                }
            });

            reader.register(FIELD_TIMESTAMP, DecodeKind::Numeric, |_, value| {
                if let TlvValue::Numeric(v) = value {
                    info.borrow_mut().timestamp = v;
                }
            });

            reader.read_all()?;
        }

        Ok(info.into_inner())
    }
}
