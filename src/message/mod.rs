//! Message Module
//!
//! Framing for the settings interface. Each request travels as one HTTP
//! POST body; the transport prepends a single request-kind byte to the
//! TLV payload. Responses carry a bare TLV body with no kind byte.
//!
//! ## Request Format
//! ```text
//! ┌──────────┬──────────────────────────────────────┐
//! │ Kind (1) │ TLV body (magic + records), may be   │
//! │          │ just the magic for empty requests    │
//! └──────────┴──────────────────────────────────────┘
//! ```
//!
//! ## Request Kinds
//! - 0x01: SYSTEM_INFO       - body: magic only
//! - 0x02: SYNC_CLOCK        - body: timestamp (u64)
//! - 0x03: GET_SCHEDULE      - body: magic only
//! - 0x04: UPDATE_SCHEDULE   - body: schedule entry pairs
//! - 0x05: CONFIGURE_HOTSPOT - body: enabled, SSID, password

use bytes::Bytes;

use crate::error::{Result, VbxError};
use crate::settings::{
    HotspotConfig, Schedule, FIELD_HOTSPOT_ENABLED, FIELD_HOTSPOT_PASSWORD, FIELD_HOTSPOT_SSID,
    FIELD_TIMESTAMP, MAX_PASSWORD_LEN, MAX_SSID_LEN,
};
use crate::tlv::TlvWriter;

/// Request kinds understood by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestKind {
    SystemInfo = 0x01,
    SyncClock = 0x02,
    GetSchedule = 0x03,
    UpdateSchedule = 0x04,
    ConfigureHotspot = 0x05,
}

impl RequestKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::SystemInfo),
            0x02 => Some(Self::SyncClock),
            0x03 => Some(Self::GetSchedule),
            0x04 => Some(Self::UpdateSchedule),
            0x05 => Some(Self::ConfigureHotspot),
            _ => None,
        }
    }
}

/// A framed settings request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub kind: RequestKind,

    /// Complete TLV body, starting with the magic signature
    pub body: Bytes,
}

impl Request {
    /// Request the device status snapshot
    pub fn system_info() -> Self {
        Self::empty_bodied(RequestKind::SystemInfo)
    }

    /// Set the device clock
    pub fn sync_clock(timestamp: u64) -> Result<Self> {
        let mut writer = TlvWriter::new();
        writer.write_magic();
        writer.write_u64(FIELD_TIMESTAMP, timestamp)?;

        Ok(Self {
            kind: RequestKind::SyncClock,
            body: writer.finalize(),
        })
    }

    /// Fetch the current recording schedule
    pub fn get_schedule() -> Self {
        Self::empty_bodied(RequestKind::GetSchedule)
    }

    /// Replace the recording schedule
    pub fn update_schedule(schedule: &Schedule) -> Result<Self> {
        Ok(Self {
            kind: RequestKind::UpdateSchedule,
            body: schedule.to_tlv()?,
        })
    }

    /// Reconfigure the WiFi hotspot
    pub fn configure_hotspot(hotspot: &HotspotConfig) -> Result<Self> {
        let mut writer = TlvWriter::new();
        writer.write_magic();
        writer.write_u8(FIELD_HOTSPOT_ENABLED, u8::from(hotspot.enabled))?;
        writer.write_str(FIELD_HOTSPOT_SSID, &hotspot.ssid, MAX_SSID_LEN)?;
        writer.write_str(FIELD_HOTSPOT_PASSWORD, &hotspot.password, MAX_PASSWORD_LEN)?;

        Ok(Self {
            kind: RequestKind::ConfigureHotspot,
            body: writer.finalize(),
        })
    }

    fn empty_bodied(kind: RequestKind) -> Self {
        let mut writer = TlvWriter::new();
        writer.write_magic();

        Self {
            kind,
            body: writer.finalize(),
        }
    }
}

/// Encode a request to bytes
///
/// Format: kind (1) + TLV body
pub fn encode_request(request: &Request) -> Vec<u8> {
    let mut message = Vec::with_capacity(1 + request.body.len());
    message.push(request.kind as u8);
    message.extend_from_slice(&request.body);

    message
}

/// Decode a request from bytes
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    let (&kind_byte, body) = bytes.split_first().ok_or_else(|| {
        VbxError::Protocol("empty request: missing kind byte".to_string())
    })?;

    let kind = RequestKind::from_u8(kind_byte).ok_or_else(|| {
        VbxError::Protocol(format!("unknown request kind: 0x{:02x}", kind_byte))
    })?;

    Ok(Request {
        kind,
        body: Bytes::copy_from_slice(body),
    })
}
