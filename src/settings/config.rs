//! Device configuration image
//!
//! The persisted settings of the recorder, round-tripped through one TLV
//! image. Field codes and limits follow the device firmware.
//!
//! ## Field Table
//! - 1: hotspot enabled (u8, 0 or 1)
//! - 2: hotspot SSID (string, max 12 bytes)
//! - 3: hotspot password (string, max 8 bytes)
//! - 4: recording base name (string, max 12 bytes)
//! - 5: single-file duration in seconds (u32)
//! - 100+2i / 101+2i: schedule entry i (see [`super::schedule`])

use std::cell::RefCell;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::tlv::{DecodeKind, TlvReader, TlvValue, TlvWriter};
use super::schedule::{self, Schedule};

pub const FIELD_HOTSPOT_ENABLED: u8 = 1;
pub const FIELD_HOTSPOT_SSID: u8 = 2;
pub const FIELD_HOTSPOT_PASSWORD: u8 = 3;
pub const FIELD_BASE_NAME: u8 = 4;
pub const FIELD_SINGLE_FILE_DURATION: u8 = 5;

/// On-wire byte limits for the string fields
pub const MAX_SSID_LEN: usize = 12;
pub const MAX_PASSWORD_LEN: usize = 8;
pub const MAX_BASE_NAME_LEN: usize = 12;

const DEFAULT_SSID: &str = "AMB82-MINI";
const DEFAULT_PASSWORD: &str = "12345678";
const DEFAULT_BASE_NAME: &str = "recording";
const DEFAULT_SINGLE_FILE_DURATION: u32 = 60 * 30;
const MAX_SINGLE_FILE_DURATION: u32 = 2048;

/// WiFi hotspot settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotspotConfig {
    pub enabled: bool,
    pub ssid: String,
    pub password: String,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ssid: DEFAULT_SSID.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Recording settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordingConfig {
    /// Base name for recorded files
    pub base_name: String,

    /// Length of a single recording file, in seconds
    pub single_file_duration: u32,

    pub schedule: Schedule,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            base_name: DEFAULT_BASE_NAME.to_string(),
            single_file_duration: DEFAULT_SINGLE_FILE_DURATION,
            schedule: Schedule::empty(),
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    pub hotspot: HotspotConfig,
    pub recording: RecordingConfig,
}

impl DeviceConfig {
    /// Append all configuration records to a message under construction
    pub fn write_tlv(&self, writer: &mut TlvWriter) -> Result<()> {
        writer.write_u8(FIELD_HOTSPOT_ENABLED, u8::from(self.hotspot.enabled))?;
        writer.write_str(FIELD_HOTSPOT_SSID, &self.hotspot.ssid, MAX_SSID_LEN)?;
        writer.write_str(FIELD_HOTSPOT_PASSWORD, &self.hotspot.password, MAX_PASSWORD_LEN)?;

        writer.write_str(FIELD_BASE_NAME, &self.recording.base_name, MAX_BASE_NAME_LEN)?;
        writer.write_u32(FIELD_SINGLE_FILE_DURATION, self.recording.single_file_duration)?;

        self.recording.schedule.write_tlv(writer)?;

        Ok(())
    }

    /// Encode the configuration as one complete image
    pub fn to_tlv(&self) -> Result<Bytes> {
        let mut writer = TlvWriter::new();
        writer.write_magic();
        self.write_tlv(&mut writer)?;

        Ok(writer.finalize())
    }

    /// Decode a configuration image
    ///
    /// Fields absent from the image keep their defaults. An out-of-range
    /// single-file duration is replaced by the default with a logged
    /// warning, matching the device's own tolerance.
    pub fn from_tlv(buffer: &[u8]) -> Result<Self> {
        let config = RefCell::new(Self::default());
        let slots = RefCell::new(Vec::new());

        {
            let mut reader = TlvReader::new(buffer)?;

            reader.register(FIELD_HOTSPOT_ENABLED, DecodeKind::Numeric, |_, value| {
                if let TlvValue::Numeric(v) = value {
                    config.borrow_mut().hotspot.enabled = v != 0;
                }
            });

            reader.register(FIELD_HOTSPOT_SSID, DecodeKind::Text, |_, value| {
                if let TlvValue::Text(v) = value {
                    config.borrow_mut().hotspot.ssid = v;
                }
            });

            reader.register(FIELD_HOTSPOT_PASSWORD, DecodeKind::Text, |_, value| {
                if let TlvValue::Text(v) = value {
                    config.borrow_mut().hotspot.password = v;
                }
            });

            reader.register(FIELD_BASE_NAME, DecodeKind::Text, |_, value| {
                if let TlvValue::Text(v) = value {
                    config.borrow_mut().recording.base_name = v;
                }
            });

            reader.register(FIELD_SINGLE_FILE_DURATION, DecodeKind::Numeric, |_, value| {
                if let TlvValue::Numeric(v) = value {
                    let duration = match u32::try_from(v) {
                        Ok(d) if d <= MAX_SINGLE_FILE_DURATION => d,
                        _ => {
                            tracing::warn!(
                                "Invalid single-file duration {}, using the default {}",
                                v,
                                DEFAULT_SINGLE_FILE_DURATION
                            );
                            DEFAULT_SINGLE_FILE_DURATION
                        }
                    };

                    config.borrow_mut().recording.single_file_duration = duration;
                }
            });

            schedule::register_handlers(&mut reader, &slots);

            reader.read_all()?;
        }

        let mut config = config.into_inner();
        config.recording.schedule = Schedule::new(slots.into_inner())?;

        Ok(config)
    }

    /// Write the configuration image to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = self.to_tlv()?;
        std::fs::write(path, &image)?;

        tracing::debug!("Config image saved to {}", path.display());

        Ok(())
    }

    /// Read a configuration image from a file
    ///
    /// An image that fails to parse yields the default configuration with
    /// a logged warning; I/O failures propagate.
    pub fn load(path: &Path) -> Result<Self> {
        let image = std::fs::read(path)?;

        match Self::from_tlv(&image) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    "Config image at {} failed to parse ({}), using defaults",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }
}
