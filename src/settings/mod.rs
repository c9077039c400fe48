//! Settings Module
//!
//! Domain value objects carried over the TLV settings interface: the
//! persisted device configuration image, the recording schedule, and the
//! system-info aggregate reported by the device.
//!
//! Each message kind has its own field-code table; the tables are domain
//! configuration consumed by the codec, not codec logic. The codes live
//! next to the types they describe.

mod config;
mod schedule;
mod system_info;

pub use config::{DeviceConfig, HotspotConfig, RecordingConfig};
pub use config::{
    FIELD_BASE_NAME, FIELD_HOTSPOT_ENABLED, FIELD_HOTSPOT_PASSWORD, FIELD_HOTSPOT_SSID,
    FIELD_SINGLE_FILE_DURATION, MAX_BASE_NAME_LEN, MAX_PASSWORD_LEN, MAX_SSID_LEN,
};
pub use schedule::{RecordingPlan, Schedule, MAX_SCHEDULE_ENTRIES, SCHEDULE_TYPE_BASE};
pub use system_info::{SdCardInfo, SystemInfo, FIELD_FREE_SPACE, FIELD_TIMESTAMP, FIELD_USED_SPACE};
