//! Recording schedule
//!
//! A bounded ordered sequence of recording plans. Each entry occupies two
//! consecutive type codes on the wire: start timestamp, then duration.

use std::cell::RefCell;

use bytes::Bytes;
use serde::Serialize;

use crate::error::{Result, VbxError};
use crate::tlv::{DecodeKind, TlvReader, TlvValue, TlvWriter};

/// Maximum number of schedule entries the device accepts
pub const MAX_SCHEDULE_ENTRIES: usize = 8;

/// First type code of the schedule block; entry `i` uses codes
/// `SCHEDULE_TYPE_BASE + 2*i` (start) and `SCHEDULE_TYPE_BASE + 2*i + 1`
/// (duration)
pub const SCHEDULE_TYPE_BASE: u8 = 100;

/// One planned recording window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordingPlan {
    /// Unix timestamp at which recording starts
    pub start_timestamp: i64,

    /// Recording duration in seconds
    pub duration: u32,
}

/// Ordered recording schedule, at most [`MAX_SCHEDULE_ENTRIES`] entries
///
/// The bound is validated once at construction; a `Schedule` in hand is
/// always within capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    entries: Vec<RecordingPlan>,
}

impl Schedule {
    /// Create a schedule from a list of plans
    ///
    /// Fails if the list exceeds the device's entry capacity.
    pub fn new(entries: Vec<RecordingPlan>) -> Result<Self> {
        if entries.len() > MAX_SCHEDULE_ENTRIES {
            return Err(VbxError::Value(format!(
                "schedule of {} entries exceeds the {}-entry capacity",
                entries.len(),
                MAX_SCHEDULE_ENTRIES
            )));
        }

        Ok(Self { entries })
    }

    /// Create an empty schedule
    pub fn empty() -> Self {
        Self::default()
    }

    /// The planned entries, in order
    pub fn entries(&self) -> &[RecordingPlan] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the schedule's records to a message under construction
    pub fn write_tlv(&self, writer: &mut TlvWriter) -> Result<()> {
        for (i, plan) in self.entries.iter().enumerate() {
            let start_code = SCHEDULE_TYPE_BASE + (i as u8) * 2;

            writer.write_u64(start_code, plan.start_timestamp as u64)?;
            writer.write_u32(start_code + 1, plan.duration)?;
        }

        Ok(())
    }

    /// Encode the schedule as a standalone message
    pub fn to_tlv(&self) -> Result<Bytes> {
        let mut writer = TlvWriter::new();
        writer.write_magic();
        self.write_tlv(&mut writer)?;

        Ok(writer.finalize())
    }

    /// Decode a standalone schedule message
    pub fn from_tlv(buffer: &[u8]) -> Result<Self> {
        let slots = RefCell::new(Vec::new());

        {
            let mut reader = TlvReader::new(buffer)?;
            register_handlers(&mut reader, &slots);
            reader.read_all()?;
        }

        Self::new(slots.into_inner())
    }
}

impl<'s> IntoIterator for &'s Schedule {
    type Item = &'s RecordingPlan;
    type IntoIter = std::slice::Iter<'s, RecordingPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Register decode handlers for every schedule slot
///
/// Entries materialize in `slots` as their records arrive; a start or
/// duration record for slot `i` grows the list to `i + 1` entries,
/// leaving gaps at their defaults.
pub(crate) fn register_handlers<'a>(
    reader: &mut TlvReader<'a>,
    slots: &'a RefCell<Vec<RecordingPlan>>,
) {
    for i in 0..MAX_SCHEDULE_ENTRIES {
        let start_code = SCHEDULE_TYPE_BASE + (i as u8) * 2;

        reader.register(start_code, DecodeKind::Numeric, move |_, value| {
            if let TlvValue::Numeric(v) = value {
                let mut entries = slots.borrow_mut();
                grow_to(&mut entries, i);
                entries[i].start_timestamp = v as i64;
            }
        });

        reader.register(start_code + 1, DecodeKind::Numeric, move |_, value| {
            if let TlvValue::Numeric(v) = value {
                if let Ok(duration) = u32::try_from(v) {
                    let mut entries = slots.borrow_mut();
                    grow_to(&mut entries, i);
                    entries[i].duration = duration;
                }
            }
        });
    }
}

fn grow_to(entries: &mut Vec<RecordingPlan>, index: usize) {
    if entries.len() <= index {
        entries.resize_with(index + 1, RecordingPlan::default);
    }
}
