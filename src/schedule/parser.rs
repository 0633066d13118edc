//! Schedule record decoding
//!
//! Record layout (16 bytes, little-endian):
//! - 01 Schedule ID
//! - 01 Enabled (nonzero when active)
//! - 01 Weekday bitmask (bit 1 Monday .. bit 7 Sunday, bit 0 reserved)
//! - 01 Reserved
//! - 04 Start, Unix epoch seconds
//! - 04 End, Unix epoch seconds
//! - 04 Trailing, kept verbatim
//!
//! The device renders start and end in the vendor's timezone. Decoded times
//! keep that wall-clock time of day and convert it to the caller's zone using
//! today's offsets.

use std::collections::HashSet;

use bytes::{Buf, BytesMut};
use chrono::{DateTime, Duration, Local, NaiveTime, Offset, TimeZone, Timelike, Utc};
use tokio_util::codec::Decoder;
use tracing::debug;

use super::{ScheduleCodec, SwitcherSchedule, WeekdayMask};
use crate::core::{Error, Result, SCHEDULE_RECORD_SIZE, VENDOR_TIMEZONE};

/// Fields of one raw schedule record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub raw: [u8; SCHEDULE_RECORD_SIZE],
    pub id: u8,
    pub enabled: bool,
    pub weekdays: WeekdayMask,
    pub start_epoch: u32,
    pub end_epoch: u32,
}

impl ScheduleRecord {
    pub fn decode(record: &[u8]) -> Result<Self> {
        let raw: [u8; SCHEDULE_RECORD_SIZE] = record.try_into().map_err(|_| {
            Error::format(format!(
                "schedule record must be {SCHEDULE_RECORD_SIZE} bytes, got {}",
                record.len()
            ))
        })?;

        let mut buf = &raw[..];
        let id = buf.get_u8();
        let enabled = buf.get_u8() != 0;
        let weekdays = WeekdayMask::from_byte(buf.get_u8());
        buf.advance(1);
        let start_epoch = buf.get_u32_le();
        let end_epoch = buf.get_u32_le();

        Ok(ScheduleRecord {
            raw,
            id,
            enabled,
            weekdays,
            start_epoch,
            end_epoch,
        })
    }

    /// Decodes a hex encoded record
    pub fn from_hex(record: &str) -> Result<Self> {
        let bytes = hex::decode(record.trim())
            .map_err(|e| Error::format(format!("invalid schedule record: {e}")))?;
        Self::decode(&bytes)
    }

    /// Whether any weekday bit is set
    pub fn is_recurring(&self) -> bool {
        !self.weekdays.is_empty()
    }
}

/// Turns schedule records into [`SwitcherSchedule`]s for callers in zone `Z`
#[derive(Debug, Clone)]
pub struct ScheduleParser<Z: TimeZone = Local> {
    local: Z,
    now: DateTime<Utc>,
}

impl ScheduleParser<Local> {
    /// Parser for the host's zone and clock
    pub fn new() -> Self {
        Self::with_zone(Local, Utc::now())
    }
}

impl Default for ScheduleParser<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Z: TimeZone> ScheduleParser<Z> {
    /// Parser for a caller in `local`, with `now` as the reference instant
    pub fn with_zone(local: Z, now: DateTime<Utc>) -> Self {
        ScheduleParser { local, now }
    }

    /// Local `HH:MM` for a record timestamp
    pub fn local_clock(&self, epoch: u32) -> Result<String> {
        let instant = Utc
            .timestamp_opt(i64::from(epoch), 0)
            .single()
            .ok_or_else(|| Error::format(format!("invalid timestamp {epoch}")))?;
        let vendor_time = instant.with_timezone(&VENDOR_TIMEZONE).time();
        let vendor_time = NaiveTime::from_hms_opt(vendor_time.hour(), vendor_time.minute(), 0)
            .unwrap_or(vendor_time);

        let vendor_now = self.now.with_timezone(&VENDOR_TIMEZONE);
        let wall = vendor_now.date_naive().and_time(vendor_time);
        let today = match VENDOR_TIMEZONE.from_local_datetime(&wall).earliest() {
            Some(at) => at.with_timezone(&Utc),
            // skipped by a DST jump; use the current offset
            None => {
                let offset = vendor_now.offset().fix().local_minus_utc();
                Utc.from_utc_datetime(&(wall - Duration::seconds(i64::from(offset))))
            }
        };

        Ok(today
            .with_timezone(&self.local)
            .naive_local()
            .format("%H:%M")
            .to_string())
    }

    /// Decodes one 16-byte record
    pub fn parse(&self, record: &[u8]) -> Result<SwitcherSchedule> {
        self.parse_record(&ScheduleRecord::decode(record)?)
    }

    pub fn parse_record(&self, record: &ScheduleRecord) -> Result<SwitcherSchedule> {
        let schedule = SwitcherSchedule::new_at(
            record.id.to_string(),
            record.enabled,
            record.weekdays.days(),
            &self.local_clock(record.start_epoch)?,
            &self.local_clock(record.end_epoch)?,
            self.now.with_timezone(&self.local).naive_local(),
        )?;
        Ok(schedule.with_raw(record.raw))
    }

    /// Decodes a schedule-list response
    ///
    /// Duplicate ids collapse into one schedule and empty slots are skipped.
    pub fn parse_list(&self, payload: &[u8]) -> Result<HashSet<SwitcherSchedule>> {
        let mut codec = ScheduleCodec::new(self.clone());
        let mut buf = BytesMut::from(payload);
        let mut schedules = HashSet::new();
        while let Some(schedule) = codec.decode_eof(&mut buf)? {
            schedules.insert(schedule);
        }
        debug!(
            bytes = payload.len(),
            schedules = schedules.len(),
            "parsed schedule list"
        );
        Ok(schedules)
    }
}

/// Decodes one record for a caller in the host's zone
pub fn parse_schedule(record: &[u8]) -> Result<SwitcherSchedule> {
    ScheduleParser::new().parse(record)
}

/// Decodes a schedule-list response for a caller in the host's zone
pub fn parse_schedules(payload: &[u8]) -> Result<HashSet<SwitcherSchedule>> {
    ScheduleParser::new().parse_list(payload)
}
