//! Weekly schedules stored on a device
//!
//! A device keeps its on/off programs as fixed-width 16-byte records. This
//! module holds the domain form of a schedule; [`parser`] decodes records and
//! schedule-list responses, [`codec`] streams them, and [`encoding`] produces
//! the fields needed to create new schedules.

pub mod codec;
pub mod encoding;
pub mod parser;

pub use self::codec::ScheduleCodec;
pub use self::encoding::{time_to_hex_timestamp, weekdays_to_hex};
pub use self::parser::{parse_schedule, parse_schedules, ScheduleParser, ScheduleRecord};

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use chrono::{Datelike, Duration as TimeDelta, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, SCHEDULE_RECORD_SIZE};
use crate::util::calc_duration;

bitflags! {
    /// Weekday byte of a schedule record; bit 0 is reserved
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WeekdayMask: u8 {
        const MONDAY = 0x02;
        const TUESDAY = 0x04;
        const WEDNESDAY = 0x08;
        const THURSDAY = 0x10;
        const FRIDAY = 0x20;
        const SATURDAY = 0x40;
        const SUNDAY = 0x80;
    }
}

impl WeekdayMask {
    /// Decodes a raw weekday byte, ignoring the reserved bit
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bits_truncate(byte)
    }

    pub fn days(&self) -> BTreeSet<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.contains(day.bit()))
            .collect()
    }
}

impl<'a> FromIterator<&'a Weekday> for WeekdayMask {
    fn from_iter<I: IntoIterator<Item = &'a Weekday>>(iter: I) -> Self {
        iter.into_iter()
            .fold(WeekdayMask::empty(), |mask, day| mask | day.bit())
    }
}

/// Day of the week a schedule recurs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Bit of this day in the weekday byte
    pub fn bit(&self) -> WeekdayMask {
        match self {
            Weekday::Monday => WeekdayMask::MONDAY,
            Weekday::Tuesday => WeekdayMask::TUESDAY,
            Weekday::Wednesday => WeekdayMask::WEDNESDAY,
            Weekday::Thursday => WeekdayMask::THURSDAY,
            Weekday::Friday => WeekdayMask::FRIDAY,
            Weekday::Saturday => WeekdayMask::SATURDAY,
            Weekday::Sunday => WeekdayMask::SUNDAY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    fn days_from_monday(&self) -> u32 {
        *self as u32
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleState {
    Enabled,
    Disabled,
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleState::Enabled => write!(f, "enabled"),
            ScheduleState::Disabled => write!(f, "disabled"),
        }
    }
}

/// A schedule as stored on a device
///
/// Schedules are identified by their id alone: two schedules with the same id
/// compare equal and hash alike whatever their other fields hold.
#[derive(Debug, Clone)]
pub struct SwitcherSchedule {
    id: String,
    enabled: bool,
    days: BTreeSet<Weekday>,
    start_time: String,
    end_time: String,
    duration: String,
    display: String,
    raw: Option<[u8; SCHEDULE_RECORD_SIZE]>,
}

impl SwitcherSchedule {
    /// Creates a schedule, rendering its next run relative to the local clock
    pub fn new(
        id: impl Into<String>,
        enabled: bool,
        days: BTreeSet<Weekday>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self> {
        Self::new_at(id, enabled, days, start_time, end_time, Local::now().naive_local())
    }

    /// Creates a schedule, rendering its next run relative to `now`
    pub fn new_at(
        id: impl Into<String>,
        enabled: bool,
        days: BTreeSet<Weekday>,
        start_time: &str,
        end_time: &str,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let start = parse_clock(start_time)?;
        let end = parse_clock(end_time)?;
        Ok(SwitcherSchedule {
            id: id.into(),
            enabled,
            display: next_run(start, &days, now),
            days,
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            duration: calc_duration(start, end),
            raw: None,
        })
    }

    pub(crate) fn with_raw(mut self, raw: [u8; SCHEDULE_RECORD_SIZE]) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A schedule without days runs once
    pub fn is_recurring(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn days(&self) -> &BTreeSet<Weekday> {
        &self.days
    }

    /// Start time, `HH:MM`
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// End time, `HH:MM`
    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// Run length, `H:MM:SS`
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Human readable next run, e.g. `Due tomorrow at 17:00`
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> ScheduleState {
        if self.enabled {
            ScheduleState::Enabled
        } else {
            ScheduleState::Disabled
        }
    }

    /// The record this schedule was decoded from, if any
    pub fn raw_record(&self) -> Option<&[u8; SCHEDULE_RECORD_SIZE]> {
        self.raw.as_ref()
    }
}

impl PartialEq for SwitcherSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SwitcherSchedule {}

impl Hash for SwitcherSchedule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub(crate) fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| Error::range(format!("time must be formatted as HH:MM, got {value:?}")))
}

/// Renders when a schedule starting at `start` next runs
fn next_run(start: NaiveTime, days: &BTreeSet<Weekday>, now: NaiveDateTime) -> String {
    let at = start.format("%H:%M");
    if days.is_empty() {
        return format!("Due today at {at}");
    }

    let today = Weekday::from(now.weekday());
    if days.contains(&today) && now.time() < start {
        return format!("Due today at {at}");
    }

    let next = (1..=7)
        .map(|offset| Weekday::from((now.date() + TimeDelta::days(offset)).weekday()))
        .find(|day| days.contains(day))
        .unwrap_or(today);
    let ahead = (next.days_from_monday() + 7 - today.days_from_monday()) % 7;
    if ahead == 1 {
        format!("Due tomorrow at {at}")
    } else {
        format!("Due next {next} at {at}")
    }
}
