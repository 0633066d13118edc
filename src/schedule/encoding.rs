//! Fields for creating schedules on a device

use std::collections::BTreeSet;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::{parse_clock, Weekday, WeekdayMask};
use crate::core::{Error, Result};
use crate::protocol::encoding::timestamp_to_hex;

/// Encodes the weekday byte of a recurring schedule as 2 hex chars
pub fn weekdays_to_hex(days: &BTreeSet<Weekday>) -> Result<String> {
    if days.is_empty() {
        return Err(Error::range("no days requested"));
    }
    let mask: WeekdayMask = days.iter().collect();
    Ok(format!("{:02x}", mask.bits()))
}

/// Encodes today's `HH:MM` in the host's zone as a timestamp field
pub fn time_to_hex_timestamp(time: &str) -> Result<String> {
    time_to_hex_timestamp_in(time, &Local, Utc::now())
}

/// Encodes `HH:MM` on the current date of `zone` as a timestamp field
pub fn time_to_hex_timestamp_in<Z: TimeZone>(
    time: &str,
    zone: &Z,
    now: DateTime<Utc>,
) -> Result<String> {
    let clock = parse_clock(time)?;
    let wall = now.with_timezone(zone).date_naive().and_time(clock);
    let at = zone
        .from_local_datetime(&wall)
        .earliest()
        .ok_or_else(|| Error::range(format!("{time} does not exist on {}", wall.date())))?;
    timestamp_to_hex(at.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::encoding::hex_to_u32;
    use crate::schedule::ScheduleParser;
    use chrono_tz::Asia::Jerusalem;

    #[test]
    fn test_weekdays_to_hex() {
        let days = BTreeSet::from([Weekday::Monday]);
        assert_eq!(weekdays_to_hex(&days).unwrap(), "02");

        let all: BTreeSet<_> = Weekday::ALL.into_iter().collect();
        assert_eq!(weekdays_to_hex(&all).unwrap(), "fe");

        let weekend = BTreeSet::from([Weekday::Saturday, Weekday::Sunday]);
        assert_eq!(weekdays_to_hex(&weekend).unwrap(), "c0");
    }

    #[test]
    fn test_weekdays_to_hex_requires_days() {
        let err = weekdays_to_hex(&BTreeSet::new()).unwrap_err();
        assert!(matches!(err, Error::Range(_)));
        assert_eq!(err.to_string(), "no days requested");
    }

    #[test]
    fn test_time_to_hex_timestamp() {
        let now = DateTime::parse_from_rfc3339("2019-04-02T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let field = time_to_hex_timestamp_in("14:00", &Utc, now).unwrap();
        assert_eq!(field, "e06aa35c");
        assert_eq!(hex_to_u32(&field).unwrap(), 1_554_213_600);
    }

    #[test]
    fn test_time_round_trips_through_parser() {
        let now = Utc::now();
        let start = time_to_hex_timestamp_in("06:45", &Jerusalem, now).unwrap();
        let parser = ScheduleParser::with_zone(Jerusalem, now);
        assert_eq!(parser.local_clock(hex_to_u32(&start).unwrap()).unwrap(), "06:45");
    }

    #[test]
    fn test_time_to_hex_timestamp_rejects_malformed() {
        assert!(matches!(time_to_hex_timestamp("7pm"), Err(Error::Range(_))));
        assert!(time_to_hex_timestamp("07:15").is_ok());
    }
}
