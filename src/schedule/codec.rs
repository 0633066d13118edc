use bytes::BytesMut;
use chrono::{Local, TimeZone};
use tokio_util::codec::Decoder;
use tracing::debug;

use super::{ScheduleParser, SwitcherSchedule};
use crate::core::{Error, SCHEDULE_RECORD_SIZE};

/// Schedule-list codec splitting a byte stream into schedules
#[derive(Debug, Clone)]
pub struct ScheduleCodec<Z: TimeZone = Local> {
    parser: ScheduleParser<Z>,
}

impl<Z: TimeZone> ScheduleCodec<Z> {
    /// Creates a new schedule codec
    pub fn new(parser: ScheduleParser<Z>) -> Self {
        ScheduleCodec { parser }
    }
}

impl Default for ScheduleCodec<Local> {
    fn default() -> Self {
        ScheduleCodec::new(ScheduleParser::new())
    }
}

impl<Z: TimeZone> Decoder for ScheduleCodec<Z> {
    type Item = SwitcherSchedule;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if src.len() < SCHEDULE_RECORD_SIZE {
                // Need more data to read a full record
                return Ok(None);
            }

            let record = src.split_to(SCHEDULE_RECORD_SIZE);
            if record.iter().all(|&b| b == 0) {
                debug!("skipping empty schedule slot");
                continue;
            }

            return self.parser.parse(&record).map(Some);
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(schedule) => Ok(Some(schedule)),
            None if buf.is_empty() => Ok(None),
            None => Err(Error::format(format!(
                "{} trailing bytes after the last schedule record",
                buf.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use futures::StreamExt;
    use tokio_util::codec::FramedRead;

    const FIRST: &str = "01010201e06aa35cf078a35cce0e0000";
    const SECOND: &str = "0001fc01e871a35cf87fa35cce0e0000";

    fn codec() -> ScheduleCodec<Utc> {
        ScheduleCodec::new(ScheduleParser::with_zone(Utc, Utc::now()))
    }

    #[test]
    fn test_codec_waits_for_full_record() {
        let mut codec = codec();
        let record = hex::decode(FIRST).unwrap();

        let mut bytes = BytesMut::from(&record[..10]);
        assert!(codec.decode(&mut bytes).unwrap().is_none());
        assert_eq!(bytes.len(), 10);

        bytes.extend_from_slice(&record[10..]);
        let schedule = codec.decode(&mut bytes).unwrap().unwrap();
        assert_eq!(schedule.id(), "1");
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_codec_skips_empty_slots() {
        let mut codec = codec();
        let mut bytes = BytesMut::new();
        bytes.extend_from_slice(&[0u8; SCHEDULE_RECORD_SIZE]);
        bytes.extend_from_slice(&hex::decode(SECOND).unwrap());

        let schedule = codec.decode(&mut bytes).unwrap().unwrap();
        assert_eq!(schedule.id(), "0");
        assert!(codec.decode_eof(&mut bytes).unwrap().is_none());
    }

    #[test]
    fn test_codec_rejects_trailing_bytes() {
        let mut codec = codec();
        let mut bytes = BytesMut::from(&[7u8; 5][..]);
        assert!(codec.decode(&mut bytes).unwrap().is_none());
        assert!(matches!(codec.decode_eof(&mut bytes), Err(Error::Format(_))));
    }

    #[tokio::test]
    async fn test_framed_read_across_chunks() {
        let payload = hex::decode(format!("{FIRST}{SECOND}")).unwrap();
        let reader = tokio_test::io::Builder::new()
            .read(&payload[..7])
            .read(&payload[7..20])
            .read(&payload[20..])
            .build();

        let schedules: Vec<_> = FramedRead::new(reader, codec())
            .map(|item| item.unwrap())
            .collect()
            .await;
        let ids: Vec<_> = schedules.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["1", "0"]);
    }
}
