//! Binary log codec
//!
//! Record format (little-endian, [`RECORD_SIZE`] bytes each):
//! - 8 bytes: timestamp (unix seconds, i64)
//! - 1 byte:  event kind tag
//! - 4 bytes: operator id (u32)
//! - 64 bytes: operator name (UTF-8, NUL-padded)
//! - 4 bytes: ambient temperature (f32)
//! - 2 bytes: ambient humidity (u16)
//! - 4 bytes: engine-on temperature threshold (f32)
//! - 4 bytes: engine-off temperature threshold (f32)
//! - 2 bytes: humidity threshold (u16)
//! - 4 bytes: CRC32 of everything above
//!
//! The file is a plain concatenation of records and is rewritten whole on
//! every save.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{Local, TimeZone, Utc};
use thiserror::Error;

use crate::arraylist::{ArrayList, ListError};
use crate::event::{EventKind, EventRecord, Operator};

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 97;

/// Bytes reserved for the operator name
const NAME_BYTES: usize = 64;

/// Offset of the CRC32 trailer inside a record
const CRC_OFFSET: usize = RECORD_SIZE - 4;

/// Errors raised while reading or writing the binary log
#[derive(Error, Debug)]
pub enum DatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("log length {len} is not a multiple of the {record_size}-byte record size")]
    TruncatedFile { len: u64, record_size: usize },

    #[error("record {index} failed its CRC check")]
    CorruptRecord { index: usize },

    #[error("record {index} carries unknown event kind tag {tag}")]
    UnknownEventKind { index: usize, tag: u8 },

    #[error("record {index} carries a timestamp outside the representable range")]
    InvalidTimestamp { index: usize },

    #[error(transparent)]
    List(#[from] ListError),
}

fn kind_tag(kind: EventKind) -> u8 {
    match kind {
        EventKind::Emergency => 0,
        EventKind::StopByHumidity => 1,
        EventKind::BootByHumidity => 2,
        EventKind::StopByTemperature => 3,
        EventKind::BootByTemperature => 4,
    }
}

fn kind_from_tag(tag: u8) -> Option<EventKind> {
    match tag {
        0 => Some(EventKind::Emergency),
        1 => Some(EventKind::StopByHumidity),
        2 => Some(EventKind::BootByHumidity),
        3 => Some(EventKind::StopByTemperature),
        4 => Some(EventKind::BootByTemperature),
        _ => None,
    }
}

/// Encode one record into its fixed-size byte layout.
fn encode_record(record: &EventRecord) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];

    LittleEndian::write_i64(&mut buf[0..8], record.timestamp.timestamp());
    buf[8] = kind_tag(record.kind);
    LittleEndian::write_u32(&mut buf[9..13], record.operator.id);

    let name = record.operator.name.as_bytes();
    let copied = floor_char_boundary(&record.operator.name, NAME_BYTES);
    buf[13..13 + copied].copy_from_slice(&name[..copied]);

    LittleEndian::write_f32(&mut buf[77..81], record.temperature);
    LittleEndian::write_u16(&mut buf[81..83], record.humidity);
    LittleEndian::write_f32(&mut buf[83..87], record.engine_on_temperature);
    LittleEndian::write_f32(&mut buf[87..91], record.engine_off_temperature);
    LittleEndian::write_u16(&mut buf[91..93], record.humidity_threshold);

    let crc = crc32fast::hash(&buf[..CRC_OFFSET]);
    LittleEndian::write_u32(&mut buf[CRC_OFFSET..], crc);

    buf
}

/// Decode one record, verifying its CRC trailer first.
fn decode_record(buf: &[u8], index: usize) -> Result<EventRecord, DatalogError> {
    debug_assert_eq!(buf.len(), RECORD_SIZE);

    let stored_crc = LittleEndian::read_u32(&buf[CRC_OFFSET..]);
    if crc32fast::hash(&buf[..CRC_OFFSET]) != stored_crc {
        return Err(DatalogError::CorruptRecord { index });
    }

    let seconds = LittleEndian::read_i64(&buf[0..8]);
    let timestamp = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or(DatalogError::InvalidTimestamp { index })?
        .with_timezone(&Local);

    let kind = kind_from_tag(buf[8]).ok_or(DatalogError::UnknownEventKind {
        index,
        tag: buf[8],
    })?;

    let name_field = &buf[13..13 + NAME_BYTES];
    let name_len = name_field.iter().position(|&b| b == 0).unwrap_or(NAME_BYTES);
    let name = String::from_utf8_lossy(&name_field[..name_len]).into_owned();

    Ok(EventRecord {
        timestamp,
        kind,
        operator: Operator {
            id: LittleEndian::read_u32(&buf[9..13]),
            name,
        },
        temperature: LittleEndian::read_f32(&buf[77..81]),
        humidity: LittleEndian::read_u16(&buf[81..83]),
        engine_on_temperature: LittleEndian::read_f32(&buf[83..87]),
        engine_off_temperature: LittleEndian::read_f32(&buf[87..91]),
        humidity_threshold: LittleEndian::read_u16(&buf[91..93]),
    })
}

/// Largest prefix length `<= max` that ends on a char boundary.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Write every event in the list to `path`, replacing the previous log.
pub fn save<P: AsRef<Path>>(
    path: P,
    events: &ArrayList<EventRecord>,
) -> Result<(), DatalogError> {
    let file = fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);

    for record in events {
        writer.write_all(&encode_record(record))?;
    }

    writer.flush()?;
    tracing::debug!(
        "wrote {} record(s) to {}",
        events.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read the whole binary log into a fresh list.
///
/// A missing file is not an error: the logger starts with an empty list
/// on first run.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ArrayList<EventRecord>, DatalogError> {
    let path = path.as_ref();
    let mut events = ArrayList::new();

    if !path.exists() {
        tracing::info!("binary log {} not found, starting empty", path.display());
        return Ok(events);
    }

    let bytes = fs::read(path)?;
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(DatalogError::TruncatedFile {
            len: bytes.len() as u64,
            record_size: RECORD_SIZE,
        });
    }

    for (index, chunk) in bytes.chunks_exact(RECORD_SIZE).enumerate() {
        events.push(decode_record(chunk, index)?)?;
    }

    tracing::info!("loaded {} record(s) from {}", events.len(), path.display());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn sample_record() -> EventRecord {
        EventRecord::new(
            22.5,
            80,
            &Config::default(),
            Operator {
                id: 32765881,
                name: "Sample Operator".to_string(),
            },
        )
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample_record();
        let encoded = encode_record(&record);
        let decoded = decode_record(&encoded, 0).unwrap();

        assert_eq!(decoded.kind, record.kind);
        assert_eq!(decoded.operator, record.operator);
        assert_eq!(decoded.temperature, record.temperature);
        assert_eq!(decoded.humidity, record.humidity);
        // sub-second precision is not stored
        assert_eq!(decoded.timestamp.timestamp(), record.timestamp.timestamp());
    }

    #[test]
    fn test_corrupt_record_is_detected() {
        let mut encoded = encode_record(&sample_record());
        encoded[20] ^= 0xff;

        assert!(matches!(
            decode_record(&encoded, 3),
            Err(DatalogError::CorruptRecord { index: 3 })
        ));
    }

    #[test]
    fn test_long_name_is_truncated_on_a_char_boundary() {
        let mut record = sample_record();
        record.operator.name = "ñ".repeat(40); // 80 bytes of two-byte chars

        let decoded = decode_record(&encode_record(&record), 0).unwrap();
        assert_eq!(decoded.operator.name, "ñ".repeat(32));
    }
}
