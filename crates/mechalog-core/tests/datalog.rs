//! Binary log save/load behavior against real files.

use mechalog_core::arraylist::ArrayList;
use mechalog_core::config::Config;
use mechalog_core::datalog::{self, DatalogError, RECORD_SIZE};
use mechalog_core::event::{EventKind, EventRecord, Operator};
use pretty_assertions::assert_eq;

fn operator() -> Operator {
    Operator {
        id: 32765881,
        name: "Log Tester".to_string(),
    }
}

fn sample_events() -> ArrayList<EventRecord> {
    let config = Config::default();
    let mut events = ArrayList::new();
    events
        .push(EventRecord::new(30.0, 85, &config, operator()))
        .unwrap();
    events
        .push(EventRecord::new(10.0, 40, &config, operator()))
        .unwrap();
    events
        .push(EventRecord::emergency(&config, operator()))
        .unwrap();
    events
}

#[test]
fn save_then_load_preserves_order_and_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.bin");

    let events = sample_events();
    datalog::save(&path, &events).unwrap();

    let loaded = datalog::load(&path).unwrap();
    assert_eq!(loaded.len(), events.len());
    assert_eq!(loaded.get(0).unwrap().kind, EventKind::BootByTemperature);
    assert_eq!(loaded.get(1).unwrap().kind, EventKind::StopByTemperature);
    assert_eq!(loaded.get(2).unwrap().kind, EventKind::Emergency);

    for (loaded, original) in loaded.iter().zip(events.iter()) {
        assert_eq!(loaded.operator, original.operator);
        assert_eq!(loaded.temperature, original.temperature);
        assert_eq!(loaded.humidity, original.humidity);
        assert_eq!(
            loaded.timestamp.timestamp(),
            original.timestamp.timestamp()
        );
    }
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = datalog::load(dir.path().join("nothing.bin")).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn save_replaces_previous_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.bin");

    datalog::save(&path, &sample_events()).unwrap();

    let config = Config::default();
    let mut shorter = ArrayList::new();
    shorter
        .push(EventRecord::new(20.0, 90, &config, operator()))
        .unwrap();
    datalog::save(&path, &shorter).unwrap();

    let loaded = datalog::load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().kind, EventKind::BootByHumidity);
}

#[test]
fn truncated_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.bin");

    datalog::save(&path, &sample_events()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 1);
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        datalog::load(&path),
        Err(DatalogError::TruncatedFile { .. })
    ));
}

#[test]
fn flipped_byte_is_reported_with_record_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.bin");

    datalog::save(&path, &sample_events()).unwrap();

    // corrupt the second record's payload
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[RECORD_SIZE + 10] ^= 0x01;
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        datalog::load(&path),
        Err(DatalogError::CorruptRecord { index: 1 })
    ));
}
