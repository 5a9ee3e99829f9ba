//! Event persistence
//!
//! Writes the in-memory event list to a fixed-record binary log and a
//! tab-formatted text report, and reads the binary log back on startup.
//! Both writers only read the collection through its public API.

mod binary;
mod report;

pub use binary::{load, save, DatalogError, RECORD_SIZE};
pub use report::write_report;

/// Default binary log file name
pub const BINARY_LOG_FILE: &str = "events.bin";

/// Default text report file name
pub const REPORT_FILE: &str = "events.txt";
