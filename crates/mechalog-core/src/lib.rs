//! # mechalog core library
//!
//! Records mechatronic sensor events (engine temperature and ambient
//! humidity readings) and persists them to a binary log and a text report.
//!
//! This library provides:
//! - The ordered collection backing the in-memory event store
//! - Classification of sensor readings into engine events
//! - Binary log and text report writers
//! - Threshold configuration loaded from a `key=value` file
//!
//! ## Example
//!
//! ```rust,ignore
//! use mechalog_core::prelude::*;
//!
//! let config = Config::load_or_create("mechalog.conf")?;
//! let mut events = datalog::load("events.bin")?;
//!
//! let operator = Operator { id: 1, name: "Operator".into() };
//! events.push(EventRecord::new(22.5, 80, &config, operator))?;
//!
//! datalog::save("events.bin", &events)?;
//! datalog::write_report("events.txt", &events)?;
//! ```

#![warn(missing_docs)]

pub mod arraylist;
pub mod config;
pub mod datalog;
pub mod event;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::arraylist::{ArrayList, ListError, SortOrder};
    pub use crate::config::{Config, ConfigError};
    pub use crate::datalog::{self, DatalogError};
    pub use crate::event::{EventKind, EventRecord, Operator};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
