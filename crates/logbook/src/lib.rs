//! logbook: structured logging with pluggable persistence backends.
//!
//! # Overview
//!
//! `logbook` records timestamped, leveled messages through interchangeable
//! storage backends — plain text, JSON, CSV and SQLite — and ships a
//! read-side [`LogReader`] that filters and aggregates previously persisted
//! entries by text, regular expression, date range, severity or calendar
//! month.
//!
//! # Quickstart
//!
//! ```no_run
//! use logbook::{Logger, LogLevel, LogReader, TextFileHandler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = Logger::new(vec![Box::new(TextFileHandler::new("app.log")?)]);
//!     logger.info("service started")?;
//!     logger.error("backend unreachable")?;
//!
//!     let reader = LogReader::new(TextFileHandler::new("app.log")?);
//!     let errors = reader.group_by_level(None, None);
//!     println!("{} error entries", errors[&LogLevel::Error].len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! This crate is a facade over:
//! - `logbook-types`: the `LogEntry` / `LogLevel` value types
//! - `logbook-store`: the `Handler` contract and the four backends
//! - `logbook-reader`: filtering and grouping queries over a handler

mod logger;

pub use logbook_reader::LogReader;
pub use logbook_store::{
    CsvFileHandler, Error, Handler, JsonFileHandler, Result, SqliteHandler, TextFileHandler,
};
pub use logbook_types::{LogEntry, LogLevel, LogRecord};
pub use logger::Logger;
