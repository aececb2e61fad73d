use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::level::LogLevel;

/// One logged event. Immutable once constructed: fields are only reachable
/// through accessors, and nothing in the library mutates an entry after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: NaiveDateTime,
    level: LogLevel,
    message: String,
}

impl LogEntry {
    pub fn new(timestamp: NaiveDateTime, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// ISO-8601 timestamp as persisted: `YYYY-MM-DDTHH:MM:SS`, with a
    /// fractional part only when the entry carries sub-second precision.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }

    /// Calendar-month bucket key, `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.timestamp.format("%Y-%m").to_string()
    }

    /// Wire form for the record-shaped formats (JSON object, CSV row).
    pub fn to_record(&self) -> LogRecord {
        LogRecord {
            date: self.timestamp_iso(),
            level: self.level.as_str().to_string(),
            message: self.message.clone(),
        }
    }

    /// Reconstruct an entry from its wire form. Fails on a malformed date
    /// or an unknown level name; callers on the retrieval path treat that
    /// as a recoverable "store is unreadable" condition.
    pub fn from_record(record: &LogRecord) -> Result<Self> {
        Ok(Self {
            timestamp: parse_timestamp(&record.date)?,
            level: record.level.parse()?,
            message: record.message.clone(),
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp_iso(),
            self.level,
            self.message
        )
    }
}

/// Serialized shape shared by the JSON and CSV backends. Field order is part
/// of the persisted contract: `date, level, message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub date: String,
    pub level: String,
    pub message: String,
}

/// Parse an ISO-8601 timestamp without timezone, second precision or better.
pub fn parse_timestamp(ts: &str) -> Result<NaiveDateTime> {
    Ok(ts.parse::<NaiveDateTime>()?)
}
