use std::fs;
use std::path::{Path, PathBuf};

use logbook_types::{LogEntry, LogRecord};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::Result;
use crate::handler::Handler;

/// JSON backend: the store is a single array of `{date, level, message}`
/// objects, rewritten whole on every persist (read-modify-write, not
/// append-only at the storage level).
pub struct JsonFileHandler {
    path: PathBuf,
}

impl JsonFileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let handler = Self { path: path.into() };
        handler.ensure_storage_exists()?;
        Ok(handler)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current array contents; a missing, empty or malformed store reads as
    /// an empty array so a persist can always proceed.
    fn load_records(&self) -> Vec<LogRecord> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn save_records(&self, records: &[LogRecord]) -> Result<()> {
        // Pretty-printed with 4-space indentation; part of the on-disk
        // contract, not cosmetics.
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }
}

impl Handler for JsonFileHandler {
    fn ensure_storage_exists(&self) -> Result<()> {
        if !self.path.exists() {
            fs::write(&self.path, "[]")?;
        }
        Ok(())
    }

    fn persist(&self, entry: &LogEntry) -> Result<()> {
        let mut records = self.load_records();
        records.push(entry.to_record());
        self.save_records(&records)
    }

    fn retrieve_all(&self) -> Vec<LogEntry> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };
        let records: Vec<LogRecord> = match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(_) => return Vec::new(),
        };

        let mut entries = Vec::with_capacity(records.len());
        for record in &records {
            match LogEntry::from_record(record) {
                Ok(entry) => entries.push(entry),
                Err(_) => return Vec::new(),
            }
        }
        entries
    }
}
