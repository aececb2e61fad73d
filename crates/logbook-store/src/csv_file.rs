use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use logbook_types::{LogEntry, LogRecord};

use crate::Result;
use crate::handler::Handler;

const HEADERS: [&str; 3] = ["date", "level", "message"];

/// CSV backend: RFC-4180-style rows under a `date,level,message` header,
/// with the standard comma/quote escaping the `csv` crate applies.
pub struct CsvFileHandler {
    path: PathBuf,
}

impl CsvFileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let handler = Self { path: path.into() };
        handler.ensure_storage_exists()?;
        Ok(handler)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for CsvFileHandler {
    fn ensure_storage_exists(&self) -> Result<()> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if needs_header {
            let mut writer = csv::Writer::from_path(&self.path)?;
            writer.write_record(HEADERS)?;
            writer.flush()?;
        }
        Ok(())
    }

    fn persist(&self, entry: &LogEntry) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let record = entry.to_record();
        writer.write_record([&record.date, &record.level, &record.message])?;
        writer.flush()?;
        Ok(())
    }

    fn retrieve_all(&self) -> Vec<LogEntry> {
        // Header-driven: rows are read by column name, so column order in
        // the file does not matter beyond the written contract.
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(_) => return Vec::new(),
        };

        let mut entries = Vec::new();
        for row in reader.deserialize::<LogRecord>() {
            let entry = row.ok().and_then(|record| LogEntry::from_record(&record).ok());
            match entry {
                Some(entry) => entries.push(entry),
                None => return Vec::new(),
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use logbook_types::{LogLevel, parse_timestamp};
    use tempfile::TempDir;

    fn entry(ts: &str, level: LogLevel, message: &str) -> LogEntry {
        LogEntry::new(parse_timestamp(ts).unwrap(), level, message)
    }

    #[test]
    fn test_new_store_gets_a_header_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.csv");
        CsvFileHandler::new(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "date,level,message\n");
    }

    #[test]
    fn test_header_is_not_rewritten_over_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.csv");
        let handler = CsvFileHandler::new(&path).unwrap();

        let e = entry("1994-10-02T07:38:07", LogLevel::Debug, "quiz prog");
        handler.persist(&e).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        handler.ensure_storage_exists().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_round_trip_with_commas_and_quotes() {
        let dir = TempDir::new().unwrap();
        let handler = CsvFileHandler::new(dir.path().join("app.csv")).unwrap();

        let original = entry(
            "2013-12-10T09:37:54",
            LogLevel::Critical,
            "The quick, brown fox says \"hi\"",
        );
        handler.persist(&original).unwrap();

        assert_eq!(handler.retrieve_all(), vec![original]);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.csv");
        let handler = CsvFileHandler::new(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(handler.retrieve_all().is_empty());
    }

    #[test]
    fn test_bad_level_in_a_row_empties_the_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.csv");
        let handler = CsvFileHandler::new(&path).unwrap();

        fs::write(
            &path,
            "date,level,message\n2013-12-10T09:37:54,NOTICE,msg\n",
        )
        .unwrap();

        assert!(handler.retrieve_all().is_empty());
    }
}
