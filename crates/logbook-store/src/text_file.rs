use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use logbook_types::{LogEntry, LogLevel, parse_timestamp};

use crate::Result;
use crate::handler::Handler;

/// Plain-text backend: one `"{timestamp} {LEVEL} {message}"` line per entry,
/// UTF-8, single-space separators. The message is the remainder of the line
/// and may itself contain spaces, but not newlines.
pub struct TextFileHandler {
    path: PathBuf,
}

impl TextFileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let handler = Self { path: path.into() };
        handler.ensure_storage_exists()?;
        Ok(handler)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_line(line: &str) -> Option<LogEntry> {
        let mut parts = line.splitn(3, ' ');
        let timestamp = parse_timestamp(parts.next()?).ok()?;
        let level: LogLevel = parts.next()?.parse().ok()?;
        let message = parts.next()?;
        Some(LogEntry::new(timestamp, level, message))
    }
}

impl Handler for TextFileHandler {
    fn ensure_storage_exists(&self) -> Result<()> {
        // Append mode creates an empty file when absent and leaves an
        // existing one untouched.
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        Ok(())
    }

    fn persist(&self, entry: &LogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} {} {}",
            entry.timestamp_iso(),
            entry.level(),
            entry.message()
        )?;
        Ok(())
    }

    fn retrieve_all(&self) -> Vec<LogEntry> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };

        let mut entries = Vec::new();
        for line in text.lines() {
            match Self::parse_line(line) {
                Some(entry) => entries.push(entry),
                // A single malformed line invalidates the whole read.
                // Simplicity over partial recovery; known limitation.
                None => return Vec::new(),
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn entry(ts: &str, level: LogLevel, message: &str) -> LogEntry {
        LogEntry::new(parse_timestamp(ts).unwrap(), level, message)
    }

    #[test]
    fn test_line_format_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let handler = TextFileHandler::new(&path).unwrap();

        handler
            .persist(&entry("1994-10-02T07:38:07", LogLevel::Debug, "DJs flock by"))
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "1994-10-02T07:38:07 DEBUG DJs flock by\n");
    }

    #[test]
    fn test_message_keeps_internal_spaces() {
        let dir = TempDir::new().unwrap();
        let handler = TextFileHandler::new(dir.path().join("app.log")).unwrap();

        let original = entry(
            "2013-12-10T09:37:54",
            LogLevel::Critical,
            "The quick, brown fox jumps over a lazy dog.",
        );
        handler.persist(&original).unwrap();

        assert_eq!(handler.retrieve_all(), vec![original]);
    }

    #[test]
    fn test_one_malformed_line_empties_the_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let handler = TextFileHandler::new(&path).unwrap();

        handler
            .persist(&entry("1994-10-02T07:38:07", LogLevel::Debug, "good"))
            .unwrap();
        std::fs::write(
            &path,
            "1994-10-02T07:38:07 DEBUG good\nnot a valid line\n",
        )
        .unwrap();

        assert!(handler.retrieve_all().is_empty());
    }

    #[test]
    fn test_unknown_level_empties_the_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let handler = TextFileHandler::new(&path).unwrap();

        std::fs::write(&path, "1994-10-02T07:38:07 NOTICE msg\n").unwrap();

        assert!(handler.retrieve_all().is_empty());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let handler = TextFileHandler::new(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(handler.retrieve_all().is_empty());
    }
}
