use std::path::{Path, PathBuf};

use logbook_types::{LogEntry, LogRecord};
use rusqlite::{Connection, params};

use crate::Result;
use crate::handler::Handler;

/// Table used when none is configured.
pub const DEFAULT_TABLE: &str = "log";

/// SQLite backend: one row per entry in
/// `(id INTEGER PRIMARY KEY, timestamp TEXT, level TEXT, message TEXT)`.
/// Every operation opens and closes its own connection; there is no pooling
/// and no cross-call state.
pub struct SqliteHandler {
    db_path: PathBuf,
    table: String,
}

impl SqliteHandler {
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_table(db_path, DEFAULT_TABLE)
    }

    pub fn with_table(db_path: impl Into<PathBuf>, table: impl Into<String>) -> Result<Self> {
        let handler = Self {
            db_path: db_path.into(),
            table: table.into(),
        };
        handler.ensure_storage_exists()?;
        Ok(handler)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn open(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn fetch_all(&self) -> Result<Vec<LogEntry>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT timestamp, level, message FROM {} ORDER BY timestamp ASC",
            self.table
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(LogRecord {
                date: row.get(0)?,
                level: row.get(1)?,
                message: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(LogEntry::from_record(&row?)?);
        }
        Ok(entries)
    }
}

impl Handler for SqliteHandler {
    fn ensure_storage_exists(&self) -> Result<()> {
        let conn = self.open()?;
        // Table names cannot be bound as parameters; the name is part of
        // the handler's configuration, not caller input.
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL,
                level TEXT NOT NULL,
                message TEXT NOT NULL
            )",
            self.table
        ))?;
        Ok(())
    }

    fn persist(&self, entry: &LogEntry) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (timestamp, level, message) VALUES (?1, ?2, ?3)",
                self.table
            ),
            params![
                entry.timestamp_iso(),
                entry.level().as_str(),
                entry.message()
            ],
        )?;
        Ok(())
    }

    fn retrieve_all(&self) -> Vec<LogEntry> {
        self.fetch_all().unwrap_or_default()
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
    fn test_creates_default_table() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("logs.db");
        SqliteHandler::new(&db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'log'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_round_trip_with_custom_table() {
        let dir = TempDir::new().unwrap();
        let handler =
            SqliteHandler::with_table(dir.path().join("logs.db"), "audit").unwrap();

        let original = entry("2017-03-17T08:54:58", LogLevel::Error, "zebras vex");
        handler.persist(&original).unwrap();

        assert_eq!(handler.retrieve_all(), vec![original]);
    }

    #[test]
    fn test_retrieval_orders_by_timestamp() {
        let dir = TempDir::new().unwrap();
        let handler = SqliteHandler::new(dir.path().join("logs.db")).unwrap();

        let newer = entry("2017-03-17T08:54:58", LogLevel::Error, "newer");
        let older = entry("1994-10-02T07:38:07", LogLevel::Debug, "older");
        handler.persist(&newer).unwrap();
        handler.persist(&older).unwrap();

        assert_eq!(handler.retrieve_all(), vec![older, newer]);
    }

    #[test]
    fn test_ensure_twice_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let handler = SqliteHandler::new(dir.path().join("logs.db")).unwrap();

        let e = entry("1996-12-28T03:32:42", LogLevel::Critical, "whelps");
        handler.persist(&e).unwrap();
        handler.ensure_storage_exists().unwrap();

        assert_eq!(handler.retrieve_all(), vec![e]);
    }

    #[test]
    fn test_corrupt_row_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("logs.db");
        let handler = SqliteHandler::new(&db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO log (timestamp, level, message) VALUES ('nope', 'INFO', 'm')",
            [],
        )
        .unwrap();

        assert!(handler.retrieve_all().is_empty());
    }
}
