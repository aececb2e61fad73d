use chrono::Local;

use logbook_store::{Handler, Result};
use logbook_types::{LogEntry, LogLevel};

/// Front door of the write path: stamps one entry with the current local
/// time and fans it out to every handler in order.
///
/// Handlers are fixed at construction. Calls below the minimum level are
/// dropped before an entry is ever built; the first persist failure
/// propagates to the caller.
pub struct Logger {
    handlers: Vec<Box<dyn Handler>>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self {
            handlers,
            min_level: LogLevel::Debug,
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn warning(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn critical(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Critical, message)
    }

    fn log(&self, level: LogLevel, message: &str) -> Result<()> {
        if level < self.min_level {
            return Ok(());
        }

        let entry = LogEntry::new(Local::now().naive_local(), level, message);
        for handler in &self.handlers {
            handler.persist(&entry)?;
        }
        Ok(())
    }
}
