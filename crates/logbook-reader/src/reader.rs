use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use logbook_store::Handler;
use logbook_types::{LogEntry, LogLevel};
use regex::Regex;

/// Query engine over one handler's full history.
///
/// Every public operation pulls the entire history once via
/// `Handler::retrieve_all`, applies the optional inclusive date range, then
/// its own criterion. Results keep the handler's native order; nothing is
/// re-sorted. When a date bound is given and nothing falls inside it, the
/// result is empty — there is no fallback to the unfiltered set.
pub struct LogReader<H: Handler> {
    handler: H,
}

impl<H: Handler> LogReader<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Entries whose message contains `text` as a literal, case-sensitive
    /// substring, optionally restricted to a date range.
    pub fn find_by_text(
        &self,
        text: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Vec<LogEntry> {
        self.filter_by_date_range(start, end)
            .into_iter()
            .filter(|entry| entry.message().contains(text))
            .collect()
    }

    /// Entries whose message matches `pattern` anywhere (unanchored search),
    /// optionally restricted to a date range. An invalid pattern yields an
    /// empty result rather than an error.
    pub fn find_by_regex(
        &self,
        pattern: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Vec<LogEntry> {
        let pattern = match Regex::new(pattern) {
            Ok(pattern) => pattern,
            Err(_) => return Vec::new(),
        };

        self.filter_by_date_range(start, end)
            .into_iter()
            .filter(|entry| pattern.is_match(entry.message()))
            .collect()
    }

    /// Entries partitioned by severity. Levels with no entries are absent
    /// from the map; per-level order is the handler's order.
    pub fn group_by_level(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> BTreeMap<LogLevel, Vec<LogEntry>> {
        let mut groups: BTreeMap<LogLevel, Vec<LogEntry>> = BTreeMap::new();
        for entry in self.filter_by_date_range(start, end) {
            groups.entry(entry.level()).or_default().push(entry);
        }
        groups
    }

    /// Entries partitioned by `"YYYY-MM"` month key. Keys with no entries
    /// never appear.
    pub fn group_by_month(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> BTreeMap<String, Vec<LogEntry>> {
        let mut groups: BTreeMap<String, Vec<LogEntry>> = BTreeMap::new();
        for entry in self.filter_by_date_range(start, end) {
            groups.entry(entry.month_key()).or_default().push(entry);
        }
        groups
    }

    /// Full history restricted to `start <= timestamp <= end`, both bounds
    /// inclusive and each optional.
    fn filter_by_date_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Vec<LogEntry> {
        let entries = self.handler.retrieve_all();
        if start.is_none() && end.is_none() {
            return entries;
        }

        entries
            .into_iter()
            .filter(|entry| {
                start.map_or(true, |s| entry.timestamp() >= s)
                    && end.map_or(true, |e| entry.timestamp() <= e)
            })
            .collect()
    }
}
