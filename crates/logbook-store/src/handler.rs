use logbook_types::LogEntry;

use crate::Result;

/// A persistence backend: appends single entries and returns the full
/// ordered history.
///
/// Failure semantics are asymmetric on purpose. Storage initialization and
/// persist failures propagate (a log write that cannot happen is worth
/// surfacing); retrieval failures never do — a store that is missing,
/// empty, unreadable or malformed reads as no entries, so a degraded read
/// cannot crash a logging caller.
pub trait Handler {
    /// Create the backing store with its medium-specific initial state when
    /// absent. Idempotent; never alters an existing non-empty store.
    /// Constructors call this once, and a failure here leaves no usable
    /// handler behind.
    fn ensure_storage_exists(&self) -> Result<()>;

    /// Append one entry durably.
    fn persist(&self, entry: &LogEntry) -> Result<()>;

    /// Every persisted entry in storage order, oldest first.
    fn retrieve_all(&self) -> Vec<LogEntry>;
}
