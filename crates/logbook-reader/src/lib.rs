// Read-side queries over a handler's full history
// All filtering and grouping happens in memory; every public call re-reads
// the backing store through the handler, nothing is cached between calls

mod reader;

pub use reader::LogReader;
