use std::fmt;

/// Result type for logbook-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing entries from persisted data
#[derive(Debug)]
pub enum Error {
    /// Timestamp string is not valid ISO-8601
    Timestamp(chrono::ParseError),

    /// Level name does not match any known severity
    Level(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timestamp(err) => write!(f, "Invalid timestamp: {}", err),
            Error::Level(name) => write!(f, "Unknown log level: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Timestamp(err) => Some(err),
            Error::Level(_) => None,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Timestamp(err)
    }
}
