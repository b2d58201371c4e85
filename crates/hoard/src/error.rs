//! Error types for hoard

use std::fmt;

/// Result type alias for fallible cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a caller-supplied lookup
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for cache operations
///
/// A missing key is never an error; it is reported as `None`.
#[derive(Debug)]
pub enum Error {
    /// A fallible lookup failed while filling a missing entry
    Lookup(BoxError),
}

impl Error {
    /// Wrap a lookup failure
    pub fn lookup<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Lookup(err.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lookup(e) => write!(f, "Lookup failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lookup(e) => Some(e.as_ref()),
        }
    }
}
