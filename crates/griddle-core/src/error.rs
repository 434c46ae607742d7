use crate::Dialect;
use std::fmt;

/// An error that can occur in Griddle.
///
/// Configuration errors (invalid or duplicate field definitions, an
/// unrecognized dialect, bulk-population mismatches) surface at construction
/// or setup call sites. Operational errors from a driver are wrapped by
/// [`Error::driver`] and, inside CRUD calls, captured into the returned
/// outcome rather than propagated.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid field descriptor: {0}")]
    InvalidField(String),

    #[error("field `{0}` is already registered")]
    DuplicateField(String),

    #[error("unrecognized connection dialect in `{0}`")]
    UnknownDialect(String),

    #[error("no driver compiled in for {0}")]
    UnsupportedDriver(Dialect),

    #[error("source map is empty")]
    EmptySource,

    #[error("source has {actual} entries but the model maps {expected} fields")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("no mapped property for source key `{0}`")]
    PropertyNotFound(String),

    #[error("driver error: {0}")]
    Driver(String),
}

impl Error {
    /// Wrap a driver-level failure.
    pub fn driver(err: impl fmt::Display) -> Error {
        Error::Driver(err.to_string())
    }
}
