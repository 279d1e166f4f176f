//! Error types for cache operations.
//!
//! Every failure carries exactly one [`ErrorKind`] from a closed set, a
//! message describing the specific failure, and optionally the underlying
//! cause. The kinds are backend-agnostic: the in-memory backend only ever
//! produces [`ErrorKind::OperationFailed`], [`ErrorKind::InvalidKey`] and
//! [`ErrorKind::InvalidValue`].

use std::error::Error as StdError;
use std::fmt;

/// Boxed cause attached to a [`CacheError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The category of a cache failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Could not reach the cache backend.
    ConnectionFailed,
    /// An operation could not be completed, including use after close.
    OperationFailed,
    /// A value could not be encoded or decoded.
    SerializationError,
    /// The key was rejected by validation.
    InvalidKey,
    /// The value was rejected by validation.
    InvalidValue,
    /// The backend did not answer in time.
    Timeout,
    /// The backend ran out of room.
    MemoryFull,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::ConnectionFailed,
        ErrorKind::OperationFailed,
        ErrorKind::SerializationError,
        ErrorKind::InvalidKey,
        ErrorKind::InvalidValue,
        ErrorKind::Timeout,
        ErrorKind::MemoryFull,
        ErrorKind::Unknown,
    ];

    /// Human-readable description of the kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionFailed => "Failed to connect to cache",
            ErrorKind::OperationFailed => "Cache operation failed",
            ErrorKind::SerializationError => "Failed to serialize or deserialize value",
            ErrorKind::InvalidKey => "Invalid cache key",
            ErrorKind::InvalidValue => "Invalid cache value",
            ErrorKind::Timeout => "Cache operation timed out",
            ErrorKind::MemoryFull => "Cache memory is full",
            ErrorKind::Unknown => "Unknown cache error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The error type returned by every fallible cache operation.
#[derive(Debug, thiserror::Error)]
#[error("{}: {message}", .kind.description())]
pub struct CacheError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl CacheError {
    /// Create an error of the given kind with no underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidKey, message)
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidValue, message)
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OperationFailed, message)
    }

    /// The error every operation returns once the cache has been closed.
    pub fn closed() -> Self {
        Self::operation_failed("cache is closed")
    }

    /// The category of this failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The failure-specific message, without the kind description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A specialized Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
