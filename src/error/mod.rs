//! Error types for growbuf.

use std::fmt;

/// Errors that can occur while growing or filling a buffer.
#[derive(Debug)]
pub enum BufferError {
    /// Storage could not be grown to the requested capacity.
    ///
    /// Covers both allocator refusal and a capacity that cannot be
    /// represented at all.
    Alloc {
        /// The capacity that was requested.
        requested: usize,
    },

    /// An I/O error occurred while reading from a stream.
    Io(std::io::Error),

    /// A `Display` implementation reported an error while formatting.
    Format,

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl BufferError {
    /// Returns true if this is an allocation failure.
    pub fn is_alloc(&self) -> bool {
        matches!(self, BufferError::Alloc { .. })
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Alloc { requested } => {
                write!(f, "allocation failed: cannot grow to {} bytes", requested)
            }
            BufferError::Io(e) => write!(f, "io error: {}", e),
            BufferError::Format => write!(f, "formatter error"),
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BufferError {
    fn from(e: std::io::Error) -> Self {
        BufferError::Io(e)
    }
}

impl From<fmt::Error> for BufferError {
    fn from(_: fmt::Error) -> Self {
        BufferError::Format
    }
}

impl From<BufferError> for std::io::Error {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::Io(e) => e,
            BufferError::Alloc { .. } => std::io::Error::new(std::io::ErrorKind::OutOfMemory, e),
            other => std::io::Error::other(other),
        }
    }
}
