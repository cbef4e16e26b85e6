//! Error types for the array property writer.

use thiserror::Error;

/// Main error type for Ogawa write operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Sample data type or shape disagrees with the property header
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Acyclic time sampling has no stored time left for another sample
    #[error("Sample index {index} exceeds the {stored_times} stored times of acyclic sampling")]
    SamplingExhausted { index: u32, stored_times: usize },

    /// Operation is not valid in the writer's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Lookup by index or name failed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad construction input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Write operation failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Group or store is frozen and cannot be modified
    #[error("Group is frozen and cannot be modified")]
    Frozen,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a type mismatch error.
    pub fn mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type alias for write operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::SamplingExhausted { index: 4, stored_times: 4 };
        assert!(e.to_string().contains("4 stored times"));

        let e = Error::mismatch("float32_t[3]", "int32_t");
        assert!(e.to_string().contains("float32_t[3]"));
        assert!(e.to_string().contains("int32_t"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
