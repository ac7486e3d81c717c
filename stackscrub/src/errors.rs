//! Structured error types for stackscrub
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! The parse pipeline itself is total and has no error type; these cover the
//! surfaces that touch the filesystem or serde.

use thiserror::Error;

/// Errors from loading [`ScrubOptions`](crate::ScrubOptions) out of a file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse options file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from exporting cleaned frames.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write frame file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize frames: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().contains("options file"));
        assert!(err.to_string().contains("gone"));
    }
}
