//! Error types shared across Scanpath crates.

use std::path::PathBuf;

/// Top-level error type for Scanpath operations.
#[derive(Debug, thiserror::Error)]
pub enum ScanpathError {
    #[error("Shape error: {message}")]
    Shape { message: String },

    #[error("Degenerate correlation: response is flat at {value}")]
    DegenerateCorrelation { value: f64 },

    #[error("Insufficient data: {message}")]
    InsufficientData { message: String },

    #[error("Decode error in {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Encode error in {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ScanpathError.
pub type ScanpathResult<T> = Result<T, ScanpathError>;

impl ScanpathError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape {
            message: msg.into(),
        }
    }

    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData {
            message: msg.into(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error came from a perfectly flat correlation response.
    ///
    /// Callers that prefer an all-zero map over aborting check this.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateCorrelation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_readable() {
        let err = ScanpathError::shape("expected 160x160, got 120x160");
        assert_eq!(err.to_string(), "Shape error: expected 160x160, got 120x160");

        let err = ScanpathError::decode("in.gif", "truncated stream");
        assert_eq!(err.to_string(), "Decode error in in.gif: truncated stream");
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(ScanpathError::DegenerateCorrelation { value: 0.0 }.is_degenerate());
        assert!(!ScanpathError::insufficient_data("empty").is_degenerate());
    }
}
