/// Core error types for the Revela sequencer.
use std::path::PathBuf;

/// A specialized Result type for Revela operations.
pub type RevelaResult<T> = Result<T, RevelaError>;

/// Top-level error type encompassing all Revela subsystems.
#[derive(Debug, thiserror::Error)]
pub enum RevelaError {
    #[error("parse error: {message} at {line}:{column}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("svg error: {0}")]
    Svg(String),

    #[error("fetch error: {message} ({source_name})")]
    Fetch {
        message: String,
        source_name: String,
    },

    #[error("config error: {message} ({path:?})")]
    Config { message: String, path: PathBuf },

    #[error("IR validation error: {0}")]
    IrValidation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RevelaError {
    /// Create a parse error with source location.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        RevelaError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a fetch error for the named source.
    pub fn fetch(message: impl Into<String>, source_name: impl Into<String>) -> Self {
        RevelaError::Fetch {
            message: message.into(),
            source_name: source_name.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        RevelaError::Config {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Whether this error came from loading the resource rather than reading it.
    pub fn is_fetch(&self) -> bool {
        matches!(self, RevelaError::Fetch { .. } | RevelaError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = RevelaError::parse("unexpected end of stream", 3, 14);
        assert_eq!(
            err.to_string(),
            "parse error: unexpected end of stream at 3:14"
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = RevelaError::fetch("status 404", "https://example.com/roads.svg");
        assert!(err.to_string().contains("status 404"));
        assert!(err.to_string().contains("roads.svg"));
        assert!(err.is_fetch());
    }

    #[test]
    fn test_svg_error_is_not_fetch() {
        assert!(!RevelaError::Svg("no <svg> root element".into()).is_fetch());
    }
}
