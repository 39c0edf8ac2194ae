//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
///
/// Every failure is raised synchronously where it is detected. None of them
/// are transient, so callers should not retry.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Malformed hyperparameter such as bin counts or the column list.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Strategy name not present in the strategy registry.
    #[error("Unsupported strategy {got:?}: strategy must be one of {valid:?}")]
    UnsupportedStrategy { got: String, valid: Vec<String> },
    /// A column has fewer distinct values than requested bins.
    #[error(
        "Fewer unique values than bins in column '{column}': {n_unique} unique, {n_bins} bins"
    )]
    InsufficientCardinality {
        column: String,
        n_unique: usize,
        n_bins: usize,
    },
    /// `transform` was called before `fit`.
    #[error("{0} is not fitted yet; call `fit` before `transform`")]
    NotFitted(&'static str),
    /// One or more required columns are absent from a table.
    #[error("Missing columns: {missing:?}")]
    MissingColumns { missing: Vec<String> },
    /// Malformed input table.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Non-finite value where only finite values are accepted.
    #[error("Non-finite value in column '{column}' at row {row}")]
    NonFinite { column: String, row: usize },
    /// Shape mismatch between expected and actual dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(String),
    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::Io(err.to_string())
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PreprocessingError {
    fn from(err: csv::Error) -> Self {
        PreprocessingError::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_configuration() {
        let err = PreprocessingError::Configuration("dim mismatch".to_string());
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_error_display_unsupported_strategy() {
        let err = PreprocessingError::UnsupportedStrategy {
            got: "quantile".to_string(),
            valid: vec!["uniform".to_string(), "entropy".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("quantile"));
        assert!(msg.contains("uniform"));
        assert!(msg.contains("entropy"));
    }

    #[test]
    fn test_error_display_insufficient_cardinality_names_column() {
        let err = PreprocessingError::InsufficientCardinality {
            column: "age".to_string(),
            n_unique: 3,
            n_bins: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("'age'"));
        assert!(msg.contains("3 unique"));
    }

    #[test]
    fn test_error_display_not_fitted() {
        let err = PreprocessingError::NotFitted("BinningEngine");
        assert!(err.to_string().contains("not fitted"));
    }

    #[test]
    fn test_error_display_missing_columns() {
        let err = PreprocessingError::MissingColumns {
            missing: vec!["b".to_string()],
        };
        assert!(err.to_string().contains("Missing columns"));
    }

    #[test]
    fn test_error_display_non_finite() {
        let err = PreprocessingError::NonFinite {
            column: "x".to_string(),
            row: 4,
        };
        assert!(err.to_string().contains("row 4"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::Io(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PreprocessingError = json_err.into();
        assert!(matches!(err, PreprocessingError::Serialization(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::Validation("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
