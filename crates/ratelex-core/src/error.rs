//! Error types for ratelex

use crate::types::Rating;

/// Result type alias using ratelex's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ratelex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scale size or tolerance rejected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A rating bucket has no corpus mass, so its weight is undefined
    #[error("weight undefined for rating {rating}: corpus has no text at that rating")]
    UndefinedWeight { rating: Rating },

    /// Rating outside `[1, max]`
    #[error("rating {rating} outside scale 1..={max}")]
    RatingOutOfRange { rating: Rating, max: Rating },

    /// Histogram and weight table were built for different scales
    #[error("scale mismatch: expected {expected} levels, got {actual}")]
    ScaleMismatch { expected: Rating, actual: Rating },

    /// Discretized intensity fell outside `[0, max]`
    #[error("intensity level {level} outside 0..={max}")]
    IntensityOutOfRange { level: i64, max: i64 },

    /// Configuration loading errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid-configuration error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UndefinedWeight { rating: 3 };
        assert!(err.to_string().contains("rating 3"));

        let err = Error::RatingOutOfRange { rating: 11, max: 10 };
        assert_eq!(err.to_string(), "rating 11 outside scale 1..=10");

        let err = Error::invalid("scale must be even");
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
