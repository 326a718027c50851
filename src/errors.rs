//! Error types for the prediction engine
//!
//! Insufficient energy or coins are predicates on the store, not errors. The
//! types here cover configuration, persistence, randomness and play
//! validation at the session boundary.

use thiserror::Error;

/// Root error type for all engine operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Randomness error: {0}")]
    Randomness(#[from] RandomnessError),

    #[error("Play rejected: {0}")]
    Play(#[from] PlayError),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Missing required field: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Storage system errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database open failed: {0}")]
    DatabaseOpenFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// The cryptographic entropy source could not produce bytes.
///
/// There is no fallback generator: a round that hits this error produces no
/// result.
#[derive(Debug, Error)]
pub enum RandomnessError {
    #[error("Secure random source unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a play is refused before any state changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("No game selected")]
    NoGameSelected,

    #[error("No prediction selected")]
    NoPrediction,

    #[error("Prediction does not belong to the {0} game")]
    PredictionMismatch(String),

    #[error("Invalid prediction: {0}")]
    InvalidPrediction(String),

    #[error("Game unlocks at level {required} (current level {level})")]
    GameLocked { required: u32, level: u32 },

    #[error("Bet {bet} is below the minimum of {min_bet}")]
    BetBelowMinimum { min_bet: u64, bet: u64 },

    #[error("Out of energy")]
    OutOfEnergy,

    #[error("Insufficient coins: have {coins}, bet {bet}")]
    InsufficientCoins { coins: u64, bet: u64 },
}

// External error conversions
impl From<rocksdb::Error> for AppError {
    fn from(e: rocksdb::Error) -> Self {
        AppError::Storage(StorageError::WriteFailed(e.to_string()))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                AppError::Storage(StorageError::PermissionDenied(e.to_string()))
            }
            _ => AppError::Storage(StorageError::ReadFailed(e.to_string())),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(StorageError::CorruptedData(e.to_string()))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
    }
}

// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let config_error = ConfigurationError::ValidationFailed("test".to_string());
        let app_error = AppError::Configuration(config_error);

        assert!(app_error.to_string().contains("Configuration error"));
        assert!(app_error.to_string().contains("test"));
    }

    #[test]
    fn test_play_error_details() {
        let err = PlayError::GameLocked { required: 3, level: 1 };
        assert!(err.to_string().contains("level 3"));
        assert!(err.to_string().contains("current level 1"));

        let err = PlayError::InsufficientCoins { coins: 5, bet: 10 };
        assert!(err.to_string().contains("have 5"));
    }

    #[test]
    fn test_error_conversion() {
        let app_error: AppError = RandomnessError::Unavailable("no device".into()).into();
        match app_error {
            AppError::Randomness(_) => {}
            _ => panic!("Expected randomness error"),
        }
    }

    #[test]
    fn test_error_source() {
        let app_error = AppError::Storage(StorageError::ReadFailed("disk".into()));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_io_permission_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let app_error: AppError = io.into();
        assert!(matches!(
            app_error,
            AppError::Storage(StorageError::PermissionDenied(_))
        ));
    }
}
