//! Error types for the PetSync client.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire PetSync client.
///
/// Gateway failures are NOT represented here: remote calls are normalized into
/// [`ApiResponse`](crate::gateway::ApiResponse) and never surface as errors.
/// This type covers local failures (storage, configuration, serialization).
#[derive(Error, Debug, Clone, Serialize)]
pub enum PetSyncError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable storage error (key-value slots)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session encryption/decryption error
    #[error("Security error: {0}")]
    Security(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PetSyncError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PetSyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PetSyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PetSyncError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PetSyncError>`.
pub type Result<T> = std::result::Result<T, PetSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_with_kind() {
        let err: PetSyncError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, PetSyncError::Io { .. }));
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn json_error_converts_to_serialization() {
        let err: PetSyncError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        match err {
            PetSyncError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn helpers_build_expected_variants() {
        assert!(PetSyncError::not_found("pet", "7").is_not_found());
        assert!(!PetSyncError::config("bad url").is_not_found());
        assert_eq!(
            PetSyncError::not_found("pet", "7").to_string(),
            "Entity not found: pet '7'"
        );
    }
}
