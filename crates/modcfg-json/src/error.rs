// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the JSON document codec.

use modcfg_core::CoreError;
use modcfg_model::ModelError;
use thiserror::Error;

/// Errors raised while encoding or decoding a configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document text is not valid JSON.
    #[error("Document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root is not a JSON object.
    #[error("Document root must be a JSON object")]
    RootNotAnObject,

    /// A device key under `settings` is not a valid UUID.
    #[error("Device identifier must be a valid UUID, got '{key}'")]
    InvalidDeviceKey {
        /// The offending object key.
        key: String,
    },

    /// A sensor key under `sensors` is not a valid UUID.
    #[error("Sensor identifier must be a valid UUID, got '{key}'")]
    InvalidSensorKey {
        /// The offending object key.
        key: String,
    },

    /// A map offset field holds a negative or oversized number.
    #[error("Map offset must be a non-negative integer, got {value}")]
    InvalidMapOffset {
        /// The raw JSON number.
        value: serde_json::Value,
    },

    /// A value-count field holds a negative or oversized number.
    #[error("Value count must be a non-negative integer, got {value}")]
    InvalidValueCount {
        /// The raw JSON number.
        value: serde_json::Value,
    },

    /// A field-level validation failure from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected model mutation while rebuilding the configuration.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl DocumentError {
    /// Returns the error type as a static string, for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            DocumentError::Json(_) => "json",
            DocumentError::RootNotAnObject => "root_not_an_object",
            DocumentError::InvalidDeviceKey { .. } => "invalid_device_key",
            DocumentError::InvalidSensorKey { .. } => "invalid_sensor_key",
            DocumentError::InvalidMapOffset { .. } => "invalid_map_offset",
            DocumentError::InvalidValueCount { .. } => "invalid_value_count",
            DocumentError::Core(e) => e.error_type(),
            DocumentError::Model(e) => e.error_type(),
        }
    }
}

/// Convenience alias for document codec results.
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocumentError::InvalidDeviceKey {
            key: "not-a-uuid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Device identifier must be a valid UUID, got 'not-a-uuid'"
        );
        assert_eq!(err.error_type(), "invalid_device_key");
    }

    #[test]
    fn test_error_type_transparency() {
        let err = DocumentError::from(ModelError::NilSensorId);
        assert_eq!(err.error_type(), ModelError::NilSensorId.error_type());
    }
}
