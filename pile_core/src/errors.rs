//! # Error Types
//!
//! Structured error types for pile_core. Each variant carries enough
//! context to understand and fix the offending input programmatically,
//! and every error serializes to tagged JSON for front-end consumption.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_m: f64) -> CalcResult<()> {
//!     if diameter_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_m",
//!             diameter_m.to_string(),
//!             "Pile diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Note that an undefined tip resistance (no NSPT data in the averaging
/// zone around the pile tip) is deliberately *not* an error variant: it
/// surfaces as NaN in the capacity profile and the caller detects it there.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A soil layer is missing a field its behavior + method requires
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Pile depth is not covered by the defined soil layers
    #[error(
        "Insufficient stratigraphy: pile depth {pile_depth_m} m exceeds \
         defined layer thickness {total_thickness_m} m"
    )]
    InsufficientStratigraphy {
        pile_depth_m: f64,
        total_thickness_m: f64,
    },

    /// No segment contains a sampled depth. This indicates a bug in
    /// segmentation or grid generation, not a user input problem.
    #[error("No soil layer found at depth {depth_m} m (internal invariant violation)")]
    NoLayerAtDepth { depth_m: f64 },

    /// Non-positive diameter or spacing passed to the group efficiency calc
    #[error("Invalid group input for '{field}': {value}")]
    InvalidGroupInput { field: String, value: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidGroupInput error
    pub fn invalid_group_input(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::InvalidGroupInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InsufficientStratigraphy { .. } => "INSUFFICIENT_STRATIGRAPHY",
            CalcError::NoLayerAtDepth { .. } => "NO_LAYER_AT_DEPTH",
            CalcError::InvalidGroupInput { .. } => "INVALID_GROUP_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("diameter_m", "-0.4", "Pile diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("nspt").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::InsufficientStratigraphy {
                pile_depth_m: 20.0,
                total_thickness_m: 12.0,
            }
            .error_code(),
            "INSUFFICIENT_STRATIGRAPHY"
        );
        assert_eq!(
            CalcError::invalid_group_input("spacing_m", "0").error_code(),
            "INVALID_GROUP_INPUT"
        );
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::InsufficientStratigraphy {
            pile_depth_m: 15.0,
            total_thickness_m: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("15"));
        assert!(msg.contains("10"));
    }
}
