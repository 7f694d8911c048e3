//! # Error Types
//!
//! Structured error types for rc_core. Only structurally invalid inputs are
//! surfaced here: numeric singularities inside the strain and force models
//! (c = 0, c = ∞) resolve to their physical limiting values instead.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_fc(fc_psi: f64) -> CalcResult<()> {
//!     if fc_psi <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "fc_psi",
//!             fc_psi.to_string(),
//!             "Concrete strength must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_fc(-4000.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant carries enough context to identify the offending input
/// without parsing the message text.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Section geometry cannot be analyzed (no layers, layer outside the section)
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// Material or bar designation not found in the lookup tables
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Root search target lies outside the achievable axial force range
    #[error("Target axial force {target} lb is outside the bracket [{lower}, {upper}] lb")]
    UnbracketedRoot { target: f64, lower: f64, upper: f64 },

    /// Inputs were valid but the arithmetic overflowed or produced NaN
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnbracketedRoot error
    pub fn unbracketed_root(target: f64, lower: f64, upper: f64) -> Self {
        CalcError::UnbracketedRoot { target, lower, upper }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the engine
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::InvalidGeometry { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::UnbracketedRoot { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnbracketedRoot { .. } => "UNBRACKETED_ROOT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
