//! # Error Types
//!
//! Structured error types for calc_core. Each failure carries enough context
//! for the calling layer to decide how to present it: the calculator turns
//! math errors into its error display, the assistant turns request errors
//! into a dismissable inline message.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult, MathErrorKind};
//!
//! fn checked_div(a: f64, b: f64) -> CalcResult<f64> {
//!     if b == 0.0 {
//!         return Err(CalcError::math(
//!             format!("{a}/{b}"),
//!             MathErrorKind::DivisionByZero,
//!             "division by zero",
//!         ));
//!     }
//!     Ok(a / b)
//! }
//!
//! assert_eq!(checked_div(1.0, 0.0).unwrap_err().error_code(), "MATH_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathErrorKind {
    /// Malformed input: bad token, unbalanced parentheses, empty input
    Parse,
    /// A zero divisor produced a non-finite result
    DivisionByZero,
    /// A function was applied outside its real domain (`ln(-1)`, `√(-4)`)
    Domain,
    /// The result is not finite for any other reason (`171!`)
    Overflow,
}

impl MathErrorKind {
    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            MathErrorKind::Parse => "malformed expression",
            MathErrorKind::DivisionByZero => "division by zero",
            MathErrorKind::Domain => "argument outside function domain",
            MathErrorKind::Overflow => "result is not a finite number",
        }
    }
}

impl std::fmt::Display for MathErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Structured error type for calculator, drawing and assistant operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Expression could not be evaluated to a finite number
    #[error("Math error in '{expression}': {kind} - {reason}")]
    MathEvaluation {
        expression: String,
        kind: MathErrorKind,
        reason: String,
    },

    /// The interpretation collaborator failed (transport, status or parse)
    #[error("Interpretation request failed: {reason}")]
    InterpretationRequest { reason: String },

    /// Raster allocation or encoding failed
    #[error("Raster error: {operation} - {reason}")]
    Raster { operation: String, reason: String },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A configuration value could not be read
    #[error("Configuration error: {key} - {reason}")]
    Configuration { key: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create a MathEvaluation error
    pub fn math(expression: impl Into<String>, kind: MathErrorKind, reason: impl Into<String>) -> Self {
        CalcError::MathEvaluation {
            expression: expression.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Create an InterpretationRequest error
    pub fn interpretation(reason: impl Into<String>) -> Self {
        CalcError::InterpretationRequest {
            reason: reason.into(),
        }
    }

    /// Create a Raster error
    pub fn raster(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Raster {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Configuration error
    pub fn configuration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The math error kind, if this is a math error
    pub fn math_kind(&self) -> Option<MathErrorKind> {
        match self {
            CalcError::MathEvaluation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check if this is a recoverable error (the user can simply retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::MathEvaluation { .. } | CalcError::InterpretationRequest { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MathEvaluation { .. } => "MATH_ERROR",
            CalcError::InterpretationRequest { .. } => "AI_ERROR",
            CalcError::Raster { .. } => "RASTER_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
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
