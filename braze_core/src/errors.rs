//! # Error Types
//!
//! Structured error types for braze_core. Every failure the resolver or the
//! document helpers can produce is a variant here, so a caller (CLI, UI, or a
//! script reading JSON) can branch on the kind of failure instead of parsing
//! message text.
//!
//! ## Example
//!
//! ```rust
//! use braze_core::errors::{GuideError, GuideResult};
//!
//! fn require_known(symbol: &str, value: Option<f64>) -> GuideResult<f64> {
//!     value.ok_or_else(|| GuideError::under_constrained("punching-force", vec![symbol.to_string()]))
//! }
//!
//! assert!(require_known("thickness", None).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for braze_core operations
pub type GuideResult<T> = Result<T, GuideError>;

/// Structured error type for resolver and reference operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GuideError {
    /// No catalog equation matches the identifier
    #[error("Unknown equation: '{equation_id}'")]
    UnknownEquation { equation_id: String },

    /// A binding names a symbol that is not part of the equation
    #[error("Unrecognized variable '{variable}' for equation '{equation}'")]
    UnrecognizedVariable { equation: String, variable: String },

    /// More than one variable was left unbound
    #[error("Under-constrained: equation '{equation}' is missing values for {}", missing.join(", "))]
    UnderConstrained {
        equation: String,
        missing: Vec<String>,
    },

    /// Every variable was bound, leaving nothing to solve for
    #[error("Over-constrained: every variable of equation '{equation}' already has a value")]
    OverConstrained { equation: String },

    /// No real, physically valid root exists
    #[error("No real solution for '{unknown}' in equation '{equation}'")]
    NoRealSolution { equation: String, unknown: String },

    /// Several physically valid roots remain
    #[error("Ambiguous solution for '{unknown}' in equation '{equation}': {roots:?}")]
    AmbiguousSolution {
        equation: String,
        unknown: String,
        roots: Vec<f64>,
    },

    /// A known value is not finite or violates its variable's sign constraint
    #[error("Invalid value for '{variable}': {value} - {reason}")]
    InvalidValue {
        variable: String,
        value: String,
        reason: String,
    },

    /// The residual reduces to a polynomial the closed-form solver cannot handle
    #[error("Unsupported degree {degree} when solving for '{unknown}' in equation '{equation}'")]
    UnsupportedDegree {
        equation: String,
        unknown: String,
        degree: usize,
    },

    /// Reference table not found
    #[error("Reference table not found: {table}")]
    TableNotFound { table: String },

    /// Reference page not found
    #[error("Reference page not found: {page}")]
    PageNotFound { page: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Reference document could not be fetched
    #[error("Download failed for {document}: {reason}")]
    DownloadFailed { document: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl GuideError {
    /// Create an UnknownEquation error
    pub fn unknown_equation(equation_id: impl Into<String>) -> Self {
        GuideError::UnknownEquation {
            equation_id: equation_id.into(),
        }
    }

    /// Create an UnrecognizedVariable error
    pub fn unrecognized_variable(equation: impl Into<String>, variable: impl Into<String>) -> Self {
        GuideError::UnrecognizedVariable {
            equation: equation.into(),
            variable: variable.into(),
        }
    }

    /// Create an UnderConstrained error
    pub fn under_constrained(equation: impl Into<String>, missing: Vec<String>) -> Self {
        GuideError::UnderConstrained {
            equation: equation.into(),
            missing,
        }
    }

    /// Create an OverConstrained error
    pub fn over_constrained(equation: impl Into<String>) -> Self {
        GuideError::OverConstrained {
            equation: equation.into(),
        }
    }

    /// Create a NoRealSolution error
    pub fn no_real_solution(equation: impl Into<String>, unknown: impl Into<String>) -> Self {
        GuideError::NoRealSolution {
            equation: equation.into(),
            unknown: unknown.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(variable: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GuideError::InvalidValue {
            variable: variable.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GuideError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a DownloadFailed error
    pub fn download_failed(document: impl Into<String>, reason: impl Into<String>) -> Self {
        GuideError::DownloadFailed {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    ///
    /// Resolver errors are deterministic given their input, so only network
    /// failures qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GuideError::DownloadFailed { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GuideError::UnknownEquation { .. } => "UNKNOWN_EQUATION",
            GuideError::UnrecognizedVariable { .. } => "UNRECOGNIZED_VARIABLE",
            GuideError::UnderConstrained { .. } => "UNDER_CONSTRAINED",
            GuideError::OverConstrained { .. } => "OVER_CONSTRAINED",
            GuideError::NoRealSolution { .. } => "NO_REAL_SOLUTION",
            GuideError::AmbiguousSolution { .. } => "AMBIGUOUS_SOLUTION",
            GuideError::InvalidValue { .. } => "INVALID_VALUE",
            GuideError::UnsupportedDegree { .. } => "UNSUPPORTED_DEGREE",
            GuideError::TableNotFound { .. } => "TABLE_NOT_FOUND",
            GuideError::PageNotFound { .. } => "PAGE_NOT_FOUND",
            GuideError::FileError { .. } => "FILE_ERROR",
            GuideError::DownloadFailed { .. } => "DOWNLOAD_FAILED",
            GuideError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GuideError {
    fn from(e: serde_json::Error) -> Self {
        GuideError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GuideError::under_constrained("shear-stress", vec!["force".into(), "area".into()]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnderConstrained\""));
        let roundtrip: GuideError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(GuideError::unknown_equation("x").error_code(), "UNKNOWN_EQUATION");
        assert_eq!(GuideError::over_constrained("shear-stress").error_code(), "OVER_CONSTRAINED");
        assert_eq!(
            GuideError::no_real_solution("bending-stress", "moment").error_code(),
            "NO_REAL_SOLUTION"
        );
    }

    #[test]
    fn test_under_constrained_message_lists_missing() {
        let error = GuideError::under_constrained("punching-force", vec!["force".into(), "thickness".into()]);
        assert_eq!(
            error.to_string(),
            "Under-constrained: equation 'punching-force' is missing values for force, thickness"
        );
    }

    #[test]
    fn test_only_downloads_are_recoverable() {
        assert!(GuideError::download_failed("MIL-S-23284A", "timed out").is_recoverable());
        assert!(!GuideError::over_constrained("shear-stress").is_recoverable());
        assert!(!GuideError::unknown_equation("nope").is_recoverable());
    }
}
