//! Error types for the Agency Cost Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during cost allocation and
//! estimation.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Agency Cost Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use agency_cost_engine::error::EngineError;
///
/// let error = EngineError::DivisionByZero {
///     context: "no active employees to share overhead".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Division by zero: no active employees to share overhead"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A divisor in the cost layering was zero or negative.
    #[error("Division by zero: {context}")]
    DivisionByZero {
        /// Which step of the calculation had no valid divisor.
        context: String,
    },

    /// An input value is impossible (negative money, out-of-range days, ...).
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Offer creation was attempted while staffed hours do not cover the
    /// hours required by the selected services.
    #[error(
        "Insufficient staffing: {required_hours} hours required, {assigned_hours} assigned (short by {shortfall_hours})"
    )]
    InsufficientStaffing {
        /// Hours required by the selected services.
        required_hours: Decimal,
        /// Hours assigned to staff.
        assigned_hours: Decimal,
        /// `required_hours - assigned_hours`.
        shortfall_hours: Decimal,
    },

    /// An employee referenced by id is not part of the snapshot.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: String,
    },

    /// A service referenced by id is not in the active catalog.
    #[error("Service not found: {service_id}")]
    ServiceNotFound {
        /// The missing service id.
        service_id: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidInput`] raised when an amount
    /// exceeds what a `Decimal` can represent.
    pub fn out_of_range(field: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: "amount out of range".to_string(),
        }
    }

    /// Shorthand for building an [`EngineError::DivisionByZero`].
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        EngineError::DivisionByZero {
            context: context.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
