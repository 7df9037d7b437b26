//! Error types for the trip settlement engine.
//!
//! The pure ledger functions never fail; these errors come from loading
//! configuration and from validating a trip snapshot before it is settled.

use thiserror::Error;

/// The main error type for the settlement engine.
///
/// # Example
///
/// ```
/// use trip_settlement::error::EngineError;
///
/// let error = EngineError::UnsupportedCurrency {
///     code: "XYZ".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported currency: XYZ");
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

    /// Configuration parsed but holds a value the engine cannot run with.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The currency code is not in the supported currency table.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The currency code that was requested.
        code: String,
    },

    /// An expense split was structurally invalid.
    #[error("Invalid expense '{expense_id}': {message}")]
    InvalidExpense {
        /// The ID of the invalid expense.
        expense_id: String,
        /// A description of what made the expense invalid.
        message: String,
    },

    /// A settlement record was structurally invalid.
    #[error("Invalid settlement '{settlement_id}': {message}")]
    InvalidSettlement {
        /// The ID of the invalid settlement.
        settlement_id: String,
        /// A description of what made the settlement invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "tolerance".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'tolerance': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_expense_displays_id_and_message() {
        let error = EngineError::InvalidExpense {
            expense_id: "exp_001".to_string(),
            message: "negative share for 'bob'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid expense 'exp_001': negative share for 'bob'"
        );
    }

    #[test]
    fn test_invalid_settlement_displays_id_and_message() {
        let error = EngineError::InvalidSettlement {
            settlement_id: "set_001".to_string(),
            message: "payer and payee are the same participant".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid settlement 'set_001': payer and payee are the same participant"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unsupported() -> EngineResult<()> {
            Err(EngineError::UnsupportedCurrency {
                code: "ZZZ".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unsupported()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
